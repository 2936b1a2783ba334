//! The Lettercraft form and its generation state machine.
//!
//! ```text
//! Idle ──begin──▶ Submitting{progress} ──finish(Ok)──▶ Succeeded{letter}
//!   ▲                                   └─finish(Err)─▶ Failed{message}
//!   └─────── any terminal state ──begin──▶ Submitting
//! ```
//!
//! `begin_generation` is guarded: both slots must hold a non-empty file and
//! no request may already be in flight.

use std::io;
use std::time::Instant;

use bytes::Bytes;
use tracing::warn;

use crate::client::clipboard::{ClipboardSink, CopyFeedback};
use crate::client::http::ClientError;
use crate::client::progress::percent;
use crate::craft::options::{DEFAULT_LANGUAGE, DEFAULT_TONE};

pub const INVALID_FILE_TYPE_MESSAGE: &str = "Please upload a PDF or image file.";
pub const MISSING_FILES_MESSAGE: &str = "Please upload both a resume and job description.";
pub const GENERATION_FAILED_MESSAGE: &str =
    "An error occurred while generating the cover letter. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Resume,
    JobDescription,
}

/// A file picked by the user, held in memory until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Only PDFs and images may be selected.
pub fn is_accepted_mime_type(mime_type: &str) -> bool {
    mime_type == "application/pdf" || mime_type.starts_with("image/")
}

/// Everything one generation request carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub resume: SelectedFile,
    pub job_description: SelectedFile,
    pub language: String,
    pub tone: String,
}

impl Submission {
    pub fn total_bytes(&self) -> u64 {
        (self.resume.bytes.len() + self.job_description.bytes.len()) as u64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    Submitting {
        progress: u8,
    },
    Succeeded {
        letter: String,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone)]
pub struct Lettercraft {
    resume: Option<SelectedFile>,
    job_description: Option<SelectedFile>,
    language: String,
    tone: String,
    state: UploadState,
    validation_error: Option<String>,
    copy_feedback: CopyFeedback,
}

impl Default for Lettercraft {
    fn default() -> Self {
        Self::new()
    }
}

impl Lettercraft {
    pub fn new() -> Self {
        Self {
            resume: None,
            job_description: None,
            language: DEFAULT_LANGUAGE.to_string(),
            tone: DEFAULT_TONE.to_string(),
            state: UploadState::Idle,
            validation_error: None,
            copy_feedback: CopyFeedback::default(),
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn file(&self, slot: Slot) -> Option<&SelectedFile> {
        match slot {
            Slot::Resume => self.resume.as_ref(),
            Slot::JobDescription => self.job_description.as_ref(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn tone(&self) -> &str {
        &self.tone
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn set_tone(&mut self, tone: impl Into<String>) {
        self.tone = tone.into();
    }

    /// Inline message from the last rejected selection or blocked generate.
    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    /// The message to show: a validation problem, else a failed request.
    pub fn error_message(&self) -> Option<&str> {
        self.validation_error().or(match &self.state {
            UploadState::Failed { message } => Some(message.as_str()),
            _ => None,
        })
    }

    pub fn progress(&self) -> u8 {
        match self.state {
            UploadState::Submitting { progress } => progress,
            _ => 0,
        }
    }

    pub fn letter(&self) -> Option<&str> {
        match &self.state {
            UploadState::Succeeded { letter } => Some(letter.as_str()),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, UploadState::Submitting { .. })
    }

    /// Whether the generate trigger is enabled.
    pub fn can_generate(&self) -> bool {
        !self.is_submitting() && self.has_both_files()
    }

    fn has_both_files(&self) -> bool {
        let filled = |f: &Option<SelectedFile>| f.as_ref().is_some_and(|f| !f.bytes.is_empty());
        filled(&self.resume) && filled(&self.job_description)
    }

    /// Places `file` in `slot` if it is a PDF or an image. A rejected file
    /// leaves the slot's previous selection in place.
    pub fn select_file(&mut self, slot: Slot, file: SelectedFile) -> Result<(), ClientError> {
        if !is_accepted_mime_type(&file.mime_type) {
            self.validation_error = Some(INVALID_FILE_TYPE_MESSAGE.to_string());
            return Err(ClientError::UnsupportedFileType {
                mime_type: file.mime_type,
            });
        }

        match slot {
            Slot::Resume => self.resume = Some(file),
            Slot::JobDescription => self.job_description = Some(file),
        }
        self.validation_error = None;
        Ok(())
    }

    /// Moves to `Submitting` and hands back the request to send.
    ///
    /// Returns `None` without touching the state when a file is missing
    /// (setting the validation message) or a request is already in flight.
    pub fn begin_generation(&mut self) -> Option<Submission> {
        if self.is_submitting() {
            return None;
        }
        if !self.has_both_files() {
            self.validation_error = Some(MISSING_FILES_MESSAGE.to_string());
            return None;
        }

        let submission = Submission {
            resume: self.resume.clone()?,
            job_description: self.job_description.clone()?,
            language: self.language.clone(),
            tone: self.tone.clone(),
        };

        self.validation_error = None;
        self.state = UploadState::Submitting { progress: 0 };
        Some(submission)
    }

    /// Applies an upload progress notification. Ignored outside `Submitting`.
    pub fn record_progress(&mut self, bytes_sent: u64, total_bytes: u64) {
        if let UploadState::Submitting { progress } = &mut self.state {
            *progress = percent(bytes_sent, total_bytes);
        }
    }

    /// Ends the in-flight request. Failures of any kind show the same message.
    pub fn finish(&mut self, outcome: Result<String, ClientError>) {
        if !self.is_submitting() {
            return;
        }

        self.state = match outcome {
            Ok(letter) => UploadState::Succeeded { letter },
            Err(err) => {
                warn!(error = %err, "Cover letter request failed");
                UploadState::Failed {
                    message: GENERATION_FAILED_MESSAGE.to_string(),
                }
            }
        };
    }

    /// Copies the letter, if any, and starts the "Copied!" window.
    /// Returns whether anything was copied.
    pub fn copy_result(&mut self, sink: &mut dyn ClipboardSink, now: Instant) -> io::Result<bool> {
        let Some(letter) = self.letter() else {
            return Ok(false);
        };
        sink.write_text(letter)?;
        self.copy_feedback.record(now);
        Ok(true)
    }

    pub fn copy_label(&self, now: Instant) -> &'static str {
        self.copy_feedback.label(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn pdf(name: &str) -> SelectedFile {
        SelectedFile::new(name, "application/pdf", b"%PDF-1.4".to_vec())
    }

    fn png(name: &str) -> SelectedFile {
        SelectedFile::new(name, "image/png", b"\x89PNG".to_vec())
    }

    fn ready() -> Lettercraft {
        let mut session = Lettercraft::new();
        session.select_file(Slot::Resume, pdf("resume.pdf")).unwrap();
        session.select_file(Slot::JobDescription, png("jd.png")).unwrap();
        session
    }

    #[derive(Default)]
    struct MemoryClipboard {
        contents: Vec<String>,
    }

    impl ClipboardSink for MemoryClipboard {
        fn write_text(&mut self, text: &str) -> io::Result<()> {
            self.contents.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_defaults() {
        let session = Lettercraft::new();
        assert_eq!(session.language(), "Indonesia");
        assert_eq!(session.tone(), "professional");
        assert_eq!(session.state(), &UploadState::Idle);
        assert!(!session.can_generate());
    }

    #[test]
    fn test_text_file_rejected_and_slot_left_unset() {
        let mut session = Lettercraft::new();
        let result = session.select_file(
            Slot::Resume,
            SelectedFile::new("notes.txt", "text/plain", b"hi".to_vec()),
        );

        assert!(matches!(
            result,
            Err(ClientError::UnsupportedFileType { ref mime_type }) if mime_type == "text/plain"
        ));
        assert!(session.file(Slot::Resume).is_none());
        assert_eq!(session.validation_error(), Some(INVALID_FILE_TYPE_MESSAGE));
    }

    #[test]
    fn test_rejected_file_preserves_previous_selection() {
        let mut session = Lettercraft::new();
        session.select_file(Slot::JobDescription, png("jd.png")).unwrap();
        let _ = session.select_file(
            Slot::JobDescription,
            SelectedFile::new("jd.txt", "text/plain", b"text".to_vec()),
        );

        assert_eq!(session.file(Slot::JobDescription).unwrap().file_name, "jd.png");
        assert_eq!(session.validation_error(), Some(INVALID_FILE_TYPE_MESSAGE));

        session.select_file(Slot::Resume, pdf("resume.pdf")).unwrap();
        assert!(session.validation_error().is_none());
    }

    #[test]
    fn test_generate_with_one_file_issues_nothing() {
        let mut session = Lettercraft::new();
        session.select_file(Slot::Resume, pdf("resume.pdf")).unwrap();

        assert!(session.begin_generation().is_none());
        assert_eq!(session.state(), &UploadState::Idle);
        assert_eq!(session.validation_error(), Some(MISSING_FILES_MESSAGE));
    }

    #[test]
    fn test_empty_file_does_not_count_as_selected() {
        let mut session = Lettercraft::new();
        session
            .select_file(Slot::Resume, SelectedFile::new("r.pdf", "application/pdf", Vec::<u8>::new()))
            .unwrap();
        session.select_file(Slot::JobDescription, png("jd.png")).unwrap();

        assert!(!session.can_generate());
        assert!(session.begin_generation().is_none());
        assert_eq!(session.validation_error(), Some(MISSING_FILES_MESSAGE));
    }

    #[test]
    fn test_begin_generation_carries_options() {
        let mut session = ready();
        session.set_language("French");
        session.set_tone("confident");

        let submission = session.begin_generation().unwrap();
        assert_eq!(submission.language, "French");
        assert_eq!(submission.tone, "confident");
        assert_eq!(submission.resume.file_name, "resume.pdf");
        assert_eq!(session.state(), &UploadState::Submitting { progress: 0 });
        assert!(!session.can_generate());
    }

    #[test]
    fn test_no_second_request_while_submitting() {
        let mut session = ready();
        session.begin_generation().unwrap();
        session.record_progress(10, 100);

        assert!(session.begin_generation().is_none());
        assert_eq!(session.progress(), 10);
    }

    #[test]
    fn test_progress_tracks_and_resets_on_success() {
        let mut session = ready();
        session.begin_generation().unwrap();

        session.record_progress(250_000, 1_000_000);
        assert_eq!(session.progress(), 25);
        session.record_progress(1_000_000, 1_000_000);
        assert_eq!(session.progress(), 100);

        session.finish(Ok("Email: hr@acme.io\n\nDear team".to_string()));
        assert_eq!(session.progress(), 0);
        assert_eq!(session.letter(), Some("Email: hr@acme.io\n\nDear team"));
    }

    #[test]
    fn test_failure_shows_generic_message() {
        let mut session = ready();
        session.begin_generation().unwrap();
        session.record_progress(50, 100);

        session.finish(Err(ClientError::Status {
            status: 500,
            body: r#"{"error":"Failed to generate cover letter"}"#.to_string(),
        }));

        assert_eq!(session.progress(), 0);
        assert_eq!(
            session.state(),
            &UploadState::Failed {
                message: GENERATION_FAILED_MESSAGE.to_string()
            }
        );
        assert_eq!(session.error_message(), Some(GENERATION_FAILED_MESSAGE));
    }

    #[test]
    fn test_retry_after_failure_clears_error() {
        let mut session = ready();
        session.begin_generation().unwrap();
        session.finish(Err(ClientError::Status {
            status: 502,
            body: String::new(),
        }));

        assert!(session.can_generate());
        session.begin_generation().unwrap();
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_progress_and_finish_ignored_when_idle() {
        let mut session = ready();
        session.record_progress(5, 10);
        session.finish(Ok("stray".to_string()));
        assert_eq!(session.state(), &UploadState::Idle);
    }

    #[test]
    fn test_copy_is_idempotent_and_independent_of_state() {
        let mut session = ready();
        let mut clipboard = MemoryClipboard::default();
        let now = Instant::now();

        assert!(!session.copy_result(&mut clipboard, now).unwrap());
        assert_eq!(session.copy_label(now), "Copy");

        session.begin_generation().unwrap();
        session.finish(Ok("letter".to_string()));

        assert!(session.copy_result(&mut clipboard, now).unwrap());
        assert!(session.copy_result(&mut clipboard, now).unwrap());
        assert_eq!(clipboard.contents, vec!["letter", "letter"]);
        assert_eq!(session.copy_label(now), "Copied!");
        assert_eq!(session.copy_label(now + Duration::from_secs(2)), "Copy");
        assert_eq!(session.letter(), Some("letter"));
    }
}
