//! Multipart intake for `POST /api/craft`.

use axum::extract::multipart::{Field, Multipart, MultipartError};
use bytes::Bytes;
use tracing::debug;

use crate::craft::options::{DEFAULT_LANGUAGE, DEFAULT_TONE};
use crate::errors::AppError;
use crate::llm_client::Attachment;

pub const RESUME_FIELD: &str = "resume";
pub const JOB_DESCRIPTION_FIELD: &str = "jobDescription";
pub const LANGUAGE_FIELD: &str = "language";
pub const TONE_FIELD: &str = "tone";

/// MIME type assumed when the upload carries none.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// One uploaded document. The MIME type is whatever the upload claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn to_attachment(&self) -> Attachment {
        Attachment::new(self.bytes.clone(), self.mime_type.clone())
    }
}

/// A validated request: both documents present, options resolved.
#[derive(Debug, Clone)]
pub struct Submission {
    pub resume: UploadedFile,
    pub job_description: UploadedFile,
    pub language: String,
    pub tone: String,
}

/// Raw form contents before the presence checks.
#[derive(Debug, Default)]
pub struct CraftForm {
    pub resume: Option<UploadedFile>,
    pub job_description: Option<UploadedFile>,
    pub language: Option<String>,
    pub tone: Option<String>,
}

impl CraftForm {
    /// Drains the multipart body. Unknown fields are skipped; a repeated field
    /// keeps its first non-empty value.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = CraftForm::default();

        while let Some(field) = multipart.next_field().await? {
            let field_name = field.name().unwrap_or("").to_string();

            match field_name.as_str() {
                RESUME_FIELD if form.resume.is_none() => form.resume = read_file(field).await?,
                JOB_DESCRIPTION_FIELD if form.job_description.is_none() => {
                    form.job_description = read_file(field).await?
                }
                LANGUAGE_FIELD if form.language.is_none() => {
                    form.language = Some(field.text().await?)
                }
                TONE_FIELD if form.tone.is_none() => form.tone = Some(field.text().await?),
                other => {
                    debug!(field = other, "Ignoring repeated or unexpected multipart field");
                }
            }
        }

        Ok(form)
    }

    /// Applies the presence checks, resume first.
    pub fn into_submission(self) -> Result<Submission, AppError> {
        let resume = self.resume.ok_or(AppError::MissingResume)?;
        let job_description = self
            .job_description
            .ok_or(AppError::MissingJobDescription)?;

        Ok(Submission {
            resume,
            job_description,
            language: non_blank_or(self.language, DEFAULT_LANGUAGE),
            tone: non_blank_or(self.tone, DEFAULT_TONE),
        })
    }
}

// Browsers submit an empty part for a file input with nothing selected.
async fn read_file(field: Field<'_>) -> Result<Option<UploadedFile>, MultipartError> {
    let file_name = field
        .file_name()
        .filter(|name| !name.is_empty())
        .map(str::to_string);
    let mime_type = field
        .content_type()
        .filter(|mime| !mime.is_empty())
        .unwrap_or(DEFAULT_MIME_TYPE)
        .to_string();

    let bytes = field.bytes().await?;
    if bytes.is_empty() {
        return Ok(None);
    }

    Ok(Some(UploadedFile {
        file_name,
        mime_type,
        bytes,
    }))
}

fn non_blank_or(value: Option<String>, fallback: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(mime: &str) -> UploadedFile {
        UploadedFile {
            file_name: Some("doc".to_string()),
            mime_type: mime.to_string(),
            bytes: Bytes::from_static(b"content"),
        }
    }

    #[test]
    fn test_missing_resume_wins_over_missing_job_description() {
        let form = CraftForm::default();
        assert!(matches!(
            form.into_submission(),
            Err(AppError::MissingResume)
        ));
    }

    #[test]
    fn test_missing_job_description_reported_when_resume_present() {
        let form = CraftForm {
            resume: Some(file("application/pdf")),
            ..CraftForm::default()
        };
        assert!(matches!(
            form.into_submission(),
            Err(AppError::MissingJobDescription)
        ));
    }

    #[test]
    fn test_blank_options_fall_back_to_defaults() {
        let form = CraftForm {
            resume: Some(file("application/pdf")),
            job_description: Some(file("image/png")),
            language: Some("   ".to_string()),
            tone: None,
        };
        let submission = form.into_submission().unwrap();
        assert_eq!(submission.language, "Indonesia");
        assert_eq!(submission.tone, "professional");
    }

    #[test]
    fn test_options_are_passed_through_unvalidated() {
        let form = CraftForm {
            resume: Some(file("application/pdf")),
            job_description: Some(file("image/png")),
            language: Some("Klingon".to_string()),
            tone: Some("sarcastic".to_string()),
        };
        let submission = form.into_submission().unwrap();
        assert_eq!(submission.language, "Klingon");
        assert_eq!(submission.tone, "sarcastic");
    }

    #[test]
    fn test_attachment_keeps_claimed_mime_type() {
        let attachment = file("image/webp").to_attachment();
        assert_eq!(attachment.mime_type, "image/webp");
        assert_eq!(&attachment.data[..], b"content");
    }
}
