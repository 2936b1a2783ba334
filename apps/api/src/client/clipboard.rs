use std::io::{self, Write};
use std::time::{Duration, Instant};

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// How long the "Copied!" label stays up after a copy.
pub const COPY_FEEDBACK_WINDOW: Duration = Duration::from_secs(2);

pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied!";

/// Somewhere the generated letter can be copied to.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> io::Result<()>;
}

/// Terminal clipboard via the OSC 52 escape sequence.
pub struct Osc52Clipboard<W> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ClipboardSink for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "\x1b]52;c;{}\x07", STANDARD.encode(text))?;
        self.out.flush()
    }
}

/// Transient copy confirmation. Copying again restarts the window.
#[derive(Debug, Default, Clone, Copy)]
pub struct CopyFeedback {
    copied_at: Option<Instant>,
}

impl CopyFeedback {
    pub fn record(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    pub fn is_showing(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.saturating_duration_since(at) < COPY_FEEDBACK_WINDOW)
    }

    pub fn label(&self, now: Instant) -> &'static str {
        if self.is_showing(now) {
            COPIED_LABEL
        } else {
            COPY_LABEL
        }
    }
}
