//! Upload Client: the browser-side half of Lettercraft, as a library.
//!
//! `Lettercraft` holds the form and the generation state machine;
//! `UploadClient` performs the HTTP exchange and reports upload progress.

pub mod clipboard;
pub mod http;
pub mod progress;
pub mod session;

pub use http::{ClientError, UploadClient};
pub use session::{Lettercraft, SelectedFile, Slot, Submission, UploadState};
