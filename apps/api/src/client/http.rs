//! HTTP side of the Upload Client: posts a submission to `/api/craft`.

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures::{stream, TryStreamExt};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use thiserror::Error;
use tracing::debug;

use crate::client::session::{SelectedFile, Submission};
use crate::craft::handlers::CraftResponse;
use crate::craft::submission::{JOB_DESCRIPTION_FIELD, LANGUAGE_FIELD, RESUME_FIELD, TONE_FIELD};

/// Size of each file chunk handed to the transport; progress is reported per chunk.
const UPLOAD_CHUNK_BYTES: usize = 16 * 1024;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Unsupported file type: {mime_type}")]
    UnsupportedFileType { mime_type: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

type ProgressFn = dyn Fn(u64, u64) + Send + Sync;

#[derive(Clone)]
pub struct UploadClient {
    client: Client,
    base_url: String,
}

impl UploadClient {
    /// `timeout` of `None` leaves the request unbounded.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into(),
        })
    }

    fn craft_url(&self) -> String {
        format!("{}/api/craft", self.base_url.trim_end_matches('/'))
    }

    /// Sends the submission and returns the generated letter.
    ///
    /// `on_progress(bytes_sent, total_bytes)` fires each time a chunk of file
    /// data is handed to the connection. Totals count file bytes only.
    pub async fn submit<F>(&self, submission: &Submission, on_progress: F) -> Result<String, ClientError>
    where
        F: Fn(u64, u64) + Send + Sync + 'static,
    {
        let total = submission.total_bytes();
        let sent = Arc::new(AtomicU64::new(0));
        let on_progress: Arc<ProgressFn> = Arc::new(on_progress);

        let form = Form::new()
            .part(
                RESUME_FIELD,
                file_part(&submission.resume, total, sent.clone(), on_progress.clone())?,
            )
            .part(
                JOB_DESCRIPTION_FIELD,
                file_part(&submission.job_description, total, sent, on_progress)?,
            )
            .text(LANGUAGE_FIELD, submission.language.clone())
            .text(TONE_FIELD, submission.tone.clone());

        debug!(url = %self.craft_url(), total_bytes = total, "Submitting cover letter request");

        let response = self.client.post(self.craft_url()).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: CraftResponse = response.json().await?;
        Ok(body.coverletter)
    }
}

fn file_part(
    file: &SelectedFile,
    total: u64,
    sent: Arc<AtomicU64>,
    on_progress: Arc<ProgressFn>,
) -> Result<Part, ClientError> {
    let chunks: Vec<Result<Bytes, io::Error>> = chunked(&file.bytes).map(Ok).collect();

    let body = stream::iter(chunks).inspect_ok(move |chunk| {
        let len = chunk.len() as u64;
        let now_sent = sent.fetch_add(len, Ordering::Relaxed) + len;
        on_progress(now_sent, total);
    });

    Part::stream_with_length(Body::wrap_stream(body), file.bytes.len() as u64)
        .file_name(file.file_name.clone())
        .mime_str(&file.mime_type)
        .map_err(ClientError::Http)
}

fn chunked(bytes: &Bytes) -> impl Iterator<Item = Bytes> + '_ {
    (0..bytes.len())
        .step_by(UPLOAD_CHUNK_BYTES)
        .map(move |start| bytes.slice(start..(start + UPLOAD_CHUNK_BYTES).min(bytes.len())))
}
