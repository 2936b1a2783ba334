use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::craft::submission::Submission;
use crate::errors::AppError;
use crate::llm_client::prompts::build_cover_letter_instruction;
use crate::llm_client::CoverLetterModel;

/// Prefix the instruction asks the model to open with.
pub const EMAIL_LINE_PREFIX: &str = "Email:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub letter_text: String,
}

/// Sends resume, job description and instruction to the model in one call
/// and returns its text untouched.
pub async fn craft_cover_letter(
    model: &dyn CoverLetterModel,
    submission: &Submission,
) -> Result<GenerationResult, AppError> {
    let instruction = build_cover_letter_instruction(&submission.language, &submission.tone);
    let attachments = [
        submission.resume.to_attachment(),
        submission.job_description.to_attachment(),
    ];

    info!(
        resume_bytes = submission.resume.bytes.len(),
        resume_mime = %submission.resume.mime_type,
        job_description_bytes = submission.job_description.bytes.len(),
        job_description_mime = %submission.job_description.mime_type,
        language = %submission.language,
        tone = %submission.tone,
        "Requesting cover letter"
    );

    let letter_text = model.generate(&attachments, &instruction).await?;

    // Logged only; the letter is returned as the model wrote it.
    if !has_email_line(&letter_text) {
        warn!("Model output does not open with an '{EMAIL_LINE_PREFIX}' line");
    }

    Ok(GenerationResult { letter_text })
}

fn has_email_line(text: &str) -> bool {
    text.trim_start().starts_with(EMAIL_LINE_PREFIX)
}
