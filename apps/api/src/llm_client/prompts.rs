// Prompt text sent alongside the two attachments.

/// Cover letter instruction for one submission.
///
/// The model is asked to open with an `Email: <recipient>` line. Nothing
/// downstream checks that it did. Both values are inserted as-is, in one pass.
pub fn build_cover_letter_instruction(language: &str, tone: &str) -> String {
    format!(
        "Write a professional email to HR \
         showcasing your enthusiasm and resume-backed skills. \
         Align it with the job listing's tone in {language} and make it stand out in {tone} manner. \
         Include the recipient's email at the top in this format: Email: recipient. \
         If the job listing does not name one, infer or invent a plausible HR address. \
         Do not explain your response; return only the email content."
    )
}
