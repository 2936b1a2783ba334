// Cover letter crafting: multipart intake, instruction building, model call.
// All model calls go through llm_client — no direct provider calls here.

pub mod generator;
pub mod handlers;
pub mod options;
pub mod submission;
