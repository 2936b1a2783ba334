use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CoverLetterModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no model credential is configured; `/api/craft` then fails
    /// every request with a masked configuration error.
    pub model: Option<Arc<dyn CoverLetterModel>>,
    pub config: Config,
}

impl AppState {
    pub fn new(model: Option<Arc<dyn CoverLetterModel>>, config: Config) -> Self {
        Self { model, config }
    }
}
