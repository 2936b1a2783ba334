//! Axum route handlers for the craft API.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::craft::generator::craft_cover_letter;
use crate::craft::options::{catalogue, OptionsCatalogue};
use crate::craft::submission::CraftForm;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CraftResponse {
    pub coverletter: String,
}

/// POST /api/craft
///
/// Multipart form: `resume`, `jobDescription` (files), `language`, `tone` (text).
/// Returns the model's letter verbatim.
///
/// A body that is not a multipart form is a masked failure, reported only
/// after the credential check.
pub async fn handle_craft(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<CraftResponse>, AppError> {
    let model = state.model.clone().ok_or(AppError::MissingCredential)?;

    let submission = CraftForm::read(multipart?).await?.into_submission()?;
    let result = craft_cover_letter(model.as_ref(), &submission).await?;

    Ok(Json(CraftResponse {
        coverletter: result.letter_text,
    }))
}

/// GET /api/options
pub async fn handle_options() -> Json<OptionsCatalogue> {
    Json(catalogue())
}
