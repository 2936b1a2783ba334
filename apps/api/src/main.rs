use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use lettercraft_api::config::Config;
use lettercraft_api::llm_client::{CoverLetterModel, GeminiClient};
use lettercraft_api::routes::build_router;
use lettercraft_api::state::AppState;
use lettercraft_api::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    init_tracing(&config.rust_log);

    info!("Starting Lettercraft API v{}", env!("CARGO_PKG_VERSION"));

    // A missing credential is not fatal here; /api/craft reports it per request.
    let model: Option<Arc<dyn CoverLetterModel>> = match &config.gemini_api_key {
        Some(api_key) => {
            let client = GeminiClient::new(
                api_key.clone(),
                config.gemini_model.clone(),
                config.gemini_base_url.clone(),
                config.model_timeout,
            )?;
            info!(
                "Model client initialized (model: {}, timeout: {:?})",
                client.model(),
                config.model_timeout
            );
            Some(Arc::new(client) as Arc<dyn CoverLetterModel>)
        }
        None => {
            warn!("GEMINI_API_KEY is not set; cover letter requests will fail");
            None
        }
    };

    info!("Upload limit: {} bytes", config.max_upload_bytes);

    let state = AppState::new(model, config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
