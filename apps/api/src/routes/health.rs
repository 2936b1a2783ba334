use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "lettercraft-api"
    }))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::Value;

    use crate::config::Config;
    use crate::routes::build_router;
    use crate::state::AppState;

    #[tokio::test]
    async fn test_health_reports_ok_without_credential() {
        let server = TestServer::new(build_router(AppState::new(None, Config::default()))).unwrap();

        let response = server.get("/health").await;

        response.assert_status_ok();
        let value = response.json::<Value>();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["service"], "lettercraft-api");
    }
}
