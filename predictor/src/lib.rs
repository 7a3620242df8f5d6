pub mod api;
pub mod form;
pub mod model;
pub mod services;
pub mod telemetry;

use common::Result;
use common::config::Settings;
use tokio::net::TcpListener;
use tracing::{info, warn};

use services::InferenceAdapter;

/// Loads the classifier once and serves the reservation form until shutdown.
///
/// A missing or corrupt artifact does not stop the server; it comes up in
/// degraded mode with prediction disabled.
pub async fn run_predictor_server(settings: Settings) -> Result<()> {
    let adapter = InferenceAdapter::load(&settings.model.artifact_path);
    if !adapter.is_ready() {
        warn!(
            artifact = %settings.model.artifact_path,
            "Serving form without a model; restart once the artifact is available"
        );
    }

    let state = api::AppState::new(adapter, settings.ui.clone());
    let api_router = api::routes(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "Cancellation predictor listening");
    axum::serve(listener, api_router).await?;

    Ok(())
}
