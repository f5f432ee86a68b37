use anyhow::Context;
use clap::Parser;

use hotel_cancellation_api::app::{self, AppState};
use hotel_cancellation_api::classifier::ModelArtifact;
use hotel_cancellation_api::config::Config;
use hotel_cancellation_api::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logging(&config.log_config())?;

    let artifact = ModelArtifact::load(&config.model_path)
        .with_context(|| format!("loading model from {}", config.model_path.display()))?;

    tracing::info!(
        name = artifact.name.as_deref().unwrap_or("unnamed"),
        version = artifact.version.as_deref().unwrap_or("unversioned"),
        kind = artifact.estimator.kind(),
        features = artifact.feature_names.len(),
        "model loaded"
    );
    let missing = artifact.missing_features();
    if !missing.is_empty() {
        tracing::warn!(?missing, "model expects features the booking form does not supply");
    }

    let state = AppState::new(artifact, config.categorical_policy)?;
    let app = app::create_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;

    tracing::info!(
        addr = %config.bind,
        policy = ?config.categorical_policy,
        "serving cancellation predictor"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
