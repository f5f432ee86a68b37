use std::sync::Arc;

use axum::{routing::get, routing::post, Router};
use tower_http::trace::TraceLayer;

use crate::classifier::{Classifier, ModelArtifact};
use crate::form::FormPage;
use crate::handler::{create_cancellation_prediction, get_form, get_health, submit_form};
use crate::predictor::CategoricalPolicy;
use crate::schema::ModelInfo;

#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn Classifier>,
    pub policy: CategoricalPolicy,
    pub model: Arc<ModelInfo>,
    pub page: Arc<FormPage>,
}

impl AppState {
    pub fn new(
        artifact: ModelArtifact,
        policy: CategoricalPolicy,
    ) -> Result<Self, minijinja::Error> {
        let model = ModelInfo {
            name: artifact.name.clone(),
            version: artifact.version.clone(),
            trained_on: artifact.trained_on,
            kind: artifact.estimator.kind().to_string(),
            features: artifact.feature_names.clone(),
        };
        Ok(Self {
            classifier: Arc::new(artifact),
            policy,
            model: Arc::new(model),
            page: Arc::new(FormPage::new()?),
        })
    }
}

pub fn create_router(app_state: AppState) -> Router {
    let api_routes = Router::new().route("/cancellation", post(create_cancellation_prediction));

    Router::new()
        .route("/", get(get_form).post(submit_form))
        .route("/health", get(get_health))
        .nest("/prediction", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
