use axum::{
    extract::{Form, Json, State},
    response::{Html, IntoResponse},
};

use crate::app::AppState;
use crate::error::AppError;
use crate::predictor::predict_cancellation;
use crate::schema::{BookingForm, HealthResponse, PredictionResponse};

pub async fn get_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.page.render(None, None)?))
}

pub async fn submit_form(
    State(state): State<AppState>,
    Form(form): Form<BookingForm>,
) -> Result<Html<String>, AppError> {
    let prediction = predict_cancellation(state.classifier.as_ref(), state.policy, &form)?;
    Ok(Html(state.page.render(Some(&form), Some(&prediction))?))
}

pub async fn create_cancellation_prediction(
    State(state): State<AppState>,
    Json(payload): Json<BookingForm>,
) -> Result<impl IntoResponse, AppError> {
    let prediction = predict_cancellation(state.classifier.as_ref(), state.policy, &payload)?;
    Ok(Json(PredictionResponse {
        success: true,
        data: prediction,
    }))
}

pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.model.as_ref().clone(),
    })
}
