use ::serde::{Deserialize, Serialize};
use chrono::NaiveDate;

use crate::model::CancellationPrediction;

/// The nine booking fields as submitted, before categorical encoding.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BookingForm {
    pub lead_time: i64,
    pub market_segment_type: String,
    pub avg_price_per_room: f64,
    pub no_of_adults: i64,
    pub no_of_weekend_nights: i64,
    pub no_of_week_nights: i64,
    pub no_of_special_requests: i64,
    pub arrival_month: i64,
    pub required_car_parking_space: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub success: bool,
    pub data: CancellationPrediction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: Option<String>,
    pub version: Option<String>,
    pub trained_on: Option<NaiveDate>,
    pub kind: String,
    pub features: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model: ModelInfo,
}
