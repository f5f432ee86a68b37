//! Maps raw form fields onto the classifier's schema and formats its answer.

use clap::ValueEnum;

use crate::classifier::Classifier;
use crate::error::PredictError;
use crate::model::{BookingRecord, CancellationPrediction};
use crate::schema::BookingForm;

/// How choice fields holding an unrecognised value are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CategoricalPolicy {
    /// Anything but the positive choice encodes as the negative flag.
    #[default]
    Lenient,
    /// Only the listed choices are accepted.
    Strict,
}

pub const MARKET_SEGMENTS: [&str; 2] = ["Online", "Offline"];
pub const PARKING_CHOICES: [&str; 2] = ["Yes", "No"];

fn check_choice(
    field: &'static str,
    value: &str,
    choices: &[&str],
    expected: &'static str,
    policy: CategoricalPolicy,
) -> Result<(), PredictError> {
    if policy == CategoricalPolicy::Strict && !choices.contains(&value) {
        return Err(PredictError::InvalidInput {
            field,
            value: value.to_string(),
            expected,
        });
    }
    Ok(())
}

/// `Online` encodes as 1, everything else as 0.
pub fn encode_market_segment(value: &str, policy: CategoricalPolicy) -> Result<i64, PredictError> {
    check_choice(
        "market_segment_type",
        value,
        &MARKET_SEGMENTS,
        "Online, Offline",
        policy,
    )?;
    Ok(i64::from(value == "Online"))
}

/// `Yes` encodes as 1.0, everything else as 0.0.
pub fn encode_parking_space(value: &str, policy: CategoricalPolicy) -> Result<f64, PredictError> {
    check_choice(
        "required_car_parking_space",
        value,
        &PARKING_CHOICES,
        "Yes, No",
        policy,
    )?;
    Ok(if value == "Yes" { 1.0 } else { 0.0 })
}

/// Builds the classifier row from the raw form. Numeric fields pass through unchecked.
pub fn build_record(
    form: &BookingForm,
    policy: CategoricalPolicy,
) -> Result<BookingRecord, PredictError> {
    Ok(BookingRecord {
        lead_time: form.lead_time,
        market_segment_type: encode_market_segment(&form.market_segment_type, policy)?,
        no_of_special_requests: form.no_of_special_requests,
        avg_price_per_room: form.avg_price_per_room,
        no_of_adults: form.no_of_adults,
        no_of_weekend_nights: form.no_of_weekend_nights,
        required_car_parking_space: encode_parking_space(
            &form.required_car_parking_space,
            policy,
        )?,
        no_of_week_nights: form.no_of_week_nights,
        arrival_month: form.arrival_month,
    })
}

/// Predicts whether the booking will be cancelled.
///
/// The confidence is the probability of whichever class was predicted, so a
/// "No" answer reports the not-cancelled probability.
pub fn predict_cancellation(
    classifier: &dyn Classifier,
    policy: CategoricalPolicy,
    form: &BookingForm,
) -> Result<CancellationPrediction, PredictError> {
    let record = build_record(form, policy)?;
    tracing::trace!(?record, "scoring booking");

    let class = classifier.predict(&record)?;
    let probabilities = classifier.predict_proba(&record)?;
    let prediction = CancellationPrediction::new(class, probabilities.of(class));

    tracing::debug!(
        cancelled = prediction.cancelled,
        confidence = %prediction.confidence,
        "booking scored"
    );
    Ok(prediction)
}
