use serde::Serialize;

/// Outcome classes of the cancellation classifier, in the artifact's class order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CancellationClass {
    NotCancelled = 0,
    Cancelled = 1,
}

impl CancellationClass {
    /// Label shown to the user for this class.
    pub fn label(self) -> &'static str {
        match self {
            CancellationClass::Cancelled => "Yes",
            CancellationClass::NotCancelled => "No",
        }
    }

    /// Argmax over a two-class distribution; ties go to class 0.
    pub fn from_probabilities(probabilities: &ClassProbabilities) -> Self {
        if probabilities.cancelled > probabilities.not_cancelled {
            CancellationClass::Cancelled
        } else {
            CancellationClass::NotCancelled
        }
    }
}

/// Probability distribution over the two classes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassProbabilities {
    pub not_cancelled: f64,
    pub cancelled: f64,
}

impl ClassProbabilities {
    pub fn from_cancelled(cancelled: f64) -> Self {
        Self {
            not_cancelled: 1.0 - cancelled,
            cancelled,
        }
    }

    pub fn of(&self, class: CancellationClass) -> f64 {
        match class {
            CancellationClass::Cancelled => self.cancelled,
            CancellationClass::NotCancelled => self.not_cancelled,
        }
    }
}

/// One booking, encoded the way the classifier was trained.
///
/// Categorical inputs are already reduced to their binary flags. Values are
/// not range checked: a month of 13 or a negative count reaches the
/// classifier unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BookingRecord {
    pub lead_time: i64,
    pub market_segment_type: i64,
    pub no_of_special_requests: i64,
    pub avg_price_per_room: f64,
    pub no_of_adults: i64,
    pub no_of_weekend_nights: i64,
    pub required_car_parking_space: f64,
    pub no_of_week_nights: i64,
    pub arrival_month: i64,
}

impl BookingRecord {
    /// Column names in the order the training frame was built.
    pub const COLUMNS: [&'static str; 9] = [
        "lead_time",
        "market_segment_type",
        "no_of_special_requests",
        "avg_price_per_room",
        "no_of_adults",
        "no_of_weekend_nights",
        "required_car_parking_space",
        "no_of_week_nights",
        "arrival_month",
    ];

    /// Looks up a column by its training-schema name.
    pub fn feature(&self, name: &str) -> Option<f64> {
        let value = match name {
            "lead_time" => self.lead_time as f64,
            "market_segment_type" => self.market_segment_type as f64,
            "no_of_special_requests" => self.no_of_special_requests as f64,
            "avg_price_per_room" => self.avg_price_per_room,
            "no_of_adults" => self.no_of_adults as f64,
            "no_of_weekend_nights" => self.no_of_weekend_nights as f64,
            "required_car_parking_space" => self.required_car_parking_space,
            "no_of_week_nights" => self.no_of_week_nights as f64,
            "arrival_month" => self.arrival_month as f64,
            _ => return None,
        };
        Some(value)
    }
}

/// What the user sees: a Yes/No label and the confidence of that label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CancellationPrediction {
    #[serde(skip)]
    pub class: CancellationClass,
    /// "Yes" or "No".
    pub cancelled: &'static str,
    /// Probability of the predicted class as a percentage, e.g. "73.42%".
    pub confidence: String,
}

impl CancellationPrediction {
    pub fn new(class: CancellationClass, probability: f64) -> Self {
        Self {
            class,
            cancelled: class.label(),
            confidence: format_percentage(probability),
        }
    }
}

/// Formats a probability in [0, 1] as a percentage with two decimals.
pub fn format_percentage(probability: f64) -> String {
    let percent = (probability * 100.0 * 100.0).round() / 100.0;
    format!("{percent:.2}%")
}
