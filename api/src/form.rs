//! The single-page form: nine labelled inputs and two read-only outputs.

use minijinja::{context, Environment};

use crate::model::CancellationPrediction;
use crate::predictor::{MARKET_SEGMENTS, PARKING_CHOICES};
use crate::schema::BookingForm;

pub const TITLE: &str = "Hotel Booking Cancellation Predictor";
pub const DESCRIPTION: &str = "This interface will predict whether a given hotel booking is likely to be cancelled based on the details of the booking.";

// The `.html` name turns on HTML auto-escaping.
const PAGE_TEMPLATE: &str = "index.html";

/// Compiled page template, built once and shared by every request.
#[derive(Debug)]
pub struct FormPage {
    env: Environment<'static>,
}

impl FormPage {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(PAGE_TEMPLATE, include_str!("../templates/index.html"))?;
        Ok(Self { env })
    }

    /// Renders the page, optionally echoing a submission and its prediction.
    pub fn render(
        &self,
        submitted: Option<&BookingForm>,
        prediction: Option<&CancellationPrediction>,
    ) -> Result<String, minijinja::Error> {
        let months: Vec<i64> = (1..=12).collect();
        self.env.get_template(PAGE_TEMPLATE)?.render(context! {
            title => TITLE,
            description => DESCRIPTION,
            form => submitted,
            prediction => prediction,
            market_segments => MARKET_SEGMENTS,
            parking_choices => PARKING_CHOICES,
            months => months,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CancellationClass;

    fn page() -> FormPage {
        FormPage::new().expect("template compiles")
    }

    fn submitted() -> BookingForm {
        BookingForm {
            lead_time: 50,
            market_segment_type: "Offline".to_string(),
            avg_price_per_room: 99.5,
            no_of_adults: 2,
            no_of_weekend_nights: 1,
            no_of_week_nights: 2,
            no_of_special_requests: 0,
            arrival_month: 7,
            required_car_parking_space: "Yes".to_string(),
        }
    }

    #[test]
    fn empty_page_lists_every_input_and_output() {
        let html = page().render(None, None).expect("render");
        assert!(html.contains(TITLE));
        for (name, label) in [
            ("lead_time", "Lead Time (in days)"),
            ("avg_price_per_room", "Average Price per Room"),
            ("no_of_adults", "Number of Adults"),
            ("no_of_weekend_nights", "Number of Weekend Nights"),
            ("no_of_week_nights", "Number of Week Nights"),
            ("no_of_special_requests", "Number of Special Requests"),
            ("market_segment_type", "Market Segment Type"),
            ("arrival_month", "Arrival Month"),
            ("required_car_parking_space", "Required Car Parking Space"),
        ] {
            assert!(html.contains(&format!(r#"name="{name}""#)), "{name} missing");
            assert!(html.contains(label), "{label} missing");
        }
        assert!(html.contains("Will the booking be cancelled?"));
        assert!(html.contains("Chances of Cancellation"));
        assert!(html.contains(r#"<option value="12">12</option>"#));
        assert!(html.contains(r#"name="lead_time" step="1" value="" required"#));
        assert!(!html.contains(" selected"));
    }

    #[test]
    fn market_segment_follows_lead_time() {
        let html = page().render(None, None).expect("render");
        let lead = html.find(r#"name="lead_time""#).expect("lead time");
        let segment = html.find(r#"name="market_segment_type""#).expect("segment");
        let price = html.find(r#"name="avg_price_per_room""#).expect("price");
        assert!(lead < segment && segment < price);
    }

    #[test]
    fn submission_is_echoed_with_prediction() {
        let prediction = CancellationPrediction::new(CancellationClass::NotCancelled, 0.8125);
        let html = page()
            .render(Some(&submitted()), Some(&prediction))
            .expect("render");
        assert!(html.contains(r#"name="lead_time" step="1" value="50""#));
        assert!(html.contains(r#"name="avg_price_per_room" step="any" value="99.5""#));
        assert!(html.contains(r#"<option value="Offline" selected>Offline</option>"#));
        assert!(html.contains(r#"<option value="Online">Online</option>"#));
        assert!(html.contains(r#"<option value="7" selected>7</option>"#));
        assert!(html.contains(r#"<option value="Yes" selected>Yes</option>"#));
        assert!(html.contains(r#"id="cancelled" value="No" readonly"#));
        assert!(html.contains(r#"id="confidence" value="81.25%" readonly"#));
    }

    #[test]
    fn unknown_choice_is_not_echoed() {
        let form = BookingForm {
            market_segment_type: "<script>".to_string(),
            ..submitted()
        };
        let html = page().render(Some(&form), None).expect("render");
        assert!(!html.contains("<script>"));
        assert!(!html.contains(" selected>Online"));
        assert!(!html.contains(" selected>Offline"));
    }
}
