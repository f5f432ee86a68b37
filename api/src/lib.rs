//! Hotel booking cancellation predictor.
//!
//! Collects nine booking attributes from a form or JSON body, encodes them
//! into the record a pre-trained classifier expects, and reports whether the
//! booking is likely to be cancelled together with the confidence of that
//! answer.

pub mod app;
pub mod classifier;
pub mod config;
pub mod error;
pub mod form;
pub mod handler;
pub mod logging;
pub mod model;
pub mod predictor;
pub mod schema;
