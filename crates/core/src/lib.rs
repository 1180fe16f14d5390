//! # Wound-care core
//!
//! Vital-signs alerting for the wound-care service:
//! - Readings, normal-range configuration and alert records
//! - The threshold evaluator that turns a reading into alerts
//! - Acknowledgement and review ordering for raised alerts
//!
//! **No transport concerns**: persisting alerts, notifying staff and serving HTTP belong to the
//! callers of this crate.

pub mod alert;
pub mod config;
pub mod constants;
pub mod error;
pub mod evaluator;
pub mod metric;
pub mod range;
pub mod reading;
pub mod review;

pub use alert::Alert;
pub use config::CoreConfig;
pub use constants::DEFAULT_VITAL_SIGNS_RANGE;
pub use error::{VitalsError, VitalsResult};
pub use evaluator::{evaluate_vital_signs, evaluate_vital_signs_at};
pub use metric::{Breach, Severity, VitalMetric};
pub use range::{MetricRange, VitalSignsRange};
pub use reading::{compute_bmi, BloodPressure, VitalSignsReading};
pub use review::{
    acknowledge_alert, parse_alerts_json, render_alerts_json, sort_for_review, unacknowledged,
    AlertSummary,
};

pub use woundcare_types::{ClinicalNote, NonEmptyText, TextError};
pub use woundcare_uuid::{RecordId, UuidError};

use chrono::{DateTime, Utc};

/// Evaluates readings against the ranges resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct AlertService {
    config: CoreConfig,
}

impl AlertService {
    pub fn new(config: CoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Evaluate `reading`, stamping alerts with the current time.
    pub fn evaluate(&self, reading: &VitalSignsReading) -> Vec<Alert> {
        evaluate_vital_signs(reading, Some(self.config.vital_ranges()))
    }

    /// Evaluate `reading`, stamping alerts with `evaluated_at`.
    pub fn evaluate_at(
        &self,
        reading: &VitalSignsReading,
        evaluated_at: DateTime<Utc>,
    ) -> Vec<Alert> {
        evaluate_vital_signs_at(reading, Some(self.config.vital_ranges()), evaluated_at)
    }

    /// Parse a JSON reading and evaluate it.
    ///
    /// # Errors
    ///
    /// Returns [`VitalsError::JsonDeserialization`] if `json` is not a reading document or lacks
    /// `recordedAt`. Metric values of the wrong type are skipped, not reported.
    pub fn evaluate_json(
        &self,
        json: &str,
        evaluated_at: DateTime<Utc>,
    ) -> VitalsResult<Vec<Alert>> {
        let reading: VitalSignsReading =
            serde_json::from_str(json).map_err(VitalsError::JsonDeserialization)?;
        Ok(self.evaluate_at(&reading, evaluated_at))
    }
}
