//! Vital-sign metric identifiers and alert severity tiers.

use crate::constants::{
    DIASTOLIC_CRITICAL_MARGIN, HEART_RATE_CRITICAL_MARGIN, OXYGEN_SATURATION_CRITICAL_MARGIN,
    RESPIRATORY_RATE_CRITICAL_MARGIN, SYSTOLIC_CRITICAL_MARGIN, TEMPERATURE_CRITICAL_MARGIN,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A vital-sign metric that can raise an alert.
///
/// Blood-pressure components are tagged `bloodPressure.systolic` and `bloodPressure.diastolic`
/// on the wire; the remaining metrics use flat tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VitalMetric {
    #[serde(rename = "bloodPressure.systolic")]
    Systolic,
    #[serde(rename = "bloodPressure.diastolic")]
    Diastolic,
    #[serde(rename = "heartRate")]
    HeartRate,
    #[serde(rename = "respiratoryRate")]
    RespiratoryRate,
    #[serde(rename = "temperature")]
    Temperature,
    #[serde(rename = "oxygenSaturation")]
    OxygenSaturation,
}

impl VitalMetric {
    /// Metrics in the order they are evaluated. Alert output follows this order.
    pub const EVALUATION_ORDER: [VitalMetric; 6] = [
        VitalMetric::Systolic,
        VitalMetric::Diastolic,
        VitalMetric::HeartRate,
        VitalMetric::RespiratoryRate,
        VitalMetric::Temperature,
        VitalMetric::OxygenSaturation,
    ];

    /// Wire tag for this metric.
    pub fn tag(self) -> &'static str {
        match self {
            VitalMetric::Systolic => "bloodPressure.systolic",
            VitalMetric::Diastolic => "bloodPressure.diastolic",
            VitalMetric::HeartRate => "heartRate",
            VitalMetric::RespiratoryRate => "respiratoryRate",
            VitalMetric::Temperature => "temperature",
            VitalMetric::OxygenSaturation => "oxygenSaturation",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            VitalMetric::Systolic | VitalMetric::Diastolic => "mmHg",
            VitalMetric::HeartRate => "beats/min",
            VitalMetric::RespiratoryRate => "breaths/min",
            VitalMetric::Temperature => "°C",
            VitalMetric::OxygenSaturation => "%",
        }
    }

    /// Distance beyond the breached bound at which the breach becomes critical.
    ///
    /// For oxygen saturation this is measured below `min`; for every other metric above `max`.
    pub fn critical_margin(self) -> f64 {
        match self {
            VitalMetric::Systolic => SYSTOLIC_CRITICAL_MARGIN,
            VitalMetric::Diastolic => DIASTOLIC_CRITICAL_MARGIN,
            VitalMetric::HeartRate => HEART_RATE_CRITICAL_MARGIN,
            VitalMetric::RespiratoryRate => RESPIRATORY_RATE_CRITICAL_MARGIN,
            VitalMetric::Temperature => TEMPERATURE_CRITICAL_MARGIN,
            VitalMetric::OxygenSaturation => OXYGEN_SATURATION_CRITICAL_MARGIN,
        }
    }

    /// Whether an upper-bound breach is ever alerted for this metric.
    pub fn alerts_above_max(self) -> bool {
        !matches!(self, VitalMetric::OxygenSaturation)
    }
}

impl fmt::Display for VitalMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Alert severity tier. Ordered from least to most urgent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction in which a metric left its normal range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Breach {
    BelowMin,
    AboveMax,
}
