//! Vital-signs threshold evaluation.
//!
//! Each metric is compared with its configured range independently, in the fixed order of
//! [`VitalMetric::EVALUATION_ORDER`], and every breach becomes one [`Alert`]. Evaluation is pure:
//! no I/O, no shared state, and the reading is only borrowed.
//!
//! Rules, with `m` the metric's critical margin:
//! - below `min` is `low`, threshold `min`
//! - above `max` is `high`, or `critical` when above `max + m`, threshold `max`
//! - oxygen saturation has no upper-bound rule; below `min` is `low`, or `critical` when below
//!   `min - m`, threshold `min`
//!
//! A metric with no recorded value, or a NaN value, matches no rule.

use crate::alert::Alert;
use crate::constants::DEFAULT_VITAL_SIGNS_RANGE;
use crate::metric::{Severity, VitalMetric};
use crate::range::{MetricRange, VitalSignsRange};
use crate::reading::VitalSignsReading;
use chrono::{DateTime, Utc};

/// Evaluate `reading` against `range` (or the default ranges), stamping alerts with the current
/// time.
pub fn evaluate_vital_signs(
    reading: &VitalSignsReading,
    range: Option<&VitalSignsRange>,
) -> Vec<Alert> {
    evaluate_vital_signs_at(reading, range, Utc::now())
}

/// Evaluate `reading` against `range` (or the default ranges), stamping every alert with
/// `evaluated_at`.
///
/// Identical inputs always produce identical output.
pub fn evaluate_vital_signs_at(
    reading: &VitalSignsReading,
    range: Option<&VitalSignsRange>,
    evaluated_at: DateTime<Utc>,
) -> Vec<Alert> {
    let range = range.unwrap_or(&DEFAULT_VITAL_SIGNS_RANGE);

    let alerts: Vec<Alert> = VitalMetric::EVALUATION_ORDER
        .iter()
        .filter_map(|&metric| {
            let value = reading.observed(metric)?;
            let (severity, threshold) = classify(metric, value, range.for_metric(metric))?;
            Some(Alert::raise(
                reading,
                metric,
                severity,
                value,
                threshold,
                evaluated_at,
            ))
        })
        .collect();

    for alert in &alerts {
        if alert.severity == Severity::Critical {
            tracing::warn!(
                patient_id = %alert.patient_id,
                vital_signs_id = %alert.vital_signs_id,
                metric = %alert.metric,
                value = alert.value,
                threshold = alert.threshold,
                "critical vital-signs alert"
            );
        } else {
            tracing::debug!(
                patient_id = %alert.patient_id,
                metric = %alert.metric,
                severity = %alert.severity,
                value = alert.value,
                threshold = alert.threshold,
                "vital-signs alert"
            );
        }
    }

    alerts
}

/// Severity and breached threshold for `value`, or `None` when it is in range.
fn classify(metric: VitalMetric, value: f64, bounds: MetricRange) -> Option<(Severity, f64)> {
    let margin = metric.critical_margin();

    match metric {
        VitalMetric::OxygenSaturation => {
            if value < bounds.min {
                let severity = if value < bounds.min - margin {
                    Severity::Critical
                } else {
                    Severity::Low
                };
                Some((severity, bounds.min))
            } else {
                None
            }
        }
        VitalMetric::Systolic
        | VitalMetric::Diastolic
        | VitalMetric::HeartRate
        | VitalMetric::RespiratoryRate
        | VitalMetric::Temperature => {
            if value < bounds.min {
                Some((Severity::Low, bounds.min))
            } else if value > bounds.max {
                let severity = if value > bounds.max + margin {
                    Severity::Critical
                } else {
                    Severity::High
                };
                Some((severity, bounds.max))
            } else {
                None
            }
        }
    }
}
