//! Helpers for surfacing alerts to staff.
//!
//! Review order puts unacknowledged alerts first, the most severe first within each group, then
//! the most recently evaluated. Sorting is stable, so alerts from one evaluation keep their
//! metric order when everything else ties.

use crate::alert::Alert;
use crate::metric::Severity;
use crate::{VitalsError, VitalsResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use woundcare_types::NonEmptyText;
use woundcare_uuid::RecordId;

/// Sort `alerts` in place into review order.
pub fn sort_for_review(alerts: &mut [Alert]) {
    alerts.sort_by(review_order);
}

fn review_order(a: &Alert, b: &Alert) -> Ordering {
    a.is_acknowledged()
        .cmp(&b.is_acknowledged())
        .then_with(|| b.severity.cmp(&a.severity))
        .then_with(|| b.timestamp.cmp(&a.timestamp))
}

/// Alerts still awaiting review, in their existing order.
pub fn unacknowledged(alerts: &[Alert]) -> Vec<&Alert> {
    alerts.iter().filter(|a| !a.is_acknowledged()).collect()
}

/// Acknowledge the alert with identifier `id`.
///
/// A batch holding the same reading's alerts twice carries duplicate identifiers; acknowledging
/// one of those is refused rather than guessing which copy was meant.
///
/// # Errors
///
/// Returns [`VitalsError::AlertNotFound`] if no alert has that identifier,
/// [`VitalsError::AmbiguousAlertId`] if more than one does, or
/// [`VitalsError::AlertAlreadyAcknowledged`] if it was already acknowledged.
pub fn acknowledge_alert<'a>(
    alerts: &'a mut [Alert],
    id: RecordId,
    actor: NonEmptyText,
    at: DateTime<Utc>,
) -> VitalsResult<&'a Alert> {
    let mut matching = alerts.iter_mut().filter(|a| a.id == id);
    let alert = matching.next().ok_or(VitalsError::AlertNotFound(id))?;
    if matching.next().is_some() {
        return Err(VitalsError::AmbiguousAlertId(id));
    }
    alert.acknowledge(actor, at)?;
    Ok(alert)
}

/// Parse a JSON array of alerts.
///
/// # Errors
///
/// Returns [`VitalsError::JsonDeserialization`] if `json` is not an array of valid alerts.
pub fn parse_alerts_json(json: &str) -> VitalsResult<Vec<Alert>> {
    serde_json::from_str(json).map_err(VitalsError::JsonDeserialization)
}

/// Render alerts as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`VitalsError::JsonSerialization`] if serialization fails.
pub fn render_alerts_json(alerts: &[Alert]) -> VitalsResult<String> {
    serde_json::to_string_pretty(alerts).map_err(VitalsError::JsonSerialization)
}

/// Counts over a batch of alerts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSummary {
    pub total: usize,
    pub low: usize,
    pub high: usize,
    pub critical: usize,
    pub unacknowledged: usize,
    /// Unacknowledged alerts at critical severity.
    pub critical_unacknowledged: usize,
    pub highest: Option<Severity>,
}

impl AlertSummary {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        alerts.iter().fold(Self::default(), |mut summary, alert| {
            summary.total += 1;
            match alert.severity {
                Severity::Low => summary.low += 1,
                Severity::High => summary.high += 1,
                Severity::Critical => summary.critical += 1,
            }
            if !alert.is_acknowledged() {
                summary.unacknowledged += 1;
                if alert.severity == Severity::Critical {
                    summary.critical_unacknowledged += 1;
                }
            }
            summary.highest = summary.highest.max(Some(alert.severity));
            summary
        })
    }

    /// True when at least one critical alert is still awaiting review.
    pub fn needs_escalation(&self) -> bool {
        self.critical_unacknowledged > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::evaluate_vital_signs_at;
    use crate::metric::VitalMetric;
    use crate::reading::VitalSignsReading;
    use chrono::{Duration, TimeZone};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap()
    }

    fn nurse() -> NonEmptyText {
        NonEmptyText::new("nurse.okafor").unwrap()
    }

    /// Diastolic high, heart rate low, oxygen saturation critical.
    fn mixed_alerts() -> Vec<Alert> {
        let reading = VitalSignsReading::new("vs-1", "pt-1", at())
            .with_blood_pressure(120, 95)
            .with_heart_rate(50.0)
            .with_oxygen_saturation(85.0);
        evaluate_vital_signs_at(&reading, None, at())
    }

    #[test]
    fn review_order_puts_critical_unacknowledged_first() {
        let mut alerts = mixed_alerts();
        sort_for_review(&mut alerts);

        let order: Vec<(VitalMetric, Severity)> =
            alerts.iter().map(|a| (a.metric, a.severity)).collect();
        assert_eq!(
            order,
            vec![
                (VitalMetric::OxygenSaturation, Severity::Critical),
                (VitalMetric::Diastolic, Severity::High),
                (VitalMetric::HeartRate, Severity::Low),
            ]
        );
    }

    #[test]
    fn acknowledged_alerts_sink_below_unacknowledged() {
        let mut alerts = mixed_alerts();
        let critical_id = alerts[2].id;
        acknowledge_alert(&mut alerts, critical_id, nurse(), at()).expect("acknowledge");

        sort_for_review(&mut alerts);
        assert_eq!(alerts.last().map(|a| a.id), Some(critical_id));
        assert_eq!(alerts[0].severity, Severity::High);
    }

    #[test]
    fn newer_alerts_sort_first_within_severity() {
        let older_reading = VitalSignsReading::new("vs-old", "pt-1", at()).with_heart_rate(110.0);
        let newer_reading = VitalSignsReading::new("vs-new", "pt-1", at()).with_heart_rate(112.0);

        let mut alerts = evaluate_vital_signs_at(&older_reading, None, at());
        alerts.extend(evaluate_vital_signs_at(
            &newer_reading,
            None,
            at() + Duration::minutes(10),
        ));

        sort_for_review(&mut alerts);
        assert_eq!(alerts[0].vital_signs_id, "vs-new");
        assert_eq!(alerts[1].vital_signs_id, "vs-old");
    }

    #[test]
    fn unacknowledged_filters_reviewed_alerts() {
        let mut alerts = mixed_alerts();
        let first = alerts[0].id;
        acknowledge_alert(&mut alerts, first, nurse(), at()).unwrap();

        let pending = unacknowledged(&alerts);
        assert_eq!(pending.len(), 2);
        assert!(pending.iter().all(|a| a.id != first));
    }

    #[test]
    fn acknowledge_alert_reports_unknown_and_repeat() {
        let mut alerts = mixed_alerts();
        let missing = RecordId::for_alert(&["pt-1", "vs-999"], "heartRate");
        assert!(matches!(
            acknowledge_alert(&mut alerts, missing, nurse(), at()),
            Err(VitalsError::AlertNotFound(id)) if id == missing
        ));

        let id = alerts[1].id;
        acknowledge_alert(&mut alerts, id, nurse(), at()).unwrap();
        assert!(matches!(
            acknowledge_alert(&mut alerts, id, nurse(), at()),
            Err(VitalsError::AlertAlreadyAcknowledged(_))
        ));
    }

    #[test]
    fn readings_without_identifiers_get_distinct_alerts() {
        let first = VitalSignsReading::new("", "pt-A", at()).with_heart_rate(45.0);
        let second = VitalSignsReading::new("", "pt-B", at()).with_heart_rate(45.0);
        let mut alerts = evaluate_vital_signs_at(&first, None, at());
        alerts.extend(evaluate_vital_signs_at(&second, None, at()));
        assert_ne!(alerts[0].id, alerts[1].id);

        let second_id = alerts[1].id;
        let acknowledged = acknowledge_alert(&mut alerts, second_id, nurse(), at()).unwrap();
        assert_eq!(acknowledged.patient_id, "pt-B");
        assert!(!alerts[0].is_acknowledged());
        assert!(alerts[1].is_acknowledged());

        let first_id = alerts[0].id;
        acknowledge_alert(&mut alerts, first_id, nurse(), at()).expect("first patient still open");
    }

    #[test]
    fn acknowledge_alert_refuses_duplicate_ids() {
        let mut alerts = mixed_alerts();
        alerts.extend(mixed_alerts());
        let id = alerts[0].id;

        assert!(matches!(
            acknowledge_alert(&mut alerts, id, nurse(), at()),
            Err(VitalsError::AmbiguousAlertId(dup)) if dup == id
        ));
        assert!(alerts.iter().all(|a| !a.is_acknowledged()));
    }

    #[test]
    fn summary_counts_by_severity() {
        let mut alerts = mixed_alerts();
        let summary = AlertSummary::from_alerts(&alerts);
        assert_eq!(summary.total, 3);
        assert_eq!((summary.low, summary.high, summary.critical), (1, 1, 1));
        assert_eq!(summary.unacknowledged, 3);
        assert_eq!(summary.highest, Some(Severity::Critical));
        assert!(summary.needs_escalation());

        let critical_id = alerts[2].id;
        acknowledge_alert(&mut alerts, critical_id, nurse(), at()).unwrap();
        let summary = AlertSummary::from_alerts(&alerts);
        assert_eq!(summary.unacknowledged, 2);
        assert_eq!(summary.critical_unacknowledged, 0);
        assert!(!summary.needs_escalation());
    }

    #[test]
    fn alerts_json_round_trip_keeps_acknowledgement() {
        let mut alerts = mixed_alerts();
        let id = alerts[0].id;
        acknowledge_alert(&mut alerts, id, nurse(), at()).unwrap();

        let json = render_alerts_json(&alerts).expect("render");
        let parsed = parse_alerts_json(&json).expect("parse");
        assert_eq!(parsed, alerts);
        assert!(parsed[0].is_acknowledged());
    }

    #[test]
    fn parse_alerts_json_rejects_non_array() {
        assert!(matches!(
            parse_alerts_json("{}"),
            Err(VitalsError::JsonDeserialization(_))
        ));
    }

    #[test]
    fn empty_summary_has_no_highest() {
        let summary = AlertSummary::from_alerts(&[]);
        assert_eq!(summary, AlertSummary::default());
        assert_eq!(summary.highest, None);
    }
}
