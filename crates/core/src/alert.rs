//! Alert records raised by the evaluator.
//!
//! An alert flags exactly one metric breaching its range in exactly one direction. Alerts are
//! created unacknowledged; [`Alert::acknowledge`] is the only way to mark one reviewed and it
//! succeeds once.

use crate::metric::{Breach, Severity, VitalMetric};
use crate::reading::VitalSignsReading;
use crate::{VitalsError, VitalsResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use woundcare_types::NonEmptyText;
use woundcare_uuid::RecordId;

/// One detected abnormality.
///
/// Serialized field-for-field in camelCase. Deserialization rejects records whose
/// `acknowledged` flag disagrees with the presence of `acknowledgedBy` and `acknowledgedAt`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "AlertWire")]
pub struct Alert {
    pub id: RecordId,
    pub patient_id: String,
    pub vital_signs_id: String,
    pub metric: VitalMetric,
    pub severity: Severity,
    pub value: f64,
    pub threshold: f64,
    pub timestamp: DateTime<Utc>,
    acknowledged: bool,
    acknowledged_by: Option<NonEmptyText>,
    acknowledged_at: Option<DateTime<Utc>>,
}

impl Alert {
    /// Creates an unacknowledged alert for `metric` on `reading`.
    ///
    /// The identifier is derived from the reading's patient, identifier and recording time plus the
    /// metric tag, so raising the same alert for the same reading again yields the same `id`, while
    /// readings that share an empty or duplicated identifier still get distinct alerts.
    pub fn raise(
        reading: &VitalSignsReading,
        metric: VitalMetric,
        severity: Severity,
        value: f64,
        threshold: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let recorded_at = reading.recorded_at.to_rfc3339();
        let reading_key = [
            reading.patient_id.as_str(),
            reading.id.as_str(),
            recorded_at.as_str(),
        ];
        Self {
            id: RecordId::for_alert(&reading_key, metric.tag()),
            patient_id: reading.patient_id.clone(),
            vital_signs_id: reading.id.clone(),
            metric,
            severity,
            value,
            threshold,
            timestamp,
            acknowledged: false,
            acknowledged_by: None,
            acknowledged_at: None,
        }
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    pub fn acknowledged_by(&self) -> Option<&NonEmptyText> {
        self.acknowledged_by.as_ref()
    }

    pub fn acknowledged_at(&self) -> Option<DateTime<Utc>> {
        self.acknowledged_at
    }

    /// Direction of the breach this alert records.
    ///
    /// Oxygen saturation only ever breaches below its minimum.
    pub fn breach(&self) -> Breach {
        match (self.metric, self.severity) {
            (VitalMetric::OxygenSaturation, _) | (_, Severity::Low) => Breach::BelowMin,
            (_, Severity::High | Severity::Critical) => Breach::AboveMax,
        }
    }

    /// Marks this alert as reviewed by `actor` at `at`.
    ///
    /// # Errors
    ///
    /// Returns [`VitalsError::AlertAlreadyAcknowledged`] if the alert was already acknowledged;
    /// the existing acknowledgement is left untouched.
    pub fn acknowledge(&mut self, actor: NonEmptyText, at: DateTime<Utc>) -> VitalsResult<()> {
        if self.acknowledged {
            return Err(VitalsError::AlertAlreadyAcknowledged(self.id));
        }
        self.acknowledged = true;
        self.acknowledged_by = Some(actor);
        self.acknowledged_at = Some(at);
        tracing::info!(alert_id = %self.id, metric = %self.metric, "alert acknowledged");
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct AlertWire {
    id: RecordId,
    #[serde(default)]
    patient_id: String,
    #[serde(default)]
    vital_signs_id: String,
    metric: VitalMetric,
    severity: Severity,
    value: f64,
    threshold: f64,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    acknowledged: bool,
    #[serde(default)]
    acknowledged_by: Option<NonEmptyText>,
    #[serde(default)]
    acknowledged_at: Option<DateTime<Utc>>,
}

impl TryFrom<AlertWire> for Alert {
    type Error = VitalsError;

    fn try_from(wire: AlertWire) -> Result<Self, Self::Error> {
        if !wire.acknowledged && (wire.acknowledged_by.is_some() || wire.acknowledged_at.is_some())
        {
            return Err(VitalsError::InvalidInput(format!(
                "alert {} carries acknowledgement details but is not acknowledged",
                wire.id
            )));
        }
        if wire.acknowledged && (wire.acknowledged_by.is_none() || wire.acknowledged_at.is_none())
        {
            return Err(VitalsError::InvalidInput(format!(
                "alert {} is acknowledged but lacks acknowledgedBy or acknowledgedAt",
                wire.id
            )));
        }
        if wire.severity == Severity::High && !wire.metric.alerts_above_max() {
            return Err(VitalsError::InvalidInput(format!(
                "alert {}: {} never raises a high alert",
                wire.id, wire.metric
            )));
        }

        Ok(Self {
            id: wire.id,
            patient_id: wire.patient_id,
            vital_signs_id: wire.vital_signs_id,
            metric: wire.metric,
            severity: wire.severity,
            value: wire.value,
            threshold: wire.threshold,
            timestamp: wire.timestamp,
            acknowledged: wire.acknowledged,
            acknowledged_by: wire.acknowledged_by,
            acknowledged_at: wire.acknowledged_at,
        })
    }
}
