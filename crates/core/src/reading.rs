//! Vital-signs readings.
//!
//! A reading is one timestamped observation for a patient. Values are stored as recorded and are
//! never range-checked here: detecting out-of-range values is the evaluator's job. Any metric may
//! be absent, in which case no rule is run for it. A metric recorded with a value that is not a
//! number (a string, an object, a blood pressure that is not an integer) is read as absent rather
//! than failing the whole reading.

use crate::metric::VitalMetric;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use woundcare_types::{ClinicalNote, NonEmptyText};

/// Systolic and diastolic pressure in mmHg.
///
/// Recorded together in practice, evaluated independently.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressure {
    #[serde(default, deserialize_with = "lenient_metric")]
    pub systolic: Option<i32>,
    #[serde(default, deserialize_with = "lenient_metric")]
    pub diastolic: Option<i32>,
}

/// One clinical observation of a patient's vital signs.
///
/// JSON uses camelCase field names. `id` and `patientId` default to empty strings when absent and
/// are carried into alerts unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSignsReading {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub patient_id: String,
    pub recorded_at: DateTime<Utc>,
    #[serde(default)]
    pub recorded_by: Option<NonEmptyText>,
    #[serde(default, deserialize_with = "lenient_blood_pressure")]
    pub blood_pressure: BloodPressure,
    /// Beats per minute.
    #[serde(default, deserialize_with = "lenient_metric")]
    pub heart_rate: Option<f64>,
    /// Breaths per minute.
    #[serde(default, deserialize_with = "lenient_metric")]
    pub respiratory_rate: Option<f64>,
    /// Body temperature in °C.
    #[serde(default, deserialize_with = "lenient_metric")]
    pub temperature: Option<f64>,
    /// Oxygen saturation in percent.
    #[serde(default, deserialize_with = "lenient_metric")]
    pub oxygen_saturation: Option<f64>,
    /// Weight in kg.
    #[serde(default, deserialize_with = "lenient_metric")]
    pub weight: Option<f64>,
    /// Height in cm.
    #[serde(default, deserialize_with = "lenient_metric")]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "lenient_metric")]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub notes: Option<ClinicalNote>,
}

impl VitalSignsReading {
    /// Creates a reading with no metrics recorded.
    pub fn new(
        id: impl Into<String>,
        patient_id: impl Into<String>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            patient_id: patient_id.into(),
            recorded_at,
            recorded_by: None,
            blood_pressure: BloodPressure::default(),
            heart_rate: None,
            respiratory_rate: None,
            temperature: None,
            oxygen_saturation: None,
            weight: None,
            height: None,
            bmi: None,
            notes: None,
        }
    }

    pub fn with_recorded_by(mut self, actor: NonEmptyText) -> Self {
        self.recorded_by = Some(actor);
        self
    }

    pub fn with_blood_pressure(mut self, systolic: i32, diastolic: i32) -> Self {
        self.blood_pressure = BloodPressure {
            systolic: Some(systolic),
            diastolic: Some(diastolic),
        };
        self
    }

    pub fn with_heart_rate(mut self, beats_per_minute: f64) -> Self {
        self.heart_rate = Some(beats_per_minute);
        self
    }

    pub fn with_respiratory_rate(mut self, breaths_per_minute: f64) -> Self {
        self.respiratory_rate = Some(breaths_per_minute);
        self
    }

    pub fn with_temperature(mut self, celsius: f64) -> Self {
        self.temperature = Some(celsius);
        self
    }

    pub fn with_oxygen_saturation(mut self, percent: f64) -> Self {
        self.oxygen_saturation = Some(percent);
        self
    }

    pub fn with_body_measurements(mut self, weight_kg: f64, height_cm: f64) -> Self {
        self.weight = Some(weight_kg);
        self.height = Some(height_cm);
        self
    }

    pub fn with_notes(mut self, notes: ClinicalNote) -> Self {
        self.notes = Some(notes);
        self
    }

    /// Fills `bmi` from weight and height, or clears it when they cannot produce one.
    pub fn with_derived_bmi(mut self) -> Self {
        self.bmi = match (self.weight, self.height) {
            (Some(weight), Some(height)) => compute_bmi(weight, height),
            _ => None,
        };
        self
    }

    /// Returns the recorded value for `metric` as a float, if present.
    pub fn observed(&self, metric: VitalMetric) -> Option<f64> {
        match metric {
            VitalMetric::Systolic => self.blood_pressure.systolic.map(f64::from),
            VitalMetric::Diastolic => self.blood_pressure.diastolic.map(f64::from),
            VitalMetric::HeartRate => self.heart_rate,
            VitalMetric::RespiratoryRate => self.respiratory_rate,
            VitalMetric::Temperature => self.temperature,
            VitalMetric::OxygenSaturation => self.oxygen_saturation,
        }
    }
}

/// A recorded value that either has the expected numeric type or is something else entirely.
#[derive(Deserialize)]
#[serde(untagged)]
enum Recorded<T> {
    Value(T),
    Unreadable(serde::de::IgnoredAny),
}

/// Reads an optional metric, treating a value of the wrong type as absent.
fn lenient_metric<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<Recorded<T>>::deserialize(deserializer)? {
        Some(Recorded::Value(value)) => Some(value),
        Some(Recorded::Unreadable(_)) | None => None,
    })
}

fn lenient_blood_pressure<'de, D>(deserializer: D) -> Result<BloodPressure, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_metric(deserializer)?.unwrap_or_default())
}

/// Body-mass index from weight in kg and height in cm, rounded to one decimal place.
///
/// Returns `None` unless both inputs are finite and positive.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if !(weight_kg.is_finite() && height_cm.is_finite()) || weight_kg <= 0.0 || height_cm <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    Some((bmi * 10.0).round() / 10.0)
}
