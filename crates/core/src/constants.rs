//! Constants used throughout the wound-care core crate.
//!
//! Default normal ranges and the fixed critical margins applied on top of them. The margins are
//! absolute offsets in each metric's own unit.

use crate::range::{MetricRange, VitalSignsRange};

/// Environment variable naming a YAML file that overrides the default ranges.
pub const VITAL_RANGES_ENV_VAR: &str = "WOUNDCARE_VITAL_RANGES";

/// Default systolic blood pressure range (mmHg).
pub const DEFAULT_SYSTOLIC_RANGE: MetricRange = MetricRange::new(90.0, 140.0);

/// Default diastolic blood pressure range (mmHg).
pub const DEFAULT_DIASTOLIC_RANGE: MetricRange = MetricRange::new(60.0, 90.0);

/// Default heart rate range (beats/min).
pub const DEFAULT_HEART_RATE_RANGE: MetricRange = MetricRange::new(60.0, 100.0);

/// Default respiratory rate range (breaths/min).
pub const DEFAULT_RESPIRATORY_RATE_RANGE: MetricRange = MetricRange::new(12.0, 20.0);

/// Default body temperature range (°C).
pub const DEFAULT_TEMPERATURE_RANGE: MetricRange = MetricRange::new(36.1, 37.2);

/// Default oxygen saturation range (%). The upper bound is never alerted on.
pub const DEFAULT_OXYGEN_SATURATION_RANGE: MetricRange = MetricRange::new(95.0, 100.0);

/// Ranges used when the caller supplies none.
pub const DEFAULT_VITAL_SIGNS_RANGE: VitalSignsRange = VitalSignsRange {
    systolic: DEFAULT_SYSTOLIC_RANGE,
    diastolic: DEFAULT_DIASTOLIC_RANGE,
    heart_rate: DEFAULT_HEART_RATE_RANGE,
    respiratory_rate: DEFAULT_RESPIRATORY_RATE_RANGE,
    temperature: DEFAULT_TEMPERATURE_RANGE,
    oxygen_saturation: DEFAULT_OXYGEN_SATURATION_RANGE,
};

/// Above `max` by more than this escalates systolic from high to critical.
pub const SYSTOLIC_CRITICAL_MARGIN: f64 = 20.0;

/// Above `max` by more than this escalates diastolic from high to critical.
pub const DIASTOLIC_CRITICAL_MARGIN: f64 = 15.0;

/// Above `max` by more than this escalates heart rate from high to critical.
pub const HEART_RATE_CRITICAL_MARGIN: f64 = 20.0;

/// Above `max` by more than this escalates respiratory rate from high to critical.
pub const RESPIRATORY_RATE_CRITICAL_MARGIN: f64 = 8.0;

/// Above `max` by more than this escalates temperature from high to critical.
pub const TEMPERATURE_CRITICAL_MARGIN: f64 = 1.0;

/// Below `min` by more than this escalates oxygen saturation from low to critical.
pub const OXYGEN_SATURATION_CRITICAL_MARGIN: f64 = 5.0;
