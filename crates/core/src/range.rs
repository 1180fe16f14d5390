//! Normal-range configuration for vital signs.
//!
//! Responsibilities:
//! - Define the domain-level [`VitalSignsRange`] used by the evaluator
//! - Define a strict YAML wire model for range files
//! - Validate bounds before a range is put into service
//!
//! Range files use snake_case keys:
//!
//! ```yaml
//! systolic: { min: 90, max: 140 }
//! diastolic: { min: 60, max: 90 }
//! heart_rate: { min: 60, max: 100 }
//! respiratory_rate: { min: 12, max: 20 }
//! temperature: { min: 36.1, max: 37.2 }
//! oxygen_saturation: { min: 95, max: 100 }
//! ```

use crate::constants::DEFAULT_VITAL_SIGNS_RANGE;
use crate::metric::VitalMetric;
use crate::{VitalsError, VitalsResult};
use serde::{Deserialize, Serialize};

/// Inclusive `{min, max}` bounds for one metric.
///
/// A value equal to either bound is in range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, metric: VitalMetric) -> VitalsResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(VitalsError::InvalidRange {
                metric,
                reason: "bounds must be finite numbers".into(),
            });
        }
        if self.min > self.max {
            return Err(VitalsError::InvalidRange {
                metric,
                reason: format!("min {} exceeds max {}", self.min, self.max),
            });
        }
        Ok(())
    }
}

/// Per-metric normal ranges used as the comparison baseline.
///
/// The oxygen saturation `max` is carried for completeness but never alerted on. Range files
/// go through [`VitalSignsRange::parse_yaml`] and [`VitalSignsRange::render_yaml`]; there is no
/// other serialized form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VitalSignsRange {
    pub systolic: MetricRange,
    pub diastolic: MetricRange,
    pub heart_rate: MetricRange,
    pub respiratory_rate: MetricRange,
    pub temperature: MetricRange,
    pub oxygen_saturation: MetricRange,
}

impl Default for VitalSignsRange {
    fn default() -> Self {
        DEFAULT_VITAL_SIGNS_RANGE
    }
}

impl VitalSignsRange {
    /// Returns the bounds configured for `metric`.
    pub fn for_metric(&self, metric: VitalMetric) -> MetricRange {
        match metric {
            VitalMetric::Systolic => self.systolic,
            VitalMetric::Diastolic => self.diastolic,
            VitalMetric::HeartRate => self.heart_rate,
            VitalMetric::RespiratoryRate => self.respiratory_rate,
            VitalMetric::Temperature => self.temperature,
            VitalMetric::OxygenSaturation => self.oxygen_saturation,
        }
    }

    /// Checks every metric's bounds are finite and ordered.
    ///
    /// # Errors
    ///
    /// Returns [`VitalsError::InvalidRange`] naming the first offending metric.
    pub fn validate(&self) -> VitalsResult<()> {
        VitalMetric::EVALUATION_ORDER
            .iter()
            .try_for_each(|&metric| self.for_metric(metric).validate(metric))
    }

    /// Parse and validate a range configuration from YAML text.
    ///
    /// Unknown keys and wrongly typed values are rejected, and the error names the failing
    /// path (for example `heart_rate.max`).
    ///
    /// # Errors
    ///
    /// Returns [`VitalsError::RangeSchema`] when the YAML does not match the schema and
    /// [`VitalsError::InvalidRange`] when bounds are inverted or non-finite.
    pub fn parse_yaml(yaml_text: &str) -> VitalsResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, VitalRangesWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(VitalsError::RangeSchema(format!("at {path}: {source}")));
            }
        };

        let range = Self::from(wire);
        range.validate()?;
        Ok(range)
    }

    /// Render this range configuration as YAML text in the range-file schema.
    ///
    /// # Errors
    ///
    /// Returns [`VitalsError::YamlSerialization`] if serialization fails.
    pub fn render_yaml(&self) -> VitalsResult<String> {
        serde_yaml::to_string(&VitalRangesWire::from(*self)).map_err(VitalsError::YamlSerialization)
    }
}

/// On-disk representation of a range file.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct VitalRangesWire {
    systolic: MetricRange,
    diastolic: MetricRange,
    heart_rate: MetricRange,
    respiratory_rate: MetricRange,
    temperature: MetricRange,
    oxygen_saturation: MetricRange,
}

impl From<VitalRangesWire> for VitalSignsRange {
    fn from(wire: VitalRangesWire) -> Self {
        Self {
            systolic: wire.systolic,
            diastolic: wire.diastolic,
            heart_rate: wire.heart_rate,
            respiratory_rate: wire.respiratory_rate,
            temperature: wire.temperature,
            oxygen_saturation: wire.oxygen_saturation,
        }
    }
}

impl From<VitalSignsRange> for VitalRangesWire {
    fn from(range: VitalSignsRange) -> Self {
        Self {
            systolic: range.systolic,
            diastolic: range.diastolic,
            heart_rate: range.heart_rate,
            respiratory_rate: range.respiratory_rate,
            temperature: range.temperature,
            oxygen_saturation: range.oxygen_saturation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"systolic: { min: 90, max: 140 }
diastolic: { min: 60, max: 90 }
heart_rate: { min: 60, max: 100 }
respiratory_rate: { min: 12, max: 20 }
temperature: { min: 36.1, max: 37.2 }
oxygen_saturation: { min: 95, max: 100 }
"#;

    #[test]
    fn default_range_matches_clinical_table() {
        let range = VitalSignsRange::default();
        assert_eq!(range.systolic, MetricRange::new(90.0, 140.0));
        assert_eq!(range.diastolic, MetricRange::new(60.0, 90.0));
        assert_eq!(range.heart_rate, MetricRange::new(60.0, 100.0));
        assert_eq!(range.respiratory_rate, MetricRange::new(12.0, 20.0));
        assert_eq!(range.temperature, MetricRange::new(36.1, 37.2));
        assert_eq!(range.oxygen_saturation, MetricRange::new(95.0, 100.0));
        range.validate().expect("defaults are valid");
    }

    #[test]
    fn parses_sample_yaml_into_defaults() {
        let parsed = VitalSignsRange::parse_yaml(SAMPLE).expect("parse yaml");
        assert_eq!(parsed, VitalSignsRange::default());
    }

    #[test]
    fn rendered_yaml_parses_back() {
        let custom = VitalSignsRange {
            heart_rate: MetricRange::new(50.0, 110.0),
            ..VitalSignsRange::default()
        };
        let yaml = custom.render_yaml().expect("render");
        assert!(yaml.contains("heart_rate"));
        assert!(!yaml.contains("heartRate"));
        assert_eq!(VitalSignsRange::parse_yaml(&yaml).expect("reparse"), custom);
    }

    #[test]
    fn rejects_unknown_keys() {
        let input = format!("{SAMPLE}blood_glucose: {{ min: 4, max: 7 }}\n");
        match VitalSignsRange::parse_yaml(&input) {
            Err(VitalsError::RangeSchema(msg)) => assert!(msg.contains("blood_glucose")),
            other => panic!("expected RangeSchema error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_wrong_types_with_path() {
        let input = SAMPLE.replace("max: 100 }\nrespiratory", "max: fast }\nrespiratory");
        match VitalSignsRange::parse_yaml(&input) {
            Err(VitalsError::RangeSchema(msg)) => assert!(msg.contains("heart_rate")),
            other => panic!("expected RangeSchema error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_metric() {
        let input: String = SAMPLE
            .lines()
            .filter(|l| !l.starts_with("temperature"))
            .map(|l| format!("{l}\n"))
            .collect();
        match VitalSignsRange::parse_yaml(&input) {
            Err(VitalsError::RangeSchema(msg)) => assert!(msg.contains("temperature")),
            other => panic!("expected RangeSchema error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_inverted_bounds() {
        let input = SAMPLE.replace(
            "diastolic: { min: 60, max: 90 }",
            "diastolic: { min: 95, max: 90 }",
        );
        match VitalSignsRange::parse_yaml(&input) {
            Err(VitalsError::InvalidRange { metric, reason }) => {
                assert_eq!(metric, VitalMetric::Diastolic);
                assert!(reason.contains("exceeds"));
            }
            other => panic!("expected InvalidRange error, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_non_finite_bounds() {
        let range = VitalSignsRange {
            temperature: MetricRange::new(f64::NAN, 37.2),
            ..VitalSignsRange::default()
        };
        assert!(matches!(
            range.validate(),
            Err(VitalsError::InvalidRange {
                metric: VitalMetric::Temperature,
                ..
            })
        ));
    }

    #[test]
    fn contains_is_inclusive() {
        let range = MetricRange::new(60.0, 100.0);
        assert!(range.contains(60.0));
        assert!(range.contains(100.0));
        assert!(!range.contains(59.9));
        assert!(!range.contains(f64::NAN));
    }
}
