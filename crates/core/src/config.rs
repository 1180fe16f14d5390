//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so no
//! environment variables or files are read while readings are being evaluated.

use crate::range::VitalSignsRange;
use crate::{VitalsError, VitalsResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoreConfig {
    vital_ranges: VitalSignsRange,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`VitalsError::InvalidRange`] if any metric's bounds are inverted or non-finite.
    pub fn new(vital_ranges: VitalSignsRange) -> VitalsResult<Self> {
        vital_ranges.validate()?;
        Ok(Self { vital_ranges })
    }

    pub fn vital_ranges(&self) -> &VitalSignsRange {
        &self.vital_ranges
    }
}

/// Resolve the normal ranges to evaluate against.
///
/// With `override_path` the ranges are read from that YAML file; otherwise the built-in defaults
/// are used.
///
/// # Errors
///
/// Returns a [`VitalsError`] if the file cannot be read or does not hold a valid range
/// configuration.
pub fn resolve_vital_ranges(override_path: Option<PathBuf>) -> VitalsResult<VitalSignsRange> {
    match override_path {
        Some(path) => {
            let ranges = load_vital_ranges(&path)?;
            tracing::info!("using vital-sign ranges from {}", path.display());
            Ok(ranges)
        }
        None => {
            tracing::info!("using default vital-sign ranges");
            Ok(VitalSignsRange::default())
        }
    }
}

/// Read and validate a YAML range file.
///
/// # Errors
///
/// Returns [`VitalsError::RangeFileRead`] on I/O failure, or the parse errors of
/// [`VitalSignsRange::parse_yaml`].
pub fn load_vital_ranges(path: &Path) -> VitalsResult<VitalSignsRange> {
    let text = std::fs::read_to_string(path).map_err(|source| VitalsError::RangeFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    VitalSignsRange::parse_yaml(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::MetricRange;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn resolves_defaults_without_override() {
        let ranges = resolve_vital_ranges(None).expect("defaults");
        assert_eq!(ranges, VitalSignsRange::default());
    }

    #[test]
    fn resolves_ranges_from_file() {
        let custom = VitalSignsRange {
            systolic: MetricRange::new(100.0, 150.0),
            ..VitalSignsRange::default()
        };
        let file = write_temp(&custom.render_yaml().unwrap());

        let ranges = resolve_vital_ranges(Some(file.path().to_path_buf())).expect("load file");
        assert_eq!(ranges, custom);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranges.yaml");

        match resolve_vital_ranges(Some(path.clone())) {
            Err(VitalsError::RangeFileRead { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected RangeFileRead, got {other:?}"),
        }
    }

    #[test]
    fn malformed_file_is_rejected() {
        let file = write_temp("systolic: [90, 140]\n");
        assert!(matches!(
            load_vital_ranges(file.path()),
            Err(VitalsError::RangeSchema(_))
        ));
    }

    #[test]
    fn core_config_rejects_invalid_ranges() {
        let inverted = VitalSignsRange {
            respiratory_rate: MetricRange::new(25.0, 12.0),
            ..VitalSignsRange::default()
        };
        assert!(CoreConfig::new(inverted).is_err());
        assert_eq!(
            CoreConfig::new(VitalSignsRange::default()).unwrap(),
            CoreConfig::default()
        );
    }
}
