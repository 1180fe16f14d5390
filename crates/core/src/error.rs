use crate::metric::VitalMetric;
use woundcare_uuid::RecordId;

#[derive(Debug, thiserror::Error)]
pub enum VitalsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid range for {metric}: {reason}")]
    InvalidRange { metric: VitalMetric, reason: String },
    #[error(
        "failed to read range file (path: {path}): {source}",
        path = path.display()
    )]
    RangeFileRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("range file schema mismatch: {0}")]
    RangeSchema(String),
    #[error("failed to serialize YAML: {0}")]
    YamlSerialization(serde_yaml::Error),
    #[error("failed to deserialize JSON: {0}")]
    JsonDeserialization(serde_json::Error),
    #[error("failed to serialize JSON: {0}")]
    JsonSerialization(serde_json::Error),

    #[error("alert {0} not found")]
    AlertNotFound(RecordId),
    #[error("alert {0} appears more than once in the batch")]
    AmbiguousAlertId(RecordId),
    #[error("alert {0} has already been acknowledged")]
    AlertAlreadyAcknowledged(RecordId),

    #[error("invalid text: {0}")]
    Text(#[from] woundcare_types::TextError),
    #[error("invalid identifier: {0}")]
    Uuid(#[from] woundcare_uuid::UuidError),
}

pub type VitalsResult<T> = std::result::Result<T, VitalsError>;
