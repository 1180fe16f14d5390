//! Record identifier utilities.
//!
//! Readings, alerts and patients are referenced by identifiers in a *canonical* form:
//! **32 lowercase hexadecimal characters** (no hyphens), the same value produced by
//! `Uuid::new_v4().simple().to_string()`.
//!
//! This crate provides:
//! - [`RecordId`], a wrapper that guarantees the canonical format once constructed.
//! - Deterministic derivation of alert identifiers from the source reading and metric, so that
//!   evaluating the same reading twice yields the same alert identifiers.
//!
//! ## Canonical form
//! - Length: 32
//! - Characters: `0-9` and `a-f` only
//! - Example: `550e8400e29b41d4a716446655440000`

mod record_id;

pub use record_id::{RecordId, Uuid, ALERT_NAMESPACE};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type UuidResult<T> = Result<T, UuidError>;
