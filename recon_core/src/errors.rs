//! # Error Types
//!
//! Structured error types for recon_core. Every failure a calculation can
//! produce maps onto one of a small set of variants so that report tooling
//! can tell a bad measurement apart from a formula that has no physical
//! meaning for the given inputs.
//!
//! ## Error Taxonomy
//!
//! - `InvalidInput` - a supplied quantity is outside its valid domain
//!   (negative weight, restitution outside [0, 1], non-finite values)
//! - `UndefinedPhysics` - the inputs are individually valid but the formula
//!   has no real solution for their combination (effective friction ≤ 0)
//! - `InvalidConfig` - a constants table or config file failed validation
//! - `Serialization` - a JSON job or record could not be decoded
//!
//! Removing a zone that was never recorded is *not* an error anywhere in
//! this crate.
//!
//! ## Example
//!
//! ```rust
//! use recon_core::errors::{ReconError, ReconResult};
//!
//! fn validate_weight(weight_lb: f64) -> ReconResult<()> {
//!     if weight_lb <= 0.0 {
//!         return Err(ReconError::invalid_input(
//!             "weight_lb",
//!             weight_lb.to_string(),
//!             "Weight must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(validate_weight(-1.0).unwrap_err().error_code(), "INVALID_INPUT");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for recon_core operations
pub type ReconResult<T> = Result<T, ReconError>;

/// Structured error type for reconstruction calculations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum ReconError {
    /// An input quantity is outside its valid domain
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The formula is mathematically undefined for this combination of inputs
    #[error("Undefined physics in {formula}: {reason}")]
    UndefinedPhysics { formula: String, reason: String },

    /// Physical constants or configuration failed validation
    #[error("Invalid configuration '{key}': {reason}")]
    InvalidConfig { key: String, reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl ReconError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ReconError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UndefinedPhysics error
    pub fn undefined_physics(formula: impl Into<String>, reason: impl Into<String>) -> Self {
        ReconError::UndefinedPhysics {
            formula: formula.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ReconError::InvalidConfig {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by the caller's inputs rather than by the
    /// formula itself
    pub fn is_input_error(&self) -> bool {
        matches!(self, ReconError::InvalidInput { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ReconError::InvalidInput { .. } => "INVALID_INPUT",
            ReconError::UndefinedPhysics { .. } => "UNDEFINED_PHYSICS",
            ReconError::InvalidConfig { .. } => "INVALID_CONFIG",
            ReconError::Serialization { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for ReconError {
    fn from(err: serde_json::Error) -> Self {
        ReconError::Serialization {
            reason: err.to_string(),
        }
    }
}

/// Reject NaN and infinities before they reach a formula.
pub(crate) fn require_finite(field: &str, value: f64) -> ReconResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ReconError::invalid_input(field, value.to_string(), "Value must be a finite number"))
    }
}

/// Require a finite value ≥ 0.
pub(crate) fn require_non_negative(field: &str, value: f64, reason: &str) -> ReconResult<f64> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(ReconError::invalid_input(field, value.to_string(), reason));
    }
    Ok(value)
}

/// Require a finite value > 0.
pub(crate) fn require_positive(field: &str, value: f64, reason: &str) -> ReconResult<f64> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(ReconError::invalid_input(field, value.to_string(), reason));
    }
    Ok(value)
}

/// Convert a non-finite intermediate result into `UndefinedPhysics`.
pub(crate) fn finite_result(formula: &str, value: f64) -> ReconResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        tracing::warn!(formula, %value, "non-finite result");
        Err(ReconError::undefined_physics(formula, format!("result is not finite ({value})")))
    }
}
