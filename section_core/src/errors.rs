//! # Error Types
//!
//! Structured error types for section_core. Lookup misses, unset design
//! values and unrecognized enumeration strings each get their own variant so
//! callers can tell a missing material apart from a mistyped criterion.
//!
//! An infeasible section is *not* an error: it shows up as zero admissible
//! capacity on the member and as a penalty inside the optimizer.
//!
//! ## Example
//!
//! ```rust
//! use section_core::errors::{CalcError, CalcResult};
//!
//! fn validate_span(span_m: f64) -> CalcResult<()> {
//!     if span_m <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "span_m".to_string(),
//!             value: span_m.to_string(),
//!             reason: "Span must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for section_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-positive geometry, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing (store column, layer thickness)
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Material not found in the property store
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// Floor layer not found in the property store
    #[error("Floor layer not found: {layer_name}")]
    LayerNotFound { layer_name: String },

    /// A design value was read before `derive_design_values` ran
    #[error("Design values of '{material_name}' have not been derived")]
    DesignValuesNotDerived { material_name: String },

    /// Unrecognized enumeration value or invalid setting
    #[error("Configuration error for '{setting}': {value} - {reason}")]
    Configuration {
        setting: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a LayerNotFound error
    pub fn layer_not_found(layer_name: impl Into<String>) -> Self {
        CalcError::LayerNotFound {
            layer_name: layer_name.into(),
        }
    }

    /// Create a DesignValuesNotDerived error
    pub fn design_values_not_derived(material_name: impl Into<String>) -> Self {
        CalcError::DesignValuesNotDerived {
            material_name: material_name.into(),
        }
    }

    /// Create a Configuration error
    pub fn configuration(setting: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Configuration {
            setting: setting.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Check if this error comes from a store lookup miss
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            CalcError::MaterialNotFound { .. } | CalcError::LayerNotFound { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::LayerNotFound { .. } => "LAYER_NOT_FOUND",
            CalcError::DesignValuesNotDerived { .. } => "DESIGN_VALUES_NOT_DERIVED",
            CalcError::Configuration { .. } => "CONFIGURATION_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

/// Validate that a geometric or physical input is finite and strictly positive.
pub(crate) fn ensure_positive(field: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be finite and positive",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::configuration("criterion", "ULS2", "expected 'ULS' or 'SLS1'");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"Configuration\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("test").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::material_not_found("C90/105").error_code(), "MATERIAL_NOT_FOUND");
        assert_eq!(CalcError::layer_not_found("Linoleum").error_code(), "LAYER_NOT_FOUND");
        assert_eq!(
            CalcError::configuration("objective", "cost", "unknown").error_code(),
            "CONFIGURATION_ERROR"
        );
    }

    #[test]
    fn test_lookup_failure_classification() {
        assert!(CalcError::material_not_found("X").is_lookup_failure());
        assert!(CalcError::layer_not_found("Y").is_lookup_failure());
        assert!(!CalcError::design_values_not_derived("GL24h").is_lookup_failure());
    }

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("h", 0.2).is_ok());
        assert!(ensure_positive("h", 0.0).is_err());
        assert!(ensure_positive("h", f64::NAN).is_err());
    }
}
