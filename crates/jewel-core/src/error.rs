//! # Error Types
//!
//! Domain-specific error types for jewel-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  jewel-core errors (this file)                                         │
//! │  ├── CoreError        - Pricing / configuration failures               │
//! │  └── ValidationError  - Sale form validation failures                  │
//! │                                                                         │
//! │  jewel-db errors (separate crate)                                      │
//! │  └── DbError          - Store failures, NotFound                       │
//! │                                                                         │
//! │  jewel-cli errors (in app)                                             │
//! │  └── ApiError         - What the caller sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Pricing input out of its domain.
    ///
    /// ## When This Occurs
    /// - weight or rate is zero or negative
    /// - making charges are negative
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// Billing configuration is unusable (tax rate above 100%, blank shop name).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidInput error.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True when the error was caused by caller-supplied input.
    pub fn is_input_error(&self) -> bool {
        matches!(self, CoreError::InvalidInput { .. } | CoreError::Validation(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Sale form validation errors.
///
/// Raised before any persistence is attempted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Value does not parse as a decimal number.
    #[error("{field} is not a valid number: '{value}'")]
    InvalidNumber { field: String, value: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

impl ValidationError {
    /// Name of the offending form field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::MustBeNonNegative { field }
            | ValidationError::InvalidNumber { field, .. }
            | ValidationError::OutOfRange { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::invalid_input("gold_weight", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid gold_weight: must be greater than zero"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "customer_name".to_string(),
        };
        assert_eq!(err.to_string(), "customer_name is required");

        let err = ValidationError::InvalidNumber {
            field: "gold_rate".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "gold_rate is not a valid number: 'abc'");
        assert_eq!(err.field(), "gold_rate");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "gold_weight".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert!(core_err.is_input_error());
        assert!(!CoreError::InvalidConfig("x".into()).is_input_error());
    }
}
