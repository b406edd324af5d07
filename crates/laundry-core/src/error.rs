//! # Error Types
//!
//! Domain-specific error types for laundry-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  laundry-core errors (this file)                                       │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  laundry-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Terminal     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;
use crate::types::TransactionStatus;

/// Business rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Customer handed over less than the total.
    ///
    /// ## User Workflow
    /// ```text
    /// Total:  17500.00
    /// Paid:   15000.00
    ///      │
    ///      ▼
    /// InsufficientPayment { total: 17500.00, paid: 15000.00 }
    ///      │
    ///      ▼
    /// Operator is asked for the remaining 2500.00
    /// ```
    #[error("Insufficient payment: total {total}, paid {paid}")]
    InsufficientPayment { total: Money, paid: Money },

    /// The requested status change would move a load backwards.
    #[error("Cannot move transaction from {from} to {to}")]
    InvalidStatusTransition {
        from: TransactionStatus,
        to: TransactionStatus,
    },

    /// A computed amount does not fit in [`Money`].
    #[error("Amount out of range: {0}")]
    AmountOverflow(&'static str),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Input validation errors.
///
/// Raised before anything reaches the database.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (bad ID, bad phone number, bad weight).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientPayment {
            total: Money::from_minor(1_750_000),
            paid: Money::from_minor(1_500_000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient payment: total 17500.00, paid 15000.00"
        );

        let err = CoreError::InvalidStatusTransition {
            from: TransactionStatus::Ready,
            to: TransactionStatus::Washing,
        };
        assert_eq!(err.to_string(), "Cannot move transaction from ready to washing");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 6,
        };
        assert_eq!(err.to_string(), "password must be at least 6 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("phone_number").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
