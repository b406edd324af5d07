//! # API Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Laundry CLI                        │
//! │                                                                         │
//! │  laundry transaction add ...                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Database Error? ─── DbError::QueryFailed("...") ──┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Rule Error? ─── CoreError::InsufficientPayment ── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: error[BUSINESS_LOGIC]: Insufficient payment: ...              │
//! │  --json: {"code":"BUSINESS_LOGIC","message":"Insufficient payment..."} │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use laundry_core::{CoreError, ValidationError};
use laundry_db::DbError;
use serde::Serialize;
use std::fmt;

/// Error returned from every command.
///
/// ## Serialization
/// With `--json`, this is what gets printed when a command fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Customer not found: ID-CS-3-638000000000000000"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No record with that key
    NotFound,

    /// Input failed validation or a reference is invalid
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// A shop rule refused the operation (underpayment, status order)
    BusinessLogic,

    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::BusinessLogic => "BUSINESS_LOGIC",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// Process exit code for the failure.
    pub const fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::ValidationError => 2,
            ErrorCode::NotFound => 3,
            ErrorCode::BusinessLogic => 4,
            ErrorCode::DatabaseError | ErrorCode::Internal => 1,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::new(
                    ErrorCode::ValidationError,
                    "Record is still referenced by a transaction",
                )
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Core(e) => ApiError::from(e),
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            e @ CoreError::InsufficientPayment { .. } => {
                ApiError::new(ErrorCode::BusinessLogic, e.to_string())
            }
            e @ CoreError::InvalidStatusTransition { .. } => {
                ApiError::new(ErrorCode::BusinessLogic, e.to_string())
            }
            e @ CoreError::AmountOverflow(_) => ApiError::validation(e.to_string()),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use laundry_core::{Money, TransactionStatus};

    #[test]
    fn test_not_found_mapping() {
        let err = ApiError::from(DbError::not_found("Customer", "ID-CS-1-1"));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Customer not found: ID-CS-1-1");
        assert_eq!(err.to_string(), "error[NOT_FOUND]: Customer not found: ID-CS-1-1");
    }

    #[test]
    fn test_core_errors_through_db() {
        let err = ApiError::from(DbError::Core(CoreError::InsufficientPayment {
            total: Money::from_major(17500),
            paid: Money::from_major(15000),
        }));
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        assert!(err.message.contains("17500.00"));

        let err = ApiError::from(CoreError::InvalidStatusTransition {
            from: TransactionStatus::Ready,
            to: TransactionStatus::Washing,
        });
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        let err = ApiError::from(DbError::from(ValidationError::MustBePositive {
            field: "weight".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_duplicate_and_reference_are_validation() {
        let err = ApiError::from(DbError::duplicate("username", "sari"));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "username 'sari' already exists");

        let err = ApiError::from(DbError::ForeignKeyViolation {
            message: "FOREIGN KEY constraint failed".to_string(),
        });
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(ApiError::validation("name is required")).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "name is required");
    }
}
