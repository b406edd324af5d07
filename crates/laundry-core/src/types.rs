//! # Domain Types
//!
//! Core domain types used throughout the laundry shop.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │    Employee     │   │    Service      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ID-CS-..)  │   │  id (ID-EM-..)  │   │  id (ID-SV-..)  │       │
//! │  │  name           │   │  username       │   │  name           │       │
//! │  │  phone_number   │   │  password_hash  │   │  price_per_kg   │       │
//! │  └────────┬────────┘   └────────┬────────┘   └────────┬────────┘       │
//! │           │                     │                     │                 │
//! │           └─────────────┬───────┴─────────────────────┘                 │
//! │                         ▼                                               │
//! │               ┌───────────────────┐      ┌──────────────────────┐       │
//! │               │    Transaction    │      │  TransactionStatus   │       │
//! │               │  ───────────────  │      │  ──────────────────  │       │
//! │               │  id (ID-TR-..)    │      │  Received            │       │
//! │               │  weight_grams     │      │  Washing             │       │
//! │               │  total / paid     │      │  Ready               │       │
//! │               │  status           │      │  PickedUp            │       │
//! │               └───────────────────┘      └──────────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stored records carry raw integer columns (`price_per_kg`, `total`, ...);
//! accessors wrap them in [`Money`] and [`Weight`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, ValidationError};
use crate::money::Money;
use crate::pricing::Weight;

// =============================================================================
// Customer
// =============================================================================

/// A shop customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Customer form contents before an ID is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub address: String,
    pub phone_number: String,
}

// =============================================================================
// Employee
// =============================================================================

/// A staff member who can log in and take in laundry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub username: String,
    /// Argon2 PHC string. Never leaves the process.
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Employee form contents. `password` is plain text and hashed on insert.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub username: String,
    pub password: String,
}

// =============================================================================
// Service
// =============================================================================

/// A laundry service offered by the shop, priced per kilogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Service {
    pub id: String,
    pub name: String,
    /// Price per kilogram in minor units.
    pub price_per_kg: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Service {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_minor(self.price_per_kg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewService {
    pub name: String,
    pub price_per_kg: Money,
}

// =============================================================================
// Transaction Status
// =============================================================================

/// Where a load of laundry is in the shop.
///
/// ## Lifecycle
/// ```text
/// Received ──► Washing ──► Ready ──► PickedUp
/// ```
/// Moves are forward only; skipping ahead is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Load weighed and taken in.
    Received,
    /// In the machines.
    Washing,
    /// Folded and waiting for the customer.
    Ready,
    /// Handed back to the customer.
    PickedUp,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 4] = [
        TransactionStatus::Received,
        TransactionStatus::Washing,
        TransactionStatus::Ready,
        TransactionStatus::PickedUp,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Received => "received",
            TransactionStatus::Washing => "washing",
            TransactionStatus::Ready => "ready",
            TransactionStatus::PickedUp => "picked_up",
        }
    }

    /// Checks that moving to `next` is allowed.
    ///
    /// Returning to the current status is accepted as a no-op.
    pub fn transition_to(self, next: TransactionStatus) -> Result<TransactionStatus, CoreError> {
        if next < self {
            return Err(CoreError::InvalidStatusTransition {
                from: self,
                to: next,
            });
        }
        Ok(next)
    }
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Received
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        TransactionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                ValidationError::invalid(
                    "status",
                    "must be one of received, washing, ready, picked_up",
                )
            })
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A load of laundry taken in for a service.
///
/// ## Snapshot Pattern
/// `price_per_kg` is copied from the service when the load is taken in, so
/// later price changes do not rewrite old receipts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Transaction {
    pub id: String,
    pub customer_id: String,
    pub employee_id: String,
    pub service_id: String,
    pub weight_grams: i64,
    /// Service price per kilogram at intake (frozen).
    pub price_per_kg: i64,
    pub total: i64,
    pub paid: i64,
    pub change_due: i64,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    #[inline]
    pub fn weight(&self) -> Weight {
        Weight::from_grams(self.weight_grams)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_minor(self.total)
    }

    #[inline]
    pub fn paid(&self) -> Money {
        Money::from_minor(self.paid)
    }

    #[inline]
    pub fn change(&self) -> Money {
        Money::from_minor(self.change_due)
    }
}

/// Transaction form contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub customer_id: String,
    pub employee_id: String,
    pub service_id: String,
    pub weight: Weight,
    pub paid: Money,
}

/// A transaction joined with the names shown in list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionDetail {
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    #[serde(flatten)]
    pub transaction: Transaction,
    pub customer_name: String,
    pub employee_name: String,
    pub service_name: String,
}

/// Totals for the report screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub transaction_count: i64,
    pub total_weight_grams: i64,
    pub revenue: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!("washing".parse::<TransactionStatus>().unwrap(), TransactionStatus::Washing);
        assert_eq!(" READY ".parse::<TransactionStatus>().unwrap(), TransactionStatus::Ready);
        assert_eq!(
            "picked-up".parse::<TransactionStatus>().unwrap(),
            TransactionStatus::PickedUp
        );
        assert!("lost".parse::<TransactionStatus>().is_err());
    }

    #[test]
    fn test_status_moves_forward_only() {
        use TransactionStatus::*;

        assert_eq!(Received.transition_to(Washing).unwrap(), Washing);
        assert_eq!(Received.transition_to(Ready).unwrap(), Ready);
        assert_eq!(Ready.transition_to(Ready).unwrap(), Ready);

        let err = PickedUp.transition_to(Washing).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidStatusTransition {
                from: PickedUp,
                to: Washing
            }
        ));
    }

    #[test]
    fn test_employee_hash_is_not_serialized() {
        let now = Utc::now();
        let employee = Employee {
            id: "ID-EM-1-1".to_string(),
            name: "Sari".to_string(),
            username: "sari".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_string(&employee).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("\"username\":\"sari\""));
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&TransactionStatus::PickedUp).unwrap();
        assert_eq!(json, "\"picked_up\"");
    }
}
