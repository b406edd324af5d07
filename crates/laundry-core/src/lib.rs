//! # laundry-core: Pure Business Logic for the Laundry Shop
//!
//! This crate holds the domain model and every rule that does not need a
//! database: pricing a load by weight, making change, generating record
//! identifiers and validating form input.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Laundry Shop Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    laundry-cli (front end)                      │   │
//! │  │    customer / employee / service / transaction / report         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ laundry-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │    id     │  │ validation│  │   │
//! │  │   │ Customer  │  │  Weight   │  │ ID-CS-... │  │   rules   │  │   │
//! │  │   │Transaction│  │  Receipt  │  │  ticks    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  laundry-db (Database Layer)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Employee, Service, Transaction)
//! - [`money`] - Money type with integer arithmetic
//! - [`pricing`] - Weight, per-kilogram quotes and change
//! - [`id`] - `ID-<PREFIX>-<n>-<ticks>` identifiers
//! - [`error`] - Domain error types
//! - [`validation`] - Form input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use laundry_core::money::Money;
//! use laundry_core::pricing::{quote, Weight};
//!
//! let price_per_kg = Money::from_minor(700_000); // 7000.00 per kg
//! let weight = Weight::from_kg_str("2.5").unwrap();
//!
//! assert_eq!(quote(price_per_kg, weight).unwrap().minor(), 1_750_000);
//! ```

pub mod error;
pub mod id;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use id::{generate_id, EntityKind};
pub use money::Money;
pub use pricing::{Receipt, Weight};
pub use types::*;

/// Heaviest single load the shop accepts, in grams.
pub const MAX_LOAD_GRAMS: i64 = 100_000;

/// Highest price per kilogram a service may carry. With
/// [`MAX_LOAD_GRAMS`] the largest possible total stays far inside `i64`.
pub const MAX_PRICE_PER_KG: Money = Money::from_major(100_000_000);

/// Longest accepted search string.
pub const MAX_QUERY_LEN: usize = 100;
