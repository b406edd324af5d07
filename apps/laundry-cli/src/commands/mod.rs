//! # Commands Module
//!
//! One function per CLI action. Each takes the state it needs and returns
//! a serializable DTO or an [`ApiError`](crate::error::ApiError); printing
//! happens in [`crate::run`].
//!
//! ```text
//! commands/
//! ├── customer.rs     ◄─── add / edit / delete / list / search / show
//! ├── employee.rs     ◄─── same, plus login and passwd
//! ├── service.rs      ◄─── price list
//! ├── transaction.rs  ◄─── intake, status, payment
//! ├── report.rs       ◄─── revenue summary
//! └── config.rs       ◄─── effective configuration
//! ```
//!
//! ## State Injection
//! ```rust,ignore
//! // Only needs database
//! async fn list_customers(db: &DbState)
//!
//! // Needs both
//! async fn revenue_report(db: &DbState, config: &AppConfig, ...)
//! ```

pub mod config;
pub mod customer;
pub mod employee;
pub mod report;
pub mod service;
pub mod transaction;
