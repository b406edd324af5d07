//! # laundry-db: Database Layer for the Laundry Shop
//!
//! SQLite storage via sqlx: one repository per table, embedded migrations,
//! and a small connection pool.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CLI command (customer add)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   laundry-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │  Database ──► customers() / employees() / services() /          │   │
//! │  │               transactions()                                    │   │
//! │  │                    │                                            │   │
//! │  │                    ▼ parameterized SQL                          │   │
//! │  └────────────────────┼────────────────────────────────────────────┘   │
//! │                       ▼                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (laundry.db)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use laundry_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("laundry.db")).await?;
//! let customers = db.customers().search_by_name("budi").await?;
//! ```

pub mod error;
pub mod migrations;
pub mod password;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::customer::CustomerRepository;
pub use repository::employee::EmployeeRepository;
pub use repository::service::ServiceRepository;
pub use repository::transaction::TransactionRepository;
