//! # Repository Module
//!
//! One repository per table, all shaped the same way:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CLI command                                                           │
//! │       │  db.customers().search_by_name("budi")                         │
//! │       ▼                                                                 │
//! │  CustomerRepository                                                    │
//! │  ├── count()                                                           │
//! │  ├── create(&NewCustomer)      → ID-CS-<n>-<ticks>                     │
//! │  ├── update(&Customer)                                                 │
//! │  ├── delete(id)                                                        │
//! │  ├── list_all()                                                        │
//! │  ├── search_by_name(name)      → LIKE %name% ORDER BY name             │
//! │  ├── find_first_by_name(name)                                          │
//! │  └── get_by_id(id)                                                     │
//! │       │  parameterized SQL                                              │
//! │       ▼                                                                 │
//! │  SQLite                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`](customer::CustomerRepository)
//! - [`EmployeeRepository`](employee::EmployeeRepository) - adds login
//! - [`ServiceRepository`](service::ServiceRepository)
//! - [`TransactionRepository`](transaction::TransactionRepository) - intake, status, report

pub mod customer;
pub mod employee;
pub mod service;
pub mod transaction;

use chrono::Local;
use laundry_core::{generate_id, EntityKind};
use sqlx::SqliteConnection;

use crate::error::DbResult;

/// Counts the rows of `kind`'s table and builds the next ID.
///
/// Run inside the same database transaction as the INSERT that uses it.
pub(crate) async fn next_id(conn: &mut SqliteConnection, kind: EntityKind) -> DbResult<String> {
    let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
    let count: i64 = sqlx::query_scalar(&sql).fetch_one(&mut *conn).await?;
    Ok(generate_id(kind, count, Local::now().naive_local()))
}

/// Builds a `LIKE` pattern matching `needle` anywhere, with `%`, `_` and
/// `\` in the needle taken literally. Pair with `ESCAPE '\'`.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
