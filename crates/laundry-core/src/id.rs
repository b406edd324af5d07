//! # Record Identifiers
//!
//! Every row is keyed by a human-readable string:
//!
//! ```text
//! ID-CS-12-638412345678901234
//! │  │  │  └── ticks: 100 ns intervals since 0001-01-01 00:00, wall clock
//! │  │  └───── row count + 1 at insert time
//! │  └──────── entity prefix (CS, EM, SV, TR)
//! └─────────── fixed marker
//! ```
//!
//! The counter alone repeats after a delete; the tick suffix keeps the ID
//! unique. The clock is passed in so generation stays pure. Ticks count
//! local wall-clock time, not UTC, so IDs minted on the shop's machine read
//! the same as the ones already in its books.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticks between 0001-01-01 and the Unix epoch.
const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;

/// The four record kinds and their ID prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Customer,
    Employee,
    Service,
    Transaction,
}

impl EntityKind {
    pub const fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Customer => "CS",
            EntityKind::Employee => "EM",
            EntityKind::Service => "SV",
            EntityKind::Transaction => "TR",
        }
    }

    /// Backing table name.
    pub const fn table(&self) -> &'static str {
        match self {
            EntityKind::Customer => "customers",
            EntityKind::Employee => "employees",
            EntityKind::Service => "services",
            EntityKind::Transaction => "transactions",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "CS" => Some(EntityKind::Customer),
            "EM" => Some(EntityKind::Employee),
            "SV" => Some(EntityKind::Service),
            "TR" => Some(EntityKind::Transaction),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Customer => "Customer",
            EntityKind::Employee => "Employee",
            EntityKind::Service => "Service",
            EntityKind::Transaction => "Transaction",
        };
        f.write_str(name)
    }
}

/// Converts a wall-clock time to 100-nanosecond ticks since 0001-01-01.
pub fn dotnet_ticks(at: NaiveDateTime) -> i64 {
    let at = at.and_utc();
    let secs = at.timestamp();
    let sub_ticks = (at.timestamp_subsec_nanos() / 100) as i64;
    UNIX_EPOCH_TICKS + secs * 10_000_000 + sub_ticks
}

/// Builds a new ID for `kind` given how many rows the table already has.
///
/// ```rust
/// use chrono::DateTime;
/// use laundry_core::id::{generate_id, EntityKind};
///
/// let at = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
/// assert_eq!(
///     generate_id(EntityKind::Customer, 4, at),
///     "ID-CS-5-621355968000000000"
/// );
/// ```
pub fn generate_id(kind: EntityKind, existing_count: i64, now: NaiveDateTime) -> String {
    format!("ID-{}-{}-{}", kind.prefix(), existing_count + 1, dotnet_ticks(now))
}

/// The parts of a well-formed ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedId {
    pub kind: EntityKind,
    pub sequence: i64,
    pub ticks: i64,
}

/// Splits an ID back into its parts. `None` if it does not match the format.
pub fn parse_id(id: &str) -> Option<ParsedId> {
    let mut parts = id.trim().splitn(4, '-');
    if parts.next()? != "ID" {
        return None;
    }
    let kind = EntityKind::from_prefix(parts.next()?)?;
    let sequence: i64 = parts.next()?.parse().ok()?;
    let ticks: i64 = parts.next()?.parse().ok()?;
    if sequence < 1 || ticks < 0 {
        return None;
    }
    Some(ParsedId {
        kind,
        sequence,
        ticks,
    })
}
