//! # State Module
//!
//! Everything a command may need, built once in [`crate::run`]:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────────────┐      ┌──────────────────────────────┐        │
//! │  │      DbState         │      │         AppConfig            │        │
//! │  │                      │      │                              │        │
//! │  │  Database            │      │  shop_name                   │        │
//! │  │  (SQLite pool)       │      │  currency_symbol             │        │
//! │  │                      │      │  db_path                     │        │
//! │  └──────────────────────┘      └──────────────────────────────┘        │
//! │                                                                         │
//! │  Commands take only what they use: most need DbState, output           │
//! │  formatting needs AppConfig.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;

pub use config::{AppConfig, ConfigError, ENV_CURRENCY_SYMBOL, ENV_DB_PATH, ENV_SHOP_NAME};
pub use db::DbState;
