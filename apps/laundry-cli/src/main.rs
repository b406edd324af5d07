//! # Laundry Shop CLI Entry Point
//!
//! ```text
//! laundry customer add --name Budi --phone 081234567890
//! laundry transaction add --customer Budi --employee sari \
//!     --service "Cuci Setrika" --weight 2.5 --paid 20000
//! laundry transaction status ID-TR-1-638... ready
//! laundry report --from 2026-10-01 --to 2026-10-31
//! ```
//!
//! The actual setup is in lib.rs for testability.

use clap::Parser;
use laundry_cli::cli::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    laundry_cli::run(cli).await
}
