//! Command-line surface.
//!
//! ```text
//! laundry [--db PATH] [--json] <customer|employee|service|transaction|report|config> ...
//! ```

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::state::ENV_DB_PATH;

#[derive(Debug, Parser)]
#[command(name = "laundry", version, about = "Laundry shop counter: customers, services, staff and loads")]
pub struct Cli {
    /// Database file (defaults to the platform data directory)
    #[arg(long, global = true, env = ENV_DB_PATH)]
    pub db: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage customers
    Customer {
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// Manage counter staff
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },
    /// Manage the price list
    Service {
        #[command(subcommand)]
        action: ServiceAction,
    },
    /// Take in loads and track them
    Transaction {
        #[command(subcommand)]
        action: TransactionAction,
    },
    /// Revenue summary for a date range
    Report(ReportArgs),
    /// Show the effective configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

// =============================================================================
// Customers
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum CustomerAction {
    Add(CustomerForm),
    Edit {
        id: String,
        #[command(flatten)]
        changes: CustomerChanges,
    },
    Delete {
        id: String,
    },
    List,
    /// Customers whose name contains the text
    Search {
        name: String,
    },
    Show {
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct CustomerForm {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub address: String,
    #[arg(long)]
    pub phone: String,
}

#[derive(Debug, Args)]
pub struct CustomerChanges {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

// =============================================================================
// Employees
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum EmployeeAction {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        username: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        username: Option<String>,
    },
    Delete {
        id: String,
    },
    List,
    Search {
        name: String,
    },
    Show {
        id: String,
    },
    /// Check a username and password
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Set a new password
    Passwd {
        id: String,
        #[arg(long)]
        password: Option<String>,
    },
}

// =============================================================================
// Services
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum ServiceAction {
    Add {
        #[arg(long)]
        name: String,
        /// Price per kilogram, e.g. 7000 or 7000.50
        #[arg(long)]
        price: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
    },
    Delete {
        id: String,
    },
    List,
    Search {
        name: String,
    },
    Show {
        id: String,
    },
}

// =============================================================================
// Transactions
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum TransactionAction {
    /// Take in a load
    Add(TransactionForm),
    /// Move a load forward: received, washing, ready, picked_up
    Status {
        id: String,
        status: String,
    },
    /// Replace the amount paid
    Pay {
        id: String,
        #[arg(long)]
        paid: String,
    },
    Delete {
        id: String,
    },
    List {
        #[arg(long)]
        status: Option<String>,
    },
    /// Transactions whose customer name contains the text
    Search {
        customer: String,
    },
    Show {
        id: String,
    },
}

/// Customer, employee and service accept an ID or a name.
#[derive(Debug, Args)]
pub struct TransactionForm {
    #[arg(long)]
    pub customer: String,
    #[arg(long)]
    pub employee: String,
    #[arg(long)]
    pub service: String,
    /// Kilograms, e.g. 2.5
    #[arg(long)]
    pub weight: String,
    /// Amount handed over
    #[arg(long)]
    pub paid: String,
}

// =============================================================================
// Report & config
// =============================================================================

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// First day, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day, inclusive (default: same as --from)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_transaction_add() {
        let cli = Cli::try_parse_from([
            "laundry", "--json", "transaction", "add", "--customer", "Budi", "--employee", "sari",
            "--service", "Cuci Setrika", "--weight", "2,5", "--paid", "20000",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Command::Transaction {
                action: TransactionAction::Add(form),
            } => {
                assert_eq!(form.customer, "Budi");
                assert_eq!(form.weight, "2,5");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_report_dates() {
        let cli = Cli::try_parse_from(["laundry", "report", "--from", "2026-01-31"]).unwrap();
        match cli.command {
            Command::Report(args) => {
                assert_eq!(args.from, NaiveDate::from_ymd_opt(2026, 1, 31));
                assert!(args.to.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Cli::try_parse_from(["laundry", "report", "--from", "31/01/2026"]).is_err());
    }

    #[test]
    fn test_global_db_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["laundry", "customer", "list", "--db", "/tmp/x.db"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
    }
}
