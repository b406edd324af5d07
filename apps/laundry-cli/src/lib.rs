//! # Laundry CLI Library
//!
//! Everything behind the `laundry` binary: argument parsing, state setup,
//! command dispatch and output.
//!
//! ## Module Organization
//! ```text
//! laundry_cli/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── output.rs       ◄─── table / JSON rendering
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   └── config.rs   ◄─── Environment configuration
//! ├── commands/       ◄─── One function per action
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod state;

use anyhow::Context;
use std::path::Path;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Command, ConfigAction, CustomerAction, EmployeeAction, ServiceAction, TransactionAction,
};
use commands::{customer, employee, report, service, transaction};
use error::ApiError;
use output::{OutputFormat, Render};
use state::{AppConfig, DbState};

/// Runs one command.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging ────► tracing-subscriber to stderr, RUST_LOG     │
/// │  2. Load Configuration ────► LAUNDRY_* variables, then --db             │
/// │  3. Determine DB Path ─────► --db / LAUNDRY_DB_PATH / data directory    │
/// │  4. Connect to Database ───► SQLite with WAL, pending migrations        │
/// │  5. Dispatch Command ──────► commands::*                                │
/// │  6. Print Result ──────────► stdout (table or JSON), errors to stderr   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Command failures become an exit code; only startup failures are `Err`.
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    init_tracing();

    let format = OutputFormat::from_flag(cli.json);
    let config = AppConfig::from_env()
        .context("Invalid configuration")?
        .with_db_path(cli.db);
    let db_path = config
        .database_path()
        .context("Could not determine database path")?;
    info!(db_path = %db_path.display(), "Database path determined");

    let result = match DbState::open(&db_path).await {
        Ok(db) => {
            let result = dispatch(cli.command, &db, &config, &db_path, format).await;
            db.inner().close().await;
            result
        }
        Err(err) => Err(err),
    };

    match result {
        Ok(out) => {
            println!("{}", out);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            print_error(&err, format);
            Ok(ExitCode::from(err.code.exit_code()))
        }
    }
}

/// Log filter: `RUST_LOG` if set, otherwise warnings plus our own info.
///
/// - `RUST_LOG=debug` - everything including SQL-level debug logs
/// - `RUST_LOG=laundry_db=debug` - repository calls only
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn,laundry_cli=info,laundry_db=info,laundry_core=info,sqlx=warn")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_error(err: &ApiError, format: OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(err) {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("{}", err),
        },
        OutputFormat::Table => eprintln!("{}", err),
    }
}

fn show<T>(value: T, format: OutputFormat, config: &AppConfig) -> Result<String, ApiError>
where
    T: serde::Serialize + Render,
{
    output::format(&value, format, config)
}

/// Routes a parsed command to its handler and renders the result.
pub async fn dispatch(
    command: Command,
    db: &DbState,
    config: &AppConfig,
    db_path: &Path,
    format: OutputFormat,
) -> Result<String, ApiError> {
    match command {
        Command::Customer { action } => match action {
            CustomerAction::Add(form) => show(customer::add_customer(db, form).await?, format, config),
            CustomerAction::Edit { id, changes } => {
                show(customer::edit_customer(db, &id, changes).await?, format, config)
            }
            CustomerAction::Delete { id } => {
                show(customer::delete_customer(db, &id).await?, format, config)
            }
            CustomerAction::List => show(customer::list_customers(db).await?, format, config),
            CustomerAction::Search { name } => {
                show(customer::search_customers(db, &name).await?, format, config)
            }
            CustomerAction::Show { id } => show(customer::get_customer(db, &id).await?, format, config),
        },

        Command::Employee { action } => match action {
            EmployeeAction::Add {
                name,
                username,
                password,
            } => {
                let password = password.map_or_else(|| employee::prompt_password(true), Ok)?;
                show(
                    employee::add_employee(db, name, username, password).await?,
                    format,
                    config,
                )
            }
            EmployeeAction::Edit { id, name, username } => show(
                employee::edit_employee(db, &id, name, username).await?,
                format,
                config,
            ),
            EmployeeAction::Delete { id } => {
                show(employee::delete_employee(db, &id).await?, format, config)
            }
            EmployeeAction::List => show(employee::list_employees(db).await?, format, config),
            EmployeeAction::Search { name } => {
                show(employee::search_employees(db, &name).await?, format, config)
            }
            EmployeeAction::Show { id } => show(employee::get_employee(db, &id).await?, format, config),
            EmployeeAction::Login { username, password } => {
                let password = password.map_or_else(|| employee::prompt_password(false), Ok)?;
                show(employee::login(db, &username, &password).await?, format, config)
            }
            EmployeeAction::Passwd { id, password } => {
                let password = password.map_or_else(|| employee::prompt_password(true), Ok)?;
                show(employee::change_password(db, &id, &password).await?, format, config)
            }
        },

        Command::Service { action } => match action {
            ServiceAction::Add { name, price } => {
                show(service::add_service(db, name, &price).await?, format, config)
            }
            ServiceAction::Edit { id, name, price } => show(
                service::edit_service(db, &id, name, price.as_deref()).await?,
                format,
                config,
            ),
            ServiceAction::Delete { id } => show(service::delete_service(db, &id).await?, format, config),
            ServiceAction::List => show(service::list_services(db).await?, format, config),
            ServiceAction::Search { name } => {
                show(service::search_services(db, &name).await?, format, config)
            }
            ServiceAction::Show { id } => show(service::get_service(db, &id).await?, format, config),
        },

        Command::Transaction { action } => match action {
            TransactionAction::Add(form) => {
                show(transaction::create_transaction(db, form).await?, format, config)
            }
            TransactionAction::Status { id, status } => show(
                transaction::update_status(db, &id, &status).await?,
                format,
                config,
            ),
            TransactionAction::Pay { id, paid } => show(
                transaction::record_payment(db, &id, &paid).await?,
                format,
                config,
            ),
            TransactionAction::Delete { id } => {
                show(transaction::delete_transaction(db, &id).await?, format, config)
            }
            TransactionAction::List { status } => show(
                transaction::list_transactions(db, status.as_deref()).await?,
                format,
                config,
            ),
            TransactionAction::Search { customer } => show(
                transaction::search_transactions(db, &customer).await?,
                format,
                config,
            ),
            TransactionAction::Show { id } => {
                show(transaction::get_transaction(db, &id).await?, format, config)
            }
        },

        Command::Report(args) => show(
            report::revenue_report(db, config, args.from, args.to).await?,
            format,
            config,
        ),

        Command::Config { action } => match action {
            ConfigAction::Show => show(
                commands::config::get_config(db, config, db_path).await?,
                format,
                config,
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    async fn exec(db: &DbState, args: &[&str]) -> Result<String, ApiError> {
        let mut argv = vec!["laundry"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();

        let format = OutputFormat::from_flag(cli.json);
        dispatch(cli.command, db, &AppConfig::default(), Path::new(":memory:"), format).await
    }

    #[tokio::test]
    async fn test_dispatch_end_to_end() {
        let db = DbState::in_memory().await.unwrap();

        exec(&db, &["customer", "add", "--name", "Budi", "--phone", "081234567890"])
            .await
            .unwrap();
        exec(
            &db,
            &["employee", "add", "--name", "Sari", "--username", "sari", "--password", "rahasia123"],
        )
        .await
        .unwrap();
        exec(&db, &["service", "add", "--name", "Cuci Setrika", "--price", "7000"])
            .await
            .unwrap();

        let out = exec(
            &db,
            &[
                "--json", "transaction", "add", "--customer", "Budi", "--employee", "sari",
                "--service", "Cuci", "--weight", "2.5", "--paid", "20000",
            ],
        )
        .await
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["total"], 1_750_000);
        assert_eq!(json["change"], 250_000);
        assert_eq!(json["status"], "received");

        let id = json["id"].as_str().unwrap().to_string();
        let out = exec(&db, &["transaction", "status", &id, "washing"]).await.unwrap();
        assert!(out.contains("washing"));

        let out = exec(&db, &["transaction", "list"]).await.unwrap();
        assert!(out.contains("Budi"));

        let out = exec(&db, &["report"]).await.unwrap();
        assert!(out.contains("Rp17500.00"));
    }

    #[tokio::test]
    async fn test_dispatch_errors_carry_codes() {
        let db = DbState::in_memory().await.unwrap();

        let err = exec(&db, &["customer", "show", "ID-CS-1-1"]).await.unwrap_err();
        assert_eq!(err.code, error::ErrorCode::NotFound);

        let err = exec(&db, &["service", "add", "--name", "X", "--price", "abc"])
            .await
            .unwrap_err();
        assert_eq!(err.code, error::ErrorCode::ValidationError);
    }
}
