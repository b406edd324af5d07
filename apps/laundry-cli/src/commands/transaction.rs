//! # Transaction Commands
//!
//! ## Intake Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  laundry transaction add --customer Budi --employee sari               │
//! │                          --service "Cuci Setrika" --weight 2.5         │
//! │                          --paid 20000                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Resolve names to IDs (first match by name)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Parse weight (kg → grams) and amount                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  transactions().create() ── price × weight, change, status=received    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Receipt with customer, employee and service names                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use laundry_core::{Money, NewTransaction, Transaction, TransactionDetail, TransactionStatus, Weight};
use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, info};

use super::customer::resolve_customer_id;
use super::employee::resolve_employee_id;
use super::service::{parse_amount, resolve_service_id};
use crate::cli::TransactionForm;
use crate::error::ApiError;
use crate::output::{fields, table, Ack, Render};
use crate::state::{AppConfig, DbState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub employee_id: String,
    pub employee_name: String,
    pub service_id: String,
    pub service_name: String,
    pub weight_grams: i64,
    /// Price per kilogram frozen at intake
    pub price_per_kg: Money,
    pub total: Money,
    pub paid: Money,
    pub change: Money,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TransactionDetail> for TransactionDto {
    fn from(d: TransactionDetail) -> Self {
        let t: Transaction = d.transaction;
        TransactionDto {
            weight_grams: t.weight().grams(),
            price_per_kg: Money::from_minor(t.price_per_kg),
            total: t.total(),
            paid: t.paid(),
            change: t.change(),
            id: t.id,
            customer_id: t.customer_id,
            customer_name: d.customer_name,
            employee_id: t.employee_id,
            employee_name: d.employee_name,
            service_id: t.service_id,
            service_name: d.service_name,
            status: t.status,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

impl Render for TransactionDto {
    fn render(&self, config: &AppConfig) -> String {
        fields(&[
            ("ID", self.id.clone()),
            ("Date", self.created_at.format("%Y-%m-%d %H:%M").to_string()),
            ("Customer", self.customer_name.clone()),
            ("Employee", self.employee_name.clone()),
            ("Service", self.service_name.clone()),
            ("Weight", Weight::from_grams(self.weight_grams).to_string()),
            ("Price/kg", config.format_currency(self.price_per_kg)),
            ("Total", config.format_currency(self.total)),
            ("Paid", config.format_currency(self.paid)),
            ("Change", config.format_currency(self.change)),
            ("Status", self.status.to_string()),
        ])
    }
}

impl Render for Vec<TransactionDto> {
    fn render(&self, config: &AppConfig) -> String {
        let rows: Vec<Vec<String>> = self
            .iter()
            .map(|t| {
                vec![
                    t.id.clone(),
                    t.created_at.format("%Y-%m-%d").to_string(),
                    t.customer_name.clone(),
                    t.service_name.clone(),
                    Weight::from_grams(t.weight_grams).to_string(),
                    config.format_currency(t.total),
                    t.status.to_string(),
                ]
            })
            .collect();
        table(
            &["ID", "Date", "Customer", "Service", "Weight", "Total", "Status"],
            &rows,
        )
    }
}

pub(crate) fn parse_status(input: &str) -> Result<TransactionStatus, ApiError> {
    Ok(TransactionStatus::from_str(input)?)
}

pub async fn create_transaction(
    db: &DbState,
    form: TransactionForm,
) -> Result<TransactionDto, ApiError> {
    let weight = Weight::from_kg_str(&form.weight)?;
    let paid = parse_amount("paid", &form.paid)?;

    let new = NewTransaction {
        customer_id: resolve_customer_id(db, &form.customer).await?,
        employee_id: resolve_employee_id(db, &form.employee).await?,
        service_id: resolve_service_id(db, &form.service).await?,
        weight,
        paid,
    };
    debug!(?new, "create_transaction command");

    let transaction = db.inner().transactions().create(&new).await?;
    info!(id = %transaction.id, total = %transaction.total(), "Load taken in");

    get_transaction(db, &transaction.id).await
}

pub async fn update_status(db: &DbState, id: &str, status: &str) -> Result<TransactionDto, ApiError> {
    let status = parse_status(status)?;
    db.inner().transactions().update_status(id, status).await?;
    info!(id = %id, status = %status, "Transaction status updated");
    get_transaction(db, id).await
}

pub async fn record_payment(db: &DbState, id: &str, paid: &str) -> Result<TransactionDto, ApiError> {
    let paid = parse_amount("paid", paid)?;
    db.inner().transactions().record_payment(id, paid).await?;
    get_transaction(db, id).await
}

pub async fn delete_transaction(db: &DbState, id: &str) -> Result<Ack, ApiError> {
    db.inner().transactions().delete(id).await?;
    info!(id = %id, "Transaction deleted");
    Ok(Ack::new(id, format!("Deleted transaction {}", id)))
}

/// Newest first, optionally only one status.
pub async fn list_transactions(
    db: &DbState,
    status: Option<&str>,
) -> Result<Vec<TransactionDto>, ApiError> {
    let repo = db.inner().transactions();
    let details = match status {
        Some(status) => repo.list_by_status(parse_status(status)?).await?,
        None => repo.list_all().await?,
    };
    Ok(details.into_iter().map(TransactionDto::from).collect())
}

pub async fn search_transactions(
    db: &DbState,
    customer: &str,
) -> Result<Vec<TransactionDto>, ApiError> {
    let details = db
        .inner()
        .transactions()
        .search_by_customer_name(customer)
        .await?;
    Ok(details.into_iter().map(TransactionDto::from).collect())
}

pub async fn get_transaction(db: &DbState, id: &str) -> Result<TransactionDto, ApiError> {
    let detail = db
        .inner()
        .transactions()
        .get_detail_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Transaction", id))?;
    Ok(TransactionDto::from(detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CustomerForm;
    use crate::commands::customer::add_customer;
    use crate::commands::employee::add_employee;
    use crate::commands::service::add_service;
    use crate::error::ErrorCode;

    async fn shop() -> DbState {
        let db = DbState::in_memory().await.unwrap();
        add_customer(
            &db,
            CustomerForm {
                name: "Budi Santoso".to_string(),
                address: "Jl. Melati 3".to_string(),
                phone: "081234567890".to_string(),
            },
        )
        .await
        .unwrap();
        add_employee(
            &db,
            "Sari Wulandari".to_string(),
            "sari".to_string(),
            "rahasia123".to_string(),
        )
        .await
        .unwrap();
        add_service(&db, "Cuci Setrika".to_string(), "7000").await.unwrap();
        db
    }

    fn form(weight: &str, paid: &str) -> TransactionForm {
        TransactionForm {
            customer: "budi".to_string(),
            employee: "sari".to_string(),
            service: "setrika".to_string(),
            weight: weight.to_string(),
            paid: paid.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_by_names() {
        let db = shop().await;
        let t = create_transaction(&db, form("2,5", "20000")).await.unwrap();

        assert_eq!(t.customer_name, "Budi Santoso");
        assert_eq!(t.employee_name, "Sari Wulandari");
        assert_eq!(t.service_name, "Cuci Setrika");
        assert_eq!(t.weight_grams, 2500);
        assert_eq!(t.total, Money::from_major(17500));
        assert_eq!(t.change, Money::from_major(2500));
        assert_eq!(t.status, TransactionStatus::Received);

        let out = t.render(&AppConfig::default());
        assert!(out.contains("2.500 kg"));
        assert!(out.contains("Rp17500.00"));
    }

    #[tokio::test]
    async fn test_create_errors() {
        let db = shop().await;

        let err = create_transaction(&db, form("2.5", "10000")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        let err = create_transaction(&db, form("dua", "10000")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let mut missing = form("1", "7000");
        missing.service = "Dry Clean".to_string();
        let err = create_transaction(&db, missing).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_blank_references_are_rejected() {
        let db = shop().await;

        let mut blank = form("1", "7000");
        blank.customer = "   ".to_string();
        blank.employee = String::new();
        blank.service = String::new();
        let err = create_transaction(&db, blank).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("customer"));

        let mut blank_service = form("1", "7000");
        blank_service.service = " ".to_string();
        let err = create_transaction(&db, blank_service).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(db.inner().transactions().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_overpriced_service_is_rejected() {
        let db = shop().await;

        let err = add_service(&db, "Mahal".to_string(), "1000000000000000").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let mut heavy = form("100", "0");
        heavy.service = "Mahal".to_string();
        let err = create_transaction(&db, heavy).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(db.inner().transactions().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_status_pay_list() {
        let db = shop().await;
        let t = create_transaction(&db, form("1", "7000")).await.unwrap();

        let t = update_status(&db, &t.id, "ready").await.unwrap();
        assert_eq!(t.status, TransactionStatus::Ready);

        let err = update_status(&db, &t.id, "washing").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        let err = update_status(&db, &t.id, "lost").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let t = record_payment(&db, &t.id, "10000").await.unwrap();
        assert_eq!(t.change, Money::from_major(3000));

        assert_eq!(list_transactions(&db, Some("Ready")).await.unwrap().len(), 1);
        assert!(list_transactions(&db, Some("picked-up")).await.unwrap().is_empty());
        assert_eq!(list_transactions(&db, None).await.unwrap().len(), 1);
        assert_eq!(search_transactions(&db, "santoso").await.unwrap().len(), 1);

        delete_transaction(&db, &t.id).await.unwrap();
        assert_eq!(
            get_transaction(&db, &t.id).await.unwrap_err().code,
            ErrorCode::NotFound
        );
    }
}
