//! # Transaction Repository
//!
//! Intake, status tracking and the revenue report.
//!
//! ## Transaction Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. INTAKE                                                             │
//! │     └── create() → look up service price, weigh, price, make change    │
//! │                    → Transaction { status: Received }                  │
//! │                                                                         │
//! │  2. PROGRESS                                                           │
//! │     └── update_status() → Washing → Ready  (forward only)              │
//! │                                                                         │
//! │  3. PICKUP                                                             │
//! │     └── update_status(PickedUp)                                        │
//! │                                                                         │
//! │  REPORT                                                                │
//! │     └── summary(from, to) → count, kilograms, revenue                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use laundry_core::validation::{validate_id, validate_payment, validate_search_query, validate_weight};
use laundry_core::{
    EntityKind, Money, NewTransaction, Receipt, RevenueSummary, Transaction, TransactionDetail,
    TransactionStatus,
};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use super::{contains_pattern, next_id};
use crate::error::{DbError, DbResult};

const SELECT_COLUMNS: &str = r#"
    SELECT id, customer_id, employee_id, service_id, weight_grams, price_per_kg,
           total, paid, change_due, status, created_at, updated_at
    FROM transactions
"#;

const SELECT_DETAIL: &str = r#"
    SELECT t.id, t.customer_id, t.employee_id, t.service_id, t.weight_grams,
           t.price_per_kg, t.total, t.paid, t.change_due, t.status,
           t.created_at, t.updated_at,
           c.name AS customer_name,
           e.name AS employee_name,
           s.name AS service_name
    FROM transactions t
    INNER JOIN customers c ON c.id = t.customer_id
    INNER JOIN employees e ON e.id = t.employee_id
    INNER JOIN services s ON s.id = t.service_id
"#;

const NEWEST_FIRST: &str = "ORDER BY t.created_at DESC, t.id DESC";

/// Repository for transaction database operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Takes in a load.
    ///
    /// ## What This Does
    /// 1. Checks customer, employee and service exist
    /// 2. Freezes the service's current price per kilogram
    /// 3. Prices the weight and makes change
    /// 4. Inserts with status `received`
    ///
    /// All in one database transaction.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - customer, employee or service missing
    /// * `Err(DbError::Core(InsufficientPayment))` - paid less than the total
    pub async fn create(&self, form: &NewTransaction) -> DbResult<Transaction> {
        validate_id(&form.customer_id, EntityKind::Customer)?;
        validate_id(&form.employee_id, EntityKind::Employee)?;
        validate_id(&form.service_id, EntityKind::Service)?;
        validate_weight(form.weight)?;
        validate_payment(form.paid)?;

        let mut tx = self.pool.begin().await?;

        ensure_exists(&mut tx, EntityKind::Customer, &form.customer_id).await?;
        ensure_exists(&mut tx, EntityKind::Employee, &form.employee_id).await?;

        let price_per_kg: i64 =
            sqlx::query_scalar("SELECT price_per_kg FROM services WHERE id = ?1")
                .bind(&form.service_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| DbError::not_found("Service", &form.service_id))?;

        let receipt = Receipt::compute(Money::from_minor(price_per_kg), form.weight, form.paid)?;

        let id = next_id(&mut tx, EntityKind::Transaction).await?;
        let now = Utc::now();

        debug!(
            id = %id,
            customer_id = %form.customer_id,
            weight = %form.weight,
            total = %receipt.total,
            "Inserting transaction"
        );

        let transaction = Transaction {
            id,
            customer_id: form.customer_id.clone(),
            employee_id: form.employee_id.clone(),
            service_id: form.service_id.clone(),
            weight_grams: receipt.weight.grams(),
            price_per_kg: receipt.price_per_kg.minor(),
            total: receipt.total.minor(),
            paid: receipt.paid.minor(),
            change_due: receipt.change.minor(),
            status: TransactionStatus::Received,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, customer_id, employee_id, service_id,
                weight_grams, price_per_kg, total, paid, change_due,
                status, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6, ?7, ?8, ?9,
                ?10, ?11, ?12
            )
            "#,
        )
        .bind(&transaction.id)
        .bind(&transaction.customer_id)
        .bind(&transaction.employee_id)
        .bind(&transaction.service_id)
        .bind(transaction.weight_grams)
        .bind(transaction.price_per_kg)
        .bind(transaction.total)
        .bind(transaction.paid)
        .bind(transaction.change_due)
        .bind(transaction.status)
        .bind(transaction.created_at)
        .bind(transaction.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(id = %transaction.id, total = %receipt.total, "Transaction recorded");
        Ok(transaction)
    }

    /// Moves a load forward through the shop.
    ///
    /// ## Returns
    /// * `Err(DbError::Core(InvalidStatusTransition))` - backwards move
    pub async fn update_status(&self, id: &str, status: TransactionStatus) -> DbResult<Transaction> {
        let mut tx = self.pool.begin().await?;

        let current: TransactionStatus =
            sqlx::query_scalar("SELECT status FROM transactions WHERE id = ?1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| DbError::not_found("Transaction", id))?;

        let next = current.transition_to(status)?;
        debug!(id = %id, from = %current, to = %next, "Updating transaction status");

        if next != current {
            sqlx::query("UPDATE transactions SET status = ?2, updated_at = ?3 WHERE id = ?1")
                .bind(id)
                .bind(next)
                .bind(Utc::now())
                .execute(&mut *tx)
                .await?;
        }

        let transaction = fetch_one(&mut tx, id).await?;
        tx.commit().await?;
        Ok(transaction)
    }

    /// Replaces the amount paid and recomputes the change.
    pub async fn record_payment(&self, id: &str, paid: Money) -> DbResult<Transaction> {
        validate_payment(paid)?;

        let mut tx = self.pool.begin().await?;
        let current = fetch_one(&mut tx, id).await?;

        let receipt = Receipt::compute(
            Money::from_minor(current.price_per_kg),
            current.weight(),
            paid,
        )?;

        sqlx::query(
            "UPDATE transactions SET paid = ?2, change_due = ?3, updated_at = ?4 WHERE id = ?1",
        )
        .bind(id)
        .bind(receipt.paid.minor())
        .bind(receipt.change.minor())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        let transaction = fetch_one(&mut tx, id).await?;
        tx.commit().await?;

        debug!(id = %id, paid = %receipt.paid, change = %receipt.change, "Payment recorded");
        Ok(transaction)
    }

    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting transaction");

        let result = sqlx::query("DELETE FROM transactions WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Transaction", id));
        }

        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Transaction>> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let transaction = sqlx::query_as::<_, Transaction>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(transaction)
    }

    /// One transaction with customer, employee and service names.
    pub async fn get_detail_by_id(&self, id: &str) -> DbResult<Option<TransactionDetail>> {
        let sql = format!("{} WHERE t.id = ?1", SELECT_DETAIL);
        let detail = sqlx::query_as::<_, TransactionDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(detail)
    }

    /// Everything, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<TransactionDetail>> {
        let sql = format!("{} {}", SELECT_DETAIL, NEWEST_FIRST);
        let details = sqlx::query_as::<_, TransactionDetail>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(details)
    }

    /// Transactions whose customer's name contains `name`, newest first.
    pub async fn search_by_customer_name(&self, name: &str) -> DbResult<Vec<TransactionDetail>> {
        let name = validate_search_query(name)?;
        debug!(query = %name, "Searching transactions by customer");

        let sql = format!(
            "{} WHERE c.name LIKE ?1 ESCAPE '\\' {}",
            SELECT_DETAIL, NEWEST_FIRST
        );
        let details = sqlx::query_as::<_, TransactionDetail>(&sql)
            .bind(contains_pattern(&name))
            .fetch_all(&self.pool)
            .await?;
        Ok(details)
    }

    pub async fn list_by_status(&self, status: TransactionStatus) -> DbResult<Vec<TransactionDetail>> {
        let sql = format!("{} WHERE t.status = ?1 {}", SELECT_DETAIL, NEWEST_FIRST);
        let details = sqlx::query_as::<_, TransactionDetail>(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;
        Ok(details)
    }

    /// Totals for transactions taken in during `[from, to)`.
    pub async fn summary(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> DbResult<RevenueSummary> {
        debug!(%from, %to, "Computing revenue summary");

        let (transaction_count, total_weight_grams, revenue): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(weight_grams), 0),
                   COALESCE(SUM(total), 0)
            FROM transactions
            WHERE created_at >= ?1 AND created_at < ?2
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(RevenueSummary {
            transaction_count,
            total_weight_grams,
            revenue: Money::from_minor(revenue),
        })
    }
}

async fn ensure_exists(conn: &mut SqliteConnection, kind: EntityKind, id: &str) -> DbResult<()> {
    let sql = format!("SELECT 1 FROM {} WHERE id = ?1", kind.table());
    let found: Option<i64> = sqlx::query_scalar(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    match found {
        Some(_) => Ok(()),
        None => Err(DbError::not_found(kind.to_string(), id)),
    }
}

async fn fetch_one(conn: &mut SqliteConnection, id: &str) -> DbResult<Transaction> {
    let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
    sqlx::query_as::<_, Transaction>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| DbError::not_found("Transaction", id))
}
