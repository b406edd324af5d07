//! # Customer Repository
//!
//! CRUD and name search over the `customers` table.

use chrono::Utc;
use laundry_core::validation::{validate_new_customer, validate_search_query};
use laundry_core::{Customer, EntityKind, NewCustomer};
use sqlx::SqlitePool;
use tracing::debug;

use super::{contains_pattern, next_id};
use crate::error::{DbError, DbResult};

const SELECT_COLUMNS: &str =
    "SELECT id, name, address, phone_number, created_at, updated_at FROM customers";

/// Repository for customer database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.customers();
/// let created = repo.create(&form).await?;
/// let found = repo.search_by_name("bud").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Inserts a new customer with a freshly generated `ID-CS-...` key.
    pub async fn create(&self, form: &NewCustomer) -> DbResult<Customer> {
        validate_new_customer(form)?;

        let mut tx = self.pool.begin().await?;
        let id = next_id(&mut tx, EntityKind::Customer).await?;
        let now = Utc::now();

        debug!(id = %id, name = %form.name, "Inserting customer");

        let customer = Customer {
            id,
            name: form.name.trim().to_string(),
            address: form.address.trim().to_string(),
            phone_number: form.phone_number.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, address, phone_number, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.address)
        .bind(&customer.phone_number)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(customer)
    }

    /// Overwrites name, address and phone number.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - no customer has that ID
    pub async fn update(&self, customer: &Customer) -> DbResult<()> {
        validate_new_customer(&NewCustomer {
            name: customer.name.clone(),
            address: customer.address.clone(),
            phone_number: customer.phone_number.clone(),
        })?;

        debug!(id = %customer.id, "Updating customer");

        let result = sqlx::query(
            r#"
            UPDATE customers SET
                name = ?2,
                address = ?3,
                phone_number = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&customer.id)
        .bind(customer.name.trim())
        .bind(customer.address.trim())
        .bind(customer.phone_number.trim())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", &customer.id));
        }

        Ok(())
    }

    /// Hard-deletes a customer.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - no customer has that ID
    /// * `Err(DbError::ForeignKeyViolation)` - the customer has transactions
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting customer");

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    /// All customers, ordered by name.
    pub async fn list_all(&self) -> DbResult<Vec<Customer>> {
        let sql = format!("{} ORDER BY name, id", SELECT_COLUMNS);
        let customers = sqlx::query_as::<_, Customer>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(customers)
    }

    /// Customers whose name contains `name` (case-insensitive), ordered by
    /// name. An empty needle matches everyone.
    pub async fn search_by_name(&self, name: &str) -> DbResult<Vec<Customer>> {
        let name = validate_search_query(name)?;
        debug!(query = %name, "Searching customers");

        let sql = format!(
            "{} WHERE name LIKE ?1 ESCAPE '\\' ORDER BY name, id",
            SELECT_COLUMNS
        );
        let customers = sqlx::query_as::<_, Customer>(&sql)
            .bind(contains_pattern(&name))
            .fetch_all(&self.pool)
            .await?;

        debug!(count = customers.len(), "Customer search returned");
        Ok(customers)
    }

    /// First customer (by name) whose name contains `name`.
    pub async fn find_first_by_name(&self, name: &str) -> DbResult<Option<Customer>> {
        let name = validate_search_query(name)?;

        let sql = format!(
            "{} WHERE name LIKE ?1 ESCAPE '\\' ORDER BY name, id LIMIT 1",
            SELECT_COLUMNS
        );
        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(contains_pattern(&name))
            .fetch_optional(&self.pool)
            .await?;
        Ok(customer)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn form(name: &str) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            address: "Jl. Melati 3".to_string(),
            phone_number: "081234567890".to_string(),
        }
    }

    async fn repo() -> CustomerRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().customers()
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = repo().await;

        let first = repo.create(&form("Budi")).await.unwrap();
        let second = repo.create(&form("Ani")).await.unwrap();

        assert!(first.id.starts_with("ID-CS-1-"));
        assert!(second.id.starts_with("ID-CS-2-"));
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_form() {
        let repo = repo().await;
        let mut bad = form("Budi");
        bad.phone_number = "abc".to_string();

        let err = repo.create(&bad).await.unwrap_err();
        assert!(matches!(err, DbError::Core(_)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_and_get_by_id() {
        let repo = repo().await;
        let mut customer = repo.create(&form("Budi")).await.unwrap();

        customer.address = "Jl. Kenanga 7".to_string();
        repo.update(&customer).await.unwrap();

        let stored = repo.get_by_id(&customer.id).await.unwrap().unwrap();
        assert_eq!(stored.address, "Jl. Kenanga 7");
        assert!(stored.updated_at >= stored.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = repo().await;
        let mut ghost = repo.create(&form("Budi")).await.unwrap();
        ghost.id = "ID-CS-99-1".to_string();

        assert!(matches!(
            repo.update(&ghost).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        let customer = repo.create(&form("Budi")).await.unwrap();

        repo.delete(&customer.id).await.unwrap();
        assert!(repo.get_by_id(&customer.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(&customer.id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_search_is_ordered_and_case_insensitive() {
        let repo = repo().await;
        repo.create(&form("Siti Budiman")).await.unwrap();
        repo.create(&form("Budi")).await.unwrap();
        repo.create(&form("Ani")).await.unwrap();

        let found = repo.search_by_name("BUDI").await.unwrap();
        let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Budi", "Siti Budiman"]);

        assert_eq!(repo.search_by_name("").await.unwrap().len(), 3);
        assert!(repo.search_by_name("zzz").await.unwrap().is_empty());

        let first = repo.find_first_by_name("budi").await.unwrap().unwrap();
        assert_eq!(first.name, "Budi");
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let repo = repo().await;
        repo.create(&form("Ani")).await.unwrap();

        assert!(repo.search_by_name("%").await.unwrap().is_empty());
        assert!(repo.search_by_name("_").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_all_sorted_by_name() {
        let repo = repo().await;
        repo.create(&form("Citra")).await.unwrap();
        repo.create(&form("Ani")).await.unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all[0].name, "Ani");
        assert_eq!(all[1].name, "Citra");
    }
}
