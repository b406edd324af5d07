//! # Service Repository
//!
//! The price list: each service is charged per kilogram.

use chrono::Utc;
use laundry_core::validation::{validate_new_service, validate_search_query};
use laundry_core::{EntityKind, Money, NewService, Service};
use sqlx::SqlitePool;
use tracing::debug;

use super::{contains_pattern, next_id};
use crate::error::{DbError, DbResult};

const SELECT_COLUMNS: &str =
    "SELECT id, name, price_per_kg, created_at, updated_at FROM services";

/// Repository for service database operations.
#[derive(Debug, Clone)]
pub struct ServiceRepository {
    pool: SqlitePool,
}

impl ServiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ServiceRepository { pool }
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn create(&self, form: &NewService) -> DbResult<Service> {
        validate_new_service(form)?;

        let mut tx = self.pool.begin().await?;
        let id = next_id(&mut tx, EntityKind::Service).await?;
        let now = Utc::now();

        debug!(id = %id, name = %form.name, price = %form.price_per_kg, "Inserting service");

        let service = Service {
            id,
            name: form.name.trim().to_string(),
            price_per_kg: form.price_per_kg.minor(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO services (id, name, price_per_kg, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&service.id)
        .bind(&service.name)
        .bind(service.price_per_kg)
        .bind(service.created_at)
        .bind(service.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(service)
    }

    /// Changes name and price. Existing transactions keep the price they
    /// were taken in at.
    pub async fn update(&self, service: &Service) -> DbResult<()> {
        validate_new_service(&NewService {
            name: service.name.clone(),
            price_per_kg: Money::from_minor(service.price_per_kg),
        })?;

        debug!(id = %service.id, "Updating service");

        let result = sqlx::query(
            r#"
            UPDATE services SET
                name = ?2,
                price_per_kg = ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(&service.id)
        .bind(service.name.trim())
        .bind(service.price_per_kg)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Service", &service.id));
        }

        Ok(())
    }

    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - a transaction uses the service
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting service");

        let result = sqlx::query("DELETE FROM services WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Service", id));
        }

        Ok(())
    }

    pub async fn list_all(&self) -> DbResult<Vec<Service>> {
        let sql = format!("{} ORDER BY name, id", SELECT_COLUMNS);
        let services = sqlx::query_as::<_, Service>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(services)
    }

    pub async fn search_by_name(&self, name: &str) -> DbResult<Vec<Service>> {
        let name = validate_search_query(name)?;
        debug!(query = %name, "Searching services");

        let sql = format!(
            "{} WHERE name LIKE ?1 ESCAPE '\\' ORDER BY name, id",
            SELECT_COLUMNS
        );
        let services = sqlx::query_as::<_, Service>(&sql)
            .bind(contains_pattern(&name))
            .fetch_all(&self.pool)
            .await?;
        Ok(services)
    }

    pub async fn find_first_by_name(&self, name: &str) -> DbResult<Option<Service>> {
        let name = validate_search_query(name)?;

        let sql = format!(
            "{} WHERE name LIKE ?1 ESCAPE '\\' ORDER BY name, id LIMIT 1",
            SELECT_COLUMNS
        );
        let service = sqlx::query_as::<_, Service>(&sql)
            .bind(contains_pattern(&name))
            .fetch_optional(&self.pool)
            .await?;
        Ok(service)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Service>> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let service = sqlx::query_as::<_, Service>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn repo() -> ServiceRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().services()
    }

    fn form(name: &str, major: i64) -> NewService {
        NewService {
            name: name.to_string(),
            price_per_kg: Money::from_major(major),
        }
    }

    #[tokio::test]
    async fn test_create_and_price() {
        let repo = repo().await;
        let service = repo.create(&form("Cuci Kering", 7000)).await.unwrap();

        assert!(service.id.starts_with("ID-SV-1-"));
        assert_eq!(service.price(), Money::from_major(7000));

        let stored = repo.get_by_id(&service.id).await.unwrap().unwrap();
        assert_eq!(stored, service);
    }

    #[tokio::test]
    async fn test_rejects_zero_price() {
        let repo = repo().await;
        assert!(repo.create(&form("Gratis", 0)).await.is_err());

        let mut service = repo.create(&form("Setrika", 5000)).await.unwrap();
        service.price_per_kg = -1;
        assert!(matches!(repo.update(&service).await, Err(DbError::Core(_))));
    }

    #[tokio::test]
    async fn test_update_search_delete() {
        let repo = repo().await;
        let mut express = repo.create(&form("Express", 12000)).await.unwrap();
        repo.create(&form("Cuci Setrika", 9000)).await.unwrap();

        express.price_per_kg = Money::from_major(15000).minor();
        repo.update(&express).await.unwrap();
        let stored = repo.find_first_by_name("expr").await.unwrap().unwrap();
        assert_eq!(stored.price_per_kg, 1_500_000);

        assert_eq!(repo.search_by_name("cuci").await.unwrap().len(), 1);

        repo.delete(&express.id).await.unwrap();
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }
}
