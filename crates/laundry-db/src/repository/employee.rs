//! # Employee Repository
//!
//! Staff records and counter logins.
//!
//! ## Login Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  employee login --username sari                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  authenticate("sari", "******")                                        │
//! │       │                                                                 │
//! │       ├── no such username ──────► Ok(None)                            │
//! │       ├── argon2 verify fails ───► Ok(None)                            │
//! │       └── verify ok ─────────────► Ok(Some(Employee))                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Passwords are hashed on the way in; the plain text is never stored.

use chrono::Utc;
use laundry_core::validation::{
    validate_name, validate_new_employee, validate_password, validate_search_query,
    validate_username,
};
use laundry_core::{Employee, EntityKind, NewEmployee};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::{contains_pattern, next_id};
use crate::error::{DbError, DbResult};
use crate::password::{hash_password, verify_password};

const SELECT_COLUMNS: &str =
    "SELECT id, name, username, password_hash, created_at, updated_at FROM employees";

/// Repository for employee database operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        EmployeeRepository { pool }
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Inserts an employee, hashing the form's password.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - username already taken
    pub async fn create(&self, form: &NewEmployee) -> DbResult<Employee> {
        validate_new_employee(form)?;

        let username = form.username.trim().to_string();
        let password_hash = hash_password(&form.password)?;

        let mut tx = self.pool.begin().await?;
        let id = next_id(&mut tx, EntityKind::Employee).await?;
        let now = Utc::now();

        debug!(id = %id, username = %username, "Inserting employee");

        let employee = Employee {
            id,
            name: form.name.trim().to_string(),
            username,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO employees (id, name, username, password_hash, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&employee.id)
        .bind(&employee.name)
        .bind(&employee.username)
        .bind(&employee.password_hash)
        .bind(employee.created_at)
        .bind(employee.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_username_conflict(e, &employee.username))?;

        tx.commit().await?;
        Ok(employee)
    }

    /// Updates name and username. The password hash is left untouched;
    /// use [`change_password`](Self::change_password) for that.
    pub async fn update(&self, employee: &Employee) -> DbResult<()> {
        validate_name(&employee.name)?;
        validate_username(&employee.username)?;

        debug!(id = %employee.id, "Updating employee");

        let username = employee.username.trim();
        let result = sqlx::query(
            r#"
            UPDATE employees SET
                name = ?2,
                username = ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(&employee.id)
        .bind(employee.name.trim())
        .bind(username)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| map_username_conflict(e, username))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Employee", &employee.id));
        }

        Ok(())
    }

    pub async fn change_password(&self, id: &str, password: &str) -> DbResult<()> {
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let result = sqlx::query(
            "UPDATE employees SET password_hash = ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(&password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Employee", id));
        }

        info!(id = %id, "Employee password changed");
        Ok(())
    }

    /// Checks a username/password pair.
    ///
    /// ## Returns
    /// * `Ok(Some(Employee))` - credentials match
    /// * `Ok(None)` - unknown username or wrong password
    pub async fn authenticate(&self, username: &str, password: &str) -> DbResult<Option<Employee>> {
        let employee = self.get_by_username(username).await?;

        let verified = employee.filter(|e| verify_password(password, &e.password_hash));
        debug!(username = %username.trim(), ok = verified.is_some(), "Login attempt");
        Ok(verified)
    }

    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - the employee took in transactions
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting employee");

        let result = sqlx::query("DELETE FROM employees WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Employee", id));
        }

        Ok(())
    }

    pub async fn list_all(&self) -> DbResult<Vec<Employee>> {
        let sql = format!("{} ORDER BY name, id", SELECT_COLUMNS);
        let employees = sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }

    pub async fn search_by_name(&self, name: &str) -> DbResult<Vec<Employee>> {
        let name = validate_search_query(name)?;
        debug!(query = %name, "Searching employees");

        let sql = format!(
            "{} WHERE name LIKE ?1 ESCAPE '\\' ORDER BY name, id",
            SELECT_COLUMNS
        );
        let employees = sqlx::query_as::<_, Employee>(&sql)
            .bind(contains_pattern(&name))
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }

    pub async fn find_first_by_name(&self, name: &str) -> DbResult<Option<Employee>> {
        let name = validate_search_query(name)?;

        let sql = format!(
            "{} WHERE name LIKE ?1 ESCAPE '\\' ORDER BY name, id LIMIT 1",
            SELECT_COLUMNS
        );
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(contains_pattern(&name))
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    /// Exact username match, ignoring ASCII case.
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<Employee>> {
        let sql = format!("{} WHERE username = ?1 COLLATE NOCASE", SELECT_COLUMNS);
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(username.trim())
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Employee>> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }
}

/// Fills in the offending username, which SQLite's message omits.
fn map_username_conflict(err: sqlx::Error, username: &str) -> DbError {
    match DbError::from(err) {
        DbError::UniqueViolation { .. } => DbError::duplicate("username", username),
        other => other,
    }
}
