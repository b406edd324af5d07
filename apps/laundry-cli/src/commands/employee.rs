//! # Employee Commands
//!
//! Staff records, logins and password changes. Password hashes never
//! leave the database layer; [`EmployeeDto`] has no such field.

use chrono::{DateTime, Utc};
use dialoguer::Password;
use laundry_core::id::parse_id;
use laundry_core::validation::validate_lookup_key;
use laundry_core::{Employee, NewEmployee};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::output::{fields, table, Ack, Render};
use crate::state::{AppConfig, DbState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: String,
    pub name: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeDto {
    fn from(e: Employee) -> Self {
        EmployeeDto {
            id: e.id,
            name: e.name,
            username: e.username,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

impl Render for EmployeeDto {
    fn render(&self, _config: &AppConfig) -> String {
        fields(&[
            ("ID", self.id.clone()),
            ("Name", self.name.clone()),
            ("Username", self.username.clone()),
            ("Created", self.created_at.format("%Y-%m-%d %H:%M").to_string()),
        ])
    }
}

impl Render for Vec<EmployeeDto> {
    fn render(&self, _config: &AppConfig) -> String {
        let rows: Vec<Vec<String>> = self
            .iter()
            .map(|e| vec![e.id.clone(), e.name.clone(), e.username.clone()])
            .collect();
        table(&["ID", "Name", "Username"], &rows)
    }
}

/// Asks for a password on the terminal without echoing it.
pub fn prompt_password(confirm: bool) -> Result<String, ApiError> {
    let prompt = Password::new().with_prompt("Password");
    let prompt = if confirm {
        prompt.with_confirmation("Repeat password", "Passwords do not match")
    } else {
        prompt
    };

    prompt
        .interact()
        .map_err(|e| ApiError::internal(format!("Could not read password: {}", e)))
}

pub async fn add_employee(
    db: &DbState,
    name: String,
    username: String,
    password: String,
) -> Result<EmployeeDto, ApiError> {
    let employee = db
        .inner()
        .employees()
        .create(&NewEmployee {
            name,
            username,
            password,
        })
        .await?;

    info!(id = %employee.id, username = %employee.username, "Employee added");
    Ok(EmployeeDto::from(employee))
}

pub async fn edit_employee(
    db: &DbState,
    id: &str,
    name: Option<String>,
    username: Option<String>,
) -> Result<EmployeeDto, ApiError> {
    let repo = db.inner().employees();
    let mut employee = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Employee", id))?;

    if let Some(name) = name {
        employee.name = name;
    }
    if let Some(username) = username {
        employee.username = username;
    }

    repo.update(&employee).await?;
    info!(id = %id, "Employee updated");

    get_employee(db, id).await
}

pub async fn delete_employee(db: &DbState, id: &str) -> Result<Ack, ApiError> {
    db.inner().employees().delete(id).await?;
    info!(id = %id, "Employee deleted");
    Ok(Ack::new(id, format!("Deleted employee {}", id)))
}

pub async fn list_employees(db: &DbState) -> Result<Vec<EmployeeDto>, ApiError> {
    let employees = db.inner().employees().list_all().await?;
    Ok(employees.into_iter().map(EmployeeDto::from).collect())
}

pub async fn search_employees(db: &DbState, name: &str) -> Result<Vec<EmployeeDto>, ApiError> {
    debug!(query = %name, "search_employees command");
    let employees = db.inner().employees().search_by_name(name).await?;
    Ok(employees.into_iter().map(EmployeeDto::from).collect())
}

pub async fn get_employee(db: &DbState, id: &str) -> Result<EmployeeDto, ApiError> {
    let employee = db
        .inner()
        .employees()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Employee", id))?;
    Ok(EmployeeDto::from(employee))
}

/// ## Returns
/// * `Err(ApiError { code: ValidationError, .. })` - unknown user or wrong password
pub async fn login(db: &DbState, username: &str, password: &str) -> Result<EmployeeDto, ApiError> {
    match db.inner().employees().authenticate(username, password).await? {
        Some(employee) => {
            info!(id = %employee.id, "Employee logged in");
            Ok(EmployeeDto::from(employee))
        }
        None => {
            warn!(username = %username, "Failed login");
            Err(ApiError::validation("Invalid username or password"))
        }
    }
}

pub async fn change_password(db: &DbState, id: &str, password: &str) -> Result<Ack, ApiError> {
    db.inner().employees().change_password(id, password).await?;
    Ok(Ack::new(id, format!("Password changed for {}", id)))
}

/// Takes an `ID-EM-...` key as-is; otherwise tries the username, then the
/// first name match.
pub(crate) async fn resolve_employee_id(db: &DbState, key: &str) -> Result<String, ApiError> {
    let key = validate_lookup_key("employee", key)?;
    if parse_id(&key).is_some() {
        return Ok(key);
    }

    let repo = db.inner().employees();
    let employee = match repo.get_by_username(&key).await? {
        Some(e) => e,
        None => repo
            .find_first_by_name(&key)
            .await?
            .ok_or_else(|| ApiError::not_found("Employee", &key))?,
    };
    Ok(employee.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    async fn with_sari() -> (DbState, EmployeeDto) {
        let db = DbState::in_memory().await.unwrap();
        let sari = add_employee(
            &db,
            "Sari Wulandari".to_string(),
            "sari".to_string(),
            "rahasia123".to_string(),
        )
        .await
        .unwrap();
        (db, sari)
    }

    #[tokio::test]
    async fn test_login() {
        let (db, sari) = with_sari().await;

        assert_eq!(login(&db, "sari", "rahasia123").await.unwrap(), sari);
        let err = login(&db, "sari", "wrong").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_passwd_and_edit() {
        let (db, sari) = with_sari().await;

        change_password(&db, &sari.id, "baru-456").await.unwrap();
        assert!(login(&db, "sari", "rahasia123").await.is_err());
        assert!(login(&db, "sari", "baru-456").await.is_ok());

        let edited = edit_employee(&db, &sari.id, None, Some("sari.w".to_string()))
            .await
            .unwrap();
        assert_eq!(edited.username, "sari.w");
        assert_eq!(edited.name, "Sari Wulandari");
    }

    #[tokio::test]
    async fn test_duplicate_username_is_validation_error() {
        let (db, _) = with_sari().await;
        let err = add_employee(
            &db,
            "Sari Lain".to_string(),
            "sari".to_string(),
            "rahasia123".to_string(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "username 'sari' already exists");
    }

    #[tokio::test]
    async fn test_resolve_by_username_then_name() {
        let (db, sari) = with_sari().await;

        assert_eq!(resolve_employee_id(&db, "SARI").await.unwrap(), sari.id);
        assert_eq!(resolve_employee_id(&db, "wulan").await.unwrap(), sari.id);
        assert!(resolve_employee_id(&db, "agus").await.is_err());
    }

    #[tokio::test]
    async fn test_search_list_delete() {
        let (db, sari) = with_sari().await;

        assert_eq!(search_employees(&db, "sari").await.unwrap().len(), 1);
        delete_employee(&db, &sari.id).await.unwrap();
        assert!(list_employees(&db).await.unwrap().is_empty());
    }
}
