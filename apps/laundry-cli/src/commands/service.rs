//! # Service Commands
//!
//! The price list.

use chrono::{DateTime, Utc};
use laundry_core::id::parse_id;
use laundry_core::validation::validate_lookup_key;
use laundry_core::{Money, NewService, Service};
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::output::{fields, table, Ack, Render};
use crate::state::{AppConfig, DbState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDto {
    pub id: String,
    pub name: String,
    /// Minor units
    pub price_per_kg: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Service> for ServiceDto {
    fn from(s: Service) -> Self {
        ServiceDto {
            price_per_kg: s.price(),
            id: s.id,
            name: s.name,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

impl Render for ServiceDto {
    fn render(&self, config: &AppConfig) -> String {
        fields(&[
            ("ID", self.id.clone()),
            ("Name", self.name.clone()),
            ("Price/kg", config.format_currency(self.price_per_kg)),
            ("Created", self.created_at.format("%Y-%m-%d %H:%M").to_string()),
        ])
    }
}

impl Render for Vec<ServiceDto> {
    fn render(&self, config: &AppConfig) -> String {
        let rows: Vec<Vec<String>> = self
            .iter()
            .map(|s| vec![s.id.clone(), s.name.clone(), config.format_currency(s.price_per_kg)])
            .collect();
        table(&["ID", "Name", "Price/kg"], &rows)
    }
}

/// Parses an operator-entered amount.
pub(crate) fn parse_amount(field: &str, input: &str) -> Result<Money, ApiError> {
    Money::parse(input).ok_or_else(|| {
        ApiError::validation(format!(
            "{} must be an amount like 7000 or 7000.50, got '{}'",
            field,
            input.trim()
        ))
    })
}

pub async fn add_service(db: &DbState, name: String, price: &str) -> Result<ServiceDto, ApiError> {
    let price_per_kg = parse_amount("price", price)?;
    let service = db
        .inner()
        .services()
        .create(&NewService { name, price_per_kg })
        .await?;

    info!(id = %service.id, price = %price_per_kg, "Service added");
    Ok(ServiceDto::from(service))
}

/// New prices apply to loads taken in from now on.
pub async fn edit_service(
    db: &DbState,
    id: &str,
    name: Option<String>,
    price: Option<&str>,
) -> Result<ServiceDto, ApiError> {
    let repo = db.inner().services();
    let mut service = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Service", id))?;

    if let Some(name) = name {
        service.name = name;
    }
    if let Some(price) = price {
        service.price_per_kg = parse_amount("price", price)?.minor();
    }

    repo.update(&service).await?;
    info!(id = %id, "Service updated");

    get_service(db, id).await
}

pub async fn delete_service(db: &DbState, id: &str) -> Result<Ack, ApiError> {
    db.inner().services().delete(id).await?;
    info!(id = %id, "Service deleted");
    Ok(Ack::new(id, format!("Deleted service {}", id)))
}

pub async fn list_services(db: &DbState) -> Result<Vec<ServiceDto>, ApiError> {
    let services = db.inner().services().list_all().await?;
    Ok(services.into_iter().map(ServiceDto::from).collect())
}

pub async fn search_services(db: &DbState, name: &str) -> Result<Vec<ServiceDto>, ApiError> {
    let services = db.inner().services().search_by_name(name).await?;
    Ok(services.into_iter().map(ServiceDto::from).collect())
}

pub async fn get_service(db: &DbState, id: &str) -> Result<ServiceDto, ApiError> {
    let service = db
        .inner()
        .services()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Service", id))?;
    Ok(ServiceDto::from(service))
}

pub(crate) async fn resolve_service_id(db: &DbState, key: &str) -> Result<String, ApiError> {
    let key = validate_lookup_key("service", key)?;
    if parse_id(&key).is_some() {
        return Ok(key);
    }

    let service = db
        .inner()
        .services()
        .find_first_by_name(&key)
        .await?
        .ok_or_else(|| ApiError::not_found("Service", &key))?;
    Ok(service.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("price", "7000").unwrap(), Money::from_major(7000));
        assert_eq!(parse_amount("price", " 7000.5 ").unwrap(), Money::from_minor(700_050));

        let err = parse_amount("price", "7.000,00").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.starts_with("price must be an amount"));
    }

    #[tokio::test]
    async fn test_add_edit_delete() {
        let db = DbState::in_memory().await.unwrap();
        let added = add_service(&db, "Cuci Setrika".to_string(), "8000").await.unwrap();
        assert_eq!(added.price_per_kg, Money::from_major(8000));

        let edited = edit_service(&db, &added.id, None, Some("9000")).await.unwrap();
        assert_eq!(edited.price_per_kg, Money::from_major(9000));
        assert_eq!(edited.name, "Cuci Setrika");

        assert_eq!(resolve_service_id(&db, "setrika").await.unwrap(), added.id);
        assert_eq!(search_services(&db, "cuci").await.unwrap().len(), 1);

        delete_service(&db, &added.id).await.unwrap();
        assert!(list_services(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zero_price_rejected() {
        let db = DbState::in_memory().await.unwrap();
        let err = add_service(&db, "Gratis".to_string(), "0").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_render_uses_currency_symbol() {
        let now = Utc::now();
        let dto = ServiceDto {
            id: "ID-SV-1-1".to_string(),
            name: "Express".to_string(),
            price_per_kg: Money::from_major(15000),
            created_at: now,
            updated_at: now,
        };
        assert!(dto.render(&AppConfig::default()).contains("Rp15000.00"));
    }
}
