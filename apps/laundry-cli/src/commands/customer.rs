//! # Customer Commands
//!
//! Add, edit, delete, list and search customers.

use chrono::{DateTime, Utc};
use laundry_core::id::parse_id;
use laundry_core::validation::validate_lookup_key;
use laundry_core::{Customer, NewCustomer};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{CustomerChanges, CustomerForm};
use crate::error::ApiError;
use crate::output::{fields, table, Ack, Render};
use crate::state::{AppConfig, DbState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerDto {
    fn from(c: Customer) -> Self {
        CustomerDto {
            id: c.id,
            name: c.name,
            address: c.address,
            phone_number: c.phone_number,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl Render for CustomerDto {
    fn render(&self, _config: &AppConfig) -> String {
        fields(&[
            ("ID", self.id.clone()),
            ("Name", self.name.clone()),
            ("Address", self.address.clone()),
            ("Phone", self.phone_number.clone()),
            ("Created", self.created_at.format("%Y-%m-%d %H:%M").to_string()),
        ])
    }
}

impl Render for Vec<CustomerDto> {
    fn render(&self, _config: &AppConfig) -> String {
        let rows: Vec<Vec<String>> = self
            .iter()
            .map(|c| vec![c.id.clone(), c.name.clone(), c.phone_number.clone(), c.address.clone()])
            .collect();
        table(&["ID", "Name", "Phone", "Address"], &rows)
    }
}

pub async fn add_customer(db: &DbState, form: CustomerForm) -> Result<CustomerDto, ApiError> {
    let customer = db
        .inner()
        .customers()
        .create(&NewCustomer {
            name: form.name,
            address: form.address,
            phone_number: form.phone,
        })
        .await?;

    info!(id = %customer.id, "Customer added");
    Ok(CustomerDto::from(customer))
}

/// Applies only the fields that were given.
pub async fn edit_customer(
    db: &DbState,
    id: &str,
    changes: CustomerChanges,
) -> Result<CustomerDto, ApiError> {
    let repo = db.inner().customers();
    let mut customer = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Customer", id))?;

    if let Some(name) = changes.name {
        customer.name = name;
    }
    if let Some(address) = changes.address {
        customer.address = address;
    }
    if let Some(phone) = changes.phone {
        customer.phone_number = phone;
    }

    repo.update(&customer).await?;
    info!(id = %id, "Customer updated");

    get_customer(db, id).await
}

pub async fn delete_customer(db: &DbState, id: &str) -> Result<Ack, ApiError> {
    db.inner().customers().delete(id).await?;
    info!(id = %id, "Customer deleted");
    Ok(Ack::new(id, format!("Deleted customer {}", id)))
}

pub async fn list_customers(db: &DbState) -> Result<Vec<CustomerDto>, ApiError> {
    let customers = db.inner().customers().list_all().await?;
    Ok(customers.into_iter().map(CustomerDto::from).collect())
}

pub async fn search_customers(db: &DbState, name: &str) -> Result<Vec<CustomerDto>, ApiError> {
    debug!(query = %name, "search_customers command");
    let customers = db.inner().customers().search_by_name(name).await?;
    Ok(customers.into_iter().map(CustomerDto::from).collect())
}

pub async fn get_customer(db: &DbState, id: &str) -> Result<CustomerDto, ApiError> {
    let customer = db
        .inner()
        .customers()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Customer", id))?;
    Ok(CustomerDto::from(customer))
}

/// Takes an `ID-CS-...` key as-is; anything else is looked up by name and
/// the first match wins.
pub(crate) async fn resolve_customer_id(db: &DbState, key: &str) -> Result<String, ApiError> {
    let key = validate_lookup_key("customer", key)?;
    if parse_id(&key).is_some() {
        return Ok(key);
    }

    let customer = db
        .inner()
        .customers()
        .find_first_by_name(&key)
        .await?
        .ok_or_else(|| ApiError::not_found("Customer", &key))?;
    debug!(name = %key, id = %customer.id, "Resolved customer by name");
    Ok(customer.id)
}
