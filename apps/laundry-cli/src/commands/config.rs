//! # Config Commands
//!
//! Shows the effective configuration and database status.

use laundry_db::migrations::migration_status;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ApiError;
use crate::output::{fields, Render};
use crate::state::{AppConfig, DbState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    pub shop_name: String,
    pub currency_symbol: String,
    pub database_path: PathBuf,
    pub database_healthy: bool,
    pub migrations_applied: usize,
    pub migrations_total: usize,
}

impl Render for ConfigDto {
    fn render(&self, _config: &AppConfig) -> String {
        fields(&[
            ("Shop", self.shop_name.clone()),
            ("Currency", self.currency_symbol.clone()),
            ("Database", self.database_path.display().to_string()),
            ("Healthy", if self.database_healthy { "yes" } else { "no" }.to_string()),
            (
                "Migrations",
                format!("{}/{}", self.migrations_applied, self.migrations_total),
            ),
        ])
    }
}

pub async fn get_config(
    db: &DbState,
    config: &AppConfig,
    database_path: &Path,
) -> Result<ConfigDto, ApiError> {
    debug!("get_config command");

    let (total, applied) = migration_status(db.inner().pool()).await?;

    Ok(ConfigDto {
        shop_name: config.shop_name.clone(),
        currency_symbol: config.currency_symbol.clone(),
        database_path: database_path.to_path_buf(),
        database_healthy: db.inner().health_check().await,
        migrations_applied: applied,
        migrations_total: total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_config() {
        let db = DbState::in_memory().await.unwrap();
        let config = AppConfig::default();

        let dto = get_config(&db, &config, Path::new(":memory:")).await.unwrap();
        assert!(dto.database_healthy);
        assert_eq!(dto.migrations_applied, dto.migrations_total);
        assert!(dto.migrations_total >= 1);
        assert!(dto.render(&config).contains("Laundry Shop"));
    }
}
