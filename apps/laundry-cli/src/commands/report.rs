//! # Report Commands
//!
//! Revenue over whole local days.

use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, Utc};
use laundry_core::{Money, Weight};
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::output::{fields, Render};
use crate::state::{AppConfig, DbState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDto {
    pub shop_name: String,
    pub from: NaiveDate,
    /// Inclusive
    pub to: NaiveDate,
    pub transaction_count: i64,
    pub total_weight_grams: i64,
    pub revenue: Money,
}

impl Render for ReportDto {
    fn render(&self, config: &AppConfig) -> String {
        let period = if self.from == self.to {
            self.from.to_string()
        } else {
            format!("{} to {}", self.from, self.to)
        };

        let body = fields(&[
            ("Period", period),
            ("Transactions", self.transaction_count.to_string()),
            ("Laundry", Weight::from_grams(self.total_weight_grams).to_string()),
            ("Revenue", config.format_currency(self.revenue)),
        ]);
        format!("{}\n{}\n{}", self.shop_name, "=".repeat(self.shop_name.chars().count()), body)
    }
}

/// `[start of from, start of the day after to)` in UTC.
pub(crate) fn day_window(
    from: NaiveDate,
    to: NaiveDate,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ApiError> {
    if to < from {
        return Err(ApiError::validation(format!(
            "--to ({}) is before --from ({})",
            to, from
        )));
    }

    let end = to
        .checked_add_days(Days::new(1))
        .ok_or_else(|| ApiError::validation("--to is out of range"))?;

    Ok((local_midnight(from)?, local_midnight(end)?))
}

fn local_midnight(date: NaiveDate) -> Result<DateTime<Utc>, ApiError> {
    date.and_time(NaiveTime::MIN)
        .and_local_timezone(Local)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(|| ApiError::internal(format!("No local midnight on {}", date)))
}

/// Defaults: both ends today.
pub async fn revenue_report(
    db: &DbState,
    config: &AppConfig,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<ReportDto, ApiError> {
    let from = from.unwrap_or_else(|| Local::now().date_naive());
    let to = to.unwrap_or(from);
    let (start, end) = day_window(from, to)?;

    let summary = db.inner().transactions().summary(start, end).await?;
    info!(%from, %to, count = summary.transaction_count, "Revenue report");

    Ok(ReportDto {
        shop_name: config.shop_name.clone(),
        from,
        to,
        transaction_count: summary.transaction_count,
        total_weight_grams: summary.total_weight_grams,
        revenue: summary.revenue,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{CustomerForm, TransactionForm};
    use crate::commands::customer::add_customer;
    use crate::commands::employee::add_employee;
    use crate::commands::service::add_service;
    use crate::commands::transaction::create_transaction;
    use crate::error::ErrorCode;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_window() {
        let (start, end) = day_window(date(2026, 1, 1), date(2026, 1, 3)).unwrap();
        assert!(start < end);
        let hours = (end - start).num_hours();
        assert!((71..=73).contains(&hours));

        let err = day_window(date(2026, 1, 3), date(2026, 1, 1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_today_includes_new_loads() {
        let db = DbState::in_memory().await.unwrap();
        add_customer(
            &db,
            CustomerForm {
                name: "Budi".to_string(),
                address: String::new(),
                phone: "081234567890".to_string(),
            },
        )
        .await
        .unwrap();
        add_employee(&db, "Sari".to_string(), "sari".to_string(), "rahasia123".to_string())
            .await
            .unwrap();
        add_service(&db, "Cuci Kering".to_string(), "6000").await.unwrap();

        for weight in ["1.5", "2"] {
            create_transaction(
                &db,
                TransactionForm {
                    customer: "Budi".to_string(),
                    employee: "sari".to_string(),
                    service: "Cuci".to_string(),
                    weight: weight.to_string(),
                    paid: "50000".to_string(),
                },
            )
            .await
            .unwrap();
        }

        let config = AppConfig::default();
        let report = revenue_report(&db, &config, None, None).await.unwrap();
        assert_eq!(report.transaction_count, 2);
        assert_eq!(report.total_weight_grams, 3500);
        assert_eq!(report.revenue, Money::from_major(21000));
        assert!(report.render(&config).starts_with("Laundry Shop\n"));

        let yesterday = Local::now().date_naive() - Days::new(1);
        let report = revenue_report(&db, &config, Some(yesterday), Some(yesterday))
            .await
            .unwrap();
        assert_eq!(report.transaction_count, 0);
        assert_eq!(report.revenue, Money::zero());
    }
}
