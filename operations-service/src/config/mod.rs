//! Configuration module for operations-service.

use rust_decimal::Decimal;
use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use service_core::scheduler::CalendarSchedule;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct OperationsConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub database: DatabaseConfig,
    pub accrual: AccrualConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Settings for the scheduled leave accrual run.
#[derive(Debug, Clone)]
pub struct AccrualConfig {
    pub enabled: bool,
    pub schedule: CalendarSchedule,
    /// Credit is granted when the months since joining divide evenly by this.
    pub period_months: u32,
    /// Days credited per eligible employee.
    pub quantity: Decimal,
    /// Maximum number of in-flight credit inserts.
    pub concurrency: usize,
}

impl Default for AccrualConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            schedule: CalendarSchedule::monthly(),
            period_months: 3,
            quantity: Decimal::from(3),
            concurrency: 10,
        }
    }
}

/// Parse a raw setting. Unset means `default`; a set value that does not
/// parse is a configuration error.
fn parse_setting<T>(key: &str, raw: Option<String>, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("{} is invalid ('{}'): {}", key, value, e))
        }),
    }
}

fn parsed_or<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_setting(key, env::var(key).ok(), default)
}

impl AccrualConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let schedule = match env::var("LEAVE_ACCRUAL_SCHEDULE") {
            Ok(expr) => expr.parse::<CalendarSchedule>().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("LEAVE_ACCRUAL_SCHEDULE is invalid: {}", e))
            })?,
            Err(_) => defaults.schedule,
        };

        let period_months = parsed_or("LEAVE_ACCRUAL_PERIOD_MONTHS", defaults.period_months)?;
        if period_months == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "LEAVE_ACCRUAL_PERIOD_MONTHS must be at least 1"
            )));
        }

        let concurrency = parsed_or("LEAVE_ACCRUAL_CONCURRENCY", defaults.concurrency)?;
        if concurrency == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "LEAVE_ACCRUAL_CONCURRENCY must be at least 1"
            )));
        }

        let quantity = parsed_or("LEAVE_ACCRUAL_QUANTITY", defaults.quantity)?;
        if quantity <= Decimal::ZERO {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "LEAVE_ACCRUAL_QUANTITY must be positive"
            )));
        }

        Ok(Self {
            enabled: parsed_or("LEAVE_ACCRUAL_ENABLED", defaults.enabled)?,
            schedule,
            period_months,
            quantity,
            concurrency,
        })
    }
}

impl OperationsConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(Self {
            common,
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "operations-service".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok(),
            database: DatabaseConfig {
                url: Secret::new(env::var("DATABASE_URL").map_err(|_| {
                    AppError::ConfigError(anyhow::anyhow!("DATABASE_URL is required"))
                })?),
                max_connections: parsed_or("DATABASE_MAX_CONNECTIONS", 10)?,
                min_connections: parsed_or("DATABASE_MIN_CONNECTIONS", 2)?,
            },
            accrual: AccrualConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accrual_defaults_match_quarterly_policy() {
        let config = AccrualConfig::default();
        assert!(config.enabled);
        assert_eq!(config.period_months, 3);
        assert_eq!(config.quantity, Decimal::from(3));
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.schedule, CalendarSchedule::monthly());
    }

    #[test]
    fn unset_setting_uses_default() {
        assert!(parse_setting("LEAVE_ACCRUAL_ENABLED", None, true).unwrap());
    }

    #[test]
    fn set_settings_are_parsed_after_trimming() {
        assert!(!parse_setting("LEAVE_ACCRUAL_ENABLED", Some(" false ".into()), true).unwrap());
        assert_eq!(
            parse_setting("LEAVE_ACCRUAL_QUANTITY", Some("1.5".into()), Decimal::from(3)).unwrap(),
            Decimal::new(15, 1)
        );
    }

    #[test]
    fn malformed_settings_are_rejected_instead_of_defaulted() {
        for raw in ["False", "no", ""] {
            let err = parse_setting("LEAVE_ACCRUAL_ENABLED", Some(raw.into()), true).unwrap_err();
            assert!(matches!(err, AppError::ConfigError(_)), "{:?} should be rejected", raw);
        }
        assert!(parse_setting("LEAVE_ACCRUAL_QUANTITY", Some("3,5".into()), Decimal::from(3)).is_err());
        assert!(parse_setting("LEAVE_ACCRUAL_CONCURRENCY", Some("ten".into()), 10usize).is_err());
    }
}
