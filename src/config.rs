use std::{net::SocketAddr, str::FromStr};

use anyhow::{Context, ensure};

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub db_max_connections: u32,
    pub page_size: u64,
    pub outlier_threshold: f64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://bookreel.db?mode=rwc".to_string());

        let db_max_connections: u32 =
            parse_or("DB_MAX_CONNECTIONS", var("DB_MAX_CONNECTIONS"), 10)?;
        let page_size: u64 = parse_or("PAGE_SIZE", var("PAGE_SIZE"), 25)?;
        let outlier_threshold =
            check_threshold(parse_or("OUTLIER_THRESHOLD", var("OUTLIER_THRESHOLD"), 2.0)?)?;

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            db_max_connections: db_max_connections.max(1),
            page_size: page_size.clamp(1, crate::queries::MAX_PAGE_SIZE),
            outlier_threshold,
        })
    }

    /// Settings for an in-memory database, used by tests and tooling.
    pub fn in_memory() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            page_size: 25,
            outlier_threshold: 2.0,
        }
    }
}

fn var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

/// Unset means `default`; a value that does not parse is an error.
fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(raw) => raw.trim().parse().with_context(|| format!("{key}={raw:?}")),
        None => Ok(default),
    }
}

fn check_threshold(value: f64) -> anyhow::Result<f64> {
    ensure!(
        value.is_finite() && value >= 0.0,
        "OUTLIER_THRESHOLD must be a non-negative number, got {value}"
    );
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_uses_a_single_connection() {
        let config = Config::in_memory();
        assert_eq!(config.db_max_connections, 1);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.outlier_threshold, 2.0);
    }

    #[test]
    fn unset_values_use_the_default() {
        assert_eq!(parse_or::<u64>("PAGE_SIZE", None, 25).unwrap(), 25);
        assert_eq!(parse_or::<u64>("PAGE_SIZE", Some(" 40 ".into()), 25).unwrap(), 40);
    }

    #[test]
    fn unparsable_values_are_errors() {
        let err = parse_or::<f64>("OUTLIER_THRESHOLD", Some("two".into()), 2.0).unwrap_err();
        assert!(err.to_string().contains("OUTLIER_THRESHOLD"));
        assert!(parse_or::<u32>("DB_MAX_CONNECTIONS", Some("-1".into()), 10).is_err());
    }

    #[test]
    fn threshold_must_be_finite_and_non_negative() {
        assert_eq!(check_threshold(2.5).unwrap(), 2.5);
        assert!(check_threshold(-1.0).is_err());
        assert!(check_threshold(f64::NAN).is_err());
        assert!(check_threshold(f64::INFINITY).is_err());
    }
}
