//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use blogsite_core::query::DEFAULT_PER_PAGE;
use blogsite_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Listing page size when the client sends no `per_page`.
    pub posts_per_page: u64,
    /// `None` allows any origin.
    pub cors_allowed_origin: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`; unparseable numbers fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &str| lookup(key).and_then(|v| parse::<u64>(&v));

        let database = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| DatabaseConfig {
                max_connections: lookup("DB_MAX_CONNECTIONS")
                    .and_then(|v| parse(&v))
                    .unwrap_or(10),
                min_connections: lookup("DB_MIN_CONNECTIONS")
                    .and_then(|v| parse(&v))
                    .unwrap_or(1),
                connect_timeout: Duration::from_secs(
                    parsed("DB_CONNECT_TIMEOUT_SECS").unwrap_or(10),
                ),
                url,
            });

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT").and_then(|v| parse(&v)).unwrap_or(5000),
            database,
            posts_per_page: parsed("POSTS_PER_PAGE")
                .filter(|n| *n >= 1)
                .unwrap_or(DEFAULT_PER_PAGE),
            cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN").filter(|o| !o.is_empty()),
        }
    }
}

fn parse<T: FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = load(&[]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.posts_per_page, 10);
        assert!(config.database.is_none());
        assert!(config.cors_allowed_origin.is_none());
    }

    #[test]
    fn reads_database_and_page_size() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/blogsite"),
            ("DB_MAX_CONNECTIONS", "25"),
            ("POSTS_PER_PAGE", "20"),
            ("PORT", "8080"),
        ]);

        let db = config.database.unwrap();
        assert_eq!(db.url, "postgres://localhost/blogsite");
        assert_eq!(db.max_connections, 25);
        assert_eq!(db.min_connections, 1);
        assert_eq!(config.posts_per_page, 20);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn bad_numbers_fall_back() {
        let config = load(&[("POSTS_PER_PAGE", "zero"), ("PORT", "-1")]);
        assert_eq!(config.posts_per_page, 10);
        assert_eq!(config.port, 5000);

        let config = load(&[("POSTS_PER_PAGE", "0"), ("DATABASE_URL", "")]);
        assert_eq!(config.posts_per_page, 10);
        assert!(config.database.is_none());
    }
}
