use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub name: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL").context("DATABASE_URL is not set")?;
        let database = DatabaseConfig {
            url,
            name: lookup("DATABASE_NAME").unwrap_or_else(|| "quotapay".into()),
            max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(10),
        };
        let port = match lookup("PORT") {
            Some(v) => v.parse::<u16>().with_context(|| format!("invalid PORT {v:?}"))?,
            None => 5000,
        };
        Ok(Self {
            database,
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn falls_back_to_default_port_and_database_name() {
        let cfg = AppConfig::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost:5432",
        )]))
        .expect("config should load");
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.database.name, "quotapay");
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn reads_explicit_values() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db:5432"),
            ("DATABASE_NAME", "billing"),
            ("DATABASE_MAX_CONNECTIONS", "3"),
            ("APP_HOST", "127.0.0.1"),
            ("PORT", "8081"),
        ]))
        .expect("config should load");
        assert_eq!(cfg.database.url, "postgres://db:5432");
        assert_eq!(cfg.database.name, "billing");
        assert_eq!(cfg.database.max_connections, 3);
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8081");
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn rejects_non_numeric_port() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db:5432"),
            ("PORT", "http"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
