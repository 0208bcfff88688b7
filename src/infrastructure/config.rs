//! Application configuration

use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server port
    pub server_port: u16,
    pub persistence: PersistenceConfig,
    pub template_builds: TemplateBuildConfig,
}

/// Where venues and seat templates are stored
#[derive(Debug, Clone)]
pub struct PersistenceConfig {
    /// "sqlite" or "memory"
    pub backend: String,
    pub sqlite_path: String,
    pub sqlite_max_connections: u32,
}

/// Background seat template build settings
#[derive(Debug, Clone)]
pub struct TemplateBuildConfig {
    /// Builds allowed to run at the same time
    pub workers: usize,
    /// Builds allowed to wait in the queue
    pub queue_capacity: usize,
    /// How long finished build records are kept
    pub history_retention_hours: u64,
}

fn parse_var<T>(name: &str, default: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .with_context(|| format!("{} must be a valid number", name))
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server_port: parse_var("SERVER_PORT", "3000")?,
            persistence: PersistenceConfig {
                backend: env::var("PERSISTENCE_BACKEND").unwrap_or_else(|_| "sqlite".to_string()),
                sqlite_path: env::var("SQLITE_PATH")
                    .unwrap_or_else(|_| "./data/venues.db".to_string()),
                sqlite_max_connections: parse_var("SQLITE_MAX_CONNECTIONS", "5")?,
            },
            template_builds: TemplateBuildConfig {
                workers: parse_var("TEMPLATE_WORKERS", "2")?,
                queue_capacity: parse_var("TEMPLATE_QUEUE_CAPACITY", "64")?,
                history_retention_hours: parse_var("BUILD_HISTORY_RETENTION_HOURS", "24")?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_uses_default_when_unset() {
        let port: u16 = parse_var("VENUE_ENGINE_TEST_UNSET_PORT", "3000").unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn test_parse_var_rejects_non_numeric_default() {
        let err = parse_var::<u16>("VENUE_ENGINE_TEST_UNSET_PORT", "abc").unwrap_err();
        assert!(err.to_string().contains("VENUE_ENGINE_TEST_UNSET_PORT"));
        assert!(format!("{:#}", err).contains("invalid digit"));
    }
}
