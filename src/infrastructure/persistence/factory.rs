//! Repository factory - Creates the persistence backend from configuration
//!
//! Mirrors the queue backend selection: an enum wraps each adapter so the
//! application services can stay generic over a single concrete type.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::application::ports::outbound::{
    HallRepositoryPort, HallUnitOfWork, RepositoryError, VenueRepositoryPort,
};
use crate::domain::entities::{NewVenueHall, Venue, VenueHall};
use crate::domain::value_objects::{HallId, VenueId};
use crate::infrastructure::config::PersistenceConfig;
use crate::infrastructure::persistence::{InMemoryVenueRepository, SqliteVenueRepository};

/// Enum wrapper for repository backends to enable runtime selection
#[derive(Clone)]
pub enum RepositoryBackend {
    Memory(InMemoryVenueRepository),
    Sqlite(SqliteVenueRepository),
}

#[async_trait]
impl VenueRepositoryPort for RepositoryBackend {
    async fn register_venue(
        &self,
        name: &str,
        halls: &[NewVenueHall],
    ) -> Result<(Venue, Vec<VenueHall>), RepositoryError> {
        match self {
            RepositoryBackend::Memory(r) => r.register_venue(name, halls).await,
            RepositoryBackend::Sqlite(r) => r.register_venue(name, halls).await,
        }
    }

    async fn get_venue(&self, id: VenueId) -> Result<Option<Venue>, RepositoryError> {
        match self {
            RepositoryBackend::Memory(r) => r.get_venue(id).await,
            RepositoryBackend::Sqlite(r) => r.get_venue(id).await,
        }
    }

    async fn list_halls(&self, venue_id: VenueId) -> Result<Vec<VenueHall>, RepositoryError> {
        match self {
            RepositoryBackend::Memory(r) => r.list_halls(venue_id).await,
            RepositoryBackend::Sqlite(r) => r.list_halls(venue_id).await,
        }
    }

    async fn load_template(&self, id: HallId) -> Result<Option<VenueHall>, RepositoryError> {
        match self {
            RepositoryBackend::Memory(r) => r.load_template(id).await,
            RepositoryBackend::Sqlite(r) => r.load_template(id).await,
        }
    }
}

#[async_trait]
impl HallRepositoryPort for RepositoryBackend {
    async fn begin(&self) -> Result<Box<dyn HallUnitOfWork>, RepositoryError> {
        match self {
            RepositoryBackend::Memory(r) => r.begin().await,
            RepositoryBackend::Sqlite(r) => r.begin().await,
        }
    }
}

/// Repository factory for creating the configured backend
pub struct RepositoryFactory {
    config: PersistenceConfig,
}

impl RepositoryFactory {
    pub fn new(config: PersistenceConfig) -> Self {
        Self { config }
    }

    pub async fn create(&self) -> Result<Arc<RepositoryBackend>> {
        match self.config.backend.as_str() {
            "memory" => {
                tracing::warn!("Using in-memory persistence; venues are lost on restart");
                Ok(Arc::new(RepositoryBackend::Memory(InMemoryVenueRepository::new())))
            }
            "sqlite" => {
                // Ensure data directory exists
                if let Some(parent) = std::path::Path::new(&self.config.sqlite_path).parent() {
                    std::fs::create_dir_all(parent)
                        .context("Failed to create venue database directory")?;
                }

                let options =
                    SqliteConnectOptions::from_str(&format!("sqlite:{}", self.config.sqlite_path))
                        .context("Invalid SQLite path")?
                        .create_if_missing(true)
                        .foreign_keys(true)
                        .busy_timeout(Duration::from_secs(5));

                let pool = SqlitePoolOptions::new()
                    .max_connections(self.config.sqlite_max_connections)
                    .connect_with(options)
                    .await
                    .context("Failed to connect to SQLite venue database")?;
                tracing::info!("Connected to SQLite venue database: {}", self.config.sqlite_path);

                let repository = SqliteVenueRepository::new(pool)
                    .await
                    .context("Failed to initialize venue schema")?;
                Ok(Arc::new(RepositoryBackend::Sqlite(repository)))
            }
            backend => anyhow::bail!("Unsupported persistence backend: {}", backend),
        }
    }
}
