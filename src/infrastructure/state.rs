//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::services::{SeatTemplateService, TemplateBuildQueueService, VenueService};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::{RepositoryBackend, RepositoryFactory};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub venue_service: VenueService<RepositoryBackend>,
    pub template_build_queue: Arc<TemplateBuildQueueService<RepositoryBackend>>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let repository = RepositoryFactory::new(config.persistence.clone())
            .create()
            .await?;
        Ok(Self::with_repository(config, repository))
    }

    pub fn with_repository(config: AppConfig, repository: Arc<RepositoryBackend>) -> Self {
        let venue_service = VenueService::new(repository.clone());
        let seat_template_service = Arc::new(SeatTemplateService::new(repository));
        let template_build_queue = Arc::new(TemplateBuildQueueService::new(
            seat_template_service,
            config.template_builds.queue_capacity,
            config.template_builds.workers,
        ));

        Self {
            config,
            venue_service,
            template_build_queue,
        }
    }
}
