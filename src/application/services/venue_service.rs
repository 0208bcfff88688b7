//! Venue Service - Venue and hall registration, template reads

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::ports::outbound::{RepositoryError, VenueRepositoryPort};
use crate::application::services::SeatTemplateError;
use crate::domain::entities::{NewVenueHall, Venue, VenueHall};
use crate::domain::value_objects::{HallId, VenueId};

/// Errors from venue registration and lookup
#[derive(Debug, thiserror::Error)]
pub enum VenueError {
    #[error("Venue not found: {0}")]
    VenueNotFound(VenueId),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<RepositoryError> for VenueError {
    fn from(err: RepositoryError) -> Self {
        VenueError::Persistence(err.to_string())
    }
}

pub struct VenueService<R: VenueRepositoryPort> {
    repository: Arc<R>,
}

impl<R: VenueRepositoryPort> VenueService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    fn validate_registration(name: &str, halls: &[NewVenueHall]) -> Result<(), VenueError> {
        if name.trim().is_empty() {
            return Err(VenueError::Validation("Venue name cannot be empty".to_string()));
        }
        if name.len() > 255 {
            return Err(VenueError::Validation(
                "Venue name cannot exceed 255 characters".to_string(),
            ));
        }
        for hall in halls {
            if hall.name.trim().is_empty() {
                return Err(VenueError::Validation("Hall name cannot be empty".to_string()));
            }
            if hall.total_seats < 0 {
                return Err(VenueError::Validation(format!(
                    "Hall {} cannot have a negative seat total",
                    hall.name
                )));
            }
        }
        Ok(())
    }

    /// Register a venue together with its halls
    #[instrument(skip(self, halls), fields(hall_count = halls.len()))]
    pub async fn register_venue(
        &self,
        name: &str,
        halls: Vec<NewVenueHall>,
    ) -> Result<(Venue, Vec<VenueHall>), VenueError> {
        Self::validate_registration(name, &halls)?;

        let (venue, halls) = self.repository.register_venue(name.trim(), &halls).await?;

        info!(venue_id = %venue.id, halls = halls.len(), "Registered venue: {}", venue.name);
        Ok((venue, halls))
    }

    #[instrument(skip(self))]
    pub async fn list_halls(&self, venue_id: VenueId) -> Result<Vec<VenueHall>, VenueError> {
        if self.repository.get_venue(venue_id).await?.is_none() {
            return Err(VenueError::VenueNotFound(venue_id));
        }
        Ok(self.repository.list_halls(venue_id).await?)
    }

    /// Fetch a hall with its full seat tree
    #[instrument(skip(self))]
    pub async fn get_hall_template(&self, hall_id: HallId) -> Result<VenueHall, SeatTemplateError> {
        debug!(hall_id = %hall_id, "Fetching hall template");
        self.repository
            .load_template(hall_id)
            .await?
            .ok_or(SeatTemplateError::HallNotFound(hall_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::TemplateStatus;
    use crate::infrastructure::persistence::InMemoryVenueRepository;

    fn hall(name: &str, total_seats: i32) -> NewVenueHall {
        NewVenueHall {
            name: name.to_string(),
            total_seats,
        }
    }

    #[tokio::test]
    async fn test_register_venue_with_halls() {
        let service = VenueService::new(Arc::new(InMemoryVenueRepository::new()));

        let (venue, halls) = service
            .register_venue("Seoul Arts Center", vec![hall("Opera", 2300), hall("Concert", 2500)])
            .await
            .unwrap();

        assert_eq!(venue.name, "Seoul Arts Center");
        assert_eq!(halls.len(), 2);
        assert!(halls.iter().all(|h| h.venue_id == venue.id));
        assert!(halls.iter().all(|h| h.template_status == TemplateStatus::Empty));
        assert_ne!(halls[0].id, halls[1].id);

        let listed = service.list_halls(venue.id).await.unwrap();
        let names: Vec<_> = listed.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Opera", "Concert"]);
    }

    #[tokio::test]
    async fn test_registration_validation() {
        let service = VenueService::new(Arc::new(InMemoryVenueRepository::new()));

        assert!(matches!(
            service.register_venue(" ", vec![]).await,
            Err(VenueError::Validation(_))
        ));
        assert!(matches!(
            service.register_venue("Hall", vec![hall("A", -1)]).await,
            Err(VenueError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_hall_template_is_not_found() {
        let service = VenueService::new(Arc::new(InMemoryVenueRepository::new()));
        assert!(matches!(
            service.get_hall_template(HallId::new(42)).await,
            Err(SeatTemplateError::HallNotFound(_))
        ));
        assert!(matches!(
            service.list_halls(VenueId::new(42)).await,
            Err(VenueError::VenueNotFound(_))
        ));
    }
}
