//! Repository ports - Interfaces for venue and seat template persistence
//!
//! These traits define the contracts that infrastructure repositories must implement.
//! Application services depend on these traits, not concrete implementations.

use async_trait::async_trait;

use crate::domain::entities::{NewVenueHall, Venue, VenueHall};
use crate::domain::value_objects::{HallId, VenueId};

/// Errors surfaced by persistence adapters
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

// =============================================================================
// Venue Repository Port
// =============================================================================

/// Repository port for venue registration and template reads
#[async_trait]
pub trait VenueRepositoryPort: Send + Sync {
    /// Create a venue and its halls, in the given order, in one write
    async fn register_venue(
        &self,
        name: &str,
        halls: &[NewVenueHall],
    ) -> Result<(Venue, Vec<VenueHall>), RepositoryError>;

    /// Get a venue by ID
    async fn get_venue(&self, id: VenueId) -> Result<Option<Venue>, RepositoryError>;

    /// List the halls of a venue (roots only)
    async fn list_halls(&self, venue_id: VenueId) -> Result<Vec<VenueHall>, RepositoryError>;

    /// Load a hall with its full Floor -> Section -> Row -> Seat tree
    async fn load_template(&self, id: HallId) -> Result<Option<VenueHall>, RepositoryError>;
}

// =============================================================================
// Hall Repository Port
// =============================================================================

/// Repository port for transactional writes to the hall aggregate
#[async_trait]
pub trait HallRepositoryPort: Send + Sync {
    /// Open a unit of work; nothing it saves is visible until `commit`
    async fn begin(&self) -> Result<Box<dyn HallUnitOfWork>, RepositoryError>;
}

/// A single transaction over the hall aggregate
///
/// Dropping a unit of work without committing discards everything it saved.
#[async_trait]
pub trait HallUnitOfWork: Send {
    /// Load the hall root (floors are left empty)
    async fn find_by_id(&mut self, id: HallId) -> Result<Option<VenueHall>, RepositoryError>;

    /// Persist the hall row and append every floor it carries, cascading
    /// sections, rows and seats
    async fn save(&mut self, hall: &VenueHall) -> Result<HallId, RepositoryError>;

    /// Make all saved changes visible
    async fn commit(self: Box<Self>) -> Result<(), RepositoryError>;

    /// Discard all saved changes
    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError>;
}
