//! In-memory venue repository
//!
//! Keeps venues and fully built halls in a mutex-guarded store. A unit of
//! work holds the store lock for its whole lifetime, so template builds are
//! serialized, and stages its saves until commit.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::application::ports::outbound::{
    HallRepositoryPort, HallUnitOfWork, RepositoryError, VenueRepositoryPort,
};
use crate::domain::entities::{NewVenueHall, Venue, VenueHall};
use crate::domain::value_objects::{HallId, VenueId};

#[derive(Default)]
struct VenueStore {
    next_venue_id: i64,
    next_hall_id: i64,
    venues: BTreeMap<VenueId, Venue>,
    halls: BTreeMap<HallId, VenueHall>,
}

fn root_of(hall: &VenueHall) -> VenueHall {
    VenueHall {
        floors: Vec::new(),
        ..hall.clone()
    }
}

#[derive(Clone, Default)]
pub struct InMemoryVenueRepository {
    store: Arc<Mutex<VenueStore>>,
    fail_next_commit: Arc<AtomicBool>,
}

impl InMemoryVenueRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next unit of work fail on commit
    #[cfg(test)]
    pub fn fail_next_commit(&self) {
        self.fail_next_commit.store(true, Ordering::SeqCst);
    }

    /// Total seats stored across every hall
    #[cfg(test)]
    pub async fn seat_count(&self) -> usize {
        self.store
            .lock()
            .await
            .halls
            .values()
            .map(VenueHall::seat_count)
            .sum()
    }
}

#[async_trait]
impl VenueRepositoryPort for InMemoryVenueRepository {
    async fn register_venue(
        &self,
        name: &str,
        halls: &[NewVenueHall],
    ) -> Result<(Venue, Vec<VenueHall>), RepositoryError> {
        let mut store = self.store.lock().await;
        store.next_venue_id += 1;
        let venue = Venue::new(VenueId::new(store.next_venue_id), name);

        let mut registered = Vec::with_capacity(halls.len());
        for new_hall in halls {
            store.next_hall_id += 1;
            registered.push(VenueHall::new(
                HallId::new(store.next_hall_id),
                venue.id,
                new_hall.name.clone(),
                new_hall.total_seats,
            ));
        }

        store.venues.insert(venue.id, venue.clone());
        for hall in &registered {
            store.halls.insert(hall.id, hall.clone());
        }
        Ok((venue, registered))
    }

    async fn get_venue(&self, id: VenueId) -> Result<Option<Venue>, RepositoryError> {
        Ok(self.store.lock().await.venues.get(&id).cloned())
    }

    async fn list_halls(&self, venue_id: VenueId) -> Result<Vec<VenueHall>, RepositoryError> {
        Ok(self
            .store
            .lock()
            .await
            .halls
            .values()
            .filter(|h| h.venue_id == venue_id)
            .map(root_of)
            .collect())
    }

    async fn load_template(&self, id: HallId) -> Result<Option<VenueHall>, RepositoryError> {
        Ok(self.store.lock().await.halls.get(&id).cloned())
    }
}

#[async_trait]
impl HallRepositoryPort for InMemoryVenueRepository {
    async fn begin(&self) -> Result<Box<dyn HallUnitOfWork>, RepositoryError> {
        let store = self.store.clone().lock_owned().await;
        Ok(Box::new(InMemoryHallUnitOfWork {
            store,
            staged: Vec::new(),
            fail_commit: self.fail_next_commit.swap(false, Ordering::SeqCst),
        }))
    }
}

pub struct InMemoryHallUnitOfWork {
    store: OwnedMutexGuard<VenueStore>,
    staged: Vec<VenueHall>,
    fail_commit: bool,
}

#[async_trait]
impl HallUnitOfWork for InMemoryHallUnitOfWork {
    async fn find_by_id(&mut self, id: HallId) -> Result<Option<VenueHall>, RepositoryError> {
        if let Some(staged) = self.staged.iter().rev().find(|h| h.id == id) {
            return Ok(Some(root_of(staged)));
        }
        Ok(self.store.halls.get(&id).map(root_of))
    }

    async fn save(&mut self, hall: &VenueHall) -> Result<HallId, RepositoryError> {
        if !self.store.halls.contains_key(&hall.id) {
            return Err(RepositoryError::NotFound(format!("Hall {}", hall.id)));
        }
        self.staged.push(hall.clone());
        Ok(hall.id)
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        let mut this = self;
        if this.fail_commit {
            return Err(RepositoryError::Database(
                "Injected commit failure".to_string(),
            ));
        }

        let staged = std::mem::take(&mut this.staged);
        for hall in staged {
            if let Some(stored) = this.store.halls.get_mut(&hall.id) {
                stored.name = hall.name;
                stored.total_seats = hall.total_seats;
                stored.template_status = hall.template_status;
                stored.floors.extend(hall.floors);
            }
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError> {
        tracing::debug!(staged = self.staged.len(), "Discarding staged hall changes");
        Ok(())
    }
}
