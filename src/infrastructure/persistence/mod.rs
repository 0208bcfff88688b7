//! Persistence adapters
//!
//! Implements the venue and hall repository ports for SQLite and for an
//! in-memory store, plus the backend enum that selects between them.

mod factory;
mod memory_repository;
mod sqlite_repository;

pub use factory::{RepositoryBackend, RepositoryFactory};
pub use memory_repository::InMemoryVenueRepository;
pub use sqlite_repository::SqliteVenueRepository;
