//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Venue, VenueHall and the Floor/Section/Row/Seat hierarchy
//! - Value Objects: Identifiers, template status
//! - Domain Services: Pure business logic operations (seat range expansion)

pub mod entities;
pub mod services;
pub mod value_objects;
