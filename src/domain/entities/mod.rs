//! Domain entities - Core business objects with identity

mod seating;
mod venue;

pub use seating::{VenueHallFloor, VenueHallRow, VenueHallSeat, VenueHallSection};
pub use venue::{NewVenueHall, Venue, VenueHall};
