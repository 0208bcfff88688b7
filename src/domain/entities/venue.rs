//! Venue entities - Physical venues and the halls they contain

use serde::{Deserialize, Serialize};

use crate::domain::entities::VenueHallFloor;
use crate::domain::value_objects::{HallId, TemplateStatus, VenueId};

/// A physical venue that owns one or more halls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
}

impl Venue {
    pub fn new(id: VenueId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A hall within a venue - the root of the seating hierarchy
///
/// `total_seats` is the declared capacity and is never derived from the
/// template. `floors` is empty when the hall is loaded as a root only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueHall {
    pub id: HallId,
    pub venue_id: VenueId,
    pub name: String,
    pub total_seats: i32,
    pub template_status: TemplateStatus,
    pub floors: Vec<VenueHallFloor>,
}

impl VenueHall {
    pub fn new(id: HallId, venue_id: VenueId, name: impl Into<String>, total_seats: i32) -> Self {
        Self {
            id,
            venue_id,
            name: name.into(),
            total_seats,
            template_status: TemplateStatus::Empty,
            floors: Vec::new(),
        }
    }

    pub fn with_template_status(mut self, status: TemplateStatus) -> Self {
        self.template_status = status;
        self
    }

    pub fn add_floor(&mut self, floor: VenueHallFloor) {
        self.floors.push(floor);
    }

    pub fn section_count(&self) -> usize {
        self.floors.iter().map(|f| f.sections.len()).sum()
    }

    pub fn row_count(&self) -> usize {
        self.floors
            .iter()
            .flat_map(|f| &f.sections)
            .map(|s| s.rows.len())
            .sum()
    }

    pub fn seat_count(&self) -> usize {
        self.floors.iter().map(VenueHallFloor::seat_count).sum()
    }
}

/// Data needed to register a new hall under a venue
#[derive(Debug, Clone)]
pub struct NewVenueHall {
    pub name: String,
    pub total_seats: i32,
}
