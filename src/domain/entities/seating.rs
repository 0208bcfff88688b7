//! Seating hierarchy - Floor -> Section -> Row -> Seat beneath a hall
//!
//! Every level holds its children by value. The parent id on each child is
//! for lookup only; ownership always flows top-down.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{FloorId, HallId, RowId, SeatId, SectionId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueHallFloor {
    pub id: FloorId,
    pub hall_id: HallId,
    /// Floor label, e.g. "1F"
    pub floor: String,
    pub sections: Vec<VenueHallSection>,
}

impl VenueHallFloor {
    pub fn new(hall_id: HallId, floor: impl Into<String>) -> Self {
        Self {
            id: FloorId::new(),
            hall_id,
            floor: floor.into(),
            sections: Vec::new(),
        }
    }

    pub fn add_section(&mut self, section: VenueHallSection) {
        self.sections.push(section);
    }

    pub fn seat_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.rows)
            .map(|r| r.seats.len())
            .sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueHallSection {
    pub id: SectionId,
    pub floor_id: FloorId,
    /// Section label, e.g. "A"
    pub section: String,
    pub rows: Vec<VenueHallRow>,
}

impl VenueHallSection {
    pub fn new(floor_id: FloorId, section: impl Into<String>) -> Self {
        Self {
            id: SectionId::new(),
            floor_id,
            section: section.into(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: VenueHallRow) {
        self.rows.push(row);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueHallRow {
    pub id: RowId,
    pub section_id: SectionId,
    /// Row label, e.g. "1" or "AA"
    pub row: String,
    pub seats: Vec<VenueHallSeat>,
}

impl VenueHallRow {
    pub fn new(section_id: SectionId, row: impl Into<String>) -> Self {
        Self {
            id: RowId::new(),
            section_id,
            row: row.into(),
            seats: Vec::new(),
        }
    }

    pub fn add_seats(&mut self, seats: impl IntoIterator<Item = VenueHallSeat>) {
        self.seats.extend(seats);
    }
}

/// A single seat, carrying the range it was expanded from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueHallSeat {
    pub id: SeatId,
    pub row_id: RowId,
    pub seat_info: String,
    pub start_seat_number: i32,
    pub end_seat_number: i32,
    pub seat_number: i32,
}

impl VenueHallSeat {
    pub fn new(
        row_id: RowId,
        seat_info: impl Into<String>,
        start_seat_number: i32,
        end_seat_number: i32,
        seat_number: i32,
    ) -> Self {
        Self {
            id: SeatId::new(),
            row_id,
            seat_info: seat_info.into(),
            start_seat_number,
            end_seat_number,
            seat_number,
        }
    }
}
