//! Seat template DTOs - Nested build request and the tree returned to clients
//!
//! Field names are camelCase on the wire to match existing ticketing clients.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    VenueHall, VenueHallFloor, VenueHallRow, VenueHallSeat, VenueHallSection,
};
use crate::domain::value_objects::HallId;

/// A full template build for one hall
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequest {
    pub hall_id: HallId,
    pub floors: Vec<FloorRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorRequest {
    pub floor: String,
    #[serde(default, alias = "section")]
    pub sections: Vec<SectionRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRequest {
    pub section: String,
    #[serde(default)]
    pub rows: Vec<RowRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowRequest {
    pub row: String,
    #[serde(default)]
    pub seats: Vec<SeatRangeRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatRangeRequest {
    pub seat_info: String,
    pub start_seat_number: i32,
    pub end_seat_number: i32,
}

/// Counts of the entities written by a template build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatTemplateSummary {
    pub hall_id: HallId,
    pub floors: usize,
    pub sections: usize,
    pub rows: usize,
    pub seats: usize,
}

impl SeatTemplateSummary {
    pub fn from_floors(hall_id: HallId, floors: &[VenueHallFloor]) -> Self {
        let sections = floors.iter().map(|f| f.sections.len()).sum();
        let rows = floors
            .iter()
            .flat_map(|f| &f.sections)
            .map(|s| s.rows.len())
            .sum();
        let seats = floors.iter().map(VenueHallFloor::seat_count).sum();
        Self {
            hall_id,
            floors: floors.len(),
            sections,
            rows,
            seats,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HallTemplateResponseDto {
    pub hall_id: HallId,
    pub name: String,
    pub total_seats: i32,
    pub template_status: String,
    pub floors: Vec<FloorResponseDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorResponseDto {
    pub id: String,
    pub floor: String,
    pub sections: Vec<SectionResponseDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponseDto {
    pub id: String,
    pub section: String,
    pub rows: Vec<RowResponseDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowResponseDto {
    pub id: String,
    pub row: String,
    pub seats: Vec<SeatResponseDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatResponseDto {
    pub id: String,
    pub seat_info: String,
    pub start_seat_number: i32,
    pub end_seat_number: i32,
    pub seat_number: i32,
}

impl From<VenueHallSeat> for SeatResponseDto {
    fn from(s: VenueHallSeat) -> Self {
        Self {
            id: s.id.to_string(),
            seat_info: s.seat_info,
            start_seat_number: s.start_seat_number,
            end_seat_number: s.end_seat_number,
            seat_number: s.seat_number,
        }
    }
}

impl From<VenueHallRow> for RowResponseDto {
    fn from(r: VenueHallRow) -> Self {
        Self {
            id: r.id.to_string(),
            row: r.row,
            seats: r.seats.into_iter().map(SeatResponseDto::from).collect(),
        }
    }
}

impl From<VenueHallSection> for SectionResponseDto {
    fn from(s: VenueHallSection) -> Self {
        Self {
            id: s.id.to_string(),
            section: s.section,
            rows: s.rows.into_iter().map(RowResponseDto::from).collect(),
        }
    }
}

impl From<VenueHallFloor> for FloorResponseDto {
    fn from(f: VenueHallFloor) -> Self {
        Self {
            id: f.id.to_string(),
            floor: f.floor,
            sections: f.sections.into_iter().map(SectionResponseDto::from).collect(),
        }
    }
}

impl From<VenueHall> for HallTemplateResponseDto {
    fn from(h: VenueHall) -> Self {
        Self {
            hall_id: h.id,
            name: h.name,
            total_seats: h.total_seats,
            template_status: h.template_status.to_string(),
            floors: h.floors.into_iter().map(FloorResponseDto::from).collect(),
        }
    }
}
