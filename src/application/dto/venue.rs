use serde::{Deserialize, Serialize};

use crate::domain::entities::{NewVenueHall, Venue, VenueHall};
use crate::domain::value_objects::{HallId, VenueId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterVenueRequestDto {
    pub name: String,
    #[serde(default)]
    pub halls: Vec<VenueHallRequestDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueHallRequestDto {
    pub name: String,
    pub total_seats: i32,
}

impl From<VenueHallRequestDto> for NewVenueHall {
    fn from(dto: VenueHallRequestDto) -> Self {
        Self {
            name: dto.name,
            total_seats: dto.total_seats,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueHallResponseDto {
    pub id: HallId,
    pub venue_id: VenueId,
    pub name: String,
    pub total_seats: i32,
    pub template_status: String,
}

impl From<VenueHall> for VenueHallResponseDto {
    fn from(h: VenueHall) -> Self {
        Self {
            id: h.id,
            venue_id: h.venue_id,
            name: h.name,
            total_seats: h.total_seats,
            template_status: h.template_status.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueResponseDto {
    pub id: VenueId,
    pub name: String,
    pub halls: Vec<VenueHallResponseDto>,
}

impl VenueResponseDto {
    pub fn new(venue: Venue, halls: Vec<VenueHall>) -> Self {
        Self {
            id: venue.id,
            name: venue.name,
            halls: halls.into_iter().map(VenueHallResponseDto::from).collect(),
        }
    }
}
