//! Venue and hall registration routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{
    RegisterVenueRequestDto, VenueHallResponseDto, VenueResponseDto,
};
use crate::application::services::VenueError;
use crate::domain::value_objects::VenueId;
use crate::infrastructure::state::AppState;

fn venue_error_status(e: VenueError) -> (StatusCode, String) {
    let status = match e {
        VenueError::VenueNotFound(_) => StatusCode::NOT_FOUND,
        VenueError::Validation(_) => StatusCode::BAD_REQUEST,
        VenueError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

/// Register a venue with its halls
pub async fn register_venue(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterVenueRequestDto>,
) -> Result<(StatusCode, Json<VenueResponseDto>), (StatusCode, String)> {
    let halls = req.halls.into_iter().map(Into::into).collect();
    let (venue, halls) = state
        .venue_service
        .register_venue(&req.name, halls)
        .await
        .map_err(venue_error_status)?;

    Ok((StatusCode::CREATED, Json(VenueResponseDto::new(venue, halls))))
}

/// List halls of a venue
pub async fn list_halls(
    State(state): State<Arc<AppState>>,
    Path(venue_id): Path<i64>,
) -> Result<Json<Vec<VenueHallResponseDto>>, (StatusCode, String)> {
    let halls = state
        .venue_service
        .list_halls(VenueId::new(venue_id))
        .await
        .map_err(venue_error_status)?;

    Ok(Json(halls.into_iter().map(VenueHallResponseDto::from).collect()))
}
