//! Seat template routes - Submit builds, track them, read templates

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::dto::{
    BuildRequest, FloorRequest, HallTemplateResponseDto, TemplateBuildAcceptedDto,
    TemplateBuildRecord,
};
use crate::application::services::{QueueError, SeatTemplateError};
use crate::domain::value_objects::{HallId, TemplateBuildId};
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AllocateSeatTemplateRequest {
    pub floors: Vec<FloorRequest>,
}

/// Queue a seat template build for a hall
///
/// Returns 202 with the build id; progress is read from the build routes.
pub async fn allocate_seat_template(
    State(state): State<Arc<AppState>>,
    Path(hall_id): Path<i64>,
    Json(req): Json<AllocateSeatTemplateRequest>,
) -> Result<(StatusCode, Json<TemplateBuildAcceptedDto>), (StatusCode, String)> {
    let hall_id = HallId::new(hall_id);
    let ticket = state
        .template_build_queue
        .submit(BuildRequest {
            hall_id,
            floors: req.floors,
        })
        .await
        .map_err(|e| match e {
            QueueError::QueueFull => (StatusCode::SERVICE_UNAVAILABLE, e.to_string()),
            QueueError::Closed => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        })?;

    Ok((
        StatusCode::ACCEPTED,
        Json(TemplateBuildAcceptedDto {
            build_id: ticket.build_id,
            hall_id,
        }),
    ))
}

/// Get a hall with its full seat template
pub async fn get_seat_template(
    State(state): State<Arc<AppState>>,
    Path(hall_id): Path<i64>,
) -> Result<Json<HallTemplateResponseDto>, (StatusCode, String)> {
    let hall = state
        .venue_service
        .get_hall_template(HallId::new(hall_id))
        .await
        .map_err(|e| match e {
            SeatTemplateError::HallNotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        })?;

    Ok(Json(HallTemplateResponseDto::from(hall)))
}

/// List template builds
pub async fn list_builds(State(state): State<Arc<AppState>>) -> Json<Vec<TemplateBuildRecord>> {
    Json(state.template_build_queue.list().await)
}

/// Get a single template build
pub async fn get_build(
    State(state): State<Arc<AppState>>,
    Path(build_id): Path<String>,
) -> Result<Json<TemplateBuildRecord>, (StatusCode, String)> {
    let uuid = Uuid::parse_str(&build_id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid build ID".to_string()))?;

    state
        .template_build_queue
        .get(TemplateBuildId::from_uuid(uuid))
        .await
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Template build not found".to_string()))
}
