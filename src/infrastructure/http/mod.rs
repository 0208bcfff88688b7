//! HTTP REST API routes

mod seat_template_routes;
mod venue_routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Venue routes
        .route("/api/venues", post(venue_routes::register_venue))
        .route("/api/venues/{id}/halls", get(venue_routes::list_halls))
        // Seat template routes
        .route(
            "/api/halls/{id}/seat-template",
            post(seat_template_routes::allocate_seat_template),
        )
        .route(
            "/api/halls/{id}/seat-template",
            get(seat_template_routes::get_seat_template),
        )
        // Template build tracking
        .route(
            "/api/template-builds",
            get(seat_template_routes::list_builds),
        )
        .route(
            "/api/template-builds/{id}",
            get(seat_template_routes::get_build),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::infrastructure::config::{AppConfig, PersistenceConfig, TemplateBuildConfig};
    use crate::infrastructure::persistence::{InMemoryVenueRepository, RepositoryBackend};

    fn test_state() -> Arc<AppState> {
        let config = AppConfig {
            server_port: 0,
            persistence: PersistenceConfig {
                backend: "memory".to_string(),
                sqlite_path: String::new(),
                sqlite_max_connections: 1,
            },
            template_builds: TemplateBuildConfig {
                workers: 1,
                queue_capacity: 8,
                history_retention_hours: 1,
            },
        };
        let repository = Arc::new(RepositoryBackend::Memory(InMemoryVenueRepository::new()));
        let state = Arc::new(AppState::with_repository(config, repository));
        let queue = state.template_build_queue.clone();
        tokio::spawn(async move { queue.run_worker().await });
        state
    }

    async fn send(state: &Arc<AppState>, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let app = create_routes().with_state(state.clone());
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(b) => Body::from(b.to_string()),
                None => Body::empty(),
            })
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_register_build_and_read_template() {
        let state = test_state();

        let (status, venue) = send(
            &state,
            "POST",
            "/api/venues",
            Some(json!({"name": "Charlotte Theater", "halls": [{"name": "Main", "totalSeats": 10}]})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let hall_id = venue["halls"][0]["id"].as_i64().unwrap();

        let (status, accepted) = send(
            &state,
            "POST",
            &format!("/api/halls/{}/seat-template", hall_id),
            Some(json!({"floors": [{
                "floor": "1F",
                "sections": [{"section": "A", "rows": [{"row": "1", "seats": [
                    {"seatInfo": "standard", "startSeatNumber": 1, "endSeatNumber": 10}
                ]}]}]
            }]})),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        let build_id = accepted["buildId"].as_str().unwrap().to_string();

        let mut build = Value::Null;
        for _ in 0..50 {
            let (_, record) = send(&state, "GET", &format!("/api/template-builds/{}", build_id), None).await;
            if record["status"] == "completed" {
                build = record;
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        assert_eq!(build["summary"]["seats"], 10);

        let (status, template) = send(
            &state,
            "GET",
            &format!("/api/halls/{}/seat-template", hall_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(template["templateStatus"], "Ready");
        let seats = template["floors"][0]["sections"][0]["rows"][0]["seats"]
            .as_array()
            .unwrap();
        assert_eq!(seats.len(), 10);
        assert_eq!(seats[9]["seatNumber"], 10);
    }

    #[tokio::test]
    async fn test_missing_resources_return_not_found() {
        let state = test_state();

        let (status, _) = send(&state, "GET", "/api/halls/999/seat-template", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&state, "GET", "/api/venues/5/halls", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&state, "GET", "/api/template-builds/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
