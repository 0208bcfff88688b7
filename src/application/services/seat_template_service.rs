//! Seat Template Service - Allocates the seat template of a hall
//!
//! Loads the hall inside a unit of work, assembles the complete
//! Floor -> Section -> Row -> Seat tree from the request and commits the
//! aggregate in one write. Any failure rolls the unit of work back, so either
//! the whole tree is visible or none of it is.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::dto::{FloorRequest, SeatTemplateSummary};
use crate::application::ports::outbound::{HallRepositoryPort, HallUnitOfWork, RepositoryError};
use crate::application::services::seat_template_assembler::assemble_floors;
use crate::domain::services::TemplateError;
use crate::domain::value_objects::{HallId, TemplateStatus};

/// Errors that can occur while allocating a seat template
#[derive(Debug, thiserror::Error)]
pub enum SeatTemplateError {
    #[error("Hall not found: {0}")]
    HallNotFound(HallId),

    #[error("Invalid seat template: {0}")]
    Validation(String),

    #[error("Hall {0} already has a seat template")]
    TemplateAlreadyAllocated(HallId),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<TemplateError> for SeatTemplateError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::Validation(msg) => SeatTemplateError::Validation(msg),
        }
    }
}

impl From<RepositoryError> for SeatTemplateError {
    fn from(err: RepositoryError) -> Self {
        SeatTemplateError::Persistence(err.to_string())
    }
}

/// Service that builds and commits hall seat templates
pub struct SeatTemplateService<R: HallRepositoryPort> {
    repository: Arc<R>,
}

impl<R: HallRepositoryPort> SeatTemplateService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Build the seat template for `hall_id` and commit it atomically
    ///
    /// A hall that already has a template is rejected rather than receiving a
    /// second copy of the tree.
    #[instrument(skip(self, floors), fields(hall_id = %hall_id, floor_count = floors.len()))]
    pub async fn allocate_seat_template(
        &self,
        hall_id: HallId,
        floors: &[FloorRequest],
    ) -> Result<SeatTemplateSummary, SeatTemplateError> {
        let mut unit_of_work = self.repository.begin().await?;

        let result = Self::build_in(&mut unit_of_work, hall_id, floors).await;
        match result {
            Ok(summary) => {
                unit_of_work.commit().await?;
                info!(
                    floors = summary.floors,
                    sections = summary.sections,
                    rows = summary.rows,
                    seats = summary.seats,
                    "Allocated seat template for hall {}",
                    hall_id
                );
                Ok(summary)
            }
            Err(e) => {
                if let Err(rollback_err) = unit_of_work.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed for hall {}", hall_id);
                }
                Err(e)
            }
        }
    }

    async fn build_in(
        unit_of_work: &mut Box<dyn HallUnitOfWork>,
        hall_id: HallId,
        floors: &[FloorRequest],
    ) -> Result<SeatTemplateSummary, SeatTemplateError> {
        let mut hall = unit_of_work
            .find_by_id(hall_id)
            .await?
            .ok_or(SeatTemplateError::HallNotFound(hall_id))?;

        if hall.template_status == TemplateStatus::Ready {
            return Err(SeatTemplateError::TemplateAlreadyAllocated(hall_id));
        }

        let built = assemble_floors(hall.id, floors)?;
        let summary = SeatTemplateSummary::from_floors(hall.id, &built);
        debug!(seats = summary.seats, "Assembled seat tree for hall {}", hall.name);

        // A template is only marked Ready once it holds at least one seat
        if summary.seats == 0 {
            return Err(SeatTemplateError::Validation(format!(
                "Seat template for hall {} contains no seats",
                hall_id
            )));
        }

        if summary.seats != usize::try_from(hall.total_seats).unwrap_or(0) {
            warn!(
                declared = hall.total_seats,
                built = summary.seats,
                "Seat template size differs from declared capacity of hall {}",
                hall_id
            );
        }

        for floor in built {
            hall.add_floor(floor);
        }
        hall.template_status = TemplateStatus::Ready;

        unit_of_work.save(&hall).await?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::{RowRequest, SeatRangeRequest, SectionRequest};
    use crate::application::ports::outbound::VenueRepositoryPort;
    use crate::domain::entities::NewVenueHall;
    use crate::infrastructure::persistence::InMemoryVenueRepository;

    fn single_row_request(start: i32, end: i32) -> Vec<FloorRequest> {
        vec![FloorRequest {
            floor: "1F".to_string(),
            sections: vec![SectionRequest {
                section: "A".to_string(),
                rows: vec![RowRequest {
                    row: "1".to_string(),
                    seats: vec![SeatRangeRequest {
                        seat_info: "standard".to_string(),
                        start_seat_number: start,
                        end_seat_number: end,
                    }],
                }],
            }],
        }]
    }

    async fn repository_with_hall() -> (Arc<InMemoryVenueRepository>, HallId) {
        let repository = Arc::new(InMemoryVenueRepository::new());
        let (_, halls) = repository
            .register_venue(
                "Arts Center",
                &[NewVenueHall {
                    name: "Main Hall".to_string(),
                    total_seats: 10,
                }],
            )
            .await
            .unwrap();
        (repository, halls[0].id)
    }

    #[tokio::test]
    async fn test_allocate_builds_complete_tree() {
        let (repository, hall_id) = repository_with_hall().await;
        let service = SeatTemplateService::new(repository.clone());

        let summary = service
            .allocate_seat_template(hall_id, &single_row_request(1, 10))
            .await
            .unwrap();
        assert_eq!(
            (summary.floors, summary.sections, summary.rows, summary.seats),
            (1, 1, 1, 10)
        );

        let hall = repository.load_template(hall_id).await.unwrap().unwrap();
        assert_eq!(hall.template_status, TemplateStatus::Ready);
        assert_eq!(hall.floors.len(), 1);
        assert_eq!(hall.floors[0].floor, "1F");
        assert_eq!(hall.floors[0].sections[0].section, "A");
        let seats = &hall.floors[0].sections[0].rows[0].seats;
        let numbers: Vec<_> = seats.iter().map(|s| s.seat_number).collect();
        assert_eq!(numbers, (1..=10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_unknown_hall_is_not_found() {
        let (repository, _) = repository_with_hall().await;
        let service = SeatTemplateService::new(repository.clone());

        let err = service
            .allocate_seat_template(HallId::new(999), &single_row_request(1, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, SeatTemplateError::HallNotFound(id) if id == HallId::new(999)));
        assert_eq!(repository.seat_count().await, 0);
    }

    #[tokio::test]
    async fn test_invalid_range_rolls_back_everything() {
        let (repository, hall_id) = repository_with_hall().await;
        let service = SeatTemplateService::new(repository.clone());

        let mut floors = single_row_request(1, 10);
        floors[0].sections[0].rows.push(RowRequest {
            row: "2".to_string(),
            seats: vec![SeatRangeRequest {
                seat_info: "standard".to_string(),
                start_seat_number: 5,
                end_seat_number: 2,
            }],
        });

        let err = service
            .allocate_seat_template(hall_id, &floors)
            .await
            .unwrap_err();
        assert!(matches!(err, SeatTemplateError::Validation(_)));

        let hall = repository.load_template(hall_id).await.unwrap().unwrap();
        assert!(hall.floors.is_empty());
        assert_eq!(hall.template_status, TemplateStatus::Empty);
        assert_eq!(repository.seat_count().await, 0);
    }

    #[tokio::test]
    async fn test_second_build_is_rejected_without_duplicating() {
        let (repository, hall_id) = repository_with_hall().await;
        let service = SeatTemplateService::new(repository.clone());
        let floors = single_row_request(1, 10);

        service.allocate_seat_template(hall_id, &floors).await.unwrap();
        let err = service
            .allocate_seat_template(hall_id, &floors)
            .await
            .unwrap_err();
        assert!(matches!(err, SeatTemplateError::TemplateAlreadyAllocated(_)));

        let hall = repository.load_template(hall_id).await.unwrap().unwrap();
        assert_eq!(hall.floors.len(), 1);
        assert_eq!(hall.seat_count(), 10);
    }

    #[tokio::test]
    async fn test_commit_failure_leaves_hall_untouched() {
        let (repository, hall_id) = repository_with_hall().await;
        repository.fail_next_commit();
        let service = SeatTemplateService::new(repository.clone());

        let err = service
            .allocate_seat_template(hall_id, &single_row_request(1, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, SeatTemplateError::Persistence(_)));

        let hall = repository.load_template(hall_id).await.unwrap().unwrap();
        assert_eq!(hall.template_status, TemplateStatus::Empty);
        assert_eq!(repository.seat_count().await, 0);

        // The failure was one-shot; a retry goes through
        service
            .allocate_seat_template(hall_id, &single_row_request(1, 10))
            .await
            .unwrap();
        assert_eq!(repository.seat_count().await, 10);
    }

    #[tokio::test]
    async fn test_counts_match_request_across_levels() {
        let (repository, hall_id) = repository_with_hall().await;
        let service = SeatTemplateService::new(repository.clone());

        let range = |start, end| SeatRangeRequest {
            seat_info: "standard".to_string(),
            start_seat_number: start,
            end_seat_number: end,
        };
        let floors = vec![
            FloorRequest {
                floor: "1F".to_string(),
                sections: vec![
                    SectionRequest {
                        section: "A".to_string(),
                        rows: vec![
                            RowRequest {
                                row: "1".to_string(),
                                seats: vec![range(1, 5), range(6, 8)],
                            },
                            RowRequest {
                                row: "2".to_string(),
                                seats: vec![range(1, 4)],
                            },
                        ],
                    },
                    SectionRequest {
                        section: "B".to_string(),
                        rows: vec![],
                    },
                ],
            },
            FloorRequest {
                floor: "2F".to_string(),
                sections: vec![],
            },
        ];

        let summary = service.allocate_seat_template(hall_id, &floors).await.unwrap();
        assert_eq!(
            (summary.floors, summary.sections, summary.rows, summary.seats),
            (2, 2, 2, 12)
        );

        let hall = repository.load_template(hall_id).await.unwrap().unwrap();
        assert_eq!(hall.floors.len(), 2);
        assert_eq!(hall.section_count(), 2);
        assert_eq!(hall.row_count(), 2);
        assert_eq!(hall.seat_count(), 12);
        assert_eq!(hall.floors[1].floor, "2F");
    }

    #[tokio::test]
    async fn test_empty_template_is_rejected_and_hall_stays_buildable() {
        let (repository, hall_id) = repository_with_hall().await;
        let service = SeatTemplateService::new(repository.clone());

        let err = service.allocate_seat_template(hall_id, &[]).await.unwrap_err();
        assert!(matches!(err, SeatTemplateError::Validation(_)));

        let hollow = vec![FloorRequest {
            floor: "1F".to_string(),
            sections: vec![SectionRequest {
                section: "A".to_string(),
                rows: vec![RowRequest {
                    row: "1".to_string(),
                    seats: vec![],
                }],
            }],
        }];
        let err = service
            .allocate_seat_template(hall_id, &hollow)
            .await
            .unwrap_err();
        assert!(matches!(err, SeatTemplateError::Validation(_)));

        let hall = repository.load_template(hall_id).await.unwrap().unwrap();
        assert_eq!(hall.template_status, TemplateStatus::Empty);
        assert!(hall.floors.is_empty());

        let summary = service
            .allocate_seat_template(hall_id, &single_row_request(1, 10))
            .await
            .unwrap();
        assert_eq!(summary.seats, 10);
        assert_eq!(repository.seat_count().await, 10);
    }
}
