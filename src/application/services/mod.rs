//! Application services - Use case implementations
//!
//! Each service follows hexagonal architecture principles, accepting
//! repository ports and returning domain entities or DTOs.

pub mod seat_template_assembler;
pub mod seat_template_service;
pub mod template_build_queue_service;
pub mod venue_service;

pub use seat_template_service::{SeatTemplateError, SeatTemplateService};
pub use template_build_queue_service::{QueueError, TemplateBuildQueueService};
pub use venue_service::{VenueError, VenueService};
