//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so infrastructure (HTTP) can
//! serialize/deserialize without pulling wire concerns into the domain model.

pub mod seat_template;
pub mod template_build;
pub mod venue;

pub use seat_template::*;
pub use template_build::*;
pub use venue::*;
