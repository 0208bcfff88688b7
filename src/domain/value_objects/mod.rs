//! Value objects - Immutable objects defined by their attributes

mod ids;
mod template_status;

pub use ids::*;
pub use template_status::TemplateStatus;
