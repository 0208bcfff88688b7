//! Domain services - Pure operations over domain entities

mod seat_range;

pub use seat_range::{expand_seat_range, TemplateError};
