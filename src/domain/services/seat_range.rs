//! Seat range expansion
//!
//! A seat range request `(start, end, info)` becomes one seat per integer in
//! the inclusive range, each remembering the range it came from.

use crate::domain::entities::VenueHallSeat;
use crate::domain::value_objects::RowId;

/// Upper bound on seats a single range may expand to
pub const MAX_SEATS_PER_RANGE: usize = 10_000;

/// Errors raised while building a seating template from a request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Number of seats an inclusive range expands to, or `None` when `start > end`
pub fn seat_range_len(start_seat_number: i32, end_seat_number: i32) -> Option<usize> {
    if start_seat_number > end_seat_number {
        return None;
    }
    Some((i64::from(end_seat_number) - i64::from(start_seat_number) + 1) as usize)
}

/// Expand `start..=end` into individual seats belonging to `row_id`
///
/// Returns `end - start + 1` seats numbered contiguously from `start`.
/// An inverted range is rejected instead of silently producing no seats.
pub fn expand_seat_range(
    row_id: RowId,
    seat_info: &str,
    start_seat_number: i32,
    end_seat_number: i32,
) -> Result<Vec<VenueHallSeat>, TemplateError> {
    if seat_info.trim().is_empty() {
        return Err(TemplateError::Validation(
            "Seat info cannot be empty".to_string(),
        ));
    }

    let len = seat_range_len(start_seat_number, end_seat_number).ok_or_else(|| {
        TemplateError::Validation(format!(
            "Seat range start {} is greater than end {}",
            start_seat_number, end_seat_number
        ))
    })?;
    if len > MAX_SEATS_PER_RANGE {
        return Err(TemplateError::Validation(format!(
            "Seat range {}..={} exceeds {} seats",
            start_seat_number, end_seat_number, MAX_SEATS_PER_RANGE
        )));
    }

    let mut seats = Vec::with_capacity(len);
    for seat_number in start_seat_number..=end_seat_number {
        seats.push(VenueHallSeat::new(
            row_id,
            seat_info,
            start_seat_number,
            end_seat_number,
            seat_number,
        ));
    }
    Ok(seats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_produces_contiguous_seats() {
        let row_id = RowId::new();
        let seats = expand_seat_range(row_id, "standard", 1, 10).unwrap();

        assert_eq!(seats.len(), 10);
        for (i, seat) in seats.iter().enumerate() {
            assert_eq!(seat.seat_number, 1 + i as i32);
            assert_eq!(seat.start_seat_number, 1);
            assert_eq!(seat.end_seat_number, 10);
            assert_eq!(seat.seat_info, "standard");
            assert_eq!(seat.row_id, row_id);
        }
    }

    #[test]
    fn test_expand_counts_match_range_length() {
        for (start, end) in [(0, 0), (3, 7), (-2, 2), (100, 149)] {
            let seats = expand_seat_range(RowId::new(), "vip", start, end).unwrap();
            assert_eq!(seats.len(), (end - start + 1) as usize);
            assert!(seats
                .iter()
                .all(|s| s.seat_number >= start && s.seat_number <= end));
        }
    }

    #[test]
    fn test_single_seat_range() {
        let seats = expand_seat_range(RowId::new(), "box", 7, 7).unwrap();
        assert_eq!(seats.len(), 1);
        assert_eq!(seats[0].seat_number, 7);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = expand_seat_range(RowId::new(), "standard", 5, 2).unwrap_err();
        assert!(matches!(err, TemplateError::Validation(msg) if msg.contains("5")));
    }

    #[test]
    fn test_blank_seat_info_is_rejected() {
        assert!(expand_seat_range(RowId::new(), "  ", 1, 3).is_err());
    }

    #[test]
    fn test_oversized_range_is_rejected() {
        let err = expand_seat_range(RowId::new(), "standard", 1, i32::MAX).unwrap_err();
        assert!(matches!(err, TemplateError::Validation(_)));
    }

    #[test]
    fn test_range_len_at_integer_bounds() {
        assert_eq!(seat_range_len(i32::MIN, i32::MIN), Some(1));
        assert_eq!(seat_range_len(2, 1), None);
        assert_eq!(seat_range_len(1, 4), Some(4));
    }
}
