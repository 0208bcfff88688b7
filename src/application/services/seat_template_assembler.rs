//! Seat template assemblers - Build the Floor -> Section -> Row -> Seat tree
//!
//! Each level constructs its children from the request DTOs in order, builds
//! their subtrees, then appends them to the parent. Nothing is persisted here;
//! the whole tree is written once by the hall unit of work.

use crate::application::dto::{FloorRequest, RowRequest, SeatRangeRequest, SectionRequest};
use crate::domain::entities::{VenueHallFloor, VenueHallRow, VenueHallSection};
use crate::domain::services::{expand_seat_range, TemplateError};
use crate::domain::value_objects::HallId;

fn require_label<'a>(label: &'a str, kind: &str, index: usize) -> Result<&'a str, TemplateError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(TemplateError::Validation(format!(
            "{} label at position {} cannot be empty",
            kind, index
        )));
    }
    Ok(trimmed)
}

/// Build every floor of a hall from its requests
pub fn assemble_floors(
    hall_id: HallId,
    requests: &[FloorRequest],
) -> Result<Vec<VenueHallFloor>, TemplateError> {
    let mut floors = Vec::with_capacity(requests.len());
    for (index, request) in requests.iter().enumerate() {
        let label = require_label(&request.floor, "Floor", index)?;
        let mut floor = VenueHallFloor::new(hall_id, label);
        assemble_sections(&mut floor, &request.sections)?;
        floors.push(floor);
    }
    Ok(floors)
}

/// Attach sections (and their rows) to a floor
pub fn assemble_sections(
    floor: &mut VenueHallFloor,
    requests: &[SectionRequest],
) -> Result<(), TemplateError> {
    for (index, request) in requests.iter().enumerate() {
        let label = require_label(&request.section, "Section", index)?;
        let mut section = VenueHallSection::new(floor.id, label);
        assemble_rows(&mut section, &request.rows)?;
        floor.add_section(section);
    }
    Ok(())
}

/// Attach rows (and their seats) to a section
pub fn assemble_rows(
    section: &mut VenueHallSection,
    requests: &[RowRequest],
) -> Result<(), TemplateError> {
    for (index, request) in requests.iter().enumerate() {
        let label = require_label(&request.row, "Row", index)?;
        let mut row = VenueHallRow::new(section.id, label);
        assemble_seats(&mut row, &request.seats)?;
        section.add_row(row);
    }
    Ok(())
}

/// Expand each seat range onto the row, in request order
pub fn assemble_seats(
    row: &mut VenueHallRow,
    requests: &[SeatRangeRequest],
) -> Result<(), TemplateError> {
    for request in requests {
        let seats = expand_seat_range(
            row.id,
            request.seat_info.trim(),
            request.start_seat_number,
            request.end_seat_number,
        )
        .map_err(|TemplateError::Validation(msg)| {
            TemplateError::Validation(format!("Row {}: {}", row.row, msg))
        })?;
        row.add_seats(seats);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(info: &str, start: i32, end: i32) -> SeatRangeRequest {
        SeatRangeRequest {
            seat_info: info.to_string(),
            start_seat_number: start,
            end_seat_number: end,
        }
    }

    fn row(label: &str, seats: Vec<SeatRangeRequest>) -> RowRequest {
        RowRequest {
            row: label.to_string(),
            seats,
        }
    }

    fn section(label: &str, rows: Vec<RowRequest>) -> SectionRequest {
        SectionRequest {
            section: label.to_string(),
            rows,
        }
    }

    fn floor(label: &str, sections: Vec<SectionRequest>) -> FloorRequest {
        FloorRequest {
            floor: label.to_string(),
            sections,
        }
    }

    #[test]
    fn test_assemble_preserves_request_order_and_parent_ids() {
        let hall_id = HallId::new(1);
        let requests = vec![
            floor(
                "1F",
                vec![
                    section("A", vec![row("1", vec![range("standard", 1, 4)])]),
                    section("B", vec![row("1", vec![]), row("2", vec![])]),
                ],
            ),
            floor("2F", vec![section("C", vec![])]),
        ];

        let floors = assemble_floors(hall_id, &requests).unwrap();

        let labels: Vec<_> = floors.iter().map(|f| f.floor.as_str()).collect();
        assert_eq!(labels, vec!["1F", "2F"]);
        assert!(floors.iter().all(|f| f.hall_id == hall_id));

        let first = &floors[0];
        let sections: Vec<_> = first.sections.iter().map(|s| s.section.as_str()).collect();
        assert_eq!(sections, vec!["A", "B"]);
        assert!(first.sections.iter().all(|s| s.floor_id == first.id));

        let section_b = &first.sections[1];
        let rows: Vec<_> = section_b.rows.iter().map(|r| r.row.as_str()).collect();
        assert_eq!(rows, vec!["1", "2"]);
        assert!(section_b.rows.iter().all(|r| r.section_id == section_b.id));

        let row_a1 = &first.sections[0].rows[0];
        assert!(row_a1.seats.iter().all(|s| s.row_id == row_a1.id));
    }

    #[test]
    fn test_multiple_ranges_append_in_order() {
        let mut target = VenueHallRow::new(crate::domain::value_objects::SectionId::new(), "3");
        assemble_seats(
            &mut target,
            &[range("vip", 1, 3), range("standard", 10, 12)],
        )
        .unwrap();

        let numbers: Vec<_> = target.seats.iter().map(|s| s.seat_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 10, 11, 12]);
        assert_eq!(target.seats[0].seat_info, "vip");
        assert_eq!(target.seats[3].seat_info, "standard");
        assert_eq!(target.seats[3].start_seat_number, 10);
    }

    #[test]
    fn test_invalid_range_deep_in_tree_fails_whole_assembly() {
        let requests = vec![
            floor("1F", vec![section("A", vec![row("1", vec![range("standard", 1, 10)])])]),
            floor("2F", vec![section("B", vec![row("7", vec![range("standard", 5, 2)])])]),
        ];

        let err = assemble_floors(HallId::new(1), &requests).unwrap_err();
        let TemplateError::Validation(msg) = err;
        assert!(msg.contains("Row 7"));
    }

    #[test]
    fn test_blank_labels_are_rejected() {
        assert!(assemble_floors(HallId::new(1), &[floor(" ", vec![])]).is_err());
        assert!(assemble_floors(HallId::new(1), &[floor("1F", vec![section("", vec![])])]).is_err());
        assert!(assemble_floors(
            HallId::new(1),
            &[floor("1F", vec![section("A", vec![row("", vec![])])])]
        )
        .is_err());
    }

    #[test]
    fn test_labels_are_trimmed() {
        let floors = assemble_floors(HallId::new(1), &[floor(" 1F ", vec![])]).unwrap();
        assert_eq!(floors[0].floor, "1F");
    }
}
