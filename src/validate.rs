//! Structural checks independent of the solver.

use crate::domain::SchedulingInput;
use crate::error::ValidationErrorKind;
use std::collections::HashMap;

/// Checks that every cross-list group's combined enrollment fits in the
/// largest available room. Returns one error per offending group, in group
/// iteration order.
pub fn validate_crosslist_capacity(input: &SchedulingInput) -> Vec<ValidationErrorKind> {
    let max_capacity = input.rooms.iter().map(|r| r.capacity).max().unwrap_or(0);
    let enrollment_by_section: HashMap<&str, u32> = input
        .sections
        .iter()
        .map(|s| (s.id.as_str(), s.expected_enrollment))
        .collect();

    let mut errors = Vec::new();
    for group in &input.crosslist_groups {
        let required: u32 = group
            .member_section_ids
            .iter()
            .filter_map(|sid| enrollment_by_section.get(sid.as_str()))
            .sum();
        if required > max_capacity {
            errors.push(ValidationErrorKind::CrosslistCapacity {
                group_id: group.id.clone(),
                required,
                max_capacity,
            });
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CrossListGroup, Room, Section};

    fn section(id: &str, enrollment: u32) -> Section {
        Section {
            id: id.to_string(),
            course_id: "C".to_string(),
            section_code: "A".to_string(),
            instructor_id: "I1".to_string(),
            expected_enrollment: enrollment,
            enrollment_cap: enrollment,
            allowed_meeting_patterns: vec![],
            room_requirements: vec![],
            crosslist_group_id: None,
            tags: vec![],
        }
    }

    fn room(id: &str, capacity: u32) -> Room {
        Room {
            id: id.to_string(),
            building: "B".to_string(),
            capacity,
            features: vec![],
        }
    }

    fn base_input() -> SchedulingInput {
        SchedulingInput {
            sections: vec![],
            instructors: vec![],
            rooms: vec![],
            timeslots: vec![],
            meeting_patterns: vec![],
            crosslist_groups: vec![],
            no_overlap_groups: vec![],
            blocked_times: vec![],
            locked_assignments: vec![],
            soft_locks: vec![],
        }
    }

    #[test]
    fn flags_group_that_exceeds_max_room() {
        let mut input = base_input();
        input.sections = vec![section("S1", 20), section("S2", 15)];
        input.rooms = vec![room("R1", 30)];
        input.crosslist_groups = vec![CrossListGroup {
            id: "G1".to_string(),
            member_section_ids: vec!["S1".to_string(), "S2".to_string()],
            require_same_room: true,
        }];
        let errors = validate_crosslist_capacity(&input);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), "crosslist_capacity");
    }

    #[test]
    fn passes_when_capacity_sufficient() {
        let mut input = base_input();
        input.sections = vec![section("S1", 20), section("S2", 15)];
        input.rooms = vec![room("R1", 40)];
        input.crosslist_groups = vec![CrossListGroup {
            id: "G1".to_string(),
            member_section_ids: vec!["S1".to_string(), "S2".to_string()],
            require_same_room: true,
        }];
        assert!(validate_crosslist_capacity(&input).is_empty());
    }
}
