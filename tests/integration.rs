//! End-to-end scenarios exercising the public `solve` entry point against
//! full scheduling inputs.

use course_scheduler::domain::{
    BlockedTime, CrossListGroup, Instructor, InstructorPreferences, LockedAssignment,
    MeetingPattern, RankType, Room, ScheduleResponse, SchedulingInput, Section, SoftLock,
    Timeslot,
};
use course_scheduler::solve::solve;

fn instructor(id: &str, rank: RankType) -> Instructor {
    Instructor {
        id: id.to_string(),
        rank_type: rank,
        unavailable_times: vec![],
        preferences: InstructorPreferences::default(),
    }
}

fn room(id: &str, capacity: u32) -> Room {
    Room {
        id: id.to_string(),
        building: "Main".to_string(),
        capacity,
        features: vec![],
    }
}

fn timeslot(id: &str, day: &str) -> Timeslot {
    Timeslot {
        id: id.to_string(),
        day: day.to_string(),
        start_time: "09:00".to_string(),
        end_time: "10:00".to_string(),
    }
}

fn pattern(id: &str, sets: Vec<Vec<&str>>) -> MeetingPattern {
    MeetingPattern {
        id: id.to_string(),
        slots_required: 1,
        allowed_days: vec![],
        compatible_timeslot_sets: sets
            .into_iter()
            .map(|s| s.into_iter().map(String::from).collect())
            .collect(),
    }
}

fn section(id: &str, instructor_id: &str, enrollment: u32, patterns: Vec<&str>) -> Section {
    Section {
        id: id.to_string(),
        course_id: format!("course-{id}"),
        section_code: "A".to_string(),
        instructor_id: instructor_id.to_string(),
        expected_enrollment: enrollment,
        enrollment_cap: enrollment,
        allowed_meeting_patterns: patterns.into_iter().map(String::from).collect(),
        room_requirements: vec![],
        crosslist_group_id: None,
        tags: vec![],
    }
}

fn empty_input() -> SchedulingInput {
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
fn trivial_single_section() {
    let mut input = empty_input();
    input.sections = vec![section("S1", "I1", 20, vec!["P1"])];
    input.instructors = vec![instructor("I1", RankType::TenureTrack)];
    input.rooms = vec![room("R1", 30)];
    input.timeslots = vec![timeslot("T1", "Mon")];
    input.meeting_patterns = vec![pattern("P1", vec![vec!["T1"]])];

    match solve(&input) {
        ScheduleResponse::Ok {
            assignments,
            total_score,
            penalty_breakdown,
            ..
        } => {
            assert_eq!(assignments.len(), 1);
            assert_eq!(assignments[0].section_id, "S1");
            assert_eq!(penalty_breakdown.room_waste, 10.0);
            assert_eq!(total_score, 25.0);
        }
        ScheduleResponse::Error { errors, .. } => {
            panic!("expected feasible schedule, got errors: {errors:?}");
        }
    }
}

#[test]
fn adjunct_day_excess_is_penalized() {
    let mut input = empty_input();
    let mut prefs = InstructorPreferences::default();
    prefs.max_teaching_days = Some(1);
    input.instructors = vec![Instructor {
        id: "I1".to_string(),
        rank_type: RankType::Adjunct,
        unavailable_times: vec![],
        preferences: prefs,
    }];
    input.sections = vec![
        section("S1", "I1", 10, vec!["P1"]),
        section("S2", "I1", 10, vec!["P2"]),
    ];
    input.rooms = vec![room("R1", 30)];
    input.timeslots = vec![timeslot("T1", "Mon"), timeslot("T2", "Tue")];
    input.meeting_patterns = vec![
        pattern("P1", vec![vec!["T1"]]),
        pattern("P2", vec![vec!["T2"]]),
    ];

    match solve(&input) {
        ScheduleResponse::Ok {
            penalty_breakdown, ..
        } => {
            assert_eq!(penalty_breakdown.adjunct_day_excess, 15.0);
        }
        ScheduleResponse::Error { errors, .. } => {
            panic!("expected feasible schedule, got errors: {errors:?}");
        }
    }
}

#[test]
fn crosslist_same_room_shares_one_room() {
    let mut input = empty_input();
    input.instructors = vec![
        instructor("I1", RankType::TenureTrack),
        instructor("I2", RankType::TenureTrack),
    ];
    input.sections = vec![
        section("S1", "I1", 15, vec!["P1"]),
        section("S2", "I2", 15, vec!["P1"]),
    ];
    for s in input.sections.iter_mut() {
        s.crosslist_group_id = Some("G1".to_string());
    }
    input.rooms = vec![room("R1", 40)];
    input.timeslots = vec![timeslot("T1", "Mon")];
    input.meeting_patterns = vec![pattern("P1", vec![vec!["T1"]])];
    input.crosslist_groups = vec![CrossListGroup {
        id: "G1".to_string(),
        member_section_ids: vec!["S1".to_string(), "S2".to_string()],
        require_same_room: true,
    }];

    match solve(&input) {
        ScheduleResponse::Ok { assignments, .. } => {
            assert_eq!(assignments.len(), 2);
            assert_eq!(assignments[0].room_id, assignments[1].room_id);
            assert_eq!(assignments[0].timeslot_ids, assignments[1].timeslot_ids);
        }
        ScheduleResponse::Error { errors, .. } => {
            panic!("expected feasible schedule, got errors: {errors:?}");
        }
    }
}

#[test]
fn soft_lock_room_mismatch_is_penalized() {
    let mut input = empty_input();
    input.instructors = vec![instructor("I1", RankType::TenureTrack)];
    input.sections = vec![section("S1", "I1", 10, vec!["P1"])];
    input.rooms = vec![room("R1", 20)];
    input.timeslots = vec![timeslot("T1", "Mon")];
    input.meeting_patterns = vec![pattern("P1", vec![vec!["T1"]])];
    input.soft_locks = vec![SoftLock {
        section_id: "S1".to_string(),
        preferred_timeslot_set: None,
        preferred_room: Some("R2".to_string()),
        weight: 20.0,
    }];

    match solve(&input) {
        ScheduleResponse::Ok {
            penalty_breakdown, ..
        } => {
            assert_eq!(penalty_breakdown.soft_lock_room, 20.0);
        }
        ScheduleResponse::Error { errors, .. } => {
            panic!("expected feasible schedule, got errors: {errors:?}");
        }
    }
}

#[test]
fn lock_onto_blocked_time_is_infeasible() {
    let mut input = empty_input();
    input.instructors = vec![instructor("I1", RankType::TenureTrack)];
    input.sections = vec![section("S1", "I1", 10, vec!["P1"])];
    input.rooms = vec![room("R1", 20)];
    input.timeslots = vec![timeslot("T1", "Mon")];
    input.meeting_patterns = vec![pattern("P1", vec![vec!["T1"]])];
    input.blocked_times = vec![BlockedTime {
        scope: "global".to_string(),
        timeslot_ids: vec!["T1".to_string()],
        reason: "maintenance".to_string(),
    }];
    input.locked_assignments = vec![LockedAssignment {
        section_id: "S1".to_string(),
        fixed_timeslot_set: Some(vec!["T1".to_string()]),
        fixed_room: None,
    }];

    match solve(&input) {
        ScheduleResponse::Error { errors, .. } => {
            assert!(errors.iter().any(|e| e.code == "no_feasible_options"));
        }
        ScheduleResponse::Ok { .. } => panic!("expected an infeasible/invalid result"),
    }
}

#[test]
fn instructor_conflict_is_diagnosed() {
    let mut input = empty_input();
    input.instructors = vec![instructor("I1", RankType::TenureTrack)];
    input.sections = vec![
        section("S1", "I1", 10, vec!["P1"]),
        section("S2", "I1", 10, vec!["P1"]),
    ];
    input.rooms = vec![room("R1", 20), room("R2", 20)];
    input.timeslots = vec![timeslot("T1", "Mon")];
    input.meeting_patterns = vec![pattern("P1", vec![vec!["T1"]])];

    match solve(&input) {
        ScheduleResponse::Error { errors, diagnostics } => {
            assert!(errors.iter().any(|e| e.code == "infeasible"));
            let diagnostics = diagnostics.expect("diagnostics expected on infeasibility");
            assert!(diagnostics
                .feasible_if_relax
                .contains(&"Instructor overlap constraints".to_string()));
            assert_eq!(diagnostics.feasible_if_remove_section.len(), 2);
        }
        ScheduleResponse::Ok { .. } => panic!("expected solver infeasibility"),
    }
}
