//! Domain types for the course scheduling engine: the immutable entities a
//! solve request is built from, plus the request/response envelope.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub type SectionId = String;
pub type InstructorId = String;
pub type RoomId = String;
pub type TimeslotId = String;
pub type MeetingPatternId = String;
pub type CrossListGroupId = String;
pub type NoOverlapGroupId = String;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Section {
    pub id: SectionId,
    pub course_id: String,
    pub section_code: String,
    pub instructor_id: InstructorId,
    pub expected_enrollment: u32,
    pub enrollment_cap: u32,
    pub allowed_meeting_patterns: Vec<MeetingPatternId>,
    #[serde(default)]
    pub room_requirements: Vec<String>,
    #[serde(default)]
    pub crosslist_group_id: Option<CrossListGroupId>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankType {
    TenureTrack,
    Adjunct,
    Lecturer,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InstructorPreferences {
    #[serde(default)]
    pub preferred_days: Vec<String>,
    #[serde(default)]
    pub preferred_patterns: Vec<MeetingPatternId>,
    #[serde(default)]
    pub max_teaching_days: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Instructor {
    pub id: InstructorId,
    pub rank_type: RankType,
    #[serde(default)]
    pub unavailable_times: Vec<TimeslotId>,
    #[serde(default)]
    pub preferences: InstructorPreferences,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub building: String,
    pub capacity: u32,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Timeslot {
    pub id: TimeslotId,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MeetingPattern {
    pub id: MeetingPatternId,
    pub slots_required: u32,
    #[serde(default)]
    pub allowed_days: Vec<String>,
    pub compatible_timeslot_sets: Vec<Vec<TimeslotId>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrossListGroup {
    pub id: CrossListGroupId,
    pub member_section_ids: Vec<SectionId>,
    #[serde(default)]
    pub require_same_room: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NoOverlapGroup {
    pub id: NoOverlapGroupId,
    pub member_section_ids: Vec<SectionId>,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlockedTime {
    pub scope: String,
    pub timeslot_ids: Vec<TimeslotId>,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LockedAssignment {
    pub section_id: SectionId,
    #[serde(default)]
    pub fixed_timeslot_set: Option<Vec<TimeslotId>>,
    #[serde(default)]
    pub fixed_room: Option<RoomId>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SoftLock {
    pub section_id: SectionId,
    #[serde(default)]
    pub preferred_timeslot_set: Option<Vec<TimeslotId>>,
    #[serde(default)]
    pub preferred_room: Option<RoomId>,
    pub weight: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchedulingInput {
    pub sections: Vec<Section>,
    pub instructors: Vec<Instructor>,
    pub rooms: Vec<Room>,
    pub timeslots: Vec<Timeslot>,
    pub meeting_patterns: Vec<MeetingPattern>,
    #[serde(default)]
    pub crosslist_groups: Vec<CrossListGroup>,
    #[serde(default)]
    pub no_overlap_groups: Vec<NoOverlapGroup>,
    #[serde(default)]
    pub blocked_times: Vec<BlockedTime>,
    #[serde(default)]
    pub locked_assignments: Vec<LockedAssignment>,
    #[serde(default)]
    pub soft_locks: Vec<SoftLock>,
}

/// A single candidate placement for a section: a meeting pattern, one of its
/// compatible timeslot sets, and an eligible room.
#[derive(Debug, Clone)]
pub struct Option_ {
    pub section_id: SectionId,
    pub pattern_id: MeetingPatternId,
    pub timeslot_set: Vec<TimeslotId>,
    pub room_id: RoomId,
    pub room_waste: i64,
}

impl Option_ {
    pub fn timeslot_set_key(&self) -> BTreeSet<&TimeslotId> {
        self.timeslot_set.iter().collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    pub section_id: SectionId,
    pub meeting_pattern_id: MeetingPatternId,
    pub timeslot_ids: Vec<TimeslotId>,
    pub room_id: RoomId,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PenaltyBreakdown {
    pub room_waste: f64,
    pub instructor_day_preference: f64,
    pub instructor_pattern_preference: f64,
    pub adjunct_day_excess: f64,
    pub soft_lock_time: f64,
    pub soft_lock_room: f64,
}

impl PenaltyBreakdown {
    pub fn total(&self) -> f64 {
        self.room_waste
            + self.instructor_day_preference
            + self.instructor_pattern_preference
            + self.adjunct_day_excess
            + self.soft_lock_time
            + self.soft_lock_room
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    pub feasible_if_relax: Vec<String>,
    pub feasible_if_remove_section: Vec<SectionId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status")]
#[serde(rename_all = "snake_case")]
pub enum ScheduleResponse {
    Ok {
        assignments: Vec<Assignment>,
        total_score: f64,
        penalty_breakdown: PenaltyBreakdown,
        explanations: Vec<String>,
    },
    Error {
        errors: Vec<ErrorDetail>,
        #[serde(skip_serializing_if = "Option::is_none")]
        diagnostics: Option<Diagnostics>,
    },
}
