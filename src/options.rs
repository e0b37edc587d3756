//! Materializes, per section, the Cartesian product of pattern x timeslot
//! set x room, filtered by hard per-section constraints and locks.

use crate::domain::{MeetingPattern, Option_, Room, SchedulingInput, SectionId};
use crate::error::ValidationErrorKind;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Which category of filter to skip during option generation. Used both for
/// a normal solve (all flags off) and by the diagnoser's single-step
/// relaxation checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelaxFlags {
    pub ignore_blocked_times: bool,
    pub ignore_locks: bool,
    pub ignore_room_capacity: bool,
    pub ignore_room_features: bool,
    pub ignore_crosslist_capacity: bool,
}

impl RelaxFlags {
    pub fn with(key: &str) -> Self {
        let mut flags = RelaxFlags::default();
        match key {
            "blocked_times" => flags.ignore_blocked_times = true,
            "locks" => flags.ignore_locks = true,
            "room_capacity" => flags.ignore_room_capacity = true,
            "room_features" => flags.ignore_room_features = true,
            "crosslist_capacity" => flags.ignore_crosslist_capacity = true,
            _ => {}
        }
        flags
    }
}

fn features_satisfied(room: &Room, required: &[String]) -> bool {
    let have: HashSet<&str> = room.features.iter().map(String::as_str).collect();
    required.iter().all(|f| have.contains(f.as_str()))
}

fn set_eq(a: &[String], b: &[String]) -> bool {
    let a: BTreeSet<&str> = a.iter().map(String::as_str).collect();
    let b: BTreeSet<&str> = b.iter().map(String::as_str).collect();
    a == b
}

/// Builds the option list for every section in `input`, honoring `flags`.
/// Returns the per-section option map (always containing one entry per
/// section, possibly empty) plus any `no_feasible_options` errors.
pub fn build_options(
    input: &SchedulingInput,
    flags: RelaxFlags,
) -> (HashMap<SectionId, Vec<Option_>>, Vec<ValidationErrorKind>) {
    let pattern_by_id: HashMap<&str, &MeetingPattern> = input
        .meeting_patterns
        .iter()
        .map(|p| (p.id.as_str(), p))
        .collect();

    let blocked: HashSet<&str> = if flags.ignore_blocked_times {
        HashSet::new()
    } else {
        input
            .blocked_times
            .iter()
            .filter(|b| b.scope == "global")
            .flat_map(|b| b.timeslot_ids.iter().map(String::as_str))
            .collect()
    };

    let lock_by_section: HashMap<&str, _> = input
        .locked_assignments
        .iter()
        .map(|l| (l.section_id.as_str(), l))
        .collect();

    let crosslist_required: HashMap<&str, u32> = if flags.ignore_crosslist_capacity {
        HashMap::new()
    } else {
        let enrollment_by_section: HashMap<&str, u32> = input
            .sections
            .iter()
            .map(|s| (s.id.as_str(), s.expected_enrollment))
            .collect();
        input
            .crosslist_groups
            .iter()
            .flat_map(|g| {
                let total: u32 = g
                    .member_section_ids
                    .iter()
                    .filter_map(|sid| enrollment_by_section.get(sid.as_str()))
                    .sum();
                g.member_section_ids
                    .iter()
                    .map(move |sid| (sid.as_str(), total))
            })
            .collect()
    };

    let mut options_by_section: HashMap<SectionId, Vec<Option_>> = HashMap::new();
    let mut errors = Vec::new();

    for section in &input.sections {
        let mut options = Vec::new();
        let lock = lock_by_section.get(section.id.as_str()).copied();

        let required_capacity = if flags.ignore_room_capacity {
            0
        } else {
            crosslist_required
                .get(section.id.as_str())
                .copied()
                .unwrap_or(section.expected_enrollment)
        };

        let eligible_rooms: Vec<&Room> = input
            .rooms
            .iter()
            .filter(|r| flags.ignore_room_capacity || r.capacity >= required_capacity)
            .filter(|r| flags.ignore_room_features || features_satisfied(r, &section.room_requirements))
            .filter(|r| match lock.and_then(|l| l.fixed_room.as_ref()) {
                Some(fixed) if !flags.ignore_locks => &r.id == fixed,
                _ => true,
            })
            .collect();

        for pattern_id in &section.allowed_meeting_patterns {
            let Some(pattern) = pattern_by_id.get(pattern_id.as_str()) else {
                continue;
            };
            for timeslot_set in &pattern.compatible_timeslot_sets {
                if !flags.ignore_blocked_times && timeslot_set.iter().any(|t| blocked.contains(t.as_str())) {
                    continue;
                }
                if !flags.ignore_locks {
                    if let Some(fixed) = lock.and_then(|l| l.fixed_timeslot_set.as_ref()) {
                        if !set_eq(timeslot_set, fixed) {
                            continue;
                        }
                    }
                }
                for room in &eligible_rooms {
                    options.push(Option_ {
                        section_id: section.id.clone(),
                        pattern_id: pattern_id.clone(),
                        timeslot_set: timeslot_set.clone(),
                        room_id: room.id.clone(),
                        room_waste: room.capacity as i64 - section.expected_enrollment as i64,
                    });
                }
            }
        }

        if options.is_empty() {
            errors.push(ValidationErrorKind::NoFeasibleOptions {
                section_id: section.id.clone(),
            });
        }
        options_by_section.insert(section.id.clone(), options);
    }

    (options_by_section, errors)
}
