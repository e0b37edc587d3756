//! Reconstructs assignments and the penalty breakdown from a solved model.

use crate::domain::{
    Assignment, InstructorId, Option_, PenaltyBreakdown, RankType, SchedulingInput, Section,
    SectionId, SoftLock,
};
use crate::objective::{W_PREF_DAY, W_PREF_PATTERN, W_ROOM_WASTE, W_SOFTLOCK_BASE};
use good_lp::{Solution, Variable};
use std::collections::{BTreeSet, HashMap, HashSet};

fn days_of(timeslot_set: &[String], day_by_timeslot: &HashMap<&str, &str>) -> BTreeSet<String> {
    timeslot_set
        .iter()
        .filter_map(|t| day_by_timeslot.get(t.as_str()).map(|d| d.to_string()))
        .collect()
}

fn set_eq(a: &[String], b: &[String]) -> bool {
    let a: BTreeSet<&str> = a.iter().map(String::as_str).collect();
    let b: BTreeSet<&str> = b.iter().map(String::as_str).collect();
    a == b
}

pub struct SolvedSelection {
    pub assignments: Vec<Assignment>,
    pub breakdown: PenaltyBreakdown,
    pub explanations: Vec<String>,
}

/// Walks every option's decision variable, keeps the one assigned 1 per
/// section, and recomputes the penalty breakdown from the chosen options
/// plus the adjunct excess variables read back from the solution.
pub fn assemble_result(
    solution: &impl Solution,
    options_by_section: &HashMap<SectionId, Vec<Option_>>,
    decision_vars: &HashMap<(SectionId, usize), Variable>,
    adjunct_excess_vars: &HashMap<InstructorId, Variable>,
    input: &SchedulingInput,
) -> SolvedSelection {
    let sections_by_id: HashMap<&str, &Section> =
        input.sections.iter().map(|s| (s.id.as_str(), s)).collect();
    let instructors_by_id: HashMap<&str, _> = input
        .instructors
        .iter()
        .map(|i| (i.id.as_str(), i))
        .collect();
    let day_by_timeslot: HashMap<&str, &str> = input
        .timeslots
        .iter()
        .map(|t| (t.id.as_str(), t.day.as_str()))
        .collect();
    let soft_lock_by_section: HashMap<&str, &SoftLock> = input
        .soft_locks
        .iter()
        .map(|sl| (sl.section_id.as_str(), sl))
        .collect();

    let mut assignments = Vec::new();
    let mut explanations = Vec::new();
    let mut breakdown = PenaltyBreakdown::default();

    let mut section_ids: Vec<&SectionId> = options_by_section.keys().collect();
    section_ids.sort();

    for section_id in section_ids {
        let options = &options_by_section[section_id];
        let Some(section) = sections_by_id.get(section_id.as_str()) else {
            continue;
        };

        let chosen = options.iter().enumerate().find(|(idx, _)| {
            let var = decision_vars[&(section_id.clone(), *idx)];
            solution.value(var) > 0.5
        });
        let Some((_, option)) = chosen else {
            continue;
        };

        assignments.push(Assignment {
            section_id: section_id.clone(),
            meeting_pattern_id: option.pattern_id.clone(),
            timeslot_ids: option.timeslot_set.clone(),
            room_id: option.room_id.clone(),
        });
        explanations.push(format!(
            "Section {} assigned to {} at {}.",
            section_id,
            option.room_id,
            option.timeslot_set.join(",")
        ));

        breakdown.room_waste += option.room_waste as f64 * W_ROOM_WASTE;

        if let Some(instructor) = instructors_by_id.get(section.instructor_id.as_str()) {
            let prefs = &instructor.preferences;
            let option_days = days_of(&option.timeslot_set, &day_by_timeslot);
            let preferred_days: HashSet<&str> =
                prefs.preferred_days.iter().map(String::as_str).collect();
            if option_days.iter().all(|d| !preferred_days.contains(d.as_str())) {
                breakdown.instructor_day_preference += W_PREF_DAY;
            }
            if !prefs.preferred_patterns.contains(&option.pattern_id) {
                breakdown.instructor_pattern_preference += W_PREF_PATTERN;
            }
        }

        if let Some(soft_lock) = soft_lock_by_section.get(section_id.as_str()) {
            let weight = soft_lock.weight.trunc();
            if let Some(preferred) = &soft_lock.preferred_timeslot_set {
                if !set_eq(preferred, &option.timeslot_set) {
                    breakdown.soft_lock_time += weight * W_SOFTLOCK_BASE;
                }
            }
            if let Some(preferred_room) = &soft_lock.preferred_room {
                if preferred_room != &option.room_id {
                    breakdown.soft_lock_room += weight * W_SOFTLOCK_BASE;
                }
            }
        }
    }

    for instructor in &input.instructors {
        if instructor.rank_type != RankType::Adjunct {
            continue;
        }
        if let Some(var) = adjunct_excess_vars.get(&instructor.id) {
            breakdown.adjunct_day_excess += solution.value(*var).round() * crate::objective::W_ADJUNCT;
        }
    }

    SolvedSelection {
        assignments,
        breakdown,
        explanations,
    }
}
