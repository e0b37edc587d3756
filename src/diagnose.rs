//! Infeasibility diagnosis: single-step constraint-family relaxations and
//! single-section removals, each re-run as a feasibility-only solve.

use crate::backend;
use crate::constraints::{build_hard_constraints, ConstraintFlags};
use crate::domain::{Diagnostics, SchedulingInput};
use crate::options::{build_options, RelaxFlags};
use crate::validate::validate_crosslist_capacity;
use good_lp::{variable, ProblemVariables, Variable};
use std::collections::HashMap;

const FEASIBILITY_TIME_LIMIT_SECS: f64 = 2.0;

const RELAX_KEYS: &[(&str, &str)] = &[
    ("blocked_times", "Blocked time constraints"),
    ("locks", "Locked assignments"),
    ("room_capacity", "Room capacity"),
    ("room_features", "Room feature requirements"),
    ("crosslist_capacity", "Cross-list capacity"),
    ("room_conflicts", "Room overlap constraints"),
    ("instructor_conflicts", "Instructor overlap constraints"),
    ("no_overlap_groups", "No-overlap groups"),
    ("crosslist_time_room", "Cross-list time/room equality"),
];

/// Runs pre-validation, option generation, and hard-constraint construction
/// under a single relaxed category, then attempts a feasibility-only solve
/// (no objective) within the diagnostic time budget.
fn check_feasible(input: &SchedulingInput, relax_key: &str) -> bool {
    if relax_key != "crosslist_capacity" && !validate_crosslist_capacity(input).is_empty() {
        return false;
    }

    let option_flags = RelaxFlags::with(relax_key);
    let (options_by_section, option_errors) = build_options(input, option_flags);
    if !option_errors.is_empty() {
        return false;
    }

    let mut vars = ProblemVariables::new();
    let mut decision_vars: HashMap<(String, usize), Variable> = HashMap::new();
    for (section_id, options) in &options_by_section {
        for idx in 0..options.len() {
            decision_vars.insert((section_id.clone(), idx), vars.add(variable().binary()));
        }
    }

    let constraint_flags = ConstraintFlags::relaxing(relax_key);
    let constraints = build_hard_constraints(
        &mut vars,
        &options_by_section,
        &decision_vars,
        input,
        constraint_flags,
    );

    backend::minimize(
        vars,
        good_lp::Expression::default(),
        constraints,
        FEASIBILITY_TIME_LIMIT_SECS,
    )
    .is_ok()
}

/// Returns a copy of `input` with `section_id` removed from sections, and
/// removed from every cross-list/no-overlap group's membership (the group
/// itself dropped if fewer than two members remain), plus its locks/soft
/// locks dropped.
fn strip_section(input: &SchedulingInput, section_id: &str) -> SchedulingInput {
    let mut stripped = input.clone();
    stripped.sections.retain(|s| s.id != section_id);
    stripped.locked_assignments.retain(|l| l.section_id != section_id);
    stripped.soft_locks.retain(|sl| sl.section_id != section_id);
    stripped.crosslist_groups.retain_mut(|g| {
        g.member_section_ids.retain(|id| id != section_id);
        g.member_section_ids.len() >= 2
    });
    stripped.no_overlap_groups.retain_mut(|g| {
        g.member_section_ids.retain(|id| id != section_id);
        g.member_section_ids.len() >= 2
    });
    stripped
}

pub fn diagnose(input: &SchedulingInput) -> Diagnostics {
    let mut feasible_if_relax = Vec::new();
    for (key, label) in RELAX_KEYS {
        if check_feasible(input, key) {
            feasible_if_relax.push(label.to_string());
        }
    }

    let mut feasible_if_remove_section = Vec::new();
    for section in &input.sections {
        let stripped = strip_section(input, &section.id);
        if check_feasible(&stripped, "") {
            feasible_if_remove_section.push(section.id.clone());
        }
    }

    Diagnostics {
        feasible_if_relax,
        feasible_if_remove_section,
    }
}
