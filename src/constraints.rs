//! Builds the hard-constraint family of the 0/1 integer program: exactly-one
//! per section, room non-overlap (with cross-list room sharing), instructor
//! non-overlap, no-overlap groups, and cross-list time/room equality.

use crate::domain::{CrossListGroup, Option_, SchedulingInput, Section, SectionId};
use good_lp::{constraint, variable, Constraint, Expression, ProblemVariables, Variable};
use itertools::Itertools;
use std::collections::HashMap;

/// A flattened option together with the binary decision variable that
/// selects it.
pub struct OptionVar<'a> {
    pub section_id: SectionId,
    pub option: &'a Option_,
    pub var: Variable,
}

/// Which hard-constraint families to include. All true in a normal solve;
/// the diagnoser turns individual families off one at a time.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintFlags {
    pub room_conflicts: bool,
    pub instructor_conflicts: bool,
    pub no_overlap_groups: bool,
    pub crosslist_time_room: bool,
}

impl Default for ConstraintFlags {
    fn default() -> Self {
        ConstraintFlags {
            room_conflicts: true,
            instructor_conflicts: true,
            no_overlap_groups: true,
            crosslist_time_room: true,
        }
    }
}

impl ConstraintFlags {
    pub fn relaxing(key: &str) -> Self {
        let mut flags = ConstraintFlags::default();
        match key {
            "room_conflicts" => flags.room_conflicts = false,
            "instructor_conflicts" => flags.instructor_conflicts = false,
            "no_overlap_groups" => flags.no_overlap_groups = false,
            "crosslist_time_room" => flags.crosslist_time_room = false,
            _ => {}
        }
        flags
    }
}

/// The roomshare key for a section: sections in the same cross-list group
/// with `require_same_room` share a key (and so may co-occupy a room+time);
/// every other section gets a key unique to itself.
pub fn roomshare_key(section: &Section, groups_by_id: &HashMap<&str, &CrossListGroup>) -> String {
    if let Some(gid) = &section.crosslist_group_id {
        if let Some(group) = groups_by_id.get(gid.as_str()) {
            if group.require_same_room {
                return format!("group:{}", gid);
            }
        }
    }
    format!("section:{}", section.id)
}

fn flatten_options<'a>(
    options_by_section: &'a HashMap<SectionId, Vec<Option_>>,
    vars: &HashMap<(SectionId, usize), Variable>,
) -> Vec<OptionVar<'a>> {
    let mut flat = Vec::new();
    for (section_id, options) in options_by_section {
        for (idx, option) in options.iter().enumerate() {
            let var = vars[&(section_id.clone(), idx)];
            flat.push(OptionVar {
                section_id: section_id.clone(),
                option,
                var,
            });
        }
    }
    flat
}

pub fn build_hard_constraints(
    vars: &mut ProblemVariables,
    options_by_section: &HashMap<SectionId, Vec<Option_>>,
    decision_vars: &HashMap<(SectionId, usize), Variable>,
    input: &SchedulingInput,
    flags: ConstraintFlags,
) -> Vec<Constraint> {
    let flat = flatten_options(options_by_section, decision_vars);
    let sections_by_id: HashMap<&str, &Section> =
        input.sections.iter().map(|s| (s.id.as_str(), s)).collect();
    let groups_by_id: HashMap<&str, &CrossListGroup> = input
        .crosslist_groups
        .iter()
        .map(|g| (g.id.as_str(), g))
        .collect();

    let mut constraints = Vec::new();

    // 1. exactly one option per section.
    for (section_id, options) in options_by_section {
        if options.is_empty() {
            continue;
        }
        let sum: Expression = (0..options.len())
            .map(|idx| decision_vars[&(section_id.clone(), idx)])
            .sum();
        constraints.push(constraint!(sum == 1));
    }

    // 2. room non-overlap with cross-list room sharing.
    if flags.room_conflicts {
        let by_room_timeslot: HashMap<(&str, &str), Vec<(String, Variable)>> = flat
            .iter()
            .filter_map(|ov| {
                let section = sections_by_id.get(ov.section_id.as_str())?;
                let key = roomshare_key(section, &groups_by_id);
                Some((ov, key))
            })
            .flat_map(|(ov, key)| {
                ov.option
                    .timeslot_set
                    .iter()
                    .map(move |t| ((ov.option.room_id.as_str(), t.as_str()), (key.clone(), ov.var)))
            })
            .into_group_map();

        for bucket in by_room_timeslot.into_values() {
            let by_key: HashMap<String, Vec<Variable>> = bucket.into_iter().into_group_map();
            if by_key.len() <= 1 {
                continue;
            }
            let mut indicators = Vec::new();
            for vars_in_bucket in by_key.values() {
                let indicator = vars.add(variable().binary());
                for v in vars_in_bucket {
                    constraints.push(constraint!(indicator >= *v));
                }
                indicators.push(indicator);
            }
            let sum: Expression = indicators.into_iter().sum();
            constraints.push(constraint!(sum <= 1));
        }
    }

    // 3. instructor non-overlap.
    if flags.instructor_conflicts {
        let by_instructor_timeslot: HashMap<(&str, &str), Vec<Variable>> = flat
            .iter()
            .filter_map(|ov| {
                let section = sections_by_id.get(ov.section_id.as_str())?;
                Some(ov.option.timeslot_set.iter().map(move |t| {
                    ((section.instructor_id.as_str(), t.as_str()), ov.var)
                }))
            })
            .flatten()
            .into_group_map();

        for vars_at in by_instructor_timeslot.values() {
            if vars_at.len() <= 1 {
                continue;
            }
            let sum: Expression = vars_at.iter().copied().sum();
            constraints.push(constraint!(sum <= 1));
        }
    }

    // 4. no-overlap groups.
    if flags.no_overlap_groups {
        for group in &input.no_overlap_groups {
            let members: std::collections::HashSet<&str> = group
                .member_section_ids
                .iter()
                .map(String::as_str)
                .collect();
            let by_timeslot: HashMap<&str, Vec<Variable>> = flat
                .iter()
                .filter(|ov| members.contains(ov.section_id.as_str()))
                .flat_map(|ov| ov.option.timeslot_set.iter().map(move |t| (t.as_str(), ov.var)))
                .into_group_map();
            for vars_at in by_timeslot.values() {
                if vars_at.len() <= 1 {
                    continue;
                }
                let sum: Expression = vars_at.iter().copied().sum();
                constraints.push(constraint!(sum <= 1));
            }
        }
    }

    // 5. cross-list time/room equality.
    if flags.crosslist_time_room {
        for group in &input.crosslist_groups {
            let members = &group.member_section_ids;
            for a_idx in 0..members.len() {
                for b_idx in (a_idx + 1)..members.len() {
                    let a_id = &members[a_idx];
                    let b_id = &members[b_idx];
                    let Some(a_opts) = options_by_section.get(a_id) else {
                        continue;
                    };
                    let Some(b_opts) = options_by_section.get(b_id) else {
                        continue;
                    };
                    for (ia, oa) in a_opts.iter().enumerate() {
                        for (ib, ob) in b_opts.iter().enumerate() {
                            let times_differ = oa.timeslot_set_key() != ob.timeslot_set_key();
                            let rooms_differ = group.require_same_room && oa.room_id != ob.room_id;
                            if times_differ || rooms_differ {
                                let va = decision_vars[&(a_id.clone(), ia)];
                                let vb = decision_vars[&(b_id.clone(), ib)];
                                constraints.push(constraint!(va + vb <= 1));
                            }
                        }
                    }
                }
            }
        }
    }

    constraints
}
