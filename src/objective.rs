//! Soft-penalty objective: room waste, instructor day/pattern preference
//! misses, adjunct teaching-day excess, and soft-lock mismatches.

use crate::domain::{InstructorId, Option_, RankType, SchedulingInput, Section, SectionId, SoftLock};
use good_lp::{constraint, variable, Constraint, Expression, ProblemVariables, Variable};
use std::collections::{BTreeSet, HashMap, HashSet};

pub const W_ROOM_WASTE: f64 = 1.0;
pub const W_PREF_DAY: f64 = 10.0;
pub const W_PREF_PATTERN: f64 = 5.0;
pub const W_ADJUNCT: f64 = 15.0;
pub const W_SOFTLOCK_BASE: f64 = 1.0;

/// Result of building the objective: the expression to minimize, any linear
/// constraints needed purely to support penalty terms (the adjunct
/// day-excess linking constraints), and the per-instructor excess variables
/// so the result assembler can read their values back out of the solution.
pub struct ObjectiveBuild {
    pub objective: Expression,
    pub extra_constraints: Vec<Constraint>,
    pub adjunct_excess_vars: HashMap<InstructorId, Variable>,
}

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

pub fn build_objective(
    vars: &mut ProblemVariables,
    options_by_section: &HashMap<SectionId, Vec<Option_>>,
    decision_vars: &HashMap<(SectionId, usize), Variable>,
    input: &SchedulingInput,
) -> ObjectiveBuild {
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

    let mut objective = Expression::default();
    let mut extra_constraints = Vec::new();

    for (section_id, options) in options_by_section {
        let Some(section) = sections_by_id.get(section_id.as_str()) else {
            continue;
        };
        let instructor = instructors_by_id.get(section.instructor_id.as_str());
        let soft_lock = soft_lock_by_section.get(section_id.as_str());

        for (idx, option) in options.iter().enumerate() {
            let var = decision_vars[&(section_id.clone(), idx)];

            objective = objective + (option.room_waste as f64 * W_ROOM_WASTE) * var;

            if let Some(instructor) = instructor {
                let prefs = &instructor.preferences;
                let option_days = days_of(&option.timeslot_set, &day_by_timeslot);
                let preferred_days: HashSet<&str> =
                    prefs.preferred_days.iter().map(String::as_str).collect();
                let misses_day_pref = option_days.iter().all(|d| !preferred_days.contains(d.as_str()));
                if misses_day_pref {
                    objective = objective + W_PREF_DAY * var;
                }

                let misses_pattern_pref = !prefs.preferred_patterns.contains(&option.pattern_id);
                if misses_pattern_pref {
                    objective = objective + W_PREF_PATTERN * var;
                }
            }

            if let Some(soft_lock) = soft_lock {
                let weight = soft_lock.weight.trunc();
                if let Some(preferred) = &soft_lock.preferred_timeslot_set {
                    if !set_eq(preferred, &option.timeslot_set) {
                        objective = objective + (weight * W_SOFTLOCK_BASE) * var;
                    }
                }
                if let Some(preferred_room) = &soft_lock.preferred_room {
                    if preferred_room != &option.room_id {
                        objective = objective + (weight * W_SOFTLOCK_BASE) * var;
                    }
                }
            }
        }
    }

    // adjunct teaching-day excess.
    let mut adjunct_excess_vars = HashMap::new();
    for instructor in &input.instructors {
        if instructor.rank_type != RankType::Adjunct {
            continue;
        }
        let Some(max_days) = instructor.preferences.max_teaching_days else {
            continue;
        };

        let sections_of: Vec<&Section> = input
            .sections
            .iter()
            .filter(|s| s.instructor_id == instructor.id)
            .collect();

        let mut vars_by_day: HashMap<String, Vec<Variable>> = HashMap::new();
        for section in &sections_of {
            let Some(options) = options_by_section.get(&section.id) else {
                continue;
            };
            for (idx, option) in options.iter().enumerate() {
                let var = decision_vars[&(section.id.clone(), idx)];
                for day in days_of(&option.timeslot_set, &day_by_timeslot) {
                    vars_by_day.entry(day).or_default().push(var);
                }
            }
        }
        if vars_by_day.is_empty() {
            continue;
        }

        let mut day_indicators = Vec::new();
        for (_, options_vars) in &vars_by_day {
            let indicator = vars.add(variable().binary());
            for v in options_vars {
                extra_constraints.push(constraint!(indicator >= *v));
            }
            day_indicators.push(indicator);
        }

        let excess = vars.add(variable().integer().min(0.0));
        let day_sum: Expression = day_indicators.into_iter().sum();
        extra_constraints.push(constraint!(excess >= day_sum - max_days as f64));

        objective = objective + W_ADJUNCT * excess;
        adjunct_excess_vars.insert(instructor.id.clone(), excess);
    }

    ObjectiveBuild {
        objective,
        extra_constraints,
        adjunct_excess_vars,
    }
}
