//! Top-level orchestrator: validation, option generation, constraint and
//! objective construction, solve, and (on failure) diagnosis.

use crate::backend;
use crate::constraints::{build_hard_constraints, ConstraintFlags};
use crate::diagnose::diagnose;
use crate::domain::{ScheduleResponse, SchedulingInput};
use crate::error::ValidationErrorKind;
use crate::objective::build_objective;
use crate::options::{build_options, RelaxFlags};
use crate::result::assemble_result;
use good_lp::{variable, ProblemVariables, Variable};
use log::info;
use std::collections::HashMap;

const OPTIMIZATION_TIME_LIMIT_SECS: f64 = 5.0;

pub fn solve(input: &SchedulingInput) -> ScheduleResponse {
    let mut errors: Vec<ValidationErrorKind> = Vec::new();

    errors.extend(crate::validate::validate_crosslist_capacity(input));

    let (options_by_section, option_errors) = build_options(input, RelaxFlags::default());
    errors.extend(option_errors);

    if !errors.is_empty() {
        return ScheduleResponse::Error {
            errors: errors.iter().map(ValidationErrorKind::to_detail).collect(),
            diagnostics: None,
        };
    }

    info!(
        "Built options for {} sections; invoking solver.",
        options_by_section.len()
    );

    let mut vars = ProblemVariables::new();
    let mut decision_vars: HashMap<(String, usize), Variable> = HashMap::new();
    for (section_id, options) in &options_by_section {
        for idx in 0..options.len() {
            decision_vars.insert((section_id.clone(), idx), vars.add(variable().binary()));
        }
    }

    let objective_build = build_objective(&mut vars, &options_by_section, &decision_vars, input);
    let mut constraints = build_hard_constraints(
        &mut vars,
        &options_by_section,
        &decision_vars,
        input,
        ConstraintFlags::default(),
    );
    constraints.extend(objective_build.extra_constraints);

    match backend::minimize(
        vars,
        objective_build.objective,
        constraints,
        OPTIMIZATION_TIME_LIMIT_SECS,
    ) {
        Ok(solution) => {
            let selection = assemble_result(
                &solution,
                &options_by_section,
                &decision_vars,
                &objective_build.adjunct_excess_vars,
                input,
            );
            ScheduleResponse::Ok {
                total_score: selection.breakdown.total(),
                assignments: selection.assignments,
                penalty_breakdown: selection.breakdown,
                explanations: selection.explanations,
            }
        }
        Err(e) => {
            info!("Solve failed ({}), running infeasibility diagnosis.", e);
            let diagnostics = diagnose(input);
            let kind = ValidationErrorKind::Infeasible { diagnostics };
            let detail = kind.to_detail();
            let diagnostics = kind.diagnostics().cloned();
            ScheduleResponse::Error {
                errors: vec![detail],
                diagnostics,
            }
        }
    }
}
