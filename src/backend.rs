//! Thin seam over the ILP backend: variable/constraint creation lives in
//! `constraints.rs`/`objective.rs` against good_lp's own `ProblemVariables`
//! and `Expression` types; this module only owns the minimize-with-deadline
//! call, so swapping `default_solver` for another good_lp backend touches
//! nothing else.

use good_lp::{default_solver, Constraint, Expression, ProblemVariables, Solution, SolverModel};

/// Builds the model from `objective` and `constraints`, solves it with a
/// fixed time budget, and returns the solution if the solver reports
/// OPTIMAL or FEASIBLE. Any other status (including time-limit exhaustion
/// with no incumbent) surfaces as `good_lp::ResolutionError`.
pub fn minimize(
    vars: ProblemVariables,
    objective: Expression,
    constraints: Vec<Constraint>,
    time_limit_secs: f64,
) -> Result<impl Solution, good_lp::ResolutionError> {
    let mut model = vars
        .minimise(objective)
        .using(default_solver)
        .set_option("threads", 1)
        .set_option("random_seed", 1234)
        .set_time_limit(time_limit_secs);

    for c in constraints {
        model.add_constraint(c);
    }

    model.solve()
}
