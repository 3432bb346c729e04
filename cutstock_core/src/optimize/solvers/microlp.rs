//! Solver interface for microlp, a pure Rust simplex solver with branch and bound
use ::microlp::{ComparisonOp, OptimizationDirection};
use indexmap::IndexMap;

use crate::optimize::constraint::Constraint;
use crate::optimize::objective::ObjectiveSense;
use crate::optimize::problem::Problem;
use crate::optimize::solvers::{Solver, SolverError};
use crate::optimize::variable::{Variable, VariableType};
use crate::optimize::{OptimizationStatus, ProblemSolution};

/// Constraints with no terms are checked against this tolerance instead of being sent
/// to the backend
const EMPTY_ROW_TOLERANCE: f64 = 1e-9;

/// microlp backend; reports primal values only
#[derive(Clone, Debug, Default)]
pub struct MicrolpSolver {}

impl Solver for MicrolpSolver {
    fn name(&self) -> &str {
        "microlp"
    }

    fn integer_variable_capable(&self) -> bool {
        true
    }

    fn dual_values_capable(&self) -> bool {
        false
    }

    fn solve(&self, problem: &Problem) -> Result<ProblemSolution, SolverError> {
        let direction = match problem.objective().sense() {
            ObjectiveSense::Minimize => OptimizationDirection::Minimize,
            ObjectiveSense::Maximize => OptimizationDirection::Maximize,
        };
        let mut lp = ::microlp::Problem::new(direction);

        let mut handles = Vec::with_capacity(problem.num_variables());
        for var in problem.variables() {
            let coefficient = problem.objective().coefficient_of(&var.id);
            let handle = match var.variable_type {
                VariableType::Continuous => {
                    lp.add_var(coefficient, (var.lower_bound, var.upper_bound))
                }
                VariableType::Integer => lp.add_integer_var(coefficient, integer_bounds(var)?),
                VariableType::Binary => lp.add_binary_var(coefficient),
            };
            handles.push(handle);
        }

        for constraint in problem.constraints() {
            let mut expr: Vec<(::microlp::Variable, f64)> = Vec::new();
            for term in constraint.get_terms() {
                let Some(var) = problem.get_variable(&term.variable) else {
                    continue;
                };
                let handle = handles[var.index()];
                // microlp refuses repeated variables within one expression
                match expr.iter_mut().find(|(h, _)| *h == handle) {
                    Some((_, coefficient)) => *coefficient += term.coefficient,
                    None => expr.push((handle, term.coefficient)),
                }
            }
            if expr.is_empty() {
                if constraint.is_satisfied_by(0.0, EMPTY_ROW_TOLERANCE) {
                    continue;
                }
                return Err(SolverError::Infeasible);
            }
            match constraint {
                Constraint::Equality { equals, .. } => {
                    lp.add_constraint(expr, ComparisonOp::Eq, *equals)
                }
                Constraint::Inequality {
                    lower_bound,
                    upper_bound,
                    ..
                } => {
                    if lower_bound.is_finite() {
                        lp.add_constraint(expr.clone(), ComparisonOp::Ge, *lower_bound);
                    }
                    if upper_bound.is_finite() {
                        lp.add_constraint(expr, ComparisonOp::Le, *upper_bound);
                    }
                }
            }
        }

        let solution = lp.solve().map_err(|e| match e {
            ::microlp::Error::Infeasible => SolverError::Infeasible,
            ::microlp::Error::Unbounded => SolverError::Unbounded,
            other => SolverError::Backend(other.to_string()),
        })?;

        let variable_values: IndexMap<String, f64> = problem
            .variables()
            .zip(&handles)
            .map(|(var, handle)| (var.id.clone(), *solution.var_value(*handle)))
            .collect();

        Ok(ProblemSolution {
            status: OptimizationStatus::Optimal,
            objective_value: solution.objective(),
            variable_values,
            dual_values: None,
        })
    }
}

/// Bounds of an integer variable in microlp's `i32` domain
///
/// Branch and bound loses its way on huge domains, so unbounded or out of range integer
/// variables are rejected instead of being clamped.
fn integer_bounds(var: &Variable) -> Result<(i32, i32), SolverError> {
    let lower = var.lower_bound.ceil();
    let upper = var.upper_bound.floor();
    let range = f64::from(i32::MIN)..=f64::from(i32::MAX);
    if !range.contains(&lower) || !range.contains(&upper) {
        return Err(SolverError::Unsupported(format!(
            "microlp needs finite integer bounds, {} has [{}, {}]",
            var.id, var.lower_bound, var.upper_bound
        )));
    }
    Ok((lower as i32, upper as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_knapsack() {
        // max 0.4 a + 0.7 b, 3 a + 5 b <= 10
        let mut problem = Problem::new_maximization("knapsack");
        for id in ["a", "b"] {
            problem
                .add_new_variable(id, None, VariableType::Integer, 0., 3.)
                .unwrap();
        }
        problem.add_new_linear_objective_term("a", 0.4).unwrap();
        problem.add_new_linear_objective_term("b", 0.7).unwrap();
        problem
            .add_constraint(Constraint::new_at_most("length", &["a", "b"], &[3., 5.], 10.))
            .unwrap();

        let solution = MicrolpSolver::default().solve(&problem).unwrap();
        assert!((solution.objective_value - 1.4).abs() < 1e-6);
        assert!((solution.variable_value("b") - 2.).abs() < 1e-6);
        assert!(solution.dual_values.is_none());
    }

    #[test]
    fn empty_equality_row_is_infeasible() {
        let mut problem = Problem::new_minimization("empty");
        problem
            .add_new_variable("x", None, VariableType::Integer, 0., 5.)
            .unwrap();
        problem.add_new_linear_objective_term("x", 1.).unwrap();
        problem
            .add_new_equality_constraint("cover", &[], &[], 1.)
            .unwrap();
        assert_eq!(
            MicrolpSolver::default().solve(&problem),
            Err(SolverError::Infeasible)
        );
    }

    #[test]
    fn unbounded_integer_variables_are_rejected() {
        let mut problem = Problem::new_maximization("unbounded");
        problem
            .add_new_variable("z", None, VariableType::Integer, 0., f64::INFINITY)
            .unwrap();
        problem.add_new_linear_objective_term("z", 1.).unwrap();
        assert!(matches!(
            MicrolpSolver::default().solve(&problem),
            Err(SolverError::Unsupported(_))
        ));
    }

    #[test]
    fn knapsack_with_natural_bounds() {
        // 3 + 4 + 5 fills 12 exactly and is worth 13/12, more than any other fill
        let mut problem = Problem::new_maximization("knapsack");
        let lengths: [f64; 3] = [3., 4., 5.];
        let prices = [0.25, 1. / 3., 0.5];
        let ids = ["z_0", "z_1", "z_2"];
        for ((id, length), price) in ids.iter().zip(lengths).zip(prices) {
            problem
                .add_new_variable(id, None, VariableType::Integer, 0., (12. / length).floor())
                .unwrap();
            problem.add_new_linear_objective_term(id, price).unwrap();
        }
        problem
            .add_constraint(Constraint::new_at_most("length", &ids, &lengths, 12.))
            .unwrap();

        let solution = MicrolpSolver::default().solve(&problem).unwrap();
        assert!((solution.objective_value - 13. / 12.).abs() < 1e-6);
        for id in ids {
            assert!((solution.variable_value(id) - 1.).abs() < 1e-6);
        }
    }
}
