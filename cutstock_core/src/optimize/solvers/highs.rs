//! Solver interface for HiGHS
use ::highs::{HighsModelStatus, RowProblem, Sense};
use indexmap::IndexMap;

use crate::optimize::constraint::Constraint;
use crate::optimize::objective::ObjectiveSense;
use crate::optimize::problem::{Problem, ProblemType};
use crate::optimize::solvers::{evaluate_objective, Solver, SolverError};
use crate::optimize::variable::VariableType;
use crate::optimize::{OptimizationStatus, ProblemSolution};

/// HiGHS backend, handles both continuous and mixed integer problems
#[derive(Clone, Debug, Default)]
pub struct HighsSolver {}

impl Solver for HighsSolver {
    fn name(&self) -> &str {
        "highs"
    }

    fn integer_variable_capable(&self) -> bool {
        true
    }

    fn dual_values_capable(&self) -> bool {
        true
    }

    fn solve(&self, problem: &Problem) -> Result<ProblemSolution, SolverError> {
        let mut pb = RowProblem::default();
        let mut columns = Vec::with_capacity(problem.num_variables());
        for var in problem.variables() {
            let coefficient = problem.objective().coefficient_of(&var.id);
            let column = match var.variable_type {
                VariableType::Continuous => {
                    pb.add_column(coefficient, var.lower_bound..=var.upper_bound)
                }
                VariableType::Integer => {
                    pb.add_integer_column(coefficient, var.lower_bound..=var.upper_bound)
                }
                VariableType::Binary => pb.add_integer_column(coefficient, 0.0..=1.0),
            };
            columns.push(column);
        }

        let mut row_ids = Vec::with_capacity(problem.num_constraints());
        for constraint in problem.constraints() {
            let factors: Vec<_> = constraint
                .get_terms()
                .iter()
                .filter_map(|t| {
                    problem
                        .get_variable(&t.variable)
                        .map(|v| (columns[v.index()], t.coefficient))
                })
                .collect();
            match constraint {
                Constraint::Equality { equals, .. } => pb.add_row(*equals..=*equals, &factors),
                Constraint::Inequality {
                    lower_bound,
                    upper_bound,
                    ..
                } => pb.add_row(*lower_bound..=*upper_bound, &factors),
            }
            row_ids.push(constraint.get_id().to_string());
        }

        let sense = match problem.objective().sense() {
            ObjectiveSense::Minimize => Sense::Minimise,
            ObjectiveSense::Maximize => Sense::Maximise,
        };
        let mut model = pb.optimise(sense);
        model.make_quiet();
        let solved = model
            .try_solve()
            .map_err(|status| SolverError::Backend(format!("{:?}", status)))?;
        match solved.status() {
            HighsModelStatus::Optimal => {}
            HighsModelStatus::Infeasible => return Err(SolverError::Infeasible),
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                return Err(SolverError::Unbounded)
            }
            other => return Err(SolverError::NumericalError(format!("{:?}", other))),
        }

        let solution = solved.get_solution();
        let values = solution.columns().to_vec();
        let variable_values: IndexMap<String, f64> = problem
            .variables()
            .map(|v| (v.id.clone(), values[v.index()]))
            .collect();
        let dual_values = match problem.problem_type() {
            ProblemType::LinearContinuous => Some(
                row_ids
                    .into_iter()
                    .zip(solution.dual_rows().iter().copied())
                    .collect(),
            ),
            ProblemType::LinearMixedInteger => None,
        };

        Ok(ProblemSolution {
            status: OptimizationStatus::Optimal,
            objective_value: evaluate_objective(problem, &values),
            variable_values,
            dual_values,
        })
    }
}
