//! Implements a solver interface for Clarabel
//!
//! Clarabel solves `min 1/2 x'Px + q'x` subject to `Ax + s = b`, `s` in a product of
//! cones. Linear problems map onto it with `P = 0`, equality rows in a zero cone and
//! every one sided row (including variable bounds) in the nonnegative cone.
use ::clarabel::algebra::CscMatrix;
use ::clarabel::solver::{DefaultSettingsBuilder, DefaultSolver, IPSolver, SolverStatus, SupportedConeT};
use indexmap::IndexMap;

use crate::optimize::constraint::Constraint;
use crate::optimize::objective::ObjectiveSense;
use crate::optimize::problem::{Problem, ProblemType};
use crate::optimize::solvers::{evaluate_objective, Solver, SolverError};
use crate::optimize::{OptimizationStatus, ProblemSolution};

/// Clarabel interior point solver, continuous problems only
#[derive(Clone, Debug)]
pub struct ClarabelSolver {
    /// Print Clarabel's iteration log
    pub verbose: bool,
}

impl Default for ClarabelSolver {
    fn default() -> Self {
        Self { verbose: false }
    }
}

/// Where the dual of a problem constraint lives in Clarabel's `z` vector
struct DualRows {
    /// Row of the `>= lower` or `= equals` part
    lower: Option<usize>,
    /// Row of the `<= upper` part
    upper: Option<usize>,
    is_equality: bool,
}

/// Rows of the conic constraint matrix, split by cone
#[derive(Default)]
struct RowSet {
    equality: Vec<(Vec<(usize, f64)>, f64)>,
    nonnegative: Vec<(Vec<(usize, f64)>, f64)>,
}

impl Solver for ClarabelSolver {
    fn name(&self) -> &str {
        "clarabel"
    }

    fn integer_variable_capable(&self) -> bool {
        false
    }

    fn dual_values_capable(&self) -> bool {
        true
    }

    fn solve(&self, problem: &Problem) -> Result<ProblemSolution, SolverError> {
        if problem.problem_type() != ProblemType::LinearContinuous {
            return Err(SolverError::Unsupported(
                "clarabel only solves continuous problems".to_string(),
            ));
        }
        let n = problem.num_variables();
        let sign = match problem.objective().sense() {
            ObjectiveSense::Minimize => 1.0,
            ObjectiveSense::Maximize => -1.0,
        };

        let mut q = vec![0.0; n];
        for term in problem.objective().terms() {
            if let Some(var) = problem.get_variable(&term.variable) {
                q[var.index()] += sign * term.coefficient;
            }
        }

        // Nonnegative rows are indexed after all equality rows once assembled, so
        // remember them relative to their own block first
        let mut rows = RowSet::default();
        let mut dual_rows: Vec<(String, DualRows)> = Vec::with_capacity(problem.num_constraints());
        for constraint in problem.constraints() {
            let terms: Vec<(usize, f64)> = constraint
                .get_terms()
                .iter()
                .filter_map(|t| {
                    problem
                        .get_variable(&t.variable)
                        .map(|v| (v.index(), t.coefficient))
                })
                .collect();
            let entry = match constraint {
                Constraint::Equality { equals, .. } => {
                    rows.equality.push((terms, *equals));
                    DualRows {
                        lower: Some(rows.equality.len() - 1),
                        upper: None,
                        is_equality: true,
                    }
                }
                Constraint::Inequality {
                    lower_bound,
                    upper_bound,
                    ..
                } => {
                    let mut entry = DualRows {
                        lower: None,
                        upper: None,
                        is_equality: false,
                    };
                    if lower_bound.is_finite() {
                        let negated = terms.iter().map(|(j, a)| (*j, -a)).collect();
                        rows.nonnegative.push((negated, -lower_bound));
                        entry.lower = Some(rows.nonnegative.len() - 1);
                    }
                    if upper_bound.is_finite() {
                        rows.nonnegative.push((terms, *upper_bound));
                        entry.upper = Some(rows.nonnegative.len() - 1);
                    }
                    entry
                }
            };
            dual_rows.push((constraint.get_id().to_string(), entry));
        }
        for var in problem.variables() {
            if var.lower_bound.is_finite() {
                rows.nonnegative
                    .push((vec![(var.index(), -1.0)], -var.lower_bound));
            }
            if var.upper_bound.is_finite() {
                rows.nonnegative
                    .push((vec![(var.index(), 1.0)], var.upper_bound));
            }
        }

        let offset = rows.equality.len();
        let (a, b) = assemble(&rows, n);
        let mut cones = Vec::new();
        if !rows.equality.is_empty() {
            cones.push(SupportedConeT::ZeroConeT(rows.equality.len()));
        }
        if !rows.nonnegative.is_empty() {
            cones.push(SupportedConeT::NonnegativeConeT(rows.nonnegative.len()));
        }

        let settings = DefaultSettingsBuilder::<f64>::default()
            .verbose(self.verbose)
            .build()
            .map_err(|e| SolverError::Backend(e.to_string()))?;
        let p = CscMatrix::<f64>::zeros((n, n));
        let mut solver = DefaultSolver::new(&p, &q, &a, &b, &cones, settings);
        solver.solve();

        let status = match solver.solution.status {
            SolverStatus::Solved => OptimizationStatus::Optimal,
            SolverStatus::AlmostSolved => OptimizationStatus::AlmostOptimal,
            SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
                return Err(SolverError::Infeasible)
            }
            SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
                return Err(SolverError::Unbounded)
            }
            other => return Err(SolverError::NumericalError(format!("{:?}", other))),
        };

        let x = &solver.solution.x;
        let z = &solver.solution.z;
        let variable_values: IndexMap<String, f64> = problem
            .variables()
            .map(|v| (v.id.clone(), x[v.index()]))
            .collect();
        // Clarabel's z is the sensitivity of its own (minimized) objective, convert to the
        // change of the problem's objective per unit of right hand side
        let dual_values: IndexMap<String, f64> = dual_rows
            .into_iter()
            .map(|(id, rows)| {
                let dual = if rows.is_equality {
                    rows.lower.map_or(0.0, |r| -sign * z[r])
                } else {
                    rows.lower.map_or(0.0, |r| sign * z[offset + r])
                        - rows.upper.map_or(0.0, |r| sign * z[offset + r])
                };
                (id, dual)
            })
            .collect();

        Ok(ProblemSolution {
            status,
            objective_value: evaluate_objective(problem, x),
            variable_values,
            dual_values: Some(dual_values),
        })
    }
}

/// Build the compressed sparse column matrix `A` and right hand side `b`, equality
/// rows first
fn assemble(rows: &RowSet, n: usize) -> (CscMatrix<f64>, Vec<f64>) {
    let mut columns: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
    let mut b = Vec::with_capacity(rows.equality.len() + rows.nonnegative.len());
    for (row, (terms, rhs)) in rows.equality.iter().chain(&rows.nonnegative).enumerate() {
        for &(col, value) in terms {
            let column = &mut columns[col];
            // Repeated variable within one row
            if column.last().is_some_and(|(r, _)| *r == row) {
                if let Some(last) = column.last_mut() {
                    last.1 += value;
                }
            } else {
                column.push((row, value));
            }
        }
        b.push(*rhs);
    }

    let mut colptr = Vec::with_capacity(n + 1);
    let mut rowval = Vec::new();
    let mut nzval = Vec::new();
    colptr.push(0);
    for column in columns {
        for (row, value) in column {
            rowval.push(row);
            nzval.push(value);
        }
        colptr.push(rowval.len());
    }
    (CscMatrix::new(b.len(), n, colptr, rowval, nzval), b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::variable::VariableType;

    #[test]
    fn covering_lp_with_duals() {
        // min x0 + x1, 3 x0 >= 4, 2 x1 >= 2
        let mut problem = Problem::new_minimization("cover");
        problem
            .add_new_variable("x0", None, VariableType::Continuous, 0., f64::INFINITY)
            .unwrap();
        problem
            .add_new_variable("x1", None, VariableType::Continuous, 0., f64::INFINITY)
            .unwrap();
        problem.add_new_linear_objective_term("x0", 1.).unwrap();
        problem.add_new_linear_objective_term("x1", 1.).unwrap();
        problem
            .add_constraint(Constraint::new_at_least("c0", &["x0"], &[3.], 4.))
            .unwrap();
        problem
            .add_constraint(Constraint::new_at_least("c1", &["x1"], &[2.], 2.))
            .unwrap();

        let solution = ClarabelSolver::default().solve(&problem).unwrap();
        assert!((solution.objective_value - (4. / 3. + 1.)).abs() < 1e-6);
        assert!((solution.variable_value("x0") - 4. / 3.).abs() < 1e-6);
        assert!((solution.dual_value("c0").unwrap() - 1. / 3.).abs() < 1e-6);
        assert!((solution.dual_value("c1").unwrap() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn equality_and_maximization() {
        // max x + y, x + y = 3, x <= 2
        let mut problem = Problem::new_maximization("eq");
        problem
            .add_new_variable("x", None, VariableType::Continuous, 0., 2.)
            .unwrap();
        problem
            .add_new_variable("y", None, VariableType::Continuous, 0., f64::INFINITY)
            .unwrap();
        problem.add_new_linear_objective_term("x", 1.).unwrap();
        problem.add_new_linear_objective_term("y", 1.).unwrap();
        problem
            .add_new_equality_constraint("sum", &["x", "y"], &[1., 1.], 3.)
            .unwrap();

        let solution = ClarabelSolver::default().solve(&problem).unwrap();
        assert!((solution.objective_value - 3.).abs() < 1e-6);
        assert!((solution.dual_value("sum").unwrap() - 1.).abs() < 1e-5);
    }

    #[test]
    fn infeasible_lp() {
        let mut problem = Problem::new_minimization("infeasible");
        problem
            .add_new_variable("x", None, VariableType::Continuous, 0., 1.)
            .unwrap();
        problem.add_new_linear_objective_term("x", 1.).unwrap();
        problem
            .add_constraint(Constraint::new_at_least("c", &["x"], &[1.], 2.))
            .unwrap();
        assert_eq!(
            ClarabelSolver::default().solve(&problem),
            Err(SolverError::Infeasible)
        );
    }
}
