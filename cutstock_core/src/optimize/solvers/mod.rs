//! Solver adapters turning a [`Problem`] into a [`ProblemSolution`]
//!
//! Clarabel is always available and handles continuous problems, including dual values.
//! Mixed integer problems need the `minilp` (microlp, enabled by default) or `highs`
//! feature.
pub mod clarabel;
#[cfg(feature = "highs")]
pub mod highs;
#[cfg(feature = "minilp")]
pub mod microlp;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::optimize::problem::{Problem, ProblemType};
use crate::optimize::ProblemSolution;

/// Interface every solver backend implements
///
/// A call to [`Solver::solve`] is self-contained: the backend's native model is created
/// and released inside the call.
pub trait Solver: Send + Sync {
    /// Name of the backend, used in log and error messages
    fn name(&self) -> &str;

    /// Whether the backend can handle integer and binary variables
    fn integer_variable_capable(&self) -> bool;

    /// Whether the backend reports dual values for continuous problems
    fn dual_values_capable(&self) -> bool;

    /// Solve the problem to optimality
    fn solve(&self, problem: &Problem) -> Result<ProblemSolution, SolverError>;
}

/// Errors reported by solver backends
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The constraints can't be satisfied simultaneously
    #[error("problem is infeasible")]
    Infeasible,
    /// The objective can be improved without limit
    #[error("problem is unbounded")]
    Unbounded,
    /// The backend stopped with a numerical failure, or without reaching optimality
    #[error("numerical error: {0}")]
    NumericalError(String),
    /// The backend can't handle this kind of problem
    #[error("unsupported problem: {0}")]
    Unsupported(String),
    /// Any other backend failure
    #[error("solver backend failed: {0}")]
    Backend(String),
}

/// Selects the solver backend used by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverBackend {
    /// Clarabel for continuous problems, the best available MIP backend otherwise
    #[default]
    Auto,
    /// Clarabel interior point solver, continuous problems only
    Clarabel,
    /// microlp simplex and branch and bound, requires the `minilp` feature
    Microlp,
    /// HiGHS, requires the `highs` feature
    Highs,
}

impl SolverBackend {
    /// Create the solver for this backend
    pub fn build(self) -> Result<Box<dyn Solver>, SolverError> {
        match self {
            SolverBackend::Auto => Ok(Box::new(AutoSolver::new())),
            SolverBackend::Clarabel => Ok(Box::new(clarabel::ClarabelSolver::default())),
            SolverBackend::Microlp => {
                cfg_if::cfg_if! {
                    if #[cfg(feature = "minilp")] {
                        Ok(Box::new(microlp::MicrolpSolver::default()))
                    } else {
                        Err(SolverError::Unsupported("the minilp feature is not enabled".to_string()))
                    }
                }
            }
            SolverBackend::Highs => {
                cfg_if::cfg_if! {
                    if #[cfg(feature = "highs")] {
                        Ok(Box::new(highs::HighsSolver::default()))
                    } else {
                        Err(SolverError::Unsupported("the highs feature is not enabled".to_string()))
                    }
                }
            }
        }
    }
}

impl Display for SolverBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverBackend::Auto => write!(f, "auto"),
            SolverBackend::Clarabel => write!(f, "clarabel"),
            SolverBackend::Microlp => write!(f, "microlp"),
            SolverBackend::Highs => write!(f, "highs"),
        }
    }
}

impl FromStr for SolverBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(SolverBackend::Auto),
            "clarabel" => Ok(SolverBackend::Clarabel),
            "microlp" => Ok(SolverBackend::Microlp),
            "highs" => Ok(SolverBackend::Highs),
            _ => Err(format!(
                "invalid solver '{}', expected: auto, clarabel, microlp, or highs",
                s
            )),
        }
    }
}

/// Dispatches continuous problems to Clarabel and mixed integer problems to the
/// integer backend compiled in
pub struct AutoSolver {
    continuous: clarabel::ClarabelSolver,
    integer: Option<Box<dyn Solver>>,
}

impl AutoSolver {
    /// Create a new dispatching solver
    pub fn new() -> Self {
        cfg_if::cfg_if! {
            if #[cfg(feature = "minilp")] {
                let integer: Option<Box<dyn Solver>> = Some(Box::new(microlp::MicrolpSolver::default()));
            } else if #[cfg(feature = "highs")] {
                let integer: Option<Box<dyn Solver>> = Some(Box::new(highs::HighsSolver::default()));
            } else {
                let integer: Option<Box<dyn Solver>> = None;
            }
        }
        Self {
            continuous: clarabel::ClarabelSolver::default(),
            integer,
        }
    }
}

impl Default for AutoSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for AutoSolver {
    fn name(&self) -> &str {
        "auto"
    }

    fn integer_variable_capable(&self) -> bool {
        self.integer.is_some()
    }

    fn dual_values_capable(&self) -> bool {
        true
    }

    fn solve(&self, problem: &Problem) -> Result<ProblemSolution, SolverError> {
        match problem.problem_type() {
            ProblemType::LinearContinuous => self.continuous.solve(problem),
            ProblemType::LinearMixedInteger => match &self.integer {
                Some(solver) => solver.solve(problem),
                None => Err(SolverError::Unsupported(
                    "no mixed integer backend enabled".to_string(),
                )),
            },
        }
    }
}

/// Fold an objective value back from per-variable values, used by backends that
/// don't report one directly
pub(crate) fn evaluate_objective(problem: &Problem, values: &[f64]) -> f64 {
    problem
        .objective()
        .terms()
        .iter()
        .filter_map(|t| {
            problem
                .get_variable(&t.variable)
                .map(|v| t.coefficient * values[v.index()])
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::constraint::Constraint;
    use crate::optimize::variable::VariableType;

    #[test]
    fn backend_names_round_trip() {
        for backend in [
            SolverBackend::Auto,
            SolverBackend::Clarabel,
            SolverBackend::Microlp,
            SolverBackend::Highs,
        ] {
            assert_eq!(backend.to_string().parse::<SolverBackend>(), Ok(backend));
        }
        assert!("gurobi".parse::<SolverBackend>().is_err());
    }

    #[test]
    fn clarabel_rejects_integer_problems() {
        let mut problem = Problem::new_minimization("p");
        problem
            .add_new_variable("x", None, VariableType::Integer, 0., 10.)
            .unwrap();
        let solver = SolverBackend::Clarabel.build().unwrap();
        assert!(matches!(
            problem.solve_with(solver.as_ref()),
            Err(SolverError::Unsupported(_))
        ));
    }

    #[cfg(feature = "minilp")]
    #[test]
    fn auto_dispatches_integer_problems() {
        let mut problem = Problem::new_maximization("knapsack");
        problem
            .add_new_variable("a", None, VariableType::Integer, 0., 3.)
            .unwrap();
        problem
            .add_new_variable("b", None, VariableType::Integer, 0., 2.)
            .unwrap();
        problem.add_new_linear_objective_term("a", 3.).unwrap();
        problem.add_new_linear_objective_term("b", 5.).unwrap();
        problem
            .add_constraint(Constraint::new_at_most("length", &["a", "b"], &[3., 5.], 10.))
            .unwrap();

        let solution = problem.solve_with(&AutoSolver::new()).unwrap();
        assert!((solution.objective_value - 10.).abs() < 1e-6);
    }
}
