//! Module for constructing and solving optimization problems

pub mod constraint;
pub mod objective;
pub mod problem;
pub mod solvers;
pub mod variable;

use indexmap::IndexMap;

/// Struct representing the solution to an optimization problem
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemSolution {
    /// The status of the optimization problem, representing if the optimization was
    /// completed successfully
    pub status: OptimizationStatus,
    /// Optimized value of the objective
    pub objective_value: f64,
    /// Values of the variables at the optimum, keyed by variable id
    pub variable_values: IndexMap<String, f64>,
    /// Values of the dual variables at the optimum
    ///
    /// Some(IndexMap), keyed by constraint id, holding the change of the objective per
    /// unit increase of the constraint's right hand side, if the solver supports
    /// retrieving the dual values for this problem, None otherwise
    pub dual_values: Option<IndexMap<String, f64>>,
}

impl ProblemSolution {
    /// Value of a variable at the optimum, 0 if the variable is unknown
    pub fn variable_value(&self, id: &str) -> f64 {
        self.variable_values.get(id).copied().unwrap_or(0.0)
    }

    /// Dual value of a constraint, if duals were computed
    pub fn dual_value(&self, id: &str) -> Option<f64> {
        self.dual_values.as_ref().and_then(|d| d.get(id).copied())
    }
}

/// Status of a completed optimization
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OptimizationStatus {
    /// Problem has been optimized
    Optimal,
    /// An approximate solution has been found
    AlmostOptimal,
}
