//! The pricing subproblem of column generation
//!
//! A bounded knapsack over the piece catalog: fill one stock unit so that the summed
//! dual prices of the pieces cut are as large as possible. A pattern is worth adding to
//! the master when that sum exceeds 1, the cost of one stock unit.
use crate::instance::CuttingStockInstance;
use crate::master::DualPrices;
use crate::optimize::constraint::Constraint;
use crate::optimize::problem::{Problem, ProblemError};
use crate::optimize::solvers::{Solver, SolverError};
use crate::optimize::variable::VariableType;
use crate::pattern::Pattern;

/// Best pattern found by the knapsack and its value under the current duals
#[derive(Debug, Clone, PartialEq)]
pub struct PricedPattern {
    pub pattern: Pattern,
    /// Knapsack objective, the summed dual value of the pattern's pieces
    pub value: f64,
}

impl PricedPattern {
    /// Reduced cost of the pattern as a master column, negative when improving
    pub fn reduced_cost(&self) -> f64 {
        1.0 - self.value
    }

    /// Whether the pattern improves the master, given the acceptance threshold on
    /// the knapsack objective
    pub fn is_improving(&self, threshold: f64) -> bool {
        self.value >= threshold
    }
}

/// A built pricing knapsack
#[derive(Debug, Clone)]
pub struct PricingProblem {
    problem: Problem,
    variable_ids: Vec<String>,
}

impl PricingProblem {
    /// Build `max sum(pi[i] * z[i])` subject to `sum(L[i] * z[i]) <= S`, `z` integer
    ///
    /// Each `z[i]` is bounded by `floor(S / L[i])`, the most copies of piece `i` one
    /// stock unit holds.
    pub fn build(instance: &CuttingStockInstance, duals: &DualPrices) -> Result<Self, ProblemError> {
        let mut problem = Problem::new_maximization("knapsack-subproblem");
        let stock_length = instance.stock_length();
        let variable_ids: Vec<String> = (0..instance.num_pieces())
            .map(|i| format!("z_{}", i))
            .collect();
        for ((id, price), piece) in variable_ids.iter().zip(duals.values()).zip(instance.pieces()) {
            let most = f64::from(stock_length / piece.length);
            problem.add_new_variable(id, None, VariableType::Integer, 0.0, most)?;
            problem.add_new_linear_objective_term(id, *price)?;
        }
        let vars: Vec<&str> = variable_ids.iter().map(String::as_str).collect();
        let lengths: Vec<f64> = instance.lengths().into_iter().map(f64::from).collect();
        problem.add_constraint(Constraint::new_at_most(
            "stock_length",
            &vars,
            &lengths,
            f64::from(stock_length),
        ))?;
        Ok(Self {
            problem,
            variable_ids,
        })
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// Solve the knapsack; integer values are rounded to the nearest count
    pub fn solve(&self, solver: &dyn Solver) -> Result<PricedPattern, SolverError> {
        let solution = self.problem.solve_with(solver)?;
        let counts = self
            .variable_ids
            .iter()
            .map(|id| solution.variable_value(id).round().max(0.0) as u32)
            .collect();
        Ok(PricedPattern {
            pattern: Pattern::new(counts),
            value: solution.objective_value,
        })
    }
}
