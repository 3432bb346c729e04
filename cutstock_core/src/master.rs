//! The master problem: how many stock units to cut with each known pattern
use serde::{Deserialize, Serialize};

use crate::instance::CuttingStockInstance;
use crate::optimize::constraint::Constraint;
use crate::optimize::problem::{Problem, ProblemError};
use crate::optimize::solvers::{Solver, SolverError};
use crate::optimize::variable::VariableType;
use crate::pattern::PatternSet;

/// What the master problem minimizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasterObjective {
    /// Number of stock units cut
    #[default]
    StockUnits,
    /// Total leftover length over all cut stock units
    Waste,
}

/// How demand must be met
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coverage {
    /// At least the demanded number of each piece
    #[default]
    AtLeast,
    /// Exactly the demanded number of each piece, no overproduction
    Exact,
}

/// Dual prices of the coverage constraints, one per piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualPrices(Vec<f64>);

impl DualPrices {
    /// Create dual prices, clipping solver noise below zero
    pub fn new(values: Vec<f64>) -> Self {
        Self(values.into_iter().map(|v| v.max(0.0)).collect())
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }
}

/// Solution of a master problem
#[derive(Debug, Clone, PartialEq)]
pub struct MasterSolution {
    /// Objective value Z
    pub objective_value: f64,
    /// Usage of each pattern, in pattern set order
    pub usage: Vec<f64>,
    /// Coverage duals, only for relaxations solved by a dual capable backend
    pub duals: Option<DualPrices>,
}

impl MasterSolution {
    /// Usage rounded to the nearest whole number of stock units
    pub fn rounded_usage(&self) -> Vec<u32> {
        self.usage
            .iter()
            .map(|u| u.round().max(0.0) as u32)
            .collect()
    }
}

/// A built master problem, keeping the ids needed to read its solution back
#[derive(Debug, Clone)]
pub struct MasterProblem {
    problem: Problem,
    variable_ids: Vec<String>,
    constraint_ids: Vec<String>,
}

impl MasterProblem {
    /// Build the master problem over `patterns`
    ///
    /// # Parameters
    /// - `variable_type`: [`VariableType::Continuous`] for the LP relaxation,
    ///   [`VariableType::Integer`] for the final solve
    /// - `objective`: stock units or waste, see [`MasterObjective`]
    /// - `coverage`: `>=` or `=` demand rows, see [`Coverage`]
    ///
    /// # Errors
    /// [`ProblemError::NoFeasiblePatterns`] if `patterns` is empty
    pub fn build(
        instance: &CuttingStockInstance,
        patterns: &PatternSet,
        variable_type: VariableType,
        objective: MasterObjective,
        coverage: Coverage,
    ) -> Result<Self, ProblemError> {
        if patterns.is_empty() {
            return Err(ProblemError::NoFeasiblePatterns);
        }
        let lengths = instance.lengths();
        let demands = instance.demands();
        let name = match variable_type {
            VariableType::Continuous => "cutting-stock-lp",
            _ => "cutting-stock",
        };
        let mut problem = Problem::new_minimization(name);

        let variable_ids: Vec<String> = (0..patterns.len()).map(|j| format!("x_{}", j)).collect();
        for (id, pattern) in variable_ids.iter().zip(patterns) {
            let upper_bound = match variable_type {
                VariableType::Continuous => f64::INFINITY,
                _ => f64::from(pattern.max_useful_repeats(&demands)),
            };
            problem.add_new_variable(id, None, variable_type, 0.0, upper_bound)?;
            let coefficient = match objective {
                MasterObjective::StockUnits => 1.0,
                MasterObjective::Waste => pattern.waste(&lengths, instance.stock_length()) as f64,
            };
            problem.add_new_linear_objective_term(id, coefficient)?;
        }

        let mut constraint_ids = Vec::with_capacity(instance.num_pieces());
        for (i, piece) in instance.pieces().iter().enumerate() {
            let (vars, coefs): (Vec<&str>, Vec<f64>) = variable_ids
                .iter()
                .zip(patterns)
                .filter(|(_, p)| p.count(i) > 0)
                .map(|(id, p)| (id.as_str(), f64::from(p.count(i))))
                .unzip();
            let id = format!("cover_{}", i);
            let demand = f64::from(piece.demand);
            match coverage {
                Coverage::AtLeast => {
                    problem.add_constraint(Constraint::new_at_least(&id, &vars, &coefs, demand))?
                }
                Coverage::Exact => problem.add_new_equality_constraint(&id, &vars, &coefs, demand)?,
            }
            constraint_ids.push(id);
        }

        Ok(Self {
            problem,
            variable_ids,
            constraint_ids,
        })
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// Require at least `units` stock units over all patterns
    ///
    /// Every covering plan satisfies this when `units` is the rounded up LP relaxation
    /// value. It lets branch and bound stop at the first plan reaching the bound.
    pub fn add_stock_lower_bound(&mut self, units: u64) -> Result<(), ProblemError> {
        let vars: Vec<&str> = self.variable_ids.iter().map(String::as_str).collect();
        let ones = vec![1.0; vars.len()];
        self.problem
            .add_constraint(Constraint::new_at_least("stock_units", &vars, &ones, units as f64))
    }

    /// Solve and read back pattern usage and, when available, coverage duals
    pub fn solve(&self, solver: &dyn Solver) -> Result<MasterSolution, SolverError> {
        let solution = self.problem.solve_with(solver)?;
        let usage = self
            .variable_ids
            .iter()
            .map(|id| solution.variable_value(id))
            .collect();
        let duals = solution.dual_values.as_ref().map(|duals| {
            DualPrices::new(
                self.constraint_ids
                    .iter()
                    .map(|id| duals.get(id).copied().unwrap_or(0.0))
                    .collect(),
            )
        });
        Ok(MasterSolution {
            objective_value: solution.objective_value,
            usage,
            duals,
        })
    }
}
