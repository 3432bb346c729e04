use std::sync::{LazyLock, RwLock};

use crate::optimize::solvers::SolverBackend;

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

/// Process wide defaults, read when a [`SolveRequest`](crate::engine::SolveRequest) leaves
/// a field unset
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// Column generation keeps going only while the pricing objective reaches this value
    pub reduced_cost_threshold: f64,
    /// Upper limit on column generation iterations
    pub max_iterations: usize,
    /// Distance from an integer still read back as that integer
    pub tolerance: f64,
    /// Joins the piece lengths of one cutting plan line
    pub separator: String,
    pub solver: SolverBackend,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            reduced_cost_threshold: 1.0001,
            max_iterations: 1000,
            tolerance: 1e-6,
            separator: " + ".to_string(),
            solver: SolverBackend::Auto,
        }
    }
}

/// Snapshot of the current configuration
///
/// A poisoned lock only means another thread panicked mid-update, the values are still
/// plain data.
pub fn current() -> Configuration {
    match CONFIGURATION.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}
