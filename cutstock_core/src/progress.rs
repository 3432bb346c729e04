//! Progress events emitted while a solve runs
use std::fmt::{Display, Formatter};
use std::time::Duration;

use crate::engine::Method;

/// Progress callback for long-running solves
pub type ProgressCallback = Box<dyn Fn(&SolveEvent) + Send + Sync>;

/// Which master problem a solve event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStage {
    /// LP relaxation over the final column generation pattern set
    Relaxation,
    /// The integer master problem whose solution is reported
    Final,
}

/// A coarse milestone of a solve
#[derive(Debug, Clone, PartialEq)]
pub enum SolveEvent {
    GenerationStarted { method: Method },
    PatternsGenerated { count: usize },
    ColumnAdded { iteration: usize, lp_objective: f64 },
    DegenerateColumn { iteration: usize },
    IterationLimitReached { limit: usize },
    SolveStarted { stage: SolveStage },
    SolveFinished {
        stage: SolveStage,
        objective: f64,
        elapsed: Duration,
    },
    /// LP relaxation bound on the number of stock units
    LowerBound { lp_objective: f64, stock_units: u64 },
    /// The rendered cutting plan
    Plan(String),
    Finished { elapsed: Duration },
    Cancelled,
}

impl Display for SolveEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveEvent::GenerationStarted {
                method: Method::Exhaustive,
            } => write!(f, "Generating all patterns..."),
            SolveEvent::GenerationStarted {
                method: Method::ColumnGeneration,
            } => write!(f, "Starting delayed column generation process..."),
            SolveEvent::PatternsGenerated { count } => write!(f, "{} patterns generated.", count),
            SolveEvent::ColumnAdded {
                iteration,
                lp_objective,
            } => write!(f, "Iteration {}: LP Z = {:.4}, column added.", iteration, lp_objective),
            SolveEvent::DegenerateColumn { iteration } => write!(
                f,
                "Stopping early at iteration {}: pricing returned a pattern already in use.",
                iteration
            ),
            SolveEvent::IterationLimitReached { limit } => {
                write!(f, "Stopping early: iteration limit of {} reached.", limit)
            }
            SolveEvent::SolveStarted {
                stage: SolveStage::Relaxation,
            } => write!(f, "Solving LP..."),
            SolveEvent::SolveStarted {
                stage: SolveStage::Final,
            } => write!(f, "Solving IP..."),
            SolveEvent::SolveFinished {
                objective, elapsed, ..
            } => write!(f, "Done in {:.3} seconds, Z = {:.2}", elapsed.as_secs_f64(), objective),
            SolveEvent::LowerBound {
                lp_objective,
                stock_units,
            } => write!(
                f,
                "Z = {:.2} so a minimum of {} stock pieces are required.",
                lp_objective, stock_units
            ),
            SolveEvent::Plan(plan) => write!(f, "{}", plan.trim_end()),
            SolveEvent::Finished { elapsed } => {
                write!(f, "Took {:.3} seconds.", elapsed.as_secs_f64())
            }
            SolveEvent::Cancelled => write!(f, "Solving stopped!"),
        }
    }
}
