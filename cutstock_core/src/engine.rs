//! Solve orchestration: the exhaustive pipeline, delayed column generation and the
//! worker thread running either of them
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cancel::{CancellationToken, Cancelled};
use crate::configuration;
use crate::enumerate::PatternEnumerator;
use crate::instance::CuttingStockInstance;
use crate::master::{Coverage, MasterObjective, MasterProblem, MasterSolution};
use crate::optimize::problem::ProblemError;
use crate::optimize::solvers::{Solver, SolverError};
use crate::optimize::variable::VariableType;
use crate::pattern::PatternSet;
use crate::plan::CuttingPlan;
use crate::pricing::PricingProblem;
use crate::progress::{ProgressCallback, SolveEvent, SolveStage};

/// Enumerated patterns between two cancellation polls
const ENUMERATION_POLL_INTERVAL: usize = 4096;

// region Request
/// How the patterns of the master problem are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Enumerate every feasible pattern, then solve one integer master problem
    #[default]
    Exhaustive,
    /// Start from single piece patterns and add only the columns pricing finds
    ColumnGeneration,
}

/// What to solve and how
///
/// Fields left unset on the builder take their value from the global
/// [`CONFIGURATION`](crate::configuration::CONFIGURATION).
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct SolveRequest {
    #[builder(default)]
    pub method: Method,
    /// Minimize total waste instead of stock units, exhaustive method only
    #[builder(default = "false")]
    pub minimize_waste: bool,
    /// Meet demand exactly with trim-free patterns, exhaustive method only
    #[builder(default = "false")]
    pub exact_coverage: bool,
    #[builder(default = "configuration::current().reduced_cost_threshold")]
    pub reduced_cost_threshold: f64,
    #[builder(default = "configuration::current().max_iterations")]
    pub max_iterations: usize,
    #[builder(default = "configuration::current().separator")]
    pub separator: String,
}

impl SolveRequest {
    /// Request for `method` with every other field from the configuration
    pub fn new(method: Method) -> Self {
        let config = configuration::current();
        Self {
            method,
            minimize_waste: false,
            exact_coverage: false,
            reduced_cost_threshold: config.reduced_cost_threshold,
            max_iterations: config.max_iterations,
            separator: config.separator,
        }
    }
}

impl Default for SolveRequest {
    fn default() -> Self {
        Self::new(Method::default())
    }
}
// endregion Request

// region Outcome
/// LP relaxation value of the final pattern set and the stock units it implies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LowerBound {
    pub lp_objective: f64,
    pub stock_units: u64,
}

/// Everything a finished solve reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    pub method: Method,
    /// Objective value of the final integer master problem
    pub objective_value: f64,
    /// Not computed when minimizing waste or meeting demand exactly
    pub lower_bound: Option<LowerBound>,
    /// Number of patterns the final master problem was built over
    pub patterns: usize,
    /// Columns added by column generation, zero for the exhaustive method
    pub iterations: usize,
    pub plan: CuttingPlan,
    pub elapsed: Duration,
}

/// Terminal status of a solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum SolveOutcome {
    Solved(SolveReport),
    /// Stopped at a checkpoint before the final solve
    Cancelled,
    Infeasible(String),
    /// Pricing returned a pattern already in the master, the plan is the best found
    DegenerateStop(SolveReport),
    /// Column generation hit its iteration cap, the plan is the best found
    IterationLimit(SolveReport),
    SolverFailure(String),
}

impl SolveOutcome {
    /// The report of any outcome that produced a plan
    pub fn report(&self) -> Option<&SolveReport> {
        match self {
            SolveOutcome::Solved(report)
            | SolveOutcome::DegenerateStop(report)
            | SolveOutcome::IterationLimit(report) => Some(report),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, SolveOutcome::Cancelled)
    }
}

/// Why a solve stopped before producing a report
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("solve was cancelled")]
    Cancelled,
    #[error(transparent)]
    Problem(#[from] ProblemError),
    #[error(transparent)]
    Solver(#[from] SolverError),
    #[error("solver {0} returned no dual values for the LP relaxation")]
    MissingDuals(String),
}

impl From<Cancelled> for SolveError {
    fn from(_: Cancelled) -> Self {
        SolveError::Cancelled
    }
}

impl From<SolveError> for SolveOutcome {
    fn from(err: SolveError) -> Self {
        match err {
            SolveError::Cancelled => SolveOutcome::Cancelled,
            SolveError::Problem(ProblemError::NoFeasiblePatterns)
            | SolveError::Solver(SolverError::Infeasible) => SolveOutcome::Infeasible(err.to_string()),
            other => SolveOutcome::SolverFailure(other.to_string()),
        }
    }
}
// endregion Outcome

/// How column generation left its loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Converged,
    Degenerate,
    IterationLimit,
}

// region Engine
/// Runs one solve at a time against a solver backend
pub struct CuttingStockEngine {
    solver: Box<dyn Solver>,
    progress: Option<ProgressCallback>,
}

impl CuttingStockEngine {
    /// Engine using the solver backend of the global configuration
    pub fn new() -> Result<Self, SolverError> {
        Ok(Self::with_solver(configuration::current().solver.build()?))
    }

    pub fn with_solver(solver: Box<dyn Solver>) -> Self {
        Self {
            solver,
            progress: None,
        }
    }

    /// Receive every [`SolveEvent`] of subsequent solves
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&SolveEvent) + Send + Sync + 'static,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    pub fn solver(&self) -> &dyn Solver {
        self.solver.as_ref()
    }

    fn emit(&self, event: SolveEvent) {
        if let Some(callback) = &self.progress {
            callback(&event);
        }
    }

    /// Solve `instance` on the calling thread
    ///
    /// `token` is polled at every checkpoint up to the final integer solve. Problems
    /// and patterns built along the way are dropped before this returns, whatever the
    /// outcome.
    pub fn solve(
        &mut self,
        instance: &CuttingStockInstance,
        request: &SolveRequest,
        token: &CancellationToken,
    ) -> SolveOutcome {
        let start = Instant::now();
        info!(
            pieces = instance.num_pieces(),
            stock_length = instance.stock_length(),
            method = ?request.method,
            solver = self.solver.name(),
            "starting solve"
        );
        let result = match request.method {
            Method::Exhaustive => self.solve_exhaustive(instance, request, token, start),
            Method::ColumnGeneration => self.solve_column_generation(instance, request, token, start),
        };
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(SolveError::Cancelled) => {
                info!("solve cancelled");
                self.emit(SolveEvent::Cancelled);
                SolveOutcome::Cancelled
            }
            Err(err) => {
                warn!(error = %err, "solve failed");
                SolveOutcome::from(err)
            }
        };
        self.emit(SolveEvent::Finished {
            elapsed: start.elapsed(),
        });
        outcome
    }

    /// Move the engine onto a worker thread and solve there
    pub fn spawn(self, instance: CuttingStockInstance, request: SolveRequest) -> SolveHandle {
        self.spawn_with(instance, request, CancellationToken::new())
    }

    /// Like [`spawn`](Self::spawn), polling an existing `token`
    pub fn spawn_with(
        mut self,
        instance: CuttingStockInstance,
        request: SolveRequest,
        token: CancellationToken,
    ) -> SolveHandle {
        let worker_token = token.clone();
        let handle = std::thread::spawn(move || self.solve(&instance, &request, &worker_token));
        SolveHandle { token, handle }
    }

    fn solve_exhaustive(
        &self,
        instance: &CuttingStockInstance,
        request: &SolveRequest,
        token: &CancellationToken,
        start: Instant,
    ) -> Result<SolveOutcome, SolveError> {
        self.emit(SolveEvent::GenerationStarted {
            method: Method::Exhaustive,
        });
        let mut patterns = PatternSet::new();
        for (n, pattern) in PatternEnumerator::new(instance).enumerate() {
            if n % ENUMERATION_POLL_INTERVAL == 0 {
                token.checkpoint()?;
            }
            patterns.insert(pattern);
        }
        info!(patterns = patterns.len(), "enumeration finished");
        self.emit(SolveEvent::PatternsGenerated {
            count: patterns.len(),
        });
        token.checkpoint()?;

        let coverage = if request.exact_coverage {
            patterns.retain_trim_free(&instance.lengths(), instance.stock_length());
            debug!(patterns = patterns.len(), "kept trim-free patterns");
            Coverage::Exact
        } else {
            Coverage::AtLeast
        };
        let objective = if request.minimize_waste {
            MasterObjective::Waste
        } else {
            MasterObjective::StockUnits
        };

        let lower_bound = match (objective, coverage) {
            (MasterObjective::StockUnits, Coverage::AtLeast) => {
                Some(self.lower_bound(instance, &patterns, token)?)
            }
            _ => None,
        };

        let solution = self.solve_final(instance, &patterns, objective, coverage, lower_bound)?;
        Ok(SolveOutcome::Solved(self.report(
            instance,
            request,
            &patterns,
            &solution,
            lower_bound,
            0,
            start,
        )))
    }

    fn solve_column_generation(
        &self,
        instance: &CuttingStockInstance,
        request: &SolveRequest,
        token: &CancellationToken,
        start: Instant,
    ) -> Result<SolveOutcome, SolveError> {
        if request.minimize_waste || request.exact_coverage {
            warn!(
                minimize_waste = request.minimize_waste,
                exact_coverage = request.exact_coverage,
                "waste and exact coverage options only apply to the exhaustive method, ignoring"
            );
        }
        if !self.solver.dual_values_capable() {
            return Err(SolveError::MissingDuals(self.solver.name().to_string()));
        }
        self.emit(SolveEvent::GenerationStarted {
            method: Method::ColumnGeneration,
        });

        let lengths = instance.lengths();
        let mut patterns = PatternSet::single_piece(instance);
        let mut iterations = 0;
        let stop = loop {
            if iterations >= request.max_iterations {
                warn!(limit = request.max_iterations, "column generation iteration limit reached");
                self.emit(SolveEvent::IterationLimitReached {
                    limit: request.max_iterations,
                });
                break Stop::IterationLimit;
            }

            token.checkpoint()?;
            let relaxation = self.solve_relaxation(instance, &patterns)?;
            let Some(duals) = relaxation.duals else {
                return Err(SolveError::MissingDuals(self.solver.name().to_string()));
            };

            token.checkpoint()?;
            let priced = PricingProblem::build(instance, &duals)?.solve(self.solver.as_ref())?;
            debug!(
                iteration = iterations,
                lp_objective = relaxation.objective_value,
                pricing_objective = priced.value,
                pattern = %priced.pattern,
                "priced a column"
            );

            if !priced.is_improving(request.reduced_cost_threshold) {
                break Stop::Converged;
            }
            if patterns.contains(&priced.pattern) || !priced.pattern.fits(&lengths, instance.stock_length())
            {
                warn!(
                    iteration = iterations,
                    pattern = %priced.pattern,
                    "pricing returned a column already in the master, stopping"
                );
                self.emit(SolveEvent::DegenerateColumn {
                    iteration: iterations,
                });
                break Stop::Degenerate;
            }

            patterns.insert(priced.pattern);
            iterations += 1;
            self.emit(SolveEvent::ColumnAdded {
                iteration: iterations,
                lp_objective: relaxation.objective_value,
            });
        };
        info!(patterns = patterns.len(), iterations, ?stop, "column generation finished");
        self.emit(SolveEvent::PatternsGenerated {
            count: patterns.len(),
        });

        let lower_bound = self.lower_bound(instance, &patterns, token)?;
        let solution = self.solve_final(
            instance,
            &patterns,
            MasterObjective::StockUnits,
            Coverage::AtLeast,
            Some(lower_bound),
        )?;
        let report = self.report(
            instance,
            request,
            &patterns,
            &solution,
            Some(lower_bound),
            iterations,
            start,
        );
        Ok(match stop {
            Stop::Converged => SolveOutcome::Solved(report),
            Stop::Degenerate => SolveOutcome::DegenerateStop(report),
            Stop::IterationLimit => SolveOutcome::IterationLimit(report),
        })
    }

    fn solve_relaxation(
        &self,
        instance: &CuttingStockInstance,
        patterns: &PatternSet,
    ) -> Result<MasterSolution, SolveError> {
        let master = MasterProblem::build(
            instance,
            patterns,
            VariableType::Continuous,
            MasterObjective::StockUnits,
            Coverage::AtLeast,
        )?;
        Ok(master.solve(self.solver.as_ref())?)
    }

    /// Solve the LP relaxation over `patterns` and round its value up to whole stock units
    fn lower_bound(
        &self,
        instance: &CuttingStockInstance,
        patterns: &PatternSet,
        token: &CancellationToken,
    ) -> Result<LowerBound, SolveError> {
        token.checkpoint()?;
        self.emit(SolveEvent::SolveStarted {
            stage: SolveStage::Relaxation,
        });
        let lp_start = Instant::now();
        let relaxation = self.solve_relaxation(instance, patterns)?;
        self.emit(SolveEvent::SolveFinished {
            stage: SolveStage::Relaxation,
            objective: relaxation.objective_value,
            elapsed: lp_start.elapsed(),
        });
        let tolerance = configuration::current().tolerance;
        let lower_bound = LowerBound {
            lp_objective: relaxation.objective_value,
            stock_units: (relaxation.objective_value - tolerance).ceil().max(0.0) as u64,
        };
        info!(
            lp_objective = lower_bound.lp_objective,
            stock_units = lower_bound.stock_units,
            "LP lower bound"
        );
        self.emit(SolveEvent::LowerBound {
            lp_objective: lower_bound.lp_objective,
            stock_units: lower_bound.stock_units,
        });
        Ok(lower_bound)
    }

    /// The integer master problem; no checkpoint is polled from here on
    ///
    /// A stock unit `lower_bound` is added as a row so branch and bound can stop at the
    /// first plan that reaches it.
    fn solve_final(
        &self,
        instance: &CuttingStockInstance,
        patterns: &PatternSet,
        objective: MasterObjective,
        coverage: Coverage,
        lower_bound: Option<LowerBound>,
    ) -> Result<MasterSolution, SolveError> {
        let mut master =
            MasterProblem::build(instance, patterns, VariableType::Integer, objective, coverage)?;
        if let Some(bound) = lower_bound {
            master.add_stock_lower_bound(bound.stock_units)?;
        }
        self.emit(SolveEvent::SolveStarted {
            stage: SolveStage::Final,
        });
        let solve_start = Instant::now();
        let solution = master.solve(self.solver.as_ref())?;
        info!(
            objective = solution.objective_value,
            elapsed_ms = solve_start.elapsed().as_millis() as u64,
            "final master solved"
        );
        self.emit(SolveEvent::SolveFinished {
            stage: SolveStage::Final,
            objective: solution.objective_value,
            elapsed: solve_start.elapsed(),
        });
        Ok(solution)
    }

    #[allow(clippy::too_many_arguments)]
    fn report(
        &self,
        instance: &CuttingStockInstance,
        request: &SolveRequest,
        patterns: &PatternSet,
        solution: &MasterSolution,
        lower_bound: Option<LowerBound>,
        iterations: usize,
        start: Instant,
    ) -> SolveReport {
        let plan = CuttingPlan::interpret(
            instance,
            patterns,
            &solution.rounded_usage(),
            &request.separator,
        );
        self.emit(SolveEvent::Plan(plan.to_string()));
        SolveReport {
            method: request.method,
            objective_value: solution.objective_value,
            lower_bound,
            patterns: patterns.len(),
            iterations,
            plan,
            elapsed: start.elapsed(),
        }
    }
}
// endregion Engine

// region Handle
/// A solve running on a worker thread
pub struct SolveHandle {
    token: CancellationToken,
    handle: JoinHandle<SolveOutcome>,
}

impl SolveHandle {
    /// Ask the worker to stop at its next checkpoint
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Token shared with the worker, for cancelling from another context
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the worker and take its outcome
    pub fn join(self) -> SolveOutcome {
        match self.handle.join() {
            Ok(outcome) => outcome,
            Err(_) => SolveOutcome::SolverFailure("solver thread panicked".to_string()),
        }
    }
}
// endregion Handle

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn engine() -> CuttingStockEngine {
        CuttingStockEngine::new().unwrap()
    }

    fn recording_engine() -> (CuttingStockEngine, Arc<Mutex<Vec<SolveEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let engine = engine().on_progress(move |e| sink.lock().unwrap().push(e.clone()));
        (engine, events)
    }

    #[test]
    fn request_defaults_come_from_configuration() {
        let request = SolveRequestBuilder::default()
            .method(Method::ColumnGeneration)
            .build()
            .unwrap();
        assert_eq!(request.method, Method::ColumnGeneration);
        assert_eq!(request.reduced_cost_threshold, 1.0001);
        assert_eq!(request.max_iterations, 1000);
        assert_eq!(request.separator, " + ");
        assert!(!request.minimize_waste);
        assert_eq!(SolveRequest::default().method, Method::Exhaustive);
    }

    #[test]
    fn error_outcomes() {
        assert_eq!(
            SolveOutcome::from(SolveError::Cancelled),
            SolveOutcome::Cancelled
        );
        assert!(matches!(
            SolveOutcome::from(SolveError::Problem(ProblemError::NoFeasiblePatterns)),
            SolveOutcome::Infeasible(_)
        ));
        assert!(matches!(
            SolveOutcome::from(SolveError::Solver(SolverError::Infeasible)),
            SolveOutcome::Infeasible(_)
        ));
        assert!(matches!(
            SolveOutcome::from(SolveError::Solver(SolverError::NumericalError("x".into()))),
            SolveOutcome::SolverFailure(_)
        ));
        assert!(matches!(
            SolveOutcome::from(SolveError::MissingDuals("microlp".into())),
            SolveOutcome::SolverFailure(_)
        ));
    }

    #[test]
    fn exhaustive_events_in_order() {
        let instance = CuttingStockInstance::from_lengths(&[3, 5], &[4, 2], 10).unwrap();
        let (mut engine, events) = recording_engine();
        let outcome = engine.solve(&instance, &SolveRequest::default(), &CancellationToken::new());
        let report = outcome.report().unwrap();
        assert!((report.objective_value - 3.0).abs() < 1e-6);
        assert_eq!(report.patterns, 6);
        assert_eq!(report.iterations, 0);
        assert_eq!(report.lower_bound.unwrap().stock_units, 3);

        let events = events.lock().unwrap();
        assert_eq!(
            events[0],
            SolveEvent::GenerationStarted {
                method: Method::Exhaustive
            }
        );
        assert_eq!(events[1], SolveEvent::PatternsGenerated { count: 6 });
        assert_eq!(
            events[2],
            SolveEvent::SolveStarted {
                stage: SolveStage::Relaxation
            }
        );
        assert!(matches!(events[4], SolveEvent::LowerBound { stock_units: 3, .. }));
        assert_eq!(
            events[5],
            SolveEvent::SolveStarted {
                stage: SolveStage::Final
            }
        );
        assert!(matches!(events.last(), Some(SolveEvent::Finished { .. })));
    }

    #[test]
    fn column_generation_reports_lower_bound() {
        let instance = CuttingStockInstance::from_lengths(&[3, 5], &[4, 2], 10).unwrap();
        let (mut engine, events) = recording_engine();
        let request = SolveRequest::new(Method::ColumnGeneration);
        let outcome = engine.solve(&instance, &request, &CancellationToken::new());
        let SolveOutcome::Solved(report) = outcome else {
            panic!("expected a solved outcome, got {:?}", outcome);
        };
        let bound = report.lower_bound.unwrap();
        assert!((bound.lp_objective - 7. / 3.).abs() < 1e-5);
        assert_eq!(bound.stock_units, 3);
        assert!((report.objective_value - 3.0).abs() < 1e-6);
        assert!(events
            .lock()
            .unwrap()
            .iter()
            .any(|e| matches!(e, SolveEvent::LowerBound { stock_units: 3, .. })));
    }

    #[test]
    fn waste_objective_has_no_lower_bound() {
        let instance = CuttingStockInstance::from_lengths(&[3, 5], &[4, 2], 10).unwrap();
        let request = SolveRequestBuilder::default()
            .minimize_waste(true)
            .build()
            .unwrap();
        let outcome = engine().solve(&instance, &request, &CancellationToken::new());
        assert!(outcome.report().unwrap().lower_bound.is_none());
    }

    #[cfg(feature = "minilp")]
    #[test]
    fn column_generation_needs_a_dual_capable_solver() {
        use crate::optimize::solvers::microlp::MicrolpSolver;
        let instance = CuttingStockInstance::from_lengths(&[3, 5], &[4, 2], 10).unwrap();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let mut engine = CuttingStockEngine::with_solver(Box::new(MicrolpSolver::default()))
            .on_progress(move |e| sink.lock().unwrap().push(e.clone()));
        let request = SolveRequest::new(Method::ColumnGeneration);
        let outcome = engine.solve(&instance, &request, &CancellationToken::new());
        let SolveOutcome::SolverFailure(message) = outcome else {
            panic!("expected a solver failure, got {:?}", outcome);
        };
        assert!(message.contains("microlp"));
        // rejected before any LP is built
        let events = events.lock().unwrap();
        assert!(!events
            .iter()
            .any(|e| matches!(e, SolveEvent::GenerationStarted { .. })));
    }

    #[test]
    fn zero_iteration_cap_stops_immediately() {
        let instance = CuttingStockInstance::from_lengths(&[4, 6], &[5, 5], 10).unwrap();
        let request = SolveRequestBuilder::default()
            .method(Method::ColumnGeneration)
            .max_iterations(0usize)
            .build()
            .unwrap();
        let outcome = engine().solve(&instance, &request, &CancellationToken::new());
        let SolveOutcome::IterationLimit(report) = outcome else {
            panic!("expected the iteration limit, got {:?}", outcome);
        };
        // seeds only: 4 + 4 cut three times, 6 cut five times
        assert_eq!(report.patterns, 2);
        assert_eq!(report.iterations, 0);
        assert!((report.objective_value - 8.0).abs() < 1e-6);
    }

    #[test]
    fn cancelling_from_a_progress_callback() {
        let instance = CuttingStockInstance::from_lengths(&[3, 5], &[4, 2], 10).unwrap();
        let token = CancellationToken::new();
        let remote = token.clone();
        let mut engine = engine().on_progress(move |e| {
            if matches!(e, SolveEvent::PatternsGenerated { .. }) {
                remote.cancel();
            }
        });
        let outcome = engine.solve(&instance, &SolveRequest::default(), &token);
        assert_eq!(outcome, SolveOutcome::Cancelled);
    }

    #[test]
    fn cancelling_during_the_final_solve_is_ignored() {
        let instance = CuttingStockInstance::from_lengths(&[3, 5], &[4, 2], 10).unwrap();
        let token = CancellationToken::new();
        let remote = token.clone();
        let mut engine = engine().on_progress(move |e| {
            if matches!(
                e,
                SolveEvent::SolveStarted {
                    stage: SolveStage::Final
                }
            ) {
                remote.cancel();
            }
        });
        let request = SolveRequest::new(Method::ColumnGeneration);
        let outcome = engine.solve(&instance, &request, &token);
        assert!(matches!(outcome, SolveOutcome::Solved(_)));
        assert!(token.is_cancelled());
    }

    #[test]
    fn spawned_solve_joins() {
        let instance = CuttingStockInstance::from_lengths(&[10], &[1], 10).unwrap();
        let handle = engine().spawn(instance, SolveRequest::default());
        let outcome = handle.join();
        assert_eq!(outcome.report().unwrap().plan.to_string(), "1 x (10)\n");
    }
}
