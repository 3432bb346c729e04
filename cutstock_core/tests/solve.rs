use cutstock_core::enumerate::enumerate_patterns;
use cutstock_core::progress::SolveEvent;
use cutstock_core::{
    CancellationToken, CuttingStockEngine, CuttingStockInstance, Method, SolveOutcome,
    SolveReport, SolveRequest, SolveRequestBuilder,
};

fn solve(instance: &CuttingStockInstance, request: &SolveRequest) -> SolveOutcome {
    let mut engine = CuttingStockEngine::new().unwrap();
    engine.solve(instance, request, &CancellationToken::new())
}

fn small() -> CuttingStockInstance {
    CuttingStockInstance::from_lengths(&[3, 5], &[4, 2], 10).unwrap()
}

fn mixed() -> CuttingStockInstance {
    CuttingStockInstance::from_lengths(&[4, 6], &[5, 5], 10).unwrap()
}

fn assert_covers_demand(instance: &CuttingStockInstance, report: &SolveReport) {
    let produced = report.plan.produced(instance);
    for (made, wanted) in produced.iter().zip(instance.demands()) {
        assert!(*made >= u64::from(wanted));
    }
}

#[test]
fn column_generation_agrees_with_enumeration() {
    let instances = [
        (small(), 3.0),
        (mixed(), 5.0),
        // pricing has to find 3 + 4 + 5 to reach five stock units
        (
            CuttingStockInstance::from_lengths(&[3, 4, 5], &[7, 5, 3], 12).unwrap(),
            5.0,
        ),
        (
            CuttingStockInstance::from_lengths(&[6, 7, 9], &[3, 11, 4], 20).unwrap(),
            8.0,
        ),
    ];
    for (instance, optimum) in instances {
        let exhaustive = solve(&instance, &SolveRequest::new(Method::Exhaustive));
        let generated = solve(&instance, &SolveRequest::new(Method::ColumnGeneration));
        let exhaustive = exhaustive.report().unwrap();
        let generated = generated.report().unwrap();

        assert!((exhaustive.objective_value - optimum).abs() < 1e-6);
        assert!((generated.objective_value - optimum).abs() < 1e-6);
        assert!(generated.patterns <= exhaustive.patterns);
        let bound = generated.lower_bound.unwrap();
        assert!(bound.stock_units as f64 <= exhaustive.objective_value + 1e-6);

        for report in [exhaustive, generated] {
            assert_covers_demand(&instance, report);
        }
    }
}

#[test]
#[cfg_attr(debug_assertions, ignore = "slow without optimizations")]
fn demo_by_column_generation_covers_demand() {
    let instance = CuttingStockInstance::demo();
    let outcome = solve(&instance, &SolveRequest::new(Method::ColumnGeneration));
    let SolveOutcome::Solved(report) = outcome else {
        panic!("expected a solved outcome, got {:?}", outcome);
    };
    assert_covers_demand(&instance, &report);
    let bound = report.lower_bound.unwrap();
    assert!(report.objective_value + 1e-6 >= bound.stock_units as f64);
    assert_eq!(report.plan.stock_used(), report.objective_value.round() as u64);
}

#[test]
fn column_generation_adds_the_mixed_pattern() {
    let instance = mixed();
    let outcome = solve(&instance, &SolveRequest::new(Method::ColumnGeneration));
    let SolveOutcome::Solved(report) = outcome else {
        panic!("expected a solved outcome, got {:?}", outcome);
    };
    assert_eq!(report.iterations, 1);
    assert_eq!(report.patterns, 3);
    assert!((report.objective_value - 5.0).abs() < 1e-6);
    assert_eq!(report.lower_bound.unwrap().stock_units, 5);
    assert_eq!(report.plan.to_string(), "5 x (4 + 6)\n");
}

#[test]
fn column_generation_stays_within_the_pattern_count() {
    let instance = CuttingStockInstance::from_lengths(&[2, 3, 7], &[9, 5, 3], 17).unwrap();
    let feasible = enumerate_patterns(&instance).len();
    let outcome = solve(&instance, &SolveRequest::new(Method::ColumnGeneration));
    let report = outcome.report().unwrap();
    assert!(report.iterations <= feasible);
    assert!(report.patterns <= feasible);
}

#[test]
fn repeated_solves_give_the_same_plan() {
    for method in [Method::Exhaustive, Method::ColumnGeneration] {
        let request = SolveRequest::new(method);
        let first = solve(&small(), &request);
        let second = solve(&small(), &request);
        let (first, second) = (first.report().unwrap(), second.report().unwrap());
        assert_eq!(first.plan, second.plan);
        assert_eq!(first.objective_value, second.objective_value);
    }
}

#[test]
fn cancelled_before_the_first_checkpoint() {
    for method in [Method::Exhaustive, Method::ColumnGeneration] {
        let token = CancellationToken::new();
        token.cancel();
        let mut engine = CuttingStockEngine::new().unwrap();
        let outcome = engine.solve(&small(), &SolveRequest::new(method), &token);
        assert_eq!(outcome, SolveOutcome::Cancelled);
        assert!(outcome.report().is_none());
    }
}

#[test]
fn cancelled_through_the_handle() {
    let token = CancellationToken::new();
    let remote = token.clone();
    let engine = CuttingStockEngine::new().unwrap().on_progress(move |e| {
        if matches!(e, SolveEvent::ColumnAdded { .. }) {
            remote.cancel();
        }
    });
    let handle = engine.spawn_with(mixed(), SolveRequest::new(Method::ColumnGeneration), token);
    let outcome = handle.join();
    assert_eq!(outcome, SolveOutcome::Cancelled);
}

#[test]
fn single_piece_equal_to_the_stock() {
    let instance = CuttingStockInstance::from_lengths(&[10], &[1], 10).unwrap();
    for method in [Method::Exhaustive, Method::ColumnGeneration] {
        let outcome = solve(&instance, &SolveRequest::new(method));
        let SolveOutcome::Solved(report) = outcome else {
            panic!("expected a solved outcome, got {:?}", outcome);
        };
        assert!((report.objective_value - 1.0).abs() < 1e-6);
        assert_eq!(report.plan.to_string(), "1 x (10)\n");
    }
}

#[test]
fn exact_coverage_without_trim_free_patterns_is_infeasible() {
    let instance = CuttingStockInstance::from_lengths(&[7], &[1], 10).unwrap();
    let request = SolveRequestBuilder::default()
        .method(Method::Exhaustive)
        .exact_coverage(true)
        .build()
        .unwrap();
    assert!(matches!(solve(&instance, &request), SolveOutcome::Infeasible(_)));
}

#[test]
fn exact_coverage_ignores_patterns_with_waste() {
    // 3 + 5 leaves 2 behind, and 5 + 5 alone cannot supply the 3
    let instance = CuttingStockInstance::from_lengths(&[3, 5], &[1, 1], 10).unwrap();
    let request = SolveRequestBuilder::default()
        .exact_coverage(true)
        .build()
        .unwrap();
    assert!(matches!(solve(&instance, &request), SolveOutcome::Infeasible(_)));
    let relaxed = solve(&instance, &SolveRequest::default());
    assert!((relaxed.report().unwrap().objective_value - 1.0).abs() < 1e-6);
}

#[test]
fn exact_coverage_uses_only_trim_free_patterns() {
    let instance = CuttingStockInstance::from_lengths(&[2, 5], &[5, 2], 10).unwrap();
    let request = SolveRequestBuilder::default()
        .exact_coverage(true)
        .build()
        .unwrap();
    let outcome = solve(&instance, &request);
    let report = outcome.report().unwrap();
    assert_eq!(report.plan.total_waste(), 0);
    assert_eq!(report.plan.produced(&instance), vec![5, 2]);
    assert!((report.objective_value - 2.0).abs() < 1e-6);
}

#[test]
fn minimizing_waste() {
    let request = SolveRequestBuilder::default()
        .minimize_waste(true)
        .build()
        .unwrap();
    let outcome = solve(&small(), &request);
    let report = outcome.report().unwrap();
    assert!((report.objective_value - report.plan.total_waste() as f64).abs() < 1e-6);
}

#[test]
fn column_generation_ignores_exhaustive_only_flags() {
    let request = SolveRequestBuilder::default()
        .method(Method::ColumnGeneration)
        .exact_coverage(true)
        .build()
        .unwrap();
    let outcome = solve(&small(), &request);
    assert!((outcome.report().unwrap().objective_value - 3.0).abs() < 1e-6);
}
