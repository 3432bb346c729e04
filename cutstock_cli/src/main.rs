use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use cutstock_core::io::json;
use cutstock_core::optimize::solvers::SolverBackend;
use cutstock_core::{CuttingStockEngine, CuttingStockInstance, Method, SolveOutcome, SolveRequest};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "cutstock",
    about = "1D cutting stock optimizer: cut stock of one length into the demanded pieces"
)]
struct Cli {
    /// JSON order table: {"stock_length": N, "pieces": [{"length": L, "demand": D}, ...]}
    #[arg(long, required_unless_present = "demo", conflicts_with = "demo")]
    input: Option<PathBuf>,

    /// Solve the built-in demo order instead of reading one
    #[arg(long)]
    demo: bool,

    /// Pattern method: exhaustive or column-generation
    #[arg(long, default_value = "exhaustive", value_parser = parse_method)]
    method: Method,

    /// Minimize total waste instead of stock used (exhaustive only)
    #[arg(long)]
    minimize_waste: bool,

    /// Meet demand exactly (exhaustive only). Patterns that leave any waste are excluded,
    /// so an order with no waste-free way to cut it is reported infeasible
    #[arg(long)]
    exact: bool,

    /// Solver backend: auto, clarabel, microlp, or highs
    #[arg(long, default_value = "auto")]
    solver: SolverBackend,

    /// Column generation stops once the pricing objective falls below this value
    #[arg(long)]
    threshold: Option<f64>,

    /// Upper limit on column generation iterations
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Cancel the solve if it hasn't finished after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Write the outcome, including the plan, to this JSON file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Log more (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_method(s: &str) -> Result<Method, String> {
    match s {
        "exhaustive" => Ok(Method::Exhaustive),
        "column-generation" => Ok(Method::ColumnGeneration),
        _ => Err(format!(
            "invalid method '{}', expected: exhaustive or column-generation",
            s
        )),
    }
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(level)
        .init();

    let instance = match &cli.input {
        Some(path) => json::read_instance(path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }),
        None => CuttingStockInstance::demo(),
    };

    let mut request = SolveRequest::new(cli.method);
    request.minimize_waste = cli.minimize_waste;
    request.exact_coverage = cli.exact;
    if let Some(threshold) = cli.threshold {
        request.reduced_cost_threshold = threshold;
    }
    if let Some(max_iterations) = cli.max_iterations {
        request.max_iterations = max_iterations;
    }

    let solver = cli.solver.build().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let engine = CuttingStockEngine::with_solver(solver).on_progress(|event| println!("{}", event));

    let handle = engine.spawn(instance, request);
    if let Some(secs) = cli.timeout_secs {
        let deadline = Instant::now() + Duration::from_secs(secs);
        while !handle.is_finished() {
            if Instant::now() >= deadline {
                eprintln!("Timeout of {}s reached, stopping at the next checkpoint", secs);
                handle.cancel();
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
    }
    let outcome = handle.join();

    if let Some(path) = &cli.json {
        if let Err(e) = json::write_outcome(&outcome, path) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    let code = match &outcome {
        SolveOutcome::Solved(report) => {
            print_summary(report);
            0
        }
        SolveOutcome::DegenerateStop(report) | SolveOutcome::IterationLimit(report) => {
            eprintln!("Warning: column generation stopped early, the plan may not be optimal");
            print_summary(report);
            0
        }
        SolveOutcome::Cancelled => 130,
        SolveOutcome::Infeasible(message) => {
            eprintln!("Infeasible: {}", message);
            2
        }
        SolveOutcome::SolverFailure(message) => {
            eprintln!("Error: {}", message);
            1
        }
    };
    std::process::exit(code);
}

fn print_summary(report: &cutstock_core::SolveReport) {
    let stock = report.plan.stock_used();
    println!(
        "Summary: {} stock piece{} used, {} waste, {} patterns",
        stock,
        if stock == 1 { "" } else { "s" },
        report.plan.total_waste(),
        report.patterns
    );
}
