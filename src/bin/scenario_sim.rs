use clap::Parser;
use swarmsim_rs::policy::{PolicyKind, SchedulingPolicy};
use swarmsim_rs::sim::{
    DEFAULT_MAX_ROUNDS, ScenarioSpec, SimError, SimOutcome, Simulation, Termination,
    compare_policies,
};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "scenario-sim",
    about = "Run a scenario.json on the swarmsim-rs round simulator"
)]
struct Args {
    /// Path to scenario.json
    #[arg(long)]
    scenario: PathBuf,

    /// Override the scenario's scheduling policy
    #[arg(long, value_enum)]
    policy: Option<PolicyKind>,

    /// Override the scenario's RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the scenario's round ceiling
    #[arg(long)]
    max_rounds: Option<u64>,

    /// Output per-send transfer records and per-round snapshots as JSON
    #[arg(long)]
    trace_json: Option<PathBuf>,

    /// Output the final outcome as JSON
    #[arg(long)]
    report_json: Option<PathBuf>,

    /// Run every built-in policy with the same seed and print completion rounds
    #[arg(long)]
    compare: bool,
}

fn print_outcome(outcome: &SimOutcome) {
    for (i, u) in outcome.utilization.iter().enumerate() {
        println!("round={} utilization={:.4}", i + 1, u);
    }
    for s in &outcome.final_sizes {
        println!("node={} dataset_size={}", s.node.0, s.dataset_size);
    }
    match outcome.termination {
        Termination::Completed => println!("completion_rounds={}", outcome.rounds),
        Termination::RoundLimit => println!("round_limit={}", outcome.rounds),
    }
    println!("seed={}", outcome.seed);
}

fn run(args: Args) -> Result<(), SimError> {
    let mut spec = ScenarioSpec::load(&args.scenario)?;
    if args.policy.is_some() {
        spec.policy = args.policy;
    }
    if args.seed.is_some() {
        spec.seed = args.seed;
    }
    let max_rounds = args
        .max_rounds
        .or(spec.max_rounds)
        .unwrap_or(DEFAULT_MAX_ROUNDS);

    if args.compare {
        let runs = compare_policies(&spec, &PolicyKind::ALL, Some(max_rounds))?;
        for r in &runs {
            println!(
                "policy={} termination={:?} rounds={} seed={}",
                r.policy.name(),
                r.outcome.termination,
                r.outcome.rounds,
                r.outcome.seed
            );
        }
        if let Some(path) = args.report_json {
            let outcomes: Vec<&SimOutcome> = runs.iter().map(|r| &r.outcome).collect();
            let json = serde_json::to_string_pretty(&outcomes).expect("serialize outcomes");
            fs::write(&path, json).expect("write report json");
            eprintln!("wrote report to {}", path.display());
        }
        return Ok(());
    }

    let mut graph = spec.build_graph()?;
    if args.trace_json.is_some() {
        graph.enable_trace();
    }

    let mut sim = Simulation::new(graph, spec.policy(), spec.seed);
    let outcome = sim.run(Some(max_rounds))?;
    print_outcome(&outcome);

    if let Some(path) = args.report_json {
        let json = serde_json::to_string_pretty(&outcome).expect("serialize outcome");
        fs::write(&path, json).expect("write report json");
        eprintln!("wrote report to {}", path.display());
    }

    if let Some(path) = args.trace_json {
        let mut graph = sim.into_graph();
        if let Some(log) = graph.trace.take() {
            let json = serde_json::to_string_pretty(&log).expect("serialize trace");
            fs::write(&path, json).expect("write trace json");
            eprintln!("wrote trace to {}", path.display());
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("scenario-sim failed: {err}");
        std::process::exit(1);
    }
}
