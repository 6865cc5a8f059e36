//! 均匀拓扑仿真
//!
//! 所有节点带宽相同、所有链路容量相同，节点 0 作为种子分发全部内容。

use clap::Parser;
use swarmsim_rs::policy::PolicyKind;
use swarmsim_rs::sim::{DEFAULT_MAX_ROUNDS, Simulation, Termination};
use swarmsim_rs::topo::uniform::{UniformOpts, build_uniform};

#[derive(Debug, Parser)]
#[command(name = "uniform-sim", about = "均匀拓扑仿真：节点 0 向其余节点分发全部内容")]
struct Args {
    #[arg(long, default_value_t = 5)]
    nodes: usize,
    /// 内容全集大小
    #[arg(long, default_value_t = 4)]
    items: u64,
    /// 每个节点每轮的收/发上限
    #[arg(long, default_value_t = 4)]
    bandwidth: u64,
    /// 每条链路每轮容量
    #[arg(long, default_value_t = 1)]
    link_capacity: u64,
    #[arg(long, value_enum, default_value_t = PolicyKind::EqualSplit)]
    policy: PolicyKind,
    /// 随机种子；不填则随机
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = DEFAULT_MAX_ROUNDS)]
    max_rounds: u64,
}

fn main() {
    // 初始化 tracing
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

    let opts = UniformOpts {
        nodes: args.nodes,
        items: args.items,
        bandwidth: args.bandwidth,
        link_capacity: args.link_capacity,
    };
    let graph = match build_uniform(&opts) {
        Ok(g) => g,
        Err(err) => {
            eprintln!("invalid topology: {err}");
            std::process::exit(2);
        }
    };

    let mut sim = Simulation::new(graph, args.policy, args.seed);
    let outcome = match sim.run(Some(args.max_rounds)) {
        Ok(o) => o,
        Err(err) => {
            eprintln!("simulation aborted: {err}");
            std::process::exit(1);
        }
    };

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
