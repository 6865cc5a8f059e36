//! 策略对比：同一拓扑、同一内容全集、同一种子，分别跑不同策略

use tracing::info;

use super::error::SimError;
use super::scenario::ScenarioSpec;
use super::simulator::{SimOutcome, Simulation};
use crate::policy::{PolicyKind, SchedulingPolicy};

/// 某个策略的一次运行结果
#[derive(Debug, Clone)]
pub struct PolicyRun {
    pub policy: PolicyKind,
    pub outcome: SimOutcome,
}

/// 对每个策略各跑一次场景
///
/// 场景未给种子时只抽一次，所有策略共用。
pub fn compare_policies(
    spec: &ScenarioSpec,
    policies: &[PolicyKind],
    max_rounds: Option<u64>,
) -> Result<Vec<PolicyRun>, SimError> {
    let seed = spec.seed.unwrap_or_else(rand::random);
    let max_rounds = max_rounds.or(spec.max_rounds);

    let mut runs = Vec::with_capacity(policies.len());
    for &policy in policies {
        let graph = spec.build_graph()?;
        let mut sim = Simulation::new(graph, policy, Some(seed));
        let outcome = sim.run(max_rounds)?;
        info!(
            policy = policy.name(),
            rounds = outcome.rounds,
            termination = ?outcome.termination,
            "策略对比"
        );
        runs.push(PolicyRun { policy, outcome });
    }
    Ok(runs)
}
