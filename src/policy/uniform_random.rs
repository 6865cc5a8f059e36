//! 均匀随机策略

use rand::Rng;

use super::plan::Plan;
use super::{SchedulingPolicy, SendIntent, SimRng};
use crate::ledger::{missing_data, suppliable_data};
use crate::net::{Graph, NodeId};

/// 按枚举顺序遍历可供给邻居，每个邻居从 `[0, 剩余带宽]` 均匀抽一个目标量，
/// 再按 `max_rate` 截断。带宽按处理顺序依次消耗，因此结果与邻居顺序有关。
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRandom;

impl SchedulingPolicy for UniformRandom {
    fn name(&self) -> &'static str {
        "uniform_random"
    }

    fn decide(&self, graph: &Graph, node: NodeId, rng: &mut SimRng) -> Vec<SendIntent> {
        let missing = missing_data(graph, node);
        let supply = suppliable_data(graph, node, &missing);

        let mut plan = Plan::new(graph, node);
        for (&dest, eligible) in &supply {
            let target = rng.random_range(0..=plan.remaining());
            let sendable = target.min(plan.rate(dest));
            plan.push_random(dest, eligible, sendable, rng);
        }
        plan.finish()
    }
}
