//! 按容量贪心策略

use tracing::trace;

use super::plan::Plan;
use super::{SchedulingPolicy, SendIntent, SimRng};
use crate::ledger::{max_rate, missing_data, suppliable_data};
use crate::net::{Graph, NodeId};

/// 按 `max_rate` 降序排列出邻居，先把剩余带宽尽量给速率最高的可供给邻居，
/// 再给下一个，直到带宽耗尽或邻居用完。
///
/// 不是全局最优。速率相同时保持枚举顺序（稳定排序）。
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyByCapacity;

impl SchedulingPolicy for GreedyByCapacity {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn decide(&self, graph: &Graph, node: NodeId, rng: &mut SimRng) -> Vec<SendIntent> {
        let missing = missing_data(graph, node);
        let supply = suppliable_data(graph, node, &missing);

        let mut ranked: Vec<(NodeId, u64)> = graph
            .neighbors(node)
            .map(|n| (n, max_rate(graph, node, n)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        trace!(?node, ?ranked, "按速率排序");

        let mut plan = Plan::new(graph, node);
        for (dest, rate) in ranked {
            let remaining = plan.remaining();
            if remaining == 0 {
                break;
            }
            let Some(eligible) = supply.get(&dest) else {
                continue;
            };
            plan.push_random(dest, eligible, remaining.min(rate), rng);
        }
        plan.finish()
    }
}
