//! 平均分配策略

use tracing::trace;

use super::plan::Plan;
use super::{SchedulingPolicy, SendIntent, SimRng};
use crate::ledger::{missing_data, suppliable_data};
use crate::net::{Graph, NodeId};

/// 把节点带宽（向上取整）平均分给所有可供给的邻居，
/// 每份再按 `max_rate` 截断，随机挑选条目发送。
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualSplit;

impl SchedulingPolicy for EqualSplit {
    fn name(&self) -> &'static str {
        "equal_split"
    }

    fn decide(&self, graph: &Graph, node: NodeId, rng: &mut SimRng) -> Vec<SendIntent> {
        let missing = missing_data(graph, node);
        let supply = suppliable_data(graph, node, &missing);
        let Some(me) = graph.node(node) else {
            return Vec::new();
        };
        if supply.is_empty() {
            return Vec::new();
        }

        let share = me.bandwidth.div_ceil(supply.len() as u64);
        trace!(?node, dests = supply.len(), share, "平均分配");

        let mut plan = Plan::new(graph, node);
        for (&dest, eligible) in &supply {
            let sendable = share.min(plan.rate(dest));
            plan.push_random(dest, eligible, sendable, rng);
        }
        plan.finish()
    }
}
