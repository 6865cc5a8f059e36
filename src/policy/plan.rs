//! 单个节点一轮内的发送计划
//!
//! 策略在 decide 期间不修改图，因此用 `spent` 记录已经规划出去的发送量，
//! 保证后续意图看到的是扣除之后的剩余带宽。

use std::collections::BTreeSet;

use rand::seq::index;

use super::{SendIntent, SimRng};
use crate::ledger::max_rate;
use crate::net::{Graph, ItemId, NodeId};

pub(crate) struct Plan<'g> {
    graph: &'g Graph,
    node: NodeId,
    spent: u64,
    intents: Vec<SendIntent>,
}

impl<'g> Plan<'g> {
    pub(crate) fn new(graph: &'g Graph, node: NodeId) -> Self {
        Self {
            graph,
            node,
            spent: 0,
            intents: Vec::new(),
        }
    }

    /// 扣除已规划量之后的剩余发送带宽
    pub(crate) fn remaining(&self) -> u64 {
        self.graph
            .node(self.node)
            .map_or(0, |n| n.send_headroom().saturating_sub(self.spent))
    }

    /// 到 `dest` 的速率上限（扣除已规划量）
    pub(crate) fn rate(&self, dest: NodeId) -> u64 {
        max_rate(self.graph, self.node, dest).min(self.remaining())
    }

    /// 从 `eligible` 中随机挑 `min(amount, |eligible|)` 个条目发给 `dest`
    pub(crate) fn push_random(
        &mut self,
        dest: NodeId,
        eligible: &BTreeSet<ItemId>,
        amount: u64,
        rng: &mut SimRng,
    ) {
        let k = usize::try_from(amount).unwrap_or(usize::MAX).min(eligible.len());
        if k == 0 {
            return;
        }
        let items = sample_items(rng, eligible, k);
        self.spent += k as u64;
        self.intents.push(SendIntent {
            receiver: dest,
            items,
        });
    }

    pub(crate) fn finish(self) -> Vec<SendIntent> {
        self.intents
    }
}

/// 从有序集合中均匀无放回地抽取 `k` 个条目（要求 k ≤ |set|）
pub(crate) fn sample_items(rng: &mut SimRng, set: &BTreeSet<ItemId>, k: usize) -> BTreeSet<ItemId> {
    let pool: Vec<ItemId> = set.iter().copied().collect();
    index::sample(rng, pool.len(), k)
        .into_iter()
        .map(|i| pool[i])
        .collect()
}
