//! 两层拓扑：高带宽/高容量组 + 低带宽/低容量组，全互联
//!
//! 链路 i -> j 的容量由目的节点 j 所在的组决定。高带宽组占据 id `0..high_nodes`，
//! 因此只要 `high_nodes > 0`，种子节点就在高带宽组。

use std::collections::BTreeSet;

use super::complete::{TopologyError, content_universe, make_graph};
use crate::net::{Graph, ItemId, NodeId};

#[derive(Debug, Clone)]
pub struct TwoTierOpts {
    pub items: u64,
    pub high_nodes: usize,
    pub low_nodes: usize,
    pub high_bandwidth: u64,
    pub low_bandwidth: u64,
    pub high_capacity: u64,
    pub low_capacity: u64,
}

impl Default for TwoTierOpts {
    fn default() -> Self {
        Self {
            items: 100,
            high_nodes: 2,
            low_nodes: 8,
            high_bandwidth: 20,
            low_bandwidth: 4,
            high_capacity: 10,
            low_capacity: 2,
        }
    }
}

impl TwoTierOpts {
    pub fn total_nodes(&self) -> usize {
        self.high_nodes + self.low_nodes
    }

    pub fn is_high(&self, node: NodeId) -> bool {
        node.0 < self.high_nodes
    }
}

/// 构建两层拓扑，内容全集为 `0..opts.items`
pub fn build_two_tier(opts: &TwoTierOpts) -> Result<Graph, TopologyError> {
    build_two_tier_with(opts, content_universe(opts.items))
}

/// 构建两层拓扑，使用给定的内容全集（忽略 `opts.items`）
pub fn build_two_tier_with(
    opts: &TwoTierOpts,
    universe: BTreeSet<ItemId>,
) -> Result<Graph, TopologyError> {
    let n = opts.total_nodes();

    let mut bandwidths = vec![opts.high_bandwidth; opts.high_nodes];
    bandwidths.extend(std::iter::repeat_n(opts.low_bandwidth, opts.low_nodes));

    // 每一行相同：前 high_nodes 列为 high_capacity，其余为 low_capacity
    let mut row = vec![opts.high_capacity; opts.high_nodes];
    row.extend(std::iter::repeat_n(opts.low_capacity, opts.low_nodes));
    let capacities = vec![row; n];

    make_graph(n, universe, &bandwidths, &capacities)
}
