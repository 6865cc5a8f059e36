//! 均匀拓扑：所有节点带宽相同，所有链路容量相同

use std::collections::BTreeSet;

use super::complete::{TopologyError, content_universe, make_graph};
use crate::net::{Graph, ItemId};

/// 均匀拓扑配置选项
#[derive(Debug, Clone)]
pub struct UniformOpts {
    pub nodes: usize,
    pub items: u64,
    pub bandwidth: u64,
    pub link_capacity: u64,
}

impl Default for UniformOpts {
    fn default() -> Self {
        Self {
            nodes: 5,
            items: 4,
            bandwidth: 4,
            link_capacity: 1,
        }
    }
}

/// 构建均匀拓扑，内容全集为 `0..opts.items`
pub fn build_uniform(opts: &UniformOpts) -> Result<Graph, TopologyError> {
    build_uniform_with(opts, content_universe(opts.items))
}

/// 构建均匀拓扑，使用给定的内容全集（忽略 `opts.items`）
pub fn build_uniform_with(
    opts: &UniformOpts,
    universe: BTreeSet<ItemId>,
) -> Result<Graph, TopologyError> {
    let bandwidths = vec![opts.bandwidth; opts.nodes];
    let capacities = vec![vec![opts.link_capacity; opts.nodes]; opts.nodes];
    make_graph(opts.nodes, universe, &bandwidths, &capacities)
}
