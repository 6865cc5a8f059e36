//! 全连接拓扑构建

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, info};

use crate::net::{Graph, ItemId, NodeId, SEED_NODE};

/// 拓扑配置错误（构造期即失败）
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("topology must contain at least one node")]
    NoNodes,
    #[error("expected {expected} bandwidths, got {actual}")]
    BandwidthCount { expected: usize, actual: usize },
    #[error("expected {expected} capacity rows, got {actual}")]
    CapacityRows { expected: usize, actual: usize },
    #[error("capacity row {row} has {actual} entries, expected {expected}")]
    CapacityColumns {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("node {node} has zero bandwidth")]
    ZeroBandwidth { node: usize },
}

/// 构造内容全集 `{0, 1, .., n-1}`
pub fn content_universe(n: u64) -> BTreeSet<ItemId> {
    (0..n).map(ItemId).collect()
}

/// 构建全连接有向图
///
/// - `bandwidths[i]`：节点 i 每轮的收/发上限
/// - `capacities[i][j]`：链路 i -> j 每轮容量；对角线忽略
///
/// 节点 0 持有全部内容，其余节点为空。
#[tracing::instrument(skip_all, fields(nodes = node_count, items = universe.len()))]
pub fn make_graph(
    node_count: usize,
    universe: BTreeSet<ItemId>,
    bandwidths: &[u64],
    capacities: &[Vec<u64>],
) -> Result<Graph, TopologyError> {
    if node_count == 0 {
        return Err(TopologyError::NoNodes);
    }
    if bandwidths.len() != node_count {
        return Err(TopologyError::BandwidthCount {
            expected: node_count,
            actual: bandwidths.len(),
        });
    }
    if capacities.len() != node_count {
        return Err(TopologyError::CapacityRows {
            expected: node_count,
            actual: capacities.len(),
        });
    }
    for (row, caps) in capacities.iter().enumerate() {
        if caps.len() != node_count {
            return Err(TopologyError::CapacityColumns {
                row,
                expected: node_count,
                actual: caps.len(),
            });
        }
    }
    if let Some(node) = bandwidths.iter().position(|&bw| bw == 0) {
        return Err(TopologyError::ZeroBandwidth { node });
    }

    let mut graph = Graph::with_universe(universe.clone());
    for (i, &bw) in bandwidths.iter().enumerate() {
        let dataset = if NodeId(i) == SEED_NODE {
            universe.clone()
        } else {
            BTreeSet::new()
        };
        graph.add_node(bw, dataset);
    }

    for (i, caps) in capacities.iter().enumerate() {
        for (j, &cap) in caps.iter().enumerate() {
            if i != j {
                graph.connect(NodeId(i), NodeId(j), cap);
            }
        }
    }

    debug!(links = graph.links().len(), "链路已创建");
    info!("🧱 拓扑构建完成");
    Ok(graph)
}
