//! 轮次边界操作：利用率、重置、提交、完成判定

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::net::{Graph, ItemId};
use crate::trace::NodeSnapshot;

/// 本轮接收利用率
///
/// 每个节点的可达上限取 `min(|全集| - |数据集| + recv_util, bandwidth)`，
/// 这样快要完成的节点不会因为结构上用不满带宽而被算作低效。
/// 注意：在提交缓冲区之前调用时，数据集还不含本轮收到的条目，
/// 上限会偏高 recv_util；这里按原公式计算，不做修正。
///
/// 分母为 0（所有节点都已完成且本轮无传输）时返回 0.0。
pub fn utilization(graph: &Graph, universe: &BTreeSet<ItemId>) -> f64 {
    let total_items = universe.len() as u64;
    let mut total_possible: u64 = 0;
    let mut used: u64 = 0;

    for node in graph.nodes() {
        used += node.recv_util;
        let max_possible_recv = total_items
            .saturating_sub(node.dataset.len() as u64)
            .saturating_add(node.recv_util);
        total_possible += max_possible_recv.min(node.bandwidth);
    }

    trace!(used, total_possible, "利用率统计");
    if total_possible == 0 {
        return 0.0;
    }
    used as f64 / total_possible as f64
}

/// 清零所有节点的收发占用与链路的本轮用量
pub fn reset_round(graph: &mut Graph) {
    for node in graph.nodes_mut() {
        node.send_util = 0;
        node.recv_util = 0;
    }
    for link in graph.links_mut() {
        link.round_util = 0;
    }
}

/// 把缓冲区合并进数据集并清空缓冲区
///
/// 第 R 轮收到的条目从第 R+1 轮起才能作为供给来源。
pub fn commit(graph: &mut Graph) {
    for node in graph.nodes_mut() {
        if node.buffer.is_empty() {
            continue;
        }
        let buffer = std::mem::take(&mut node.buffer);
        debug!(node = ?node.id, committed = buffer.len(), "提交缓冲区");
        node.dataset.extend(buffer);
    }
}

/// 所有节点的数据集都等于内容全集时返回 true
pub fn is_complete(graph: &Graph, universe: &BTreeSet<ItemId>) -> bool {
    graph.nodes().iter().all(|n| &n.dataset == universe)
}

/// 每个节点当前的数据集大小
pub fn snapshot(graph: &Graph) -> Vec<NodeSnapshot> {
    graph
        .nodes()
        .iter()
        .map(|n| NodeSnapshot {
            node: n.id,
            dataset_size: n.dataset.len(),
        })
        .collect()
}
