//! 供需计算与速率上限

use std::collections::{BTreeMap, BTreeSet};

use crate::net::{Graph, ItemId, NodeId};

/// 邻居 -> 条目集合
pub type MissingMap = BTreeMap<NodeId, BTreeSet<ItemId>>;

/// 对 `node` 的每个出邻居，计算它相对内容全集还缺哪些条目
pub fn missing_data(graph: &Graph, node: NodeId) -> MissingMap {
    let universe = graph.universe();
    graph
        .neighbors(node)
        .filter_map(|n| graph.node(n))
        .map(|n| (n.id, universe.difference(&n.dataset).copied().collect()))
        .collect()
}

/// 从缺失表中筛出 `node` 实际能供给的部分
///
/// 只保留接收带宽尚未用满、且交集非空的邻居。
pub fn suppliable_data(graph: &Graph, node: NodeId, missing: &MissingMap) -> MissingMap {
    let Some(me) = graph.node(node) else {
        return MissingMap::new();
    };

    missing
        .iter()
        .filter_map(|(&n, wanted)| {
            let neighbor = graph.node(n)?;
            if neighbor.recv_saturated() {
                return None;
            }
            let supply: BTreeSet<ItemId> = wanted.intersection(&me.dataset).copied().collect();
            (!supply.is_empty()).then_some((n, supply))
        })
        .collect()
}

/// sender -> receiver 当前的传输上限
///
/// 三个独立约束取最小：链路本轮剩余容量、发送方剩余发送带宽、接收方剩余接收带宽。
/// 节点或链路不存在时为 0。
pub fn max_rate(graph: &Graph, sender: NodeId, receiver: NodeId) -> u64 {
    let (Some(link), Some(s), Some(r)) = (
        graph.link(sender, receiver),
        graph.node(sender),
        graph.node(receiver),
    ) else {
        return 0;
    };
    link.headroom()
        .min(s.send_headroom())
        .min(r.recv_headroom())
}
