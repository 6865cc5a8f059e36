//! 带不变量检查的 send 原语

use std::collections::BTreeSet;

use tracing::{debug, trace};

use super::error::TransferError;
use crate::net::{Graph, ItemId, NodeId};

/// 把 `items` 从 `sender` 发往 `receiver` 的缓冲区
///
/// 前置条件（任何一条不满足都返回错误，图保持不变）：
/// 1. `items` ⊆ sender 的数据集
/// 2. `items` 与 receiver 的数据集不相交
/// 3. |items| 不超过链路本轮剩余容量
/// 4. |items| + sender.send_util ≤ sender.bandwidth
/// 5. |items| + receiver.recv_util ≤ receiver.bandwidth
#[tracing::instrument(skip(graph, items), fields(count = items.len()))]
pub fn send(
    graph: &mut Graph,
    sender: NodeId,
    receiver: NodeId,
    items: &BTreeSet<ItemId>,
) -> Result<(), TransferError> {
    let count = items.len() as u64;

    let s = graph
        .node(sender)
        .ok_or(TransferError::UnknownNode { node: sender })?;
    let r = graph
        .node(receiver)
        .ok_or(TransferError::UnknownNode { node: receiver })?;
    let link = graph
        .link(sender, receiver)
        .ok_or(TransferError::NoLink { sender, receiver })?;

    if let Some(&item) = items.difference(&s.dataset).next() {
        return Err(TransferError::NotOwned {
            sender,
            receiver,
            count,
            item,
        });
    }
    if let Some(&item) = items.intersection(&r.dataset).next() {
        return Err(TransferError::AlreadyHeld {
            sender,
            receiver,
            count,
            item,
        });
    }
    if count > link.headroom() {
        return Err(TransferError::LinkCapacity {
            sender,
            receiver,
            count,
            used: link.round_util,
            capacity: link.capacity,
        });
    }
    if count + s.send_util > s.bandwidth {
        return Err(TransferError::SenderBandwidth {
            sender,
            receiver,
            count,
            send_util: s.send_util,
            bandwidth: s.bandwidth,
        });
    }
    if count + r.recv_util > r.bandwidth {
        return Err(TransferError::ReceiverBandwidth {
            sender,
            receiver,
            count,
            recv_util: r.recv_util,
            bandwidth: r.bandwidth,
        });
    }

    if count == 0 {
        trace!("空传输，忽略");
        return Ok(());
    }

    // 上面已确认节点与链路存在
    if let Some(link) = graph.link_mut(sender, receiver) {
        link.round_util += count;
    }
    if let Some(r) = graph.node_mut(receiver) {
        r.buffer.extend(items.iter().copied());
        r.recv_util += count;
    }
    if let Some(s) = graph.node_mut(sender) {
        s.send_util += count;
    }

    debug!(?sender, ?receiver, ?items, count, "📦 发送数据");
    if let Some(log) = &mut graph.trace {
        log.push_transfer(sender, receiver, items.iter().copied().collect());
    }
    Ok(())
}
