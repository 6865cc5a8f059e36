//! 传输不变量错误

use thiserror::Error;

use crate::net::{ItemId, NodeId};

/// send 的前置条件被违反（说明调度策略算出了不可行的传输）
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("unknown node {node:?}")]
    UnknownNode { node: NodeId },
    #[error("no link from {sender:?} to {receiver:?}")]
    NoLink { sender: NodeId, receiver: NodeId },
    #[error(
        "sender {sender:?} does not own item {item:?} (receiver {receiver:?}, count {count})"
    )]
    NotOwned {
        sender: NodeId,
        receiver: NodeId,
        count: u64,
        item: ItemId,
    },
    #[error(
        "receiver {receiver:?} already holds item {item:?} (sender {sender:?}, count {count})"
    )]
    AlreadyHeld {
        sender: NodeId,
        receiver: NodeId,
        count: u64,
        item: ItemId,
    },
    #[error(
        "link {sender:?} -> {receiver:?} over capacity: count {count} + used {used} > capacity {capacity}"
    )]
    LinkCapacity {
        sender: NodeId,
        receiver: NodeId,
        count: u64,
        used: u64,
        capacity: u64,
    },
    #[error(
        "sender {sender:?} oversubscribed: count {count} + send_util {send_util} > bandwidth {bandwidth} (receiver {receiver:?})"
    )]
    SenderBandwidth {
        sender: NodeId,
        receiver: NodeId,
        count: u64,
        send_util: u64,
        bandwidth: u64,
    },
    #[error(
        "receiver {receiver:?} oversubscribed: count {count} + recv_util {recv_util} > bandwidth {bandwidth} (sender {sender:?})"
    )]
    ReceiverBandwidth {
        sender: NodeId,
        receiver: NodeId,
        count: u64,
        recv_util: u64,
        bandwidth: u64,
    },
}
