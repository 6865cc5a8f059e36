//! 节点类型
//!
//! 定义对等节点：已持有数据集、本轮接收缓冲区、带宽以及本轮收发占用。

use std::collections::BTreeSet;

use super::id::{ItemId, NodeId};

/// 对等节点
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    /// 已提交、可作为供给来源的条目（只增不减）
    pub dataset: BTreeSet<ItemId>,
    /// 本轮收到但尚未提交的条目
    pub buffer: BTreeSet<ItemId>,
    /// 每轮可收/可发的条目数上限
    pub bandwidth: u64,
    pub send_util: u64,
    pub recv_util: u64,
}

impl Node {
    /// 创建新节点
    pub fn new(id: NodeId, bandwidth: u64, dataset: BTreeSet<ItemId>) -> Self {
        Self {
            id,
            dataset,
            buffer: BTreeSet::new(),
            bandwidth,
            send_util: 0,
            recv_util: 0,
        }
    }

    /// 本轮剩余发送带宽
    pub fn send_headroom(&self) -> u64 {
        self.bandwidth.saturating_sub(self.send_util)
    }

    /// 本轮剩余接收带宽
    pub fn recv_headroom(&self) -> u64 {
        self.bandwidth.saturating_sub(self.recv_util)
    }

    /// 接收带宽是否已用满
    pub fn recv_saturated(&self) -> bool {
        self.recv_util >= self.bandwidth
    }
}
