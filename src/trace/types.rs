use serde::{Deserialize, Serialize};

use crate::net::{ItemId, NodeId};

/// 一次 send 的记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    /// 发生在第几轮（从 1 开始）
    pub round: u64,
    pub sender: NodeId,
    pub receiver: NodeId,
    pub items: Vec<ItemId>,
    pub count: u64,
}

/// 某个节点在一轮结束时的数据集大小
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub node: NodeId,
    pub dataset_size: usize,
}

/// 一轮结束时的快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub round: u64,
    pub utilization: f64,
    pub nodes: Vec<NodeSnapshot>,
}

/// 一个简单的记录收集器（存内存，仿真结束写 JSON 文件）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceLog {
    #[serde(skip)]
    round: u64,
    pub transfers: Vec<TransferRecord>,
    pub rounds: Vec<RoundSnapshot>,
}

impl TraceLog {
    /// 标记新一轮开始，之后的传输记录都归到这一轮
    pub fn begin_round(&mut self, round: u64) {
        self.round = round;
    }

    pub fn current_round(&self) -> u64 {
        self.round
    }

    pub fn push_transfer(&mut self, sender: NodeId, receiver: NodeId, items: Vec<ItemId>) {
        let count = items.len() as u64;
        self.transfers.push(TransferRecord {
            round: self.round,
            sender,
            receiver,
            items,
            count,
        });
    }

    pub fn push_round(&mut self, snapshot: RoundSnapshot) {
        self.rounds.push(snapshot);
    }
}
