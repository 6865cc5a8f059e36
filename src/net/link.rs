//! 链路类型
//!
//! 定义有向链路及其每轮容量。

use super::id::NodeId;

/// 有向链路
#[derive(Debug, Clone)]
pub struct Link {
    pub from: NodeId,
    pub to: NodeId,
    /// 每轮最多可传输的条目数
    pub capacity: u64,
    /// 本轮已经在这条边上传输的条目数
    pub round_util: u64,
}

impl Link {
    /// 创建新链路
    pub fn new(from: NodeId, to: NodeId, capacity: u64) -> Self {
        Self {
            from,
            to,
            capacity,
            round_util: 0,
        }
    }

    /// 本轮剩余容量
    pub fn headroom(&self) -> u64 {
        self.capacity.saturating_sub(self.round_util)
    }
}
