//! 标识符类型
//!
//! 定义节点、链路和内容条目的唯一标识符。

use serde::{Deserialize, Serialize};

/// 节点标识符（节点 0 为种子节点）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

/// 链路标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinkId(pub usize);

/// 内容条目标识符（不透明）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

/// 种子节点：初始持有全部内容
pub const SEED_NODE: NodeId = NodeId(0);
