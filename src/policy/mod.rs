//! 调度策略
//!
//! 每轮对每个节点调用一次，决定该节点把本轮带宽分给哪些邻居、各发哪些条目。
//! 策略只读取资源图，返回一组发送意图，由驱动器逐条通过
//! [`crate::ledger::send`] 执行。

mod equal_split;
mod greedy;
mod plan;
mod uniform_random;

use std::collections::BTreeSet;
use std::fmt;

use clap::ValueEnum;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::net::{Graph, ItemId, NodeId};

pub use equal_split::EqualSplit;
pub use greedy::GreedyByCapacity;
pub use uniform_random::UniformRandom;

/// 仿真使用的确定性随机数生成器
pub type SimRng = ChaCha8Rng;

/// 一条发送意图：把 `items` 发给 `receiver`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendIntent {
    pub receiver: NodeId,
    pub items: BTreeSet<ItemId>,
}

/// 调度策略接口
pub trait SchedulingPolicy {
    fn name(&self) -> &'static str;

    /// 为 `node` 决定本轮的发送
    ///
    /// 返回的意图必须满足 send 的全部前置条件，且总量不超过该节点本轮剩余带宽。
    fn decide(&self, graph: &Graph, node: NodeId, rng: &mut SimRng) -> Vec<SendIntent>;
}

/// 内置策略（可由 CLI / 场景文件选择）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    EqualSplit,
    Greedy,
    UniformRandom,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [
        PolicyKind::EqualSplit,
        PolicyKind::Greedy,
        PolicyKind::UniformRandom,
    ];
}

impl SchedulingPolicy for PolicyKind {
    fn name(&self) -> &'static str {
        match self {
            PolicyKind::EqualSplit => EqualSplit.name(),
            PolicyKind::Greedy => GreedyByCapacity.name(),
            PolicyKind::UniformRandom => UniformRandom.name(),
        }
    }

    fn decide(&self, graph: &Graph, node: NodeId, rng: &mut SimRng) -> Vec<SendIntent> {
        match self {
            PolicyKind::EqualSplit => EqualSplit.decide(graph, node, rng),
            PolicyKind::Greedy => GreedyByCapacity.decide(graph, node, rng),
            PolicyKind::UniformRandom => UniformRandom.decide(graph, node, rng),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
