//! 资源图
//!
//! 持有全部节点、有向链路与内容全集。仿真期间由驱动器独占，
//! 以引用形式借给 ledger 操作和调度策略。

use std::collections::{BTreeSet, HashMap};

use super::id::{ItemId, LinkId, NodeId};
use super::link::Link;
use super::node::Node;
use crate::trace::TraceLog;

/// 资源图
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    links: Vec<Link>,
    edges: HashMap<(NodeId, NodeId), LinkId>,
    /// 每个节点的出边（按目的节点 id 升序）
    out: Vec<Vec<LinkId>>,
    universe: BTreeSet<ItemId>,
    /// 传输记录；None 表示不记录
    pub trace: Option<TraceLog>,
}

impl Graph {
    pub(crate) fn with_universe(universe: BTreeSet<ItemId>) -> Self {
        Self {
            universe,
            ..Self::default()
        }
    }

    /// 添加节点
    pub(crate) fn add_node(&mut self, bandwidth: u64, dataset: BTreeSet<ItemId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, bandwidth, dataset));
        self.out.push(Vec::new());
        id
    }

    /// 连接两个节点（创建单向链路）
    pub(crate) fn connect(&mut self, from: NodeId, to: NodeId, capacity: u64) -> LinkId {
        let id = LinkId(self.links.len());
        self.links.push(Link::new(from, to, capacity));
        self.edges.insert((from, to), id);
        self.out[from.0].push(id);
        id
    }

    pub fn universe(&self) -> &BTreeSet<ItemId> {
        &self.universe
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub(crate) fn links_mut(&mut self) -> &mut [Link] {
        &mut self.links
    }

    /// 按 id 获取节点
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// 查找 from -> to 的链路
    pub fn link(&self, from: NodeId, to: NodeId) -> Option<&Link> {
        self.edges.get(&(from, to)).map(|id| &self.links[id.0])
    }

    pub(crate) fn link_mut(&mut self, from: NodeId, to: NodeId) -> Option<&mut Link> {
        let id = *self.edges.get(&(from, to))?;
        self.links.get_mut(id.0)
    }

    /// 出邻居（按 id 升序，保证枚举顺序确定）
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out
            .get(id.0)
            .into_iter()
            .flatten()
            .map(|l| self.links[l.0].to)
    }

    /// 开启传输记录
    pub fn enable_trace(&mut self) {
        if self.trace.is_none() {
            self.trace = Some(TraceLog::default());
        }
    }
}
