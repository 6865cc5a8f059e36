//! 拓扑构建
//!
//! 从配置构造初始资源图：全连接有向图，节点 0 为种子。

mod complete;
pub mod two_tier;
pub mod uniform;

pub use complete::{TopologyError, content_universe, make_graph};
