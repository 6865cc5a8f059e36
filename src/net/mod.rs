//! 资源模型模块
//!
//! 此模块包含仿真资源模型的核心组件：节点、链路、标识符和资源图。

// 子模块声明
mod graph;
mod id;
mod link;
mod node;

// 重新导出公共接口
pub use graph::Graph;
pub use id::{ItemId, LinkId, NodeId, SEED_NODE};
pub use link::Link;
pub use node::Node;
