//! 传输记录（供外部报表/绘图工具离线消费）
//!
//! 设计目标：
//! - **结构化**：输出 JSON 记录而不是解析文本日志
//! - **轻量**：只存内存，仿真结束一次性写出
//! - **可回放**：逐条传输 + 逐轮快照

mod types;

pub use types::{NodeSnapshot, RoundSnapshot, TraceLog, TransferRecord};
