//! 传输账本
//!
//! 对资源图的一组无状态操作：缺失数据计算、可供给目的地过滤、速率上限、
//! 带不变量检查的 send、利用率统计、轮次重置、缓冲区提交与完成判定。
//!
//! 所有的不变量检查都集中在 [`send`]：调度策略负责事先把传输量钳制到
//! [`max_rate`] 以内，违反任何前置条件都视为策略缺陷，直接返回错误而不做截断。

mod error;
mod round;
mod send;
mod supply;

pub use error::TransferError;
pub use round::{commit, is_complete, reset_round, snapshot, utilization};
pub use send::send;
pub use supply::{MissingMap, max_rate, missing_data, suppliable_data};
