//! 仿真核心模块
//!
//! 此模块包含轮次同步仿真的核心组件：驱动器、场景配置与策略对比。

// 子模块声明
mod compare;
mod error;
mod scenario;
mod simulator;

// 重新导出公共接口
pub use compare::{PolicyRun, compare_policies};
pub use error::SimError;
pub use scenario::{ScenarioError, ScenarioMeta, ScenarioSpec, TopologySpec};
pub use simulator::{RoundReport, SimOutcome, SimState, Simulation, Termination};

/// CLI 未指定时使用的轮数上限
pub const DEFAULT_MAX_ROUNDS: u64 = 10_000;
