//! 仿真驱动器
//!
//! 轮次同步（BSP）：第 R 轮所有节点的决策只看到第 R-1 轮结束时提交的数据集。
//! 每轮按节点 id 升序调用策略并执行发送，然后依次：统计利用率、重置收发占用、
//! 提交缓冲区、判断是否完成。

use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::error::SimError;
use crate::ledger;
use crate::net::{Graph, NodeId};
use crate::policy::{SchedulingPolicy, SimRng};
use crate::trace::{NodeSnapshot, RoundSnapshot};

/// 驱动器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimState {
    Running,
    Done,
    /// 某次 send 违反不变量；本轮已执行的发送保留在图中以便排查，不能再继续
    Aborted,
}

/// 仿真如何结束
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// 所有节点都拿到了全部内容
    Completed,
    /// 达到调用方给定的轮数上限仍未完成（不算错误）
    RoundLimit,
}

/// 单轮结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u64,
    pub utilization: f64,
    pub sends: u64,
    pub items_moved: u64,
    pub nodes: Vec<NodeSnapshot>,
    pub state: SimState,
}

/// 整次仿真结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimOutcome {
    pub policy: String,
    pub seed: u64,
    pub termination: Termination,
    /// 完成时即“完成时间”
    pub rounds: u64,
    pub final_sizes: Vec<NodeSnapshot>,
    pub utilization: Vec<f64>,
}

impl SimOutcome {
    pub fn completed(&self) -> bool {
        self.termination == Termination::Completed
    }
}

/// 轮次同步仿真器：独占资源图，对策略泛型
pub struct Simulation<P> {
    graph: Graph,
    policy: P,
    rng: SimRng,
    seed: u64,
    round: u64,
    state: SimState,
    utilization: Vec<f64>,
}

impl<P: SchedulingPolicy> Simulation<P> {
    /// 创建仿真；`seed` 为 None 时随机挑一个并记录下来
    pub fn new(graph: Graph, policy: P, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        let state = if ledger::is_complete(&graph, graph.universe()) {
            SimState::Done
        } else {
            SimState::Running
        };
        debug!(seed, policy = policy.name(), ?state, "创建仿真");
        Self {
            graph,
            policy,
            rng: SimRng::seed_from_u64(seed),
            seed,
            round: 0,
            state,
            utilization: Vec::new(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// 已执行的轮数
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// 执行一轮
    #[tracing::instrument(skip(self), fields(round = self.round + 1, policy = self.policy.name()))]
    pub fn step(&mut self) -> Result<RoundReport, SimError> {
        match self.state {
            SimState::Running => {}
            SimState::Done => return Err(SimError::AlreadyDone { rounds: self.round }),
            SimState::Aborted => return Err(SimError::Aborted { round: self.round }),
        }
        self.round += 1;
        let round = self.round;
        if let Some(log) = &mut self.graph.trace {
            log.begin_round(round);
        }

        let mut sends = 0;
        let mut items_moved = 0;
        for i in 0..self.graph.len() {
            let node = NodeId(i);
            let intents = self.policy.decide(&self.graph, node, &mut self.rng);
            for intent in intents {
                if let Err(source) =
                    ledger::send(&mut self.graph, node, intent.receiver, &intent.items)
                {
                    self.state = SimState::Aborted;
                    error!(%source, "❌ 传输不变量被违反，仿真中止");
                    return Err(SimError::Transfer { round, source });
                }
                sends += 1;
                items_moved += intent.items.len() as u64;
            }
        }

        let utilization = ledger::utilization(&self.graph, self.graph.universe());
        self.utilization.push(utilization);
        ledger::reset_round(&mut self.graph);
        ledger::commit(&mut self.graph);

        let nodes = ledger::snapshot(&self.graph);
        if let Some(log) = &mut self.graph.trace {
            log.push_round(RoundSnapshot {
                round,
                utilization,
                nodes: nodes.clone(),
            });
        }

        if ledger::is_complete(&self.graph, self.graph.universe()) {
            self.state = SimState::Done;
            info!(rounds = round, "✅ 所有节点已拿到全部内容");
        }
        info!(utilization, sends, items_moved, "轮次结束");

        Ok(RoundReport {
            round,
            utilization,
            sends,
            items_moved,
            nodes,
            state: self.state,
        })
    }

    /// 运行直到完成或达到 `max_rounds`
    ///
    /// `max_rounds` 为 None 且拓扑无法收敛时不会返回；调用方应当给出上限。
    #[tracing::instrument(skip(self), fields(policy = self.policy.name(), seed = self.seed))]
    pub fn run(&mut self, max_rounds: Option<u64>) -> Result<SimOutcome, SimError> {
        if self.state == SimState::Aborted {
            return Err(SimError::Aborted { round: self.round });
        }
        info!("▶️  开始运行仿真");

        while self.state == SimState::Running {
            if max_rounds.is_some_and(|max| self.round >= max) {
                warn!(rounds = self.round, "达到轮数上限，仿真未完成");
                return Ok(self.outcome(Termination::RoundLimit));
            }
            self.step()?;
        }

        info!(rounds = self.round, "✅ 仿真完成");
        Ok(self.outcome(Termination::Completed))
    }

    fn outcome(&self, termination: Termination) -> SimOutcome {
        SimOutcome {
            policy: self.policy.name().to_string(),
            seed: self.seed,
            termination,
            rounds: self.round,
            final_sizes: ledger::snapshot(&self.graph),
            utilization: self.utilization.clone(),
        }
    }
}
