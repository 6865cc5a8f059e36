//! 仿真错误

use thiserror::Error;

use super::scenario::ScenarioError;
use crate::ledger::TransferError;
use crate::topo::TopologyError;

#[derive(Debug, Error)]
pub enum SimError {
    /// 策略给出了不可行的传输，整次仿真中止
    #[error("round {round}: transfer invariant violated: {source}")]
    Transfer {
        round: u64,
        #[source]
        source: TransferError,
    },
    /// 之前的某一轮已因传输错误中止
    #[error("simulation was aborted in round {round}")]
    Aborted { round: u64 },
    #[error("simulation already finished after {rounds} rounds")]
    AlreadyDone { rounds: u64 },
    #[error(transparent)]
    Topology(#[from] TopologyError),
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}
