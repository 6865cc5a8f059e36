//! 场景配置（JSON）
//!
//! 描述一次仿真所需的拓扑、内容全集、策略、随机种子与轮数上限。
//! 内容全集可以写成 `items`（即 `0..items`），也可以用 `universe` 显式列出条目编号，
//! 两者恰好给出一个。

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::net::{Graph, ItemId};
use crate::policy::PolicyKind;
use crate::topo::two_tier::{TwoTierOpts, build_two_tier_with};
use crate::topo::uniform::{UniformOpts, build_uniform_with};
use crate::topo::{TopologyError, content_universe, make_graph};

/// 当前支持的场景格式版本
pub const SCENARIO_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported scenario schema_version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("scenario must give exactly one of `items` or `universe`")]
    UniverseChoice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub schema_version: u32,
    #[serde(default)]
    pub meta: Option<ScenarioMeta>,
    pub topology: TopologySpec,
    /// 内容全集大小：条目为 `0..items`
    #[serde(default)]
    pub items: Option<u64>,
    /// 显式内容全集，重复编号合并
    #[serde(default)]
    pub universe: Option<Vec<u64>>,
    #[serde(default)]
    pub policy: Option<PolicyKind>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub max_rounds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopologySpec {
    Uniform {
        nodes: usize,
        bandwidth: u64,
        link_capacity: u64,
    },
    TwoTier {
        high_nodes: usize,
        low_nodes: usize,
        high_bandwidth: u64,
        low_bandwidth: u64,
        high_capacity: u64,
        low_capacity: u64,
    },
    /// 直接给出每个节点的带宽和完整容量矩阵
    Explicit {
        bandwidths: Vec<u64>,
        capacities: Vec<Vec<u64>>,
    },
}

impl ScenarioSpec {
    pub fn from_json(raw: &str) -> Result<Self, ScenarioError> {
        let spec: ScenarioSpec = serde_json::from_str(raw)?;
        if spec.schema_version != SCENARIO_SCHEMA_VERSION {
            return Err(ScenarioError::UnsupportedVersion {
                found: spec.schema_version,
                expected: SCENARIO_SCHEMA_VERSION,
            });
        }
        if spec.items.is_some() == spec.universe.is_some() {
            return Err(ScenarioError::UniverseChoice);
        }
        Ok(spec)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let raw = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// 未指定策略时使用平均分配
    pub fn policy(&self) -> PolicyKind {
        self.policy.unwrap_or(PolicyKind::EqualSplit)
    }

    /// 场景的内容全集；两个字段都缺省时为空集（`from_json` 已拒绝这种情况）
    pub fn universe(&self) -> BTreeSet<ItemId> {
        match (&self.universe, self.items) {
            (Some(ids), _) => ids.iter().copied().map(ItemId).collect(),
            (None, Some(items)) => content_universe(items),
            (None, None) => BTreeSet::new(),
        }
    }

    /// 按拓扑描述构建初始资源图
    pub fn build_graph(&self) -> Result<Graph, TopologyError> {
        let universe = self.universe();
        let items = universe.len() as u64;
        match &self.topology {
            TopologySpec::Uniform {
                nodes,
                bandwidth,
                link_capacity,
            } => build_uniform_with(
                &UniformOpts {
                    nodes: *nodes,
                    items,
                    bandwidth: *bandwidth,
                    link_capacity: *link_capacity,
                },
                universe,
            ),
            TopologySpec::TwoTier {
                high_nodes,
                low_nodes,
                high_bandwidth,
                low_bandwidth,
                high_capacity,
                low_capacity,
            } => build_two_tier_with(
                &TwoTierOpts {
                    items,
                    high_nodes: *high_nodes,
                    low_nodes: *low_nodes,
                    high_bandwidth: *high_bandwidth,
                    low_bandwidth: *low_bandwidth,
                    high_capacity: *high_capacity,
                    low_capacity: *low_capacity,
                },
                universe,
            ),
            TopologySpec::Explicit {
                bandwidths,
                capacities,
            } => make_graph(bandwidths.len(), universe, bandwidths, capacities),
        }
    }
}
