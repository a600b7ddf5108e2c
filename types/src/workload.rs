//! Per-person workload and performance types for the analytics board.

use serde::{Deserialize, Serialize};

use crate::record::RiskTier;

/// Windowed delivery performance for one person.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceRecord {
    pub name: String,
    /// Composite performance score computed by the backend.
    pub score: f64,
    /// Stores concluded inside the selected window.
    pub completed_count: u32,
    /// Weighted effort points concluded inside the window.
    pub completed_points: f64,
    /// Stores currently in progress.
    pub wip_count: u32,
    pub on_time_pct: f64,
}

/// Point-in-time capacity snapshot for one person. Unlike
/// [`PerformanceRecord`] this is not windowed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityRecord {
    #[serde(rename = "implantador")]
    pub name: String,
    /// Open effort points currently assigned.
    pub current_points: f64,
    pub store_count: u32,
    /// Configured point ceiling for this person.
    pub max_points: f64,
    pub utilization_pct: f64,
    #[serde(rename = "risk_level")]
    pub risk: RiskTier,
    /// Active network/account names this person is covering.
    #[serde(rename = "active_networks")]
    pub networks: Vec<String>,
}

/// One person's row on the merged workload board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergedWorkloadRow {
    pub name: String,
    pub score: f64,
    /// Official 1-based position by score descending. Computed once per
    /// merge and invariant to the display sort.
    pub rank: u32,
    /// Current open points plus points completed in the window.
    pub workload_index: f64,
    /// Capacity store count plus stores completed in the window.
    pub total_stores: u32,
    pub completed_count: u32,
    pub completed_points: f64,
    pub wip_count: u32,
    pub on_time_pct: f64,
    pub current_points: f64,
    pub max_points: f64,
    pub utilization_pct: f64,
    pub risk: RiskTier,
    pub networks: Vec<String>,
}

/// Display-sort field for the workload board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadSortKey {
    Score,
    Name,
    WorkloadIndex,
    TotalStores,
    OnTimePct,
    Utilization,
}

impl WorkloadSortKey {
    /// Column header label
    pub fn label(&self) -> &'static str {
        match self {
            WorkloadSortKey::Score => "Score",
            WorkloadSortKey::Name => "Name",
            WorkloadSortKey::WorkloadIndex => "Workload",
            WorkloadSortKey::TotalStores => "Stores",
            WorkloadSortKey::OnTimePct => "On Time",
            WorkloadSortKey::Utilization => "Utilization",
        }
    }

    pub fn all() -> &'static [WorkloadSortKey] {
        &[
            WorkloadSortKey::Score,
            WorkloadSortKey::Name,
            WorkloadSortKey::WorkloadIndex,
            WorkloadSortKey::TotalStores,
            WorkloadSortKey::OnTimePct,
            WorkloadSortKey::Utilization,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}
