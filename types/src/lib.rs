//! Shared data model for the rollout monitor.
//!
//! These types mirror the backend API payloads and are consumed by both the
//! grid engine (`rollout-core`) and the HTTP client (`rollout-client`).

pub mod formatting;

mod filter;
mod layout;
mod record;
mod workload;

pub use filter::{DateRange, FilterSpec};
pub use layout::{COLUMNS, ColumnLayout, ColumnPinning, PinGroup, PinSide, is_known_column};
pub use record::{HIGH_RISK_THRESHOLD, Prediction, RiskTier, StoreId, StorePatch, StoreRecord};
pub use workload::{
    CapacityRecord, MergedWorkloadRow, PerformanceRecord, SortDirection, WorkloadSortKey,
};
