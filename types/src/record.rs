//! Store record and mutation patch types.
//!
//! A record tracks one rollout project (a "store"). Records are created and
//! mutated by the backend; the client holds a read/write cache that converges
//! to server state after every mutation round trip.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Backend identifier for a store record.
pub type StoreId = i64;

/// Risk scores above this value count as high risk for the quick filter.
pub const HIGH_RISK_THRESHOLD: f64 = 20.0;

/// Risk tier reported by the backend on predictions and capacity snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    #[default]
    Low,
    Normal,
    High,
    Critical,
}

impl RiskTier {
    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Normal => "Normal",
            RiskTier::High => "High",
            RiskTier::Critical => "Critical",
        }
    }
}

/// Prediction sub-object attached to a record by the backend sync pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prediction {
    pub predicted_date: Option<NaiveDate>,
    pub contract_due_date: Option<NaiveDate>,
    pub lateness_days: Option<i64>,
    pub risk_tier: RiskTier,
    pub concluded: bool,
}

/// One tracked rollout project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub id: StoreId,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub financial_status: Option<String>,
    /// Always non-negative; the backend clamps at zero.
    #[serde(default)]
    pub risk_score: f64,
    #[serde(rename = "dias_em_transito", default)]
    pub days_in_transit: Option<u32>,
    #[serde(rename = "tempo_contrato", default)]
    pub contract_days: Option<u32>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub finish_date: Option<NaiveDate>,
    #[serde(default)]
    pub predicted_date: Option<NaiveDate>,
    #[serde(default)]
    pub prediction: Option<Prediction>,
}

impl StoreRecord {
    pub fn is_high_risk(&self) -> bool {
        self.risk_score > HIGH_RISK_THRESHOLD
    }

    /// Late when the elapsed transit time has exceeded the contracted time.
    /// Records missing either side are never late.
    pub fn is_late(&self) -> bool {
        matches!(
            (self.days_in_transit, self.contract_days),
            (Some(elapsed), Some(contract)) if elapsed > contract
        )
    }
}

/// Partial update for a single record.
///
/// `None` fields are left untouched locally and omitted from the wire body,
/// so the same type serves the single-record PUT and the bulk POST.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_date: Option<NaiveDate>,
}

impl StorePatch {
    /// Patch that only transitions the status field.
    pub fn status(value: impl Into<String>) -> Self {
        Self {
            status: Some(value.into()),
            ..Self::default()
        }
    }

    /// Patch that only reassigns the record.
    pub fn assignee(value: impl Into<String>) -> Self {
        Self {
            assignee: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.assignee.is_none()
            && self.financial_status.is_none()
            && self.start_date.is_none()
            && self.finish_date.is_none()
    }

    /// Apply every set field onto `record`, leaving the rest alone.
    pub fn apply_to(&self, record: &mut StoreRecord) {
        if let Some(status) = &self.status {
            record.status = status.clone();
        }
        if let Some(assignee) = &self.assignee {
            record.assignee = Some(assignee.clone());
        }
        if let Some(financial_status) = &self.financial_status {
            record.financial_status = Some(financial_status.clone());
        }
        if let Some(start_date) = self.start_date {
            record.start_date = Some(start_date);
        }
        if let Some(finish_date) = self.finish_date {
            record.finish_date = Some(finish_date);
        }
    }
}
