//! Record filter specification for the monitor grid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive date-range bounds. A side left as `None` is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_active(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    /// Inclusive containment check. A `None` date never satisfies an active
    /// bound; an inactive range matches everything.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        if !self.is_active() {
            return true;
        }
        let Some(d) = date else {
            return false;
        };
        self.from.is_none_or(|from| d >= from) && self.to.is_none_or(|to| d <= to)
    }
}

/// Conjunction of independent record predicates.
///
/// A predicate whose field is empty/`None`/`false` is inactive and ignored;
/// every active predicate must hold for a record to pass. The default spec
/// therefore imposes no restriction at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    /// Case-insensitive substring match over record name and id.
    pub search: Option<String>,
    /// Bounds on the rollout start date.
    pub start: DateRange,
    /// Bounds on the finish date.
    pub finish: DateRange,
    /// Set membership on status; empty means any status.
    pub statuses: Vec<String>,
    pub assignee: Option<String>,
    pub financial_status: Option<String>,
    /// Quick filter: risk score above the high-risk threshold.
    pub high_risk: bool,
    /// Quick filter: transit time past the contracted time.
    pub late: bool,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().is_none_or(|s| s.trim().is_empty())
            && !self.start.is_active()
            && !self.finish.is_active()
            && self.statuses.is_empty()
            && self.assignee.is_none()
            && self.financial_status.is_none()
            && !self.high_risk
            && !self.late
    }
}
