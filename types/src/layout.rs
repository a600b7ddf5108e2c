//! Grid column layout: visibility, pinning, and column order.
//!
//! The three fragments are persisted independently but are coupled by the
//! invariants enforced in [`ColumnLayout::sanitize`]: a column belongs to at
//! most one pin group, and the order is a total order over the full universe.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// The fixed column universe of the store grid, in default display order.
pub const COLUMNS: [&str; 12] = [
    "id",
    "name",
    "status",
    "assignee",
    "network",
    "financial_status",
    "risk_score",
    "days_in_transit",
    "contract_days",
    "start_date",
    "finish_date",
    "predicted_date",
];

pub fn is_known_column(id: &str) -> bool {
    COLUMNS.contains(&id)
}

/// Side a column can be pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinSide {
    Left,
    Right,
}

/// Column placement partition: pinned left, pinned right, or unpinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinGroup {
    Left,
    Right,
    Center,
}

/// Ordered pin lists per side. Columns in neither list are unpinned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnPinning {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

/// Complete column layout of the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnLayout {
    /// Column id to visible flag, covering the whole universe.
    pub visibility: HashMap<String, bool>,
    pub pinning: ColumnPinning,
    /// Total order over the full column universe.
    pub order: Vec<String>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            visibility: COLUMNS.iter().map(|id| (id.to_string(), true)).collect(),
            pinning: ColumnPinning {
                left: vec!["name".to_string()],
                right: Vec::new(),
            },
            order: COLUMNS.iter().map(|id| id.to_string()).collect(),
        }
    }
}

impl ColumnLayout {
    pub fn pin_group_of(&self, id: &str) -> PinGroup {
        if self.pinning.left.iter().any(|c| c == id) {
            PinGroup::Left
        } else if self.pinning.right.iter().any(|c| c == id) {
            PinGroup::Right
        } else {
            PinGroup::Center
        }
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visibility.get(id).copied().unwrap_or(true)
    }

    /// Columns of one pin group, in total-order sequence.
    pub fn group_order(&self, group: PinGroup) -> Vec<String> {
        self.order
            .iter()
            .filter(|id| self.pin_group_of(id.as_str()) == group)
            .cloned()
            .collect()
    }

    /// Re-derive the per-side pin lists from the total order, keeping
    /// membership unchanged.
    pub fn rederive_pin_order(&mut self) {
        let left: Vec<String> = self
            .order
            .iter()
            .filter(|id| self.pinning.left.iter().any(|c| &c == id))
            .cloned()
            .collect();
        let right: Vec<String> = self
            .order
            .iter()
            .filter(|id| self.pinning.right.iter().any(|c| &c == id))
            .cloned()
            .collect();
        self.pinning.left = left;
        self.pinning.right = right;
    }

    /// Clamp a layout read back from storage onto the known column universe.
    ///
    /// Unknown ids are dropped, missing ids restored with their defaults, a
    /// column claimed by both pin sides keeps its left placement, and columns
    /// absent from the order are appended at the end.
    pub fn sanitize(&mut self) {
        self.visibility.retain(|id, _| is_known_column(id));
        for id in COLUMNS {
            self.visibility.entry(id.to_string()).or_insert(true);
        }

        let mut pinned: HashSet<String> = HashSet::new();
        self.pinning
            .left
            .retain(|id| is_known_column(id) && pinned.insert(id.clone()));
        self.pinning
            .right
            .retain(|id| is_known_column(id) && pinned.insert(id.clone()));

        let mut seen: HashSet<String> = HashSet::new();
        self.order
            .retain(|id| is_known_column(id) && seen.insert(id.clone()));
        for id in COLUMNS {
            if !seen.contains(id) {
                self.order.push(id.to_string());
            }
        }

        self.rederive_pin_order();
    }
}
