//! Durable column layout store.
//!
//! The three layout fragments (visibility, pinning, order) are persisted
//! under independent keys. On load each fragment deserializes on its own; a
//! missing or corrupt fragment falls back to its hard-coded default without
//! invalidating the other two. Every setter persists the full layout
//! synchronously, so a reload reproduces the last observed state.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use rollout_types::{ColumnLayout, PinSide, is_known_column};

use super::storage::LayoutStorage;

pub(crate) const VISIBILITY_KEY: &str = "columns.visibility";
pub(crate) const PINNING_KEY: &str = "columns.pinning";
pub(crate) const ORDER_KEY: &str = "columns.order";

/// Errors surfaced by layout mutations. Load/persist problems are absorbed
/// and logged instead, since the grid must keep working on defaults.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("unknown column id: {0}")]
    UnknownColumn(String),
    #[error("order must be a permutation of the column universe")]
    InvalidOrder,
}

/// Column layout state with write-through persistence.
pub struct LayoutStore<S: LayoutStorage> {
    storage: S,
    layout: ColumnLayout,
}

impl<S: LayoutStorage> LayoutStore<S> {
    /// Load the layout from `storage`, falling back per fragment.
    pub fn new(storage: S) -> Self {
        let defaults = ColumnLayout::default();
        let mut layout = ColumnLayout {
            visibility: load_fragment(&storage, VISIBILITY_KEY, defaults.visibility),
            pinning: load_fragment(&storage, PINNING_KEY, defaults.pinning),
            order: load_fragment(&storage, ORDER_KEY, defaults.order),
        };
        layout.sanitize();
        Self { storage, layout }
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Show or hide a column.
    pub fn set_visibility(&mut self, id: &str, visible: bool) -> Result<(), LayoutError> {
        self.check_known(id)?;
        self.layout.visibility.insert(id.to_string(), visible);
        self.persist();
        Ok(())
    }

    /// Pin a column to a side, or unpin it with `None`. The column's position
    /// inside its new group follows the total order.
    pub fn set_pinning(&mut self, id: &str, side: Option<PinSide>) -> Result<(), LayoutError> {
        self.check_known(id)?;
        self.layout.pinning.left.retain(|c| c != id);
        self.layout.pinning.right.retain(|c| c != id);
        match side {
            Some(PinSide::Left) => self.layout.pinning.left.push(id.to_string()),
            Some(PinSide::Right) => self.layout.pinning.right.push(id.to_string()),
            None => {}
        }
        self.layout.rederive_pin_order();
        self.persist();
        Ok(())
    }

    /// Replace the total column order. `new_order` must be a permutation of
    /// the column universe; the per-group pin sub-orders are re-derived from
    /// it.
    pub fn set_order(&mut self, new_order: Vec<String>) -> Result<(), LayoutError> {
        if new_order.len() != self.layout.order.len() {
            return Err(LayoutError::InvalidOrder);
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for id in &new_order {
            if !is_known_column(id) || !seen.insert(id.as_str()) {
                return Err(LayoutError::InvalidOrder);
            }
        }
        self.layout.order = new_order;
        self.layout.rederive_pin_order();
        self.persist();
        Ok(())
    }

    fn check_known(&self, id: &str) -> Result<(), LayoutError> {
        if is_known_column(id) {
            Ok(())
        } else {
            Err(LayoutError::UnknownColumn(id.to_string()))
        }
    }

    /// Write all three fragments. Storage failures degrade to a warning; the
    /// in-memory layout stays authoritative for the session.
    fn persist(&mut self) {
        persist_fragment(&mut self.storage, VISIBILITY_KEY, &self.layout.visibility);
        persist_fragment(&mut self.storage, PINNING_KEY, &self.layout.pinning);
        persist_fragment(&mut self.storage, ORDER_KEY, &self.layout.order);
    }
}

fn load_fragment<S: LayoutStorage, T: DeserializeOwned>(storage: &S, key: &str, default: T) -> T {
    match storage.get(key) {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Corrupt layout fragment, using default");
                default
            }
        },
        None => default,
    }
}

fn persist_fragment<S: LayoutStorage, T: serde::Serialize>(storage: &mut S, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => {
            if let Err(e) = storage.set(key, &raw) {
                tracing::warn!(key, error = %e, "Failed to persist layout fragment");
            }
        }
        Err(e) => tracing::warn!(key, error = %e, "Failed to serialize layout fragment"),
    }
}
