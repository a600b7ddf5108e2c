//! Drag-and-drop column reordering.
//!
//! Reordering is confined to a single pin group: dropping a column onto a
//! target in another group would implicitly change its pinning, so the drop
//! is rejected instead. Committed orders are written through the layout
//! store, which re-derives the per-group sub-orders.

use rollout_types::ColumnLayout;

use super::store::LayoutStore;
use super::storage::LayoutStorage;

/// Where the dragged column would land relative to the hovered target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropHint {
    Before,
    After,
}

/// Result of committing a drop.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The order changed; carries the resulting layout.
    Applied(ColumnLayout),
    /// Source and target live in different pin groups; nothing changed.
    Rejected,
    /// No active drag, unknown target, or dropped onto itself.
    NoOp,
}

/// Tracks one in-flight column drag.
#[derive(Debug, Default)]
pub struct DragController {
    dragging: Option<String>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging a column. Unknown columns are ignored.
    pub fn begin_drag(&mut self, layout: &ColumnLayout, id: &str) {
        if layout.order.iter().any(|c| c == id) {
            self.dragging = Some(id.to_string());
        } else {
            self.dragging = None;
        }
    }

    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    /// Pure hover feedback: where the dragged column would land. Returns
    /// `None` when the drop would be rejected, so the view can render an
    /// invalid-target cue. Never mutates layout state.
    pub fn drag_over(&self, layout: &ColumnLayout, target: &str) -> Option<DropHint> {
        let source = self.dragging.as_deref()?;
        if source == target {
            return None;
        }
        if layout.pin_group_of(source) != layout.pin_group_of(target) {
            return None;
        }
        let from = layout.order.iter().position(|c| c == source)?;
        let to = layout.order.iter().position(|c| c == target)?;
        Some(if from < to { DropHint::After } else { DropHint::Before })
    }

    /// Commit the drag onto `target`, writing the new order through `store`.
    /// Always clears the drag state.
    pub fn drop_on<S: LayoutStorage>(
        &mut self,
        store: &mut LayoutStore<S>,
        target: &str,
    ) -> DropOutcome {
        let Some(source) = self.dragging.take() else {
            return DropOutcome::NoOp;
        };
        if source == target {
            return DropOutcome::NoOp;
        }

        let layout = store.layout();
        if layout.pin_group_of(&source) != layout.pin_group_of(target) {
            return DropOutcome::Rejected;
        }
        let Some(from) = layout.order.iter().position(|c| *c == source) else {
            return DropOutcome::NoOp;
        };
        let Some(to) = layout.order.iter().position(|c| c == target) else {
            return DropOutcome::NoOp;
        };

        // Remove the dragged id, then reinsert at the target's original
        // index: removal shifts the target when dragging forward, so the
        // column lands after it; dragging backward it lands before it. The
        // drop position matches the pointer regardless of drag direction.
        let mut order = layout.order.clone();
        order.remove(from);
        order.insert(to, source);

        match store.set_order(order) {
            Ok(()) => DropOutcome::Applied(store.layout().clone()),
            Err(_) => DropOutcome::NoOp,
        }
    }
}
