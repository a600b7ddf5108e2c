//! Grid column layout: durable store and drag reordering.

mod reorder;
mod storage;
mod store;

pub use reorder::{DragController, DropHint, DropOutcome};
pub use storage::{FileStorage, LayoutStorage, MemoryStorage, default_layout_dir};
pub use store::{LayoutError, LayoutStore};
