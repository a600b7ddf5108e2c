pub mod filter;
pub mod grid;
pub mod mutation;
pub mod normalize;
pub mod workload;

// Re-exports for convenience
pub use grid::{DragController, DropOutcome, LayoutStore};
pub use mutation::{MutationCoordinator, StoreBackend, StoreCache};
pub use normalize::StoresPayload;
