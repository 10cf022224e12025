// src/ledger/grid_edit/mod.rs
pub mod engine;
pub mod navigation;
pub mod state;

pub use engine::{EditOutcome, GridEditor};
pub use state::{GridEditState, GridInput, GridKey, ResizeDrag};
