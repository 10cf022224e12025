// src/ledger/mod.rs
pub mod cell_input;
pub mod column_definition;
pub mod column_type;
pub mod entry;
pub mod error;
pub mod events;
pub mod filter;
pub mod footer;
pub mod grid_edit;
pub mod page;
pub mod plugin;
pub mod resources;
pub mod systems;
pub mod table;

pub use plugin::LedgerPlugin;
