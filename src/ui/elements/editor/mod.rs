// src/ui/elements/editor/mod.rs
pub mod footer;
pub mod main_editor;
pub mod state;
pub mod table_body;
pub mod table_header;

pub use main_editor::ledger_editor_ui;
pub use state::EditorWindowState;
