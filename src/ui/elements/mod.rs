// src/ui/elements/mod.rs

// Grid of the active page: header, body, footer and edit state
pub mod editor;
pub mod filter_panel;
pub mod popups;
pub mod sidebar;
pub mod top_panel;
