// src/ledger/systems/logic/mod.rs
pub mod add_column;
pub mod add_entry;
pub mod delete_entries;
pub mod grid_input;
pub mod pages;
pub mod view;

pub use add_column::handle_add_column_request;
pub use add_entry::handle_add_entry_request;
pub use delete_entries::handle_delete_entries_request;
pub use grid_input::handle_grid_input;
pub use pages::{
    handle_create_page_request, handle_delete_page_request, handle_rename_page_request,
    handle_set_active_page_request,
};
pub use view::refresh_visible_entries;
