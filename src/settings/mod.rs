// src/settings/mod.rs
pub mod io;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ledger::column_definition::DEFAULT_COLUMN_WIDTH;

fn default_placeholder_rows() -> usize {
    10
}

fn default_column_width() -> f32 {
    DEFAULT_COLUMN_WIDTH
}

fn default_autosave() -> bool {
    true
}

#[derive(Resource, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppSettings {
    /// Overrides where `ledger_book.json` lives.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// The grid always shows at least this many rows, padding with placeholders.
    #[serde(default = "default_placeholder_rows")]
    pub placeholder_rows: usize,
    #[serde(default = "default_column_width")]
    pub default_column_width: f32,
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            placeholder_rows: default_placeholder_rows(),
            default_column_width: default_column_width(),
            autosave: default_autosave(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_fill_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{ "autosave": false }"#).unwrap();
        assert!(!settings.autosave);
        assert_eq!(settings.placeholder_rows, 10);
        assert_eq!(settings.default_column_width, 120.0);
        assert!(settings.data_dir.is_none());
    }
}
