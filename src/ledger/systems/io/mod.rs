// src/ledger/systems/io/mod.rs
pub mod error;
pub mod load;
pub mod save;

use std::path::{Path, PathBuf};

use crate::settings::{io::project_dirs, AppSettings};

pub use error::PersistenceError;
pub use load::{load_book, load_ledger_on_startup};
pub use save::{handle_save_on_modification, write_book_atomic};

pub const SNAPSHOT_FILE_NAME: &str = "ledger_book.json";
const FALLBACK_DATA_DIR: &str = "ledger_data";

/// Directory holding the snapshot: the settings override first, then the
/// platform data directory, then `./ledger_data`.
pub fn resolve_data_dir(settings: &AppSettings) -> PathBuf {
    if let Some(dir) = &settings.data_dir {
        return dir.clone();
    }
    match project_dirs() {
        Ok(dirs) => dirs.data_dir().to_path_buf(),
        Err(e) => {
            bevy::log::warn!("{}. Falling back to './{}'.", e, FALLBACK_DATA_DIR);
            PathBuf::from(FALLBACK_DATA_DIR)
        }
    }
}

pub fn snapshot_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SNAPSHOT_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_override_wins() {
        let settings = AppSettings {
            data_dir: Some(PathBuf::from("/tmp/books")),
            ..Default::default()
        };
        assert_eq!(resolve_data_dir(&settings), PathBuf::from("/tmp/books"));
        assert_eq!(
            snapshot_path(&resolve_data_dir(&settings)),
            PathBuf::from("/tmp/books/ledger_book.json")
        );
    }
}
