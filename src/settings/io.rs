// src/settings/io.rs
use bevy::log::{debug, error, info};
use directories_next::ProjectDirs;
use std::fs;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::ledger::systems::io::PersistenceError;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "LedgerbookOrg";
const APPLICATION: &str = "Ledgerbook";
const CONFIG_FILE: &str = "app_settings.json";

pub(crate) fn project_dirs() -> Result<ProjectDirs, PersistenceError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or(PersistenceError::NoDataDirectory)
}

pub fn settings_path() -> Result<PathBuf, PersistenceError> {
    let proj_dirs = project_dirs()?;
    Ok(proj_dirs.config_dir().join(CONFIG_FILE))
}

/// Missing file means defaults.
pub fn load_settings_from_path<T: for<'de> serde::de::Deserialize<'de> + Default>(
    config_file: &Path,
) -> Result<T, PersistenceError> {
    info!("AppSettings: Attempting to load settings from {:?}", config_file);
    match fs::File::open(config_file) {
        Ok(file) => {
            let settings = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                error!("AppSettings: Failed to parse settings file {:?}: {}", config_file, e);
                PersistenceError::Json {
                    path: config_file.to_path_buf(),
                    source: e,
                }
            })?;
            info!("AppSettings: Successfully deserialized settings.");
            Ok(settings)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("AppSettings: Settings file not found at {:?}. Returning default.", config_file);
            Ok(Default::default())
        }
        Err(e) => {
            error!("AppSettings: Failed to open settings file {:?}: {}", config_file, e);
            Err(PersistenceError::io("open", config_file)(e))
        }
    }
}

pub fn save_settings_to_path<T: serde::Serialize>(settings: &T, config_file: &Path) -> Result<(), PersistenceError> {
    info!("AppSettings: Saving settings to {:?}", config_file);
    if let Some(parent) = config_file.parent() {
        fs::create_dir_all(parent).map_err(PersistenceError::io("create directory", parent))?;
    }
    let file = fs::File::create(config_file).map_err(PersistenceError::io("create", config_file))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, settings).map_err(PersistenceError::json(config_file))?;
    writer.flush().map_err(PersistenceError::io("write", config_file))?;
    debug!("AppSettings: settings written.");
    Ok(())
}

pub fn load_settings_from_file<T: for<'de> serde::de::Deserialize<'de> + Default>() -> Result<T, PersistenceError> {
    load_settings_from_path(&settings_path()?)
}

/// Writes the defaults out on first run so the file is discoverable.
pub fn save_settings_to_file<T: serde::Serialize>(settings: &T) -> Result<(), PersistenceError> {
    save_settings_to_path(settings, &settings_path()?)
}
