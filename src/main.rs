// src/main.rs

#![cfg_attr(all(not(debug_assertions), target_os = "windows"), windows_subsystem = "windows")]

use bevy::{
    log::LogPlugin,
    prelude::*,
    window::WindowPlugin,
    winit::{UpdateMode, WinitSettings},
};
use bevy_egui::EguiPlugin;
use clap::Parser;
use std::time::Duration;

mod cli;
mod ledger;
mod settings;
mod ui;

use cli::Cli;
use ledger::{resources::LedgerStoragePath, systems::io, LedgerPlugin};
use settings::AppSettings;
use ui::EditorUiPlugin;

fn main() {
    let args = Cli::parse();

    let mut app_settings = match settings::io::load_settings_from_file::<AppSettings>() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Warning: could not read settings ({}); using defaults.", e);
            AppSettings::default()
        }
    };
    if let Some(dir) = args.data_dir.clone() {
        app_settings.data_dir = Some(dir);
    }
    let snapshot = io::snapshot_path(&io::resolve_data_dir(&app_settings));

    if let Some(command) = &args.command {
        let stdout = std::io::stdout();
        if let Err(e) = cli::run(command, &snapshot, &mut stdout.lock()) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    App::new()
        .insert_resource(WinitSettings {
            focused_mode: UpdateMode::Continuous,
            unfocused_mode: UpdateMode::reactive_low_power(Duration::from_secs_f32(1.0 / 5.0)),
        })
        .insert_resource(app_settings)
        .insert_resource(LedgerStoragePath(snapshot))
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Ledgerbook".into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "wgpu=error,naga=warn".to_string(),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: true,
        })
        .add_plugins(LedgerPlugin)
        .add_plugins(EditorUiPlugin)
        .add_systems(Startup, write_default_settings_if_missing)
        .run();
}

fn write_default_settings_if_missing(settings: Res<AppSettings>) {
    match settings::io::settings_path() {
        Ok(path) if !path.exists() => {
            let mut to_write = settings.clone();
            // A --data-dir flag is per run; keep it out of the file.
            to_write.data_dir = None;
            match settings::io::save_settings_to_file(&to_write) {
                Ok(()) => info!("Wrote default settings to {:?}.", path),
                Err(e) => warn!("Could not write default settings: {}", e),
            }
        }
        Ok(_) => {}
        Err(e) => warn!("Settings location unavailable: {}", e),
    }
}
