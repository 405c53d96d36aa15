// ABOUTME: Settings Tauri commands
// ABOUTME: Loads and saves the remembered connection fields

use tauri::State;

use crate::liquibase::Liquibase;
use crate::models::SaveResponse;
use crate::settings::{Settings, SettingsStore};

/// Overwrite the settings file with the form values
#[tauri::command]
pub fn save_settings(
    liquibase: State<'_, Liquibase>,
    data: Settings,
) -> Result<SaveResponse, String> {
    let store = SettingsStore::from_locator(liquibase.locator());

    match store.save(&data) {
        Ok(_) => Ok(SaveResponse { ok: true }),
        Err(e) => Err(format!("Failed to save settings: {}", e)),
    }
}

/// Load settings, empty when nothing was saved yet
#[tauri::command]
pub fn load_settings(liquibase: State<'_, Liquibase>) -> Settings {
    SettingsStore::from_locator(liquibase.locator()).load()
}
