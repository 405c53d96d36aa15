// ABOUTME: Connection settings persistence for Liquibase GUI
// ABOUTME: Reads and writes a single-line key=value file beside the bundled tool

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::liquibase::ToolLocator;

/// File name of the settings file inside the tool directory
pub const SETTINGS_FILE_NAME: &str = "input.txt";

const KEY_DATABASE_URL: &str = "database_url";
const KEY_DATABASE_NAME: &str = "database_name";
const KEY_SCHEMA: &str = "schema";
const KEY_USER_NAME: &str = "user_name";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to write settings file {}: {source}", path.display())]
    WriteError { path: PathBuf, source: io::Error },
    #[error("Failed to create settings directory {}: {source}", path.display())]
    CreateDirError { path: PathBuf, source: io::Error },
}

/// Connection fields remembered between sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub database_name: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
}

impl Settings {
    /// Serialize to the single-line file format. Absent values are written empty.
    pub fn to_line(&self) -> String {
        let field = |value: &Option<String>| value.as_deref().unwrap_or("").to_string();

        format!(
            "{}={},{}={},{}={},{}={}",
            KEY_DATABASE_URL,
            field(&self.database_url),
            KEY_DATABASE_NAME,
            field(&self.database_name),
            KEY_SCHEMA,
            field(&self.schema),
            KEY_USER_NAME,
            field(&self.user_name),
        )
    }

    /// Parse the file format. Unknown keys and entries without `=` are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut settings = Settings::default();

        for entry in contents.trim().split(',') {
            let Some((key, value)) = entry.split_once('=') else {
                continue;
            };

            // Present keys keep their value even when empty; only missing keys are absent
            let value = Some(value.trim().to_string());

            match key.trim() {
                KEY_DATABASE_URL => settings.database_url = value,
                KEY_DATABASE_NAME => settings.database_name = value,
                KEY_SCHEMA => settings.schema = value,
                KEY_USER_NAME => settings.user_name = value,
                _ => {}
            }
        }

        settings
    }
}

/// Location of the settings file
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Settings file inside the resolved tool directory
    pub fn from_locator(locator: &ToolLocator) -> Self {
        Self::new(locator.resolve().join(SETTINGS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to empty values on any failure
    pub fn load(&self) -> Settings {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Settings::parse(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No settings file at {}", self.path.display());
                Settings::default()
            }
            Err(e) => {
                log::warn!(
                    "Failed to read settings from {}: {}",
                    self.path.display(),
                    e
                );
                Settings::default()
            }
        }
    }

    /// Overwrite the settings file
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        // Ensure directory exists
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SettingsError::CreateDirError {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, settings.to_line()).map_err(|source| {
            SettingsError::WriteError {
                path: self.path.clone(),
                source,
            }
        })?;

        log::info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}
