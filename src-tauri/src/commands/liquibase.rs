// ABOUTME: Liquibase-related Tauri commands
// ABOUTME: Runs migrations, picks changelog files and reports tool health

use tauri::{AppHandle, State};
use tauri_plugin_dialog::DialogExt;
use tokio::sync::oneshot;

use crate::liquibase::{InvocationRequest, Liquibase};
use crate::models::{HealthResponse, OpenFileResponse, RunCommandRequest};

/// Run a Liquibase command and return its combined output
#[tauri::command]
pub async fn run_liquibase_command(
    liquibase: State<'_, Liquibase>,
    request: RunCommandRequest,
) -> Result<String, String> {
    let request = InvocationRequest::try_from(request).map_err(|e| e.to_string())?;

    liquibase.invoke(&request).await.map_err(|e| {
        log::warn!("Liquibase {} failed: {:?}", request.command, e.cause());
        e.to_string()
    })
}

/// Let the user pick a YAML changelog
#[tauri::command]
pub async fn open_file(app: AppHandle) -> Result<OpenFileResponse, String> {
    let (tx, rx) = oneshot::channel();

    app.dialog()
        .file()
        .add_filter("Liquibase changelog", &["yaml", "yml"])
        .pick_file(move |picked| {
            let _ = tx.send(picked);
        });

    let picked = rx
        .await
        .map_err(|e| format!("File dialog closed unexpectedly: {}", e))?;

    match picked {
        Some(file) => {
            let path = file.into_path().map_err(|e| e.to_string())?;
            Ok(OpenFileResponse::selected(path.to_string_lossy().into_owned()))
        }
        None => Ok(OpenFileResponse::canceled()),
    }
}

/// Report where Liquibase is expected and whether it is there
#[tauri::command]
pub fn check_health(liquibase: State<'_, Liquibase>) -> HealthResponse {
    let (tool_dir, executable_found) = match liquibase.profile() {
        Ok(profile) => {
            let found = profile.executable_path.is_file();
            (profile.tool_dir, found)
        }
        Err(e) => {
            log::warn!("{}", e);
            (liquibase.locator().resolve(), false)
        }
    };

    HealthResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        platform: std::env::consts::OS.to_string(),
        tool_dir: tool_dir.to_string_lossy().into_owned(),
        executable_found,
    }
}
