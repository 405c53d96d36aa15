// ABOUTME: Main library for the Liquibase GUI Tauri application
// ABOUTME: Contains app setup, command registration, and module declarations

// Module declarations
#[cfg(feature = "desktop")]
pub mod commands;
pub mod liquibase;
pub mod models;
pub mod settings;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::Manager;

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let level = if cfg!(debug_assertions) {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            };
            app.handle()
                .plugin(tauri_plugin_log::Builder::default().level(level).build())?;

            let locator = liquibase::ToolLocator::discover(app.path().resource_dir().ok());
            log::info!(
                "Using Liquibase directory {}",
                locator.resolve().display()
            );
            app.manage(liquibase::Liquibase::new(locator));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::liquibase::run_liquibase_command,
            commands::liquibase::open_file,
            commands::liquibase::check_health,
            commands::settings::save_settings,
            commands::settings::load_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
