// ABOUTME: Entry point for the Liquibase GUI desktop application
// ABOUTME: Calls the library run function to start the Tauri app

// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    liquibase_gui_lib::run();
}
