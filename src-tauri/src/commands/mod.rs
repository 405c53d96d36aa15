// ABOUTME: Tauri command module exports
// ABOUTME: Organizes all frontend-callable commands by category

pub mod liquibase;
pub mod settings;
