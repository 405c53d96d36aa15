// ABOUTME: Liquibase launcher module exports and failure taxonomy
// ABOUTME: Resolves the bundled tool, builds the command line and runs it

pub mod command;
pub mod platform;
pub mod runner;

use std::path::PathBuf;
use thiserror::Error;

pub use command::{Invocation, InvocationRequest, LiquibaseCommand};
pub use platform::{Platform, PlatformProfile, ToolLocator};
pub use runner::Liquibase;

#[derive(Error, Debug)]
pub enum InvocationError {
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),
    #[error("Liquibase executable not found at {}", .0.display())]
    MissingExecutable(PathBuf),
    #[error("{}", missing_changelog_message(.0))]
    MissingChangelog(Option<PathBuf>),
    #[error("Rollback requires a positive rollback count")]
    InvalidRollbackCount,
    #[error("Failed to start Liquibase: {0}")]
    ProcessSpawnError(#[from] std::io::Error),
    #[error("{output}")]
    NonZeroExit {
        output: String,
        exit_code: Option<i32>,
    },
}

fn missing_changelog_message(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!("Changelog file not found: {}", path.display()),
        None => "No changelog file selected".to_string(),
    }
}

/// Category of a failed invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    UnsupportedPlatform,
    MissingExecutable,
    MissingChangelog,
    InvalidRequest,
    ProcessSpawnError,
    NonZeroExit,
}

impl InvocationError {
    pub fn cause(&self) -> FailureCause {
        match self {
            InvocationError::UnsupportedPlatform(_) => FailureCause::UnsupportedPlatform,
            InvocationError::MissingExecutable(_) => FailureCause::MissingExecutable,
            InvocationError::MissingChangelog(_) => FailureCause::MissingChangelog,
            InvocationError::InvalidRollbackCount => FailureCause::InvalidRequest,
            InvocationError::ProcessSpawnError(_) => FailureCause::ProcessSpawnError,
            InvocationError::NonZeroExit { .. } => FailureCause::NonZeroExit,
        }
    }

    /// Exit code reported by Liquibase, when it ran and failed
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            InvocationError::NonZeroExit { exit_code, .. } => *exit_code,
            _ => None,
        }
    }

    /// Output captured before the failure
    pub fn output(&self) -> Option<&str> {
        match self {
            InvocationError::NonZeroExit { output, .. } => Some(output),
            _ => None,
        }
    }
}
