// ABOUTME: Shared data models for Liquibase GUI
// ABOUTME: Wire shapes exchanged with the webview frontend

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::PathBuf;

use crate::liquibase::{InvocationError, InvocationRequest, LiquibaseCommand};

/// Command names as sent by the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandName {
    Update,
    Rollback,
    Status,
    History,
    ClearChecksums,
}

/// Run request as posted by the frontend form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunCommandRequest {
    pub command: CommandName,
    #[serde(rename = "rollbackCount", default)]
    pub rollback_count: Option<u32>,
    #[serde(rename = "dbUrl", default)]
    pub db_url: String,
    #[serde(rename = "dbUser", default)]
    pub db_user: String,
    #[serde(rename = "dbPassword", default)]
    pub db_password: String,
    #[serde(rename = "changelogPath", default)]
    pub changelog_path: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
}

impl TryFrom<RunCommandRequest> for InvocationRequest {
    type Error = InvocationError;

    fn try_from(req: RunCommandRequest) -> Result<Self, Self::Error> {
        let command = match req.command {
            CommandName::Update => LiquibaseCommand::Update,
            CommandName::Rollback => {
                let count = req
                    .rollback_count
                    .and_then(NonZeroU32::new)
                    .ok_or(InvocationError::InvalidRollbackCount)?;
                LiquibaseCommand::Rollback { count }
            }
            CommandName::Status => LiquibaseCommand::Status,
            CommandName::History => LiquibaseCommand::History,
            CommandName::ClearChecksums => LiquibaseCommand::ClearChecksums,
        };

        let changelog_path = req
            .changelog_path
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(InvocationRequest {
            command,
            database_url: req.db_url,
            database_user: req.db_user,
            database_password: req.db_password,
            changelog_path,
            schema: req.schema,
        })
    }
}

/// Result of the native file picker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenFileResponse {
    pub canceled: bool,
    #[serde(rename = "filePaths")]
    pub file_paths: Vec<String>,
}

impl OpenFileResponse {
    pub fn canceled() -> Self {
        Self {
            canceled: true,
            file_paths: Vec::new(),
        }
    }

    pub fn selected(path: String) -> Self {
        Self {
            canceled: false,
            file_paths: vec![path],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResponse {
    pub ok: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub version: String,
    pub platform: String,
    #[serde(rename = "toolDir")]
    pub tool_dir: String,
    #[serde(rename = "executableFound")]
    pub executable_found: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::liquibase::FailureCause;

    fn parse(json: &str) -> RunCommandRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_frontend_request_shape() {
        let req = parse(
            r#"{
                "command": "clear-checksums",
                "dbUrl": "jdbc:postgresql://localhost/db",
                "dbUser": "u",
                "dbPassword": "p"
            }"#,
        );
        assert_eq!(req.command, CommandName::ClearChecksums);

        let invocation = InvocationRequest::try_from(req).unwrap();
        assert_eq!(invocation.command, LiquibaseCommand::ClearChecksums);
        assert_eq!(invocation.changelog_path, None);
        assert_eq!(invocation.database_user, "u");
    }

    #[test]
    fn test_rollback_needs_positive_count() {
        for json in [
            r#"{"command": "rollback"}"#,
            r#"{"command": "rollback", "rollbackCount": 0}"#,
        ] {
            let err = InvocationRequest::try_from(parse(json)).unwrap_err();
            assert_eq!(err.cause(), FailureCause::InvalidRequest);
        }

        let ok = InvocationRequest::try_from(parse(
            r#"{"command": "rollback", "rollbackCount": 2, "changelogPath": "/tmp/db.yaml"}"#,
        ))
        .unwrap();
        assert_eq!(
            ok.command,
            LiquibaseCommand::Rollback {
                count: NonZeroU32::new(2).unwrap()
            }
        );
        assert_eq!(ok.changelog_path, Some(PathBuf::from("/tmp/db.yaml")));
    }

    #[test]
    fn test_blank_changelog_is_unset() {
        let req = InvocationRequest::try_from(parse(
            r#"{"command": "update", "changelogPath": "  "}"#,
        ))
        .unwrap();
        assert_eq!(req.changelog_path, None);
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(serde_json::from_str::<RunCommandRequest>(r#"{"command": "drop-all"}"#).is_err());
    }

    #[test]
    fn test_open_file_response_shape() {
        let json = serde_json::to_value(OpenFileResponse::selected("/a/b.yaml".into())).unwrap();
        assert_eq!(json["canceled"], false);
        assert_eq!(json["filePaths"][0], "/a/b.yaml");
    }
}
