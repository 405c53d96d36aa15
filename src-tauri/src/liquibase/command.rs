// ABOUTME: Liquibase command model and argument vector construction
// ABOUTME: Validates a request against the bundled layout before anything is spawned

use std::fmt;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use super::platform::PlatformProfile;
use super::InvocationError;

/// Liquibase actions exposed in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquibaseCommand {
    Update,
    Rollback { count: NonZeroU32 },
    Status,
    History,
    ClearChecksums,
}

impl LiquibaseCommand {
    /// Commands that run without a changelog file
    pub fn requires_changelog(&self) -> bool {
        !matches!(
            self,
            LiquibaseCommand::History | LiquibaseCommand::ClearChecksums
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            LiquibaseCommand::Update => "update",
            LiquibaseCommand::Rollback { .. } => "rollback",
            LiquibaseCommand::Status => "status",
            LiquibaseCommand::History => "history",
            LiquibaseCommand::ClearChecksums => "clear-checksums",
        }
    }

    /// Trailing action tokens. Rollback is always count based.
    fn action_args(&self) -> Vec<String> {
        match self {
            LiquibaseCommand::Rollback { count } => {
                vec!["rollbackCount".to_string(), count.to_string()]
            }
            other => vec![other.name().to_string()],
        }
    }
}

impl fmt::Display for LiquibaseCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiquibaseCommand::Rollback { count } => write!(f, "rollback ({})", count),
            other => f.write_str(other.name()),
        }
    }
}

/// A fully typed request to run Liquibase once
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    pub command: LiquibaseCommand,
    pub database_url: String,
    pub database_user: String,
    pub database_password: String,
    pub changelog_path: Option<PathBuf>,
    pub schema: Option<String>,
}

impl InvocationRequest {
    /// Argument vector passed to the Liquibase executable
    pub fn build_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(7);

        if self.command.requires_changelog() {
            if let Some(file_name) = self.changelog_path.as_deref().and_then(Path::file_name) {
                args.push(format!("--changeLogFile={}", file_name.to_string_lossy()));
            }
        }

        args.push(format!("--url={}", self.database_url));
        args.push(format!("--username={}", self.database_user));
        args.push(format!("--password={}", self.database_password));

        if let Some(schema) = self.schema.as_deref().filter(|s| !s.trim().is_empty()) {
            args.push(format!("--defaultSchemaName={}", schema.trim()));
        }

        args.extend(self.command.action_args());
        args
    }

    /// Check the request against the resolved layout and produce a launchable invocation
    pub fn prepare(&self, profile: PlatformProfile) -> Result<Invocation, InvocationError> {
        if !profile.executable_path.is_file() {
            return Err(InvocationError::MissingExecutable(
                profile.executable_path.clone(),
            ));
        }

        if self.command.requires_changelog() {
            match self.changelog_path.as_deref() {
                Some(path) if path.is_file() => {}
                Some(path) => {
                    return Err(InvocationError::MissingChangelog(Some(path.to_path_buf())))
                }
                None => return Err(InvocationError::MissingChangelog(None)),
            }
        }

        let working_dir = self
            .changelog_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| profile.tool_dir.clone());

        Ok(Invocation {
            command: self.command,
            args: self.build_args(),
            working_dir,
            profile,
        })
    }
}

/// A validated, ready-to-spawn Liquibase run
#[derive(Debug, Clone)]
pub struct Invocation {
    pub command: LiquibaseCommand,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub profile: PlatformProfile,
}

impl Invocation {
    /// Command line for log output with the password masked
    pub fn redacted(&self) -> String {
        let args: Vec<&str> = self
            .args
            .iter()
            .map(|arg| {
                if arg.starts_with("--password=") {
                    "--password=****"
                } else {
                    arg.as_str()
                }
            })
            .collect();

        format!("{} {}", self.profile.executable_path.display(), args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::liquibase::platform::Platform;
    use crate::liquibase::FailureCause;

    fn request(command: LiquibaseCommand) -> InvocationRequest {
        InvocationRequest {
            command,
            database_url: "jdbc:postgresql://localhost/db".to_string(),
            database_user: "u".to_string(),
            database_password: "p".to_string(),
            changelog_path: Some(PathBuf::from("/tmp/x/db.changelog-master.yaml")),
            schema: None,
        }
    }

    fn rollback(count: u32) -> LiquibaseCommand {
        LiquibaseCommand::Rollback {
            count: NonZeroU32::new(count).unwrap(),
        }
    }

    #[test]
    fn test_changelog_first_for_regular_commands() {
        for command in [LiquibaseCommand::Update, LiquibaseCommand::Status] {
            let args = request(command).build_args();
            assert_eq!(args[0], "--changeLogFile=db.changelog-master.yaml");
            assert!(!args.iter().any(|a| a == "rollbackCount"));
            assert_eq!(args.last().unwrap(), command.name());
        }
    }

    #[test]
    fn test_full_argument_order() {
        let mut req = request(LiquibaseCommand::Update);
        req.schema = Some("public".to_string());

        assert_eq!(
            req.build_args(),
            vec![
                "--changeLogFile=db.changelog-master.yaml",
                "--url=jdbc:postgresql://localhost/db",
                "--username=u",
                "--password=p",
                "--defaultSchemaName=public",
                "update",
            ]
        );
    }

    #[test]
    fn test_blank_schema_is_omitted() {
        let mut req = request(LiquibaseCommand::Status);
        req.schema = Some("   ".to_string());

        assert!(!req
            .build_args()
            .iter()
            .any(|a| a.starts_with("--defaultSchemaName")));
    }

    #[test]
    fn test_rollback_uses_count_tokens() {
        let args = request(rollback(3)).build_args();

        assert_eq!(&args[args.len() - 2..], ["rollbackCount", "3"]);
        assert!(!args.iter().any(|a| a == "rollback"));
        assert_eq!(args[0], "--changeLogFile=db.changelog-master.yaml");
    }

    #[test]
    fn test_history_and_clear_checksums_skip_changelog() {
        for command in [LiquibaseCommand::History, LiquibaseCommand::ClearChecksums] {
            let args = request(command).build_args();
            assert!(!args.iter().any(|a| a.starts_with("--changeLogFile")));
            assert_eq!(args[0], "--url=jdbc:postgresql://localhost/db");
            assert_eq!(args.last().unwrap(), command.name());
        }
    }

    #[test]
    fn test_prepare_requires_executable() {
        let tool_dir = tempfile::tempdir().unwrap();
        let profile = Platform::Linux.profile(tool_dir.path(), "x86_64");

        let err = request(LiquibaseCommand::Status).prepare(profile).unwrap_err();
        assert_eq!(err.cause(), FailureCause::MissingExecutable);
    }

    #[test]
    fn test_prepare_requires_changelog() {
        let tool_dir = tempfile::tempdir().unwrap();
        std::fs::write(tool_dir.path().join("liquibase"), "").unwrap();
        let profile = Platform::Linux.profile(tool_dir.path(), "x86_64");

        let mut unset = request(LiquibaseCommand::Update);
        unset.changelog_path = None;
        let err = unset.prepare(profile.clone()).unwrap_err();
        assert_eq!(err.cause(), FailureCause::MissingChangelog);

        let mut absent = request(LiquibaseCommand::Update);
        absent.changelog_path = Some(tool_dir.path().join("missing.yaml"));
        let err = absent.prepare(profile).unwrap_err();
        assert_eq!(err.cause(), FailureCause::MissingChangelog);
    }

    #[test]
    fn test_prepare_working_directory() {
        let tool_dir = tempfile::tempdir().unwrap();
        let project = tempfile::tempdir().unwrap();
        std::fs::write(tool_dir.path().join("liquibase"), "").unwrap();
        let changelog = project.path().join("db.changelog-master.yaml");
        std::fs::write(&changelog, "databaseChangeLog: []\n").unwrap();
        let profile = Platform::Linux.profile(tool_dir.path(), "x86_64");

        let mut with_changelog = request(LiquibaseCommand::Update);
        with_changelog.changelog_path = Some(changelog);
        let invocation = with_changelog.prepare(profile.clone()).unwrap();
        assert_eq!(invocation.working_dir, project.path());

        let mut history = request(LiquibaseCommand::History);
        history.changelog_path = None;
        let invocation = history.prepare(profile).unwrap();
        assert_eq!(invocation.working_dir, tool_dir.path());
    }

    #[test]
    fn test_redacted_masks_password() {
        let tool_dir = tempfile::tempdir().unwrap();
        std::fs::write(tool_dir.path().join("liquibase"), "").unwrap();
        let profile = Platform::Linux.profile(tool_dir.path(), "x86_64");

        let mut req = request(LiquibaseCommand::History);
        req.database_password = "hunter2".to_string();
        let line = req.prepare(profile).unwrap().redacted();

        assert!(line.contains("--password=****"));
        assert!(!line.contains("hunter2"));
    }
}
