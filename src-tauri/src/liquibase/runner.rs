// ABOUTME: Spawns the bundled Liquibase and collects its combined output
// ABOUTME: One child process per call, no retries and no timeout

use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::mpsc;

use super::command::{Invocation, InvocationRequest};
use super::platform::{Platform, PlatformProfile, ToolLocator};
use super::InvocationError;

/// Launcher for the bundled Liquibase distribution
#[derive(Debug, Clone)]
pub struct Liquibase {
    os: String,
    arch: String,
    locator: ToolLocator,
}

impl Liquibase {
    /// Launcher for the current host
    pub fn new(locator: ToolLocator) -> Self {
        Self::for_platform(std::env::consts::OS, std::env::consts::ARCH, locator)
    }

    /// Launcher for an explicit OS identity and CPU architecture
    pub fn for_platform(os: &str, arch: &str, locator: ToolLocator) -> Self {
        Self {
            os: os.to_string(),
            arch: arch.to_string(),
            locator,
        }
    }

    pub fn locator(&self) -> &ToolLocator {
        &self.locator
    }

    /// Launch profile for this launcher's OS and architecture
    pub fn profile(&self) -> Result<PlatformProfile, InvocationError> {
        // Platform first: an unsupported OS must not touch the filesystem
        let platform = Platform::from_os(&self.os)?;
        let tool_dir = self.locator.resolve();

        Ok(platform.profile(&tool_dir, &self.arch))
    }

    /// Resolve the layout and validate the request without starting anything
    pub fn prepare(&self, request: &InvocationRequest) -> Result<Invocation, InvocationError> {
        request.prepare(self.profile()?)
    }

    /// Run one Liquibase command and return its combined stdout and stderr
    pub async fn invoke(&self, request: &InvocationRequest) -> Result<String, InvocationError> {
        let invocation = self.prepare(request)?;
        run(&invocation).await
    }
}

/// Spawn a prepared invocation and wait for it to exit
pub async fn run(invocation: &Invocation) -> Result<String, InvocationError> {
    let profile = &invocation.profile;

    log::info!(
        "Running Liquibase {} in {}",
        invocation.command,
        invocation.working_dir.display()
    );
    log::debug!("Command line: {}", invocation.redacted());

    let mut child = Command::new(&profile.spawn_program)
        .args(&profile.spawn_prefix_args)
        .args(&invocation.args)
        .current_dir(&invocation.working_dir)
        .env("JAVA_HOME", &profile.java_home_path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            log::warn!("Failed to spawn Liquibase: {}", e);
            InvocationError::ProcessSpawnError(e)
        })?;

    let (tx, mut rx) = mpsc::unbounded_channel::<Vec<u8>>();

    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(forward(stdout, tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(forward(stderr, tx.clone()));
    }
    drop(tx);

    // Channel closes once both streams hit EOF
    let mut buffer = Vec::new();
    while let Some(chunk) = rx.recv().await {
        buffer.extend_from_slice(&chunk);
    }

    let status = child.wait().await?;
    let output = String::from_utf8_lossy(&buffer).into_owned();

    finish(status, output)
}

/// Copy a child stream into the shared channel in arrival order
async fn forward<R>(mut stream: R, tx: mpsc::UnboundedSender<Vec<u8>>)
where
    R: AsyncRead + Unpin,
{
    let mut chunk = [0u8; 4096];
    loop {
        match stream.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                if tx.send(chunk[..n].to_vec()).is_err() {
                    break;
                }
            }
            Err(e) => {
                log::warn!("Failed to read Liquibase output: {}", e);
                break;
            }
        }
    }
}

fn finish(status: ExitStatus, output: String) -> Result<String, InvocationError> {
    if status.success() {
        log::info!("Liquibase finished successfully");
        return Ok(output);
    }

    let exit_code = status.code();
    log::warn!("Liquibase failed with exit code {:?}", exit_code);

    let output = if output.trim().is_empty() {
        match exit_code {
            Some(code) => format!("Liquibase exited with code {}", code),
            None => "Liquibase was terminated by a signal".to_string(),
        }
    } else {
        output
    };

    Err(InvocationError::NonZeroExit { output, exit_code })
}
