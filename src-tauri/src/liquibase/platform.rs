// ABOUTME: Host platform detection and bundled Liquibase layout resolution
// ABOUTME: Maps OS identity to executable, JAVA_HOME and launch strategy

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::InvocationError;

/// Name of the directory holding the bundled Liquibase distribution
pub const TOOL_DIR_NAME: &str = "liquibase";

/// Environment variable naming a tool directory checked before the built-in candidates
pub const TOOL_DIR_ENV: &str = "LIQUIBASE_GUI_TOOL_DIR";

/// Operating systems the bundled runtime ships for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// Classify an OS identity as reported by `std::env::consts::OS`
    pub fn from_os(os: &str) -> Result<Self, InvocationError> {
        match os {
            "windows" => Ok(Platform::Windows),
            "macos" => Ok(Platform::MacOs),
            "linux" => Ok(Platform::Linux),
            other => Err(InvocationError::UnsupportedPlatform(other.to_string())),
        }
    }

    pub fn host() -> Result<Self, InvocationError> {
        Self::from_os(std::env::consts::OS)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
        }
    }

    fn executable_name(&self) -> &'static str {
        match self {
            Platform::Windows => "liquibase.bat",
            Platform::MacOs | Platform::Linux => "liquibase",
        }
    }

    /// Directory name of the bundled JDK for this platform and CPU architecture
    pub fn java_home_dir_name(&self, arch: &str) -> String {
        let arch = match arch {
            "x86_64" => "x64",
            "aarch64" => "aarch64",
            other => other,
        };
        format!("jdk-{}-{}", self.as_str(), arch)
    }

    /// Build the launch profile for a tool directory
    pub fn profile(&self, tool_dir: &Path, arch: &str) -> PlatformProfile {
        let executable_path = tool_dir.join(self.executable_name());
        let java_home_path = tool_dir.join(self.java_home_dir_name(arch));

        // std routes .bat files through cmd.exe with its own batch escaping, so
        // every platform launches the executable directly
        let spawn_program = executable_path.clone().into_os_string();

        PlatformProfile {
            platform: *self,
            tool_dir: tool_dir.to_path_buf(),
            executable_path,
            java_home_path,
            spawn_program,
            spawn_prefix_args: Vec::new(),
        }
    }
}

/// Everything needed to launch the bundled tool on one platform
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformProfile {
    pub platform: Platform,
    pub tool_dir: PathBuf,
    pub executable_path: PathBuf,
    pub java_home_path: PathBuf,
    pub spawn_program: OsString,
    pub spawn_prefix_args: Vec<OsString>,
}

/// Ordered list of directories where the bundled Liquibase may live
#[derive(Debug, Clone)]
pub struct ToolLocator {
    candidates: Vec<PathBuf>,
}

impl ToolLocator {
    /// Use an explicit candidate list; the first entry is the fallback default
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// Build the standard candidate list.
    ///
    /// `resource_dir` is the packaged resource directory reported by the runtime.
    /// Without it the executable's `resources` folder is used. Two development
    /// locations follow: `./liquibase` and `liquibase` beside the executable.
    pub fn discover(resource_dir: Option<PathBuf>) -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));

        let mut candidates = Vec::new();

        if let Some(dir) = std::env::var_os(TOOL_DIR_ENV) {
            if !dir.is_empty() {
                candidates.push(PathBuf::from(dir));
            }
        }

        let packaged = match (resource_dir, &exe_dir) {
            (Some(dir), _) => dir.join(TOOL_DIR_NAME),
            (None, Some(exe_dir)) => exe_dir.join("resources").join(TOOL_DIR_NAME),
            (None, None) => PathBuf::from("resources").join(TOOL_DIR_NAME),
        };
        candidates.push(packaged);

        candidates.push(PathBuf::from(TOOL_DIR_NAME));
        if let Some(exe_dir) = exe_dir {
            candidates.push(exe_dir.join(TOOL_DIR_NAME));
        }

        Self { candidates }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// First existing candidate, or the primary location even if it is absent
    pub fn resolve(&self) -> PathBuf {
        if let Some(found) = self.candidates.iter().find(|dir| dir.is_dir()) {
            return found.clone();
        }

        let fallback = self.primary();
        log::debug!(
            "No Liquibase directory found, defaulting to {}",
            fallback.display()
        );
        fallback
    }

    /// The location used when nothing exists yet. With an override set this is the
    /// override, otherwise the packaged resource location.
    fn primary(&self) -> PathBuf {
        self.candidates
            .first()
            .cloned()
            .unwrap_or_else(|| PathBuf::from(TOOL_DIR_NAME))
    }
}
