//! Editor settings for Terramate files.
//!
//! Settings are stored as JSON. Every field is optional on disk; missing
//! fields take their defaults, so `{}` is a valid settings file.
//!
//! ```json
//! {
//!   "language_server": {
//!     "enabled": true,
//!     "bin_path": "",
//!     "args": ["-mode=stdio"],
//!     "trace": "off"
//!   },
//!   "extra_keywords": []
//! }
//! ```
//!
//! The language server itself is never launched from here; only its
//! command line is resolved.

use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tm_lexer_core::KeywordSet;
use tracing::{debug, trace};

/// Arguments passed to the language server when none are configured.
pub const DEFAULT_SERVER_ARGS: &[&str] = &["-mode=stdio"];

/// Executable name searched for on `PATH`.
#[cfg(windows)]
pub const SERVER_BINARY: &str = "terramate-ls.exe";
#[cfg(not(windows))]
pub const SERVER_BINARY: &str = "terramate-ls";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("language server binary not found at: {}", .0.display())]
    BinaryNotFound(PathBuf),

    #[error(
        "{name} not found in PATH; install it from \
         https://terramate.io/docs/cli/installation or set language_server.bin_path"
    )]
    NotFound { name: &'static str },

    #[error("language server is disabled")]
    Disabled,
}

/// Verbosity of the language server protocol trace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceLevel {
    #[default]
    Off,
    Messages,
    Verbose,
}

impl TraceLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            TraceLevel::Off => "off",
            TraceLevel::Messages => "messages",
            TraceLevel::Verbose => "verbose",
        }
    }
}

impl fmt::Display for TraceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageServerSettings {
    pub enabled: bool,
    /// Explicit executable path. Empty means search `PATH`.
    pub bin_path: String,
    /// Empty falls back to [`DEFAULT_SERVER_ARGS`].
    pub args: Vec<String>,
    pub trace: TraceLevel,
}

impl Default for LanguageServerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            bin_path: String::new(),
            args: DEFAULT_SERVER_ARGS.iter().map(|&arg| arg.to_owned()).collect(),
            trace: TraceLevel::Off,
        }
    }
}

impl LanguageServerSettings {
    /// Arguments to launch the server with.
    pub fn effective_args(&self) -> Vec<&str> {
        if self.args.is_empty() {
            DEFAULT_SERVER_ARGS.to_vec()
        } else {
            self.args.iter().map(String::as_str).collect()
        }
    }

    /// Locate the server executable.
    ///
    /// An explicit `bin_path` must name an existing executable file. Without
    /// one, each directory of `path_env` (a `PATH`-style list) is searched
    /// for [`SERVER_BINARY`] in order.
    pub fn resolve_executable(&self, path_env: Option<&OsStr>) -> Result<PathBuf, SettingsError> {
        if !self.bin_path.is_empty() {
            let path = PathBuf::from(&self.bin_path);
            debug!(path = %path.display(), "checking configured language server path");
            if is_executable(&path) {
                return Ok(path);
            }
            return Err(SettingsError::BinaryNotFound(path));
        }

        let search = path_env.unwrap_or_default();
        for dir in std::env::split_paths(search) {
            if dir.as_os_str().is_empty() {
                continue;
            }
            let candidate = dir.join(SERVER_BINARY);
            trace!(candidate = %candidate.display(), "probing for language server");
            if is_executable(&candidate) {
                debug!(path = %candidate.display(), "found language server on PATH");
                return Ok(candidate);
            }
        }
        Err(SettingsError::NotFound {
            name: SERVER_BINARY,
        })
    }

    /// Full command line for the server, or [`SettingsError::Disabled`].
    pub fn command(&self, path_env: Option<&OsStr>) -> Result<ServerCommand, SettingsError> {
        if !self.enabled {
            return Err(SettingsError::Disabled);
        }
        Ok(ServerCommand {
            program: self.resolve_executable(path_env)?,
            args: self.effective_args().into_iter().map(str::to_owned).collect(),
            trace: self.trace,
        })
    }
}

/// A resolved, not yet launched, language server invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub trace: TraceLevel,
}

impl fmt::Display for ServerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.is_file())
}

/// All editor settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language_server: LanguageServerSettings,
    /// Words added to the built-in keyword set.
    pub extra_keywords: Vec<String>,
}

impl Settings {
    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&text)?;
        debug!(
            path = %path.display(),
            extra_keywords = settings.extra_keywords.len(),
            "loaded settings"
        );
        Ok(settings)
    }

    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The built-in keywords plus `extra_keywords`.
    pub fn keyword_set(&self) -> KeywordSet {
        KeywordSet::terramate().with_extra(&self.extra_keywords)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
