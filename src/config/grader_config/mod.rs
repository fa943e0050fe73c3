//! Run configuration support
//!
//! Loads configuration from `gtest-grader.toml` or `.gtest-graderrc.json` in
//! the working directory, falling back to the user config file.
//!
//! # Configuration Format
//!
//! ```toml
//! # gtest-grader.toml
//!
//! [store]
//! path = "../score.txt"   # Best-score file
//!
//! [message]
//! enabled = true          # Copy the report into a message artifact
//! path = "message.txt"
//! ```
//!
//! Command-line flags override everything loaded here.

use crate::artifacts::DEFAULT_MESSAGE_FILE;
use crate::error::{GradeError, GradeResult};
use crate::store::DEFAULT_SCORE_FILE;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Preferred config file name
pub const CONFIG_FILE: &str = "gtest-grader.toml";

/// JSON config file name, tried after the TOML one
pub const JSON_CONFIG_FILE: &str = ".gtest-graderrc.json";

/// Configuration loaded from gtest-grader.toml or similar
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct GraderConfig {
    /// Best-score persistence
    #[serde(default)]
    pub store: StoreConfig,

    /// Report copy
    #[serde(default)]
    pub message: MessageConfig,
}

/// Where the best score is kept
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Score file path (default: score.txt)
    #[serde(default = "default_score_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_score_path(),
        }
    }
}

fn default_score_path() -> PathBuf {
    PathBuf::from(DEFAULT_SCORE_FILE)
}

/// Message artifact settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MessageConfig {
    /// Whether to copy the report (default: false)
    #[serde(default)]
    pub enabled: bool,

    /// Destination (default: message.txt)
    #[serde(default = "default_message_path")]
    pub path: PathBuf,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_message_path(),
        }
    }
}

fn default_message_path() -> PathBuf {
    PathBuf::from(DEFAULT_MESSAGE_FILE)
}

impl GraderConfig {
    /// Message destination, if the copy is enabled
    pub fn message_path(&self) -> Option<&Path> {
        self.message.enabled.then_some(self.message.path.as_path())
    }
}

/// Load configuration for a run in `dir`.
///
/// Searches in this order:
/// 1. `gtest-grader.toml`
/// 2. `.gtest-graderrc.json`
/// 3. the user config file (see [`user_config_path`])
///
/// A file that fails to parse is skipped with a warning. Returns defaults
/// if nothing usable is found.
pub fn load_config(dir: &Path) -> GraderConfig {
    let candidates = [dir.join(CONFIG_FILE), dir.join(JSON_CONFIG_FILE)]
        .into_iter()
        .chain(user_config_path());
    load_first(candidates)
}

fn load_first(candidates: impl IntoIterator<Item = PathBuf>) -> GraderConfig {
    for path in candidates {
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("{}", e);
            }
        }
    }

    debug!("No config found, using defaults");
    GraderConfig::default()
}

/// Load configuration from an explicit file. JSON when the extension is
/// `.json`, TOML otherwise.
pub fn load_config_file(path: &Path) -> GradeResult<GraderConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| GradeError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed: Result<GraderConfig, String> = if is_json {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        toml::from_str(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|reason| GradeError::Config {
        path: path.to_path_buf(),
        reason,
    })
}

/// User-level config file path
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("gtest-grader").join("config.toml"))
}
