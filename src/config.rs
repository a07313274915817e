//! Skip rules: which files a sorting run leaves alone.
//!
//! The category taxonomy is fixed, but an operator can still scope a run with
//! a small TOML file naming files that must not be swept into category
//! folders. By default hidden files and the previous run's `log.txt` are
//! skipped.
//!
//! # Configuration File Format
//!
//! ```toml
//! [skip]
//! hidden = true
//! filenames = ["log.txt", "Thumbs.db"]
//! globs = ["*.part"]
//! extensions = ["tmp"]
//! regex = ['^~\$']
//! ```

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::report::LOG_FILE_NAME;

/// Errors raised while loading or compiling skip rules.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// The explicitly requested configuration file does not exist.
    NotFound(PathBuf),
    /// The file is not valid TOML for this schema.
    Parse(String),
    /// A glob in the `globs` list failed to compile.
    BadGlob(String),
    /// A pattern in the `regex` list failed to compile.
    BadRegex { pattern: String, reason: String },
    /// The file could not be read.
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::Parse(msg) => write!(f, "Invalid configuration: {msg}"),
            ConfigError::BadGlob(pattern) => write!(f, "Invalid glob pattern '{pattern}'"),
            ConfigError::BadRegex { pattern, reason } => {
                write!(f, "Invalid regex pattern '{pattern}': {reason}")
            }
            ConfigError::Io(msg) => write!(f, "IO error reading configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkipConfig {
    #[serde(default)]
    pub skip: SkipRules,
}

/// The `[skip]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkipRules {
    /// Skip files whose name starts with a dot. Defaults to true.
    #[serde(default = "default_hidden")]
    pub hidden: bool,

    /// Exact filenames to skip. Defaults to the audit log's name so a
    /// re-run never files the previous log under `documents`.
    #[serde(default = "default_filenames")]
    pub filenames: Vec<String>,

    /// Glob patterns matched against the file name.
    #[serde(default)]
    pub globs: Vec<String>,

    /// Extensions to skip, without the dot, case-insensitive.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Regex patterns matched against the file name.
    #[serde(default)]
    pub regex: Vec<String>,
}

fn default_hidden() -> bool {
    true
}

fn default_filenames() -> Vec<String> {
    vec![LOG_FILE_NAME.to_string()]
}

impl Default for SkipRules {
    fn default() -> Self {
        Self {
            hidden: default_hidden(),
            filenames: default_filenames(),
            globs: Vec::new(),
            extensions: Vec::new(),
            regex: Vec::new(),
        }
    }
}

impl Default for SkipConfig {
    fn default() -> Self {
        Self {
            skip: SkipRules::default(),
        }
    }
}

impl SkipConfig {
    /// Loads skip rules, falling back through the usual locations:
    /// an explicit path, `./sweepdir.toml`, `~/.config/sweepdir/config.toml`,
    /// then the built-in defaults.
    ///
    /// # Errors
    ///
    /// Only an explicitly named file that is missing or unreadable is an
    /// error; absent fallback locations are not.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local = PathBuf::from("sweepdir.toml");
        if local.exists() {
            return Self::load_from_file(&local);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sweepdir")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Compiles the rules for repeated matching.
    ///
    /// # Errors
    ///
    /// Returns an error if any glob or regex pattern is invalid.
    pub fn compile(self) -> Result<CompiledSkips, ConfigError> {
        CompiledSkips::new(self.skip)
    }
}

/// Pre-compiled skip rules.
pub struct CompiledSkips {
    hidden: bool,
    filenames: HashSet<String>,
    extensions: HashSet<String>,
    globs: Vec<Pattern>,
    regexes: Vec<Regex>,
}

impl CompiledSkips {
    fn new(rules: SkipRules) -> Result<Self, ConfigError> {
        let globs = rules
            .globs
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::BadGlob(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let regexes = rules
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::BadRegex {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            hidden: rules.hidden,
            filenames: rules.filenames.into_iter().collect(),
            extensions: rules
                .extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
            globs,
            regexes,
        })
    }

    /// Whether a sorting run should leave this file where it is.
    ///
    /// All checks look at the file name only, never the directory part: a
    /// run relocates files by name, so that is the unit the rules scope.
    pub fn should_skip(&self, file_path: &Path) -> bool {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if self.hidden && file_name.starts_with('.') {
            return true;
        }
        if self.filenames.contains(file_name.as_ref()) {
            return true;
        }
        if let Some(ext) = file_path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            if self.extensions.contains(&ext_lower) {
                return true;
            }
        }
        if self.globs.iter().any(|glob| glob.matches(&file_name)) {
            return true;
        }
        self.regexes.iter().any(|regex| regex.is_match(&file_name))
    }
}

impl Default for CompiledSkips {
    // Default rules contain no patterns, so compilation cannot fail.
    fn default() -> Self {
        let rules = SkipRules::default();
        Self {
            hidden: rules.hidden,
            filenames: rules.filenames.into_iter().collect(),
            extensions: HashSet::new(),
            globs: Vec::new(),
            regexes: Vec::new(),
        }
    }
}
