/*
 * Checker configuration: the rules root, the rule-file extension and the
 * thresholds used by the size and line checks. Without any configuration the
 * built-in defaults apply. An optional JSON file may override any subset of the
 * fields, and a root given on the command line overrides both.
 *
 * The default config file lives next to the rules root, i.e. for the default
 * root `.cursor/rules` it is `.cursor/rule-checker.json`, and it is only read
 * if it exists. A config path given explicitly must exist.
 */
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use super::line_checker::DEFAULT_MAX_LINES;
use super::size_checker::{DEFAULT_ERROR_BYTES, DEFAULT_WARN_BYTES, SizeLimits};

pub const DEFAULT_RULES_ROOT: &str = ".cursor/rules";
pub const DEFAULT_RULE_EXTENSION: &str = "mdc";
pub const CONFIG_FILE_NAME: &str = "rule-checker.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration I/O error for {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Configuration file {path:?} is not valid: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckerConfig {
    pub root: PathBuf,
    pub extension: String,
    pub warn_bytes: u64,
    pub error_bytes: u64,
    pub max_lines: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        CheckerConfig {
            root: PathBuf::from(DEFAULT_RULES_ROOT),
            extension: DEFAULT_RULE_EXTENSION.to_string(),
            warn_bytes: DEFAULT_WARN_BYTES,
            error_bytes: DEFAULT_ERROR_BYTES,
            max_lines: DEFAULT_MAX_LINES,
        }
    }
}

impl CheckerConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        log::debug!("CheckerConfig: Loading {path:?}");
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: CheckerConfig =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        Ok(config)
    }

    /*
     * Checks the thresholds for consistency and normalises the extension, which
     * may be written with or without its leading dot.
     */
    pub fn validated(mut self) -> Result<Self> {
        let extension = self.extension.trim().trim_start_matches('.').to_string();
        if extension.is_empty() {
            return Err(ConfigError::Invalid(
                "extension must not be empty".to_string(),
            ));
        }
        self.extension = extension;

        if self.error_bytes <= self.warn_bytes {
            return Err(ConfigError::Invalid(format!(
                "error_bytes ({}) must be greater than warn_bytes ({})",
                self.error_bytes, self.warn_bytes
            )));
        }
        if self.max_lines == 0 {
            return Err(ConfigError::Invalid(
                "max_lines must be greater than 0".to_string(),
            ));
        }
        Ok(self)
    }

    // Same shape as the config file, so a logged config can be pasted back in.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn size_limits(&self) -> SizeLimits {
        SizeLimits {
            warn_bytes: self.warn_bytes,
            error_bytes: self.error_bytes,
        }
    }
}

pub fn default_config_path(root: &Path) -> PathBuf {
    match root.parent() {
        Some(parent) => parent.join(CONFIG_FILE_NAME),
        None => PathBuf::from(CONFIG_FILE_NAME),
    }
}

/*
 * Builds the effective configuration: defaults, then the config file (explicit
 * or discovered next to the rules root), then the command-line root override.
 */
pub fn resolve_config(
    explicit_config: Option<&Path>,
    root_override: Option<&Path>,
) -> Result<CheckerConfig> {
    let mut config = match explicit_config {
        Some(path) => CheckerConfig::load_from_file(path)?,
        None => {
            let root = root_override.unwrap_or_else(|| Path::new(DEFAULT_RULES_ROOT));
            let candidate = default_config_path(root);
            if candidate.is_file() {
                CheckerConfig::load_from_file(&candidate)?
            } else {
                log::trace!("CheckerConfig: No config file at {candidate:?}, using defaults");
                CheckerConfig::default()
            }
        }
    };

    if let Some(root) = root_override {
        config.root = root.to_path_buf();
    }
    let config = config.validated()?;
    match config.to_json() {
        Ok(json) => log::debug!("CheckerConfig: Effective configuration {json}"),
        Err(e) => log::warn!("CheckerConfig: Could not render effective configuration: {e}"),
    }
    Ok(config)
}
