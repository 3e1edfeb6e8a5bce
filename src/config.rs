//! Configuration persistence
//!
//! Stores defaults for the `linefile` binary in `~/.config/linefile/config.yaml`
//! (written by `linefile config init`). Library calls never read this file on
//! their own.

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::separator::DEFAULT_SEPARATOR;

/// When tokens of delimited text are trimmed before being written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrimPolicy {
    /// Trim only when the file is being created
    #[default]
    OnCreate,
    /// Trim whether or not the file already exists
    Always,
    /// Never trim tokens
    Never,
}

impl TrimPolicy {
    /// Whether tokens should be trimmed for a write that `creates` the file
    pub fn trims(self, creates: bool) -> bool {
        match self {
            Self::OnCreate => creates,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Text file settings that persist across runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFilesConfig {
    /// Regex used by delimited-text operations when none is given
    #[serde(default = "default_separator")]
    pub default_separator: String,

    /// Token trimming for delimited-text appends
    #[serde(default)]
    pub trim_policy: TrimPolicy,
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

impl Default for TextFilesConfig {
    fn default() -> Self {
        Self {
            default_separator: default_separator(),
            trim_policy: TrimPolicy::default(),
        }
    }
}

/// Errors reading or writing `config.yaml`
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no config directory available")]
    NoConfigDir,
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

impl TextFilesConfig {
    /// Config from the user's config file; defaults when it is missing or broken
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(Some(config)) => {
                tracing::info!(path = %path.display(), "loaded config");
                config
            }
            Ok(None) => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse `path`; `Ok(None)` when the file does not exist
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_yaml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Write to the user's config file, returning where it went
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = crate::config_paths::config_file().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write YAML to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_yaml::to_string(self)?;
        let write_error = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(path, content).map_err(write_error)?;

        tracing::info!(path = %path.display(), "saved config");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_policy_on_create() {
        assert!(TrimPolicy::OnCreate.trims(true));
        assert!(!TrimPolicy::OnCreate.trims(false));
    }

    #[test]
    fn test_trim_policy_always_and_never() {
        assert!(TrimPolicy::Always.trims(false));
        assert!(!TrimPolicy::Never.trims(true));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: TextFilesConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, TextFilesConfig::default());
    }

    #[test]
    fn test_trim_policy_kebab_case() {
        let config: TextFilesConfig = serde_yaml::from_str("trim_policy: on-create").unwrap();
        assert_eq!(config.trim_policy, TrimPolicy::OnCreate);

        let yaml = serde_yaml::to_string(&TextFilesConfig {
            trim_policy: TrimPolicy::Always,
            ..Default::default()
        })
        .unwrap();
        assert!(yaml.contains("trim_policy: always"));
    }

    #[test]
    fn test_save_to_creates_parent_and_roundtrips() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = TextFilesConfig {
            default_separator: ";".to_string(),
            trim_policy: TrimPolicy::Never,
        };

        config.save_to(&path).unwrap();
        assert_eq!(TextFilesConfig::load_from(&path).unwrap(), Some(config));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let loaded = TextFilesConfig::load_from(&dir.path().join("config.yaml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_from_malformed_yaml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "trim_policy: [not, a, policy]").unwrap();

        let err = TextFilesConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_from_directory_is_read_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = TextFilesConfig::load_from(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
