//! Configuration loading and data-directory resolution.
//!
//! All state lives under a single data directory, resolved in order:
//! `--data-dir` flag, `TASKMASTER_DATA_DIR` env var, then `~/.taskmaster`.
//! An optional `config.toml` in that directory tunes file names and
//! backup retention.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const CONFIG_FILE: &str = "config.toml";
pub const BACKUP_DIR: &str = "backups";

fn default_data_file() -> String {
    "tasks.json".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Snapshot file name within the data directory
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Backup configuration
    #[serde(default)]
    pub backups: BackupsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            backups: BackupsConfig::default(),
        }
    }
}

/// Backup-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackupsConfig {
    /// Number of backup files to retain; absent means keep all
    #[serde(default)]
    pub keep: Option<usize>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|err| Error::InvalidConfig(format!("{}: {err}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the data directory, or return defaults
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.data_file.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "data_file cannot be empty".to_string(),
            ));
        }
        if self.backups.keep == Some(0) {
            return Err(Error::InvalidConfig(
                "backups.keep must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolved locations of the store's files
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub data_file: PathBuf,
    pub backup_dir: PathBuf,
    pub backups_keep: Option<usize>,
}

impl StorePaths {
    /// Resolve paths from an explicit data dir (flag/env) or the home default
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        let config = Config::load_from_dir(&data_dir)?;
        Ok(Self {
            data_file: data_dir.join(&config.data_file),
            backup_dir: data_dir.join(BACKUP_DIR),
            backups_keep: config.backups.keep,
        })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let dirs = directories::UserDirs::new().ok_or_else(|| {
        Error::InvalidConfig("cannot determine home directory; pass --data-dir".to_string())
    })?;
    Ok(dirs.home_dir().join(".taskmaster"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_config_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load_from_dir(dir.path()).expect("defaults");
        assert_eq!(config.data_file, "tasks.json");
        assert!(config.backups.keep.is_none());
    }

    #[test]
    fn load_parses_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        let content = r#"
data_file = "work.json"

[backups]
keep = 10
"#;
        std::fs::write(&path, content).expect("write config");

        let config = Config::load_from_dir(dir.path()).expect("load");
        assert_eq!(config.data_file, "work.json");
        assert_eq!(config.backups.keep, Some(10));
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE), "data_file = [").expect("write config");

        let err = Config::load_from_dir(dir.path()).expect_err("parse failure");
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn zero_retention_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE), "[backups]\nkeep = 0\n")
            .expect("write config");

        let err = Config::load_from_dir(dir.path()).expect_err("zero keep");
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn resolve_uses_explicit_dir_and_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE), "data_file = \"work.json\"\n")
            .expect("write config");

        let paths = StorePaths::resolve(Some(dir.path().to_path_buf())).expect("resolve");
        assert_eq!(paths.data_file, dir.path().join("work.json"));
        assert_eq!(paths.backup_dir, dir.path().join(BACKUP_DIR));
    }
}
