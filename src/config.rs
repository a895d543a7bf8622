//! Application configuration
//!
//! Read from `<data_local_dir>/hanja/config.toml` (or the file named by
//! `HANJA_CONFIG`). Missing fields take their defaults; `HANJA_DB_PATH` and
//! `HANJA_SEED_PATH` override the two paths.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::CatalogStore;
use crate::study::{DEFAULT_FLASHCARD_COUNT, DEFAULT_OPTION_COUNT, DEFAULT_QUIZ_COUNT};
use crate::worksheet::{WorksheetOptions, DEFAULT_REPEAT, DEFAULT_WORKSHEET_COUNT};

pub const CONFIG_ENV: &str = "HANJA_CONFIG";
pub const DB_PATH_ENV: &str = "HANJA_DB_PATH";
pub const SEED_PATH_ENV: &str = "HANJA_SEED_PATH";

const APP_DIR: &str = "hanja";
const CONFIG_FILE: &str = "config.toml";
const DB_FILE: &str = "hanja.sqlite3";
const SEED_FILE: &str = "hanja.csv";

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Could not determine a local data directory")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// `<data_local_dir>/hanja`
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|p| p.join(APP_DIR))
        .ok_or(ConfigError::DataDirNotFound)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub seed_path: PathBuf,
    pub page_size: usize,
    pub flashcard_count: usize,
    pub quiz_count: usize,
    pub quiz_options: usize,
    pub worksheet_count: usize,
    pub worksheet_repeat: usize,
    /// Where worksheets are saved; the downloads folder when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Fixed RNG seed for reproducible draws
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let database_path = default_data_dir()
            .map(|dir| dir.join(DB_FILE))
            .unwrap_or_else(|_| PathBuf::from(DB_FILE));
        Self {
            database_path,
            seed_path: PathBuf::from(SEED_FILE),
            page_size: DEFAULT_PAGE_SIZE,
            flashcard_count: DEFAULT_FLASHCARD_COUNT,
            quiz_count: DEFAULT_QUIZ_COUNT,
            quiz_options: DEFAULT_OPTION_COUNT,
            worksheet_count: DEFAULT_WORKSHEET_COUNT,
            worksheet_repeat: DEFAULT_REPEAT,
            output_dir: None,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Load the config file (if any) and apply environment overrides
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Some(PathBuf::from(path)),
            None => default_data_dir().ok().map(|dir| dir.join(CONFIG_FILE)),
        };
        Self::resolve(path.as_deref(), |key| std::env::var(key).ok())
    }

    /// Read `path` when there is one, then apply overrides from `lookup`.
    /// Without a config location the defaults are used.
    fn resolve<F>(path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => {
                log::warn!("No local data directory; using default configuration");
                Self::default()
            }
        };
        config.apply_overrides(lookup);
        Ok(config)
    }

    /// Parse a TOML file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(DB_PATH_ENV).filter(|v| !v.is_empty()) {
            self.database_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(SEED_PATH_ENV).filter(|v| !v.is_empty()) {
            self.seed_path = PathBuf::from(path);
        }
    }

    pub fn store(&self) -> CatalogStore {
        CatalogStore::new(self.database_path.clone())
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(crate::worksheet::default_output_dir)
    }

    pub fn worksheet_options(&self) -> WorksheetOptions {
        WorksheetOptions {
            count: self.worksheet_count,
            repeat: self.worksheet_repeat,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load_from(&temp.path().join("none.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.page_size, 20);
        assert_eq!(config.flashcard_count, 20);
        assert_eq!(config.quiz_count, 10);
        assert_eq!(config.quiz_options, 4);
        assert_eq!(config.worksheet_count, 10);
        assert_eq!(config.worksheet_repeat, 10);
        assert_eq!(config.seed_path, PathBuf::from("hanja.csv"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "database_path = \"/tmp/custom.sqlite3\"\nquiz_options = 5\nseed = 42\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/custom.sqlite3"));
        assert_eq!(config.quiz_options, 5);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "page_size = \"many\"").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_env_overrides_paths() {
        let vars: HashMap<&str, &str> = [
            (DB_PATH_ENV, "/data/h.sqlite3"),
            (SEED_PATH_ENV, ""),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.database_path, PathBuf::from("/data/h.sqlite3"));
        // Empty values are ignored
        assert_eq!(config.seed_path, PathBuf::from("hanja.csv"));
    }

    #[test]
    fn test_resolve_without_config_location_uses_env_paths() {
        let config = AppConfig::resolve(None, |key| {
            (key == DB_PATH_ENV).then(|| "/srv/hanja.sqlite3".to_string())
        })
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("/srv/hanja.sqlite3"));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_resolve_reads_file_then_overrides() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "database_path = \"/tmp/a.sqlite3\"\nseed_path = \"/tmp/a.csv\"\n").unwrap();

        let config = AppConfig::resolve(Some(&path), |key| {
            (key == SEED_PATH_ENV).then(|| "/tmp/b.csv".to_string())
        })
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/a.sqlite3"));
        assert_eq!(config.seed_path, PathBuf::from("/tmp/b.csv"));
    }

    #[test]
    fn test_worksheet_options_follow_config() {
        let config = AppConfig {
            worksheet_count: 3,
            worksheet_repeat: 5,
            ..Default::default()
        };
        let options = config.worksheet_options();
        assert_eq!(options.count, 3);
        assert_eq!(options.repeat, 5);
    }
}
