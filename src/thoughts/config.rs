//! # Configuration
//!
//! Settings live in `config.json` inside the OS config directory
//! (`directories::ProjectDirs`), or in `$THOUGHTS_CONFIG_DIR` when set.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `root` | unset | Notes folder, set by `thoughts init <folder>` |
//! | `file-ext` | `.md` | Extension of note files |
//! | `trash-dir` | `deleted` | Trash sub-folder name |
//! | `rename-files` | `false` | Retire the old file when a title changes |
//! | `sort-by` | `updated` | `created`, `updated`, `title` or `custom` (see below) |
//! | `sort-order` | `desc` | `asc` or `desc` |
//!
//! `custom` order is set through `ThoughtsApi::reorder` and kept in memory
//! only. Each CLI run reloads the folder with no reordering, so from the
//! command line `custom` lists thoughts in folder enumeration order.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ThoughtsError};
use crate::index::{SortKey, SortOrder};
use crate::naming::normalize_ext;
use crate::store::directory::{DEFAULT_FILE_EXT, DEFAULT_TRASH_DIR};

const CONFIG_FILENAME: &str = "config.json";
pub const CONFIG_DIR_ENV: &str = "THOUGHTS_CONFIG_DIR";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThoughtsConfig {
    #[serde(default)]
    pub root: Option<PathBuf>,

    #[serde(default = "default_file_ext")]
    pub file_ext: String,

    #[serde(default = "default_trash_dir")]
    pub trash_dir: String,

    #[serde(default)]
    pub rename_files: bool,

    #[serde(default)]
    pub sort_by: SortKey,

    #[serde(default)]
    pub sort_order: SortOrder,
}

fn default_file_ext() -> String {
    DEFAULT_FILE_EXT.to_string()
}

fn default_trash_dir() -> String {
    DEFAULT_TRASH_DIR.to_string()
}

impl Default for ThoughtsConfig {
    fn default() -> Self {
        Self {
            root: None,
            file_ext: default_file_ext(),
            trash_dir: default_trash_dir(),
            rename_files: false,
            sort_by: SortKey::default(),
            sort_order: SortOrder::default(),
        }
    }
}

/// Where `config.json` lives: `$THOUGHTS_CONFIG_DIR`, else the platform
/// config directory.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "thoughts", "thoughts")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ThoughtsError::Config("Could not determine config dir".to_string()))
}

impl ThoughtsConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let mut config: ThoughtsConfig = serde_json::from_str(&content)?;
        config.file_ext = normalize_ext(&config.file_ext);
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn set_file_ext(&mut self, ext: &str) {
        self.file_ext = normalize_ext(ext);
    }

    /// Reads a setting by its CLI key.
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "root" => self
                .root
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "file-ext" => self.file_ext.clone(),
            "trash-dir" => self.trash_dir.clone(),
            "rename-files" => self.rename_files.to_string(),
            "sort-by" => self.sort_by.to_string(),
            "sort-order" => self.sort_order.to_string(),
            other => return Err(unknown_key(other)),
        };
        Ok(value)
    }

    /// Updates a setting by its CLI key, validating the value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "root" => self.root = Some(PathBuf::from(value)),
            "file-ext" => self.set_file_ext(value),
            "trash-dir" => {
                if value.is_empty() || value.contains(['/', '\\']) {
                    return Err(ThoughtsError::Config(format!(
                        "Invalid trash folder name: {}",
                        value
                    )));
                }
                self.trash_dir = value.to_string();
            }
            "rename-files" => {
                self.rename_files = value
                    .parse()
                    .map_err(|_| ThoughtsError::Config(format!("Expected true or false, got {}", value)))?;
            }
            "sort-by" => self.sort_by = value.parse().map_err(ThoughtsError::Config)?,
            "sort-order" => self.sort_order = value.parse().map_err(ThoughtsError::Config)?,
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    pub const KEYS: [&'static str; 6] = [
        "root",
        "file-ext",
        "trash-dir",
        "rename-files",
        "sort-by",
        "sort-order",
    ];
}

fn unknown_key(key: &str) -> ThoughtsError {
    ThoughtsError::Config(format!(
        "Unknown config key: {} (expected one of: {})",
        key,
        ThoughtsConfig::KEYS.join(", ")
    ))
}
