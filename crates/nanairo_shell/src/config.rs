//! Shell Configuration
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables: `NANAIRO_SCENE_DIR`, `NANAIRO_PRESET`,
//!    `NANAIRO_LOG`
//! 2. Config file: `nanairo.toml` in the working directory, then
//!    `$XDG_CONFIG_HOME/nanairo/nanairo.toml`
//! 3. Built-in defaults
//!
//! # Example Config File
//!
//! ```toml
//! scene_dir = "scenes"
//! backup_file_name = "SceneBackup.nana"
//! default_preset = "CornellBox"
//! log_level = "debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use nanairo_scene::PresetScene;

use crate::error::{Result, ShellError};

/// Name of the config file searched for
pub const CONFIG_FILE_NAME: &str = "nanairo.toml";

/// Complete shell configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Directory scenes are written to when no output is given
    pub scene_dir: PathBuf,
    /// File name of the scene backup
    pub backup_file_name: String,
    /// Preset used by `default` when none is named
    pub default_preset: String,
    /// Log filter, overridden by `RUST_LOG`
    pub log_level: Option<String>,
    /// Config file the values came from
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            scene_dir: PathBuf::from("."),
            backup_file_name: "SceneBackup.nana".to_string(),
            default_preset: PresetScene::CornellBox.name().to_string(),
            log_level: None,
            config_path: None,
        }
    }
}

impl ShellConfig {
    /// Load configuration from all sources.
    ///
    /// An explicit `path` must exist and parse; the default locations are
    /// skipped when absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::search_paths()
                .into_iter()
                .find(|candidate| candidate.is_file())
                .map(|candidate| Self::load_from_file(&candidate))
                .transpose()?
                .unwrap_or_default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Config file locations, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        let config_home = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")));
        if let Some(dir) = config_home {
            paths.push(dir.join("nanairo").join(CONFIG_FILE_NAME));
        }
        paths
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|source| ShellError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.config_path = Some(path.to_path_buf());
        log::info!("Loaded shell config from {}", path.display());
        Ok(config)
    }

    /// Override values from environment variables
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = var("NANAIRO_SCENE_DIR").filter(|v| !v.is_empty()) {
            self.scene_dir = PathBuf::from(dir);
            log::debug!("Scene dir from env: {}", self.scene_dir.display());
        }
        if let Some(preset) = var("NANAIRO_PRESET").filter(|v| !v.is_empty()) {
            self.default_preset = preset;
        }
        if let Some(level) = var("NANAIRO_LOG").filter(|v| !v.is_empty()) {
            self.log_level = Some(level);
        }
    }

    /// Preset named by `default_preset`
    pub fn preset(&self) -> Result<PresetScene> {
        Ok(self.default_preset.parse::<PresetScene>()?)
    }

    /// Where the scene backup is written
    pub fn backup_path(&self) -> PathBuf {
        self.scene_dir.join(&self.backup_file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ShellConfig::default();
        assert_eq!(config.preset().unwrap(), PresetScene::CornellBox);
        assert_eq!(config.backup_path(), Path::new("./SceneBackup.nana"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "scene_dir = \"scenes\"\ndefault_preset = \"DefaultScene\"\n").unwrap();

        let config = ShellConfig::load_from_file(&path).unwrap();
        assert_eq!(config.scene_dir, PathBuf::from("scenes"));
        assert_eq!(config.preset().unwrap(), PresetScene::Default);
        assert_eq!(config.backup_file_name, "SceneBackup.nana");
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "preview_dir = \"preview\"\nlog_level = \"debug\"\n").unwrap();

        let config = ShellConfig::load_from_file(&path).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.scene_dir, PathBuf::from("."));
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "scene_dir = [").unwrap();

        assert!(matches!(ShellConfig::load_from_file(&path), Err(ShellError::Config { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("NANAIRO_SCENE_DIR", "/tmp/scenes"),
            ("NANAIRO_PRESET", "DefaultScene"),
            ("NANAIRO_LOG", ""),
        ]
        .into_iter()
        .collect();

        let mut config = ShellConfig::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.scene_dir, PathBuf::from("/tmp/scenes"));
        assert_eq!(config.default_preset, "DefaultScene");
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_unknown_preset() {
        let config = ShellConfig {
            default_preset: "Sponza".into(),
            ..ShellConfig::default()
        };
        assert!(config.preset().is_err());
    }
}
