//! Configuration loading and validation.
//!
//! Picvault reads a small TOML file with a `[storage]` section. When no file
//! is found at the explicit or default locations, built-in defaults are used.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Storage layer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the image database. Created on first store if
    /// missing.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    /// Absolute or relative path of the image database file.
    pub fn database_path(&self) -> PathBuf {
        self.storage.data_dir.join(picvault_db::DATABASE_FILE_NAME)
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./picvault.toml", "~/.config/picvault/picvault.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    let data_dir = &config.storage.data_dir;
    if data_dir.as_os_str().is_empty() {
        anyhow::bail!("storage.data_dir cannot be empty");
    }
    if data_dir.is_file() {
        anyhow::bail!("storage.data_dir is a file: {:?}", data_dir);
    }
    if !data_dir.exists() {
        tracing::debug!("Data directory does not exist yet: {:?}", data_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage.data_dir, PathBuf::from("."));
        assert_eq!(
            config.database_path(),
            PathBuf::from("./imagesDatabase.db")
        );
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picvault.toml");
        std::fs::write(&path, "[storage]\ndata_dir = \"/var/lib/picvault\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/picvault"));
        assert_eq!(
            config.database_path(),
            PathBuf::from("/var/lib/picvault/imagesDatabase.db")
        );
    }

    #[test]
    fn test_load_config_missing_section_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picvault.toml");
        std::fs::write(&path, "").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("."));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picvault.toml");
        std::fs::write(&path, "storage = 3").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_validate_rejects_file_as_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();

        let toml_path = dir.path().join("picvault.toml");
        std::fs::write(
            &toml_path,
            format!("[storage]\ndata_dir = {:?}\n", file.to_str().unwrap()),
        )
        .unwrap();

        assert!(load_config(&toml_path).is_err());
    }

    #[test]
    fn test_load_config_or_default_explicit_missing_file() {
        let missing = Path::new("/definitely/not/here/picvault.toml");
        assert!(load_config_or_default(Some(missing)).is_err());
    }
}
