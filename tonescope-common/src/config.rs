//! Configuration loading and dataset path resolution

use crate::{Error, Result};
use std::path::PathBuf;

/// Well-known dataset file name, looked up in the working directory when no
/// override is given.
pub const DEFAULT_DATASET_FILE: &str = "music_with_clusters.csv";

/// Dataset path resolution priority order:
/// 1. Command-line argument (highest priority, includes env var via clap)
/// 2. TOML config file (`dataset_path` key)
/// 3. Compiled default: `music_with_clusters.csv` in the working directory
pub fn resolve_dataset_path(cli_arg: Option<PathBuf>) -> PathBuf {
    // Priority 1: Command-line argument / environment variable
    if let Some(path) = cli_arg {
        return path;
    }

    // Priority 2: TOML config file
    if let Ok(config_path) = load_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(dataset_path) = config.get("dataset_path").and_then(|v| v.as_str()) {
                    return PathBuf::from(dataset_path);
                }
            }
        }
    }

    // Priority 3: Compiled default
    PathBuf::from(DEFAULT_DATASET_FILE)
}

/// Get configuration file path for the platform
fn load_config_file() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/tonescope/config.toml first, then /etc/tonescope/config.toml
        let user_config = dirs::config_dir().map(|d| d.join("tonescope").join("config.toml"));
        let system_config = PathBuf::from("/etc/tonescope/config.toml");

        if let Some(path) = user_config {
            if path.exists() {
                return Ok(path);
            }
        }
        if system_config.exists() {
            return Ok(system_config);
        }
        Err(Error::Config("No config file found".to_string()))
    } else {
        let config_path = dirs::config_dir()
            .map(|d| d.join("tonescope").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

        if config_path.exists() {
            Ok(config_path)
        } else {
            Err(Error::Config(format!(
                "Config file not found: {:?}",
                config_path
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_arg_wins() {
        let path = resolve_dataset_path(Some(PathBuf::from("/tmp/songs.csv")));
        assert_eq!(path, PathBuf::from("/tmp/songs.csv"));
    }

    #[test]
    fn test_default_fallback() {
        // No CLI arg and (in test environments) no config file present
        let path = resolve_dataset_path(None);
        assert!(path.to_string_lossy().ends_with(".csv"));
    }
}
