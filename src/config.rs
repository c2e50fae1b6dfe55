//! Bridge configuration.
//!
//! Stored as JSON like the rest of the app's settings. Every field has a
//! default, so an empty object (or a missing file) yields a working config.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Overrides the external storage root reported by the provider
    pub external_storage_root: Option<PathBuf>,
    /// Where the platform mounts storage volumes (`/storage/<volume>`)
    pub storage_mount_root: PathBuf,
    /// Hand unresolved provider paths to the core as a last resort
    pub forward_raw_provider_paths: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            external_storage_root: None,
            storage_mount_root: PathBuf::from("/storage"),
            forward_raw_provider_paths: true,
        }
    }
}

impl BridgeConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse bridge config: {}", e))
    }

    /// Load config from a JSON file. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_json(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No bridge config at {:?}, using defaults", path);
                Ok(Self::default())
            }
            Err(e) => Err(format!("Failed to read bridge config: {}", e)),
        }
    }

    pub fn with_external_storage_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.external_storage_root = Some(root.into());
        self
    }

    pub fn with_storage_mount_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.storage_mount_root = root.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        assert_eq!(BridgeConfig::from_json("{}").unwrap(), BridgeConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = BridgeConfig::from_json(
            r#"{"external_storage_root":"/sdcard","forward_raw_provider_paths":false}"#,
        )
        .unwrap();
        assert_eq!(config.external_storage_root, Some(PathBuf::from("/sdcard")));
        assert_eq!(config.storage_mount_root, PathBuf::from("/storage"));
        assert!(!config.forward_raw_provider_paths);
        assert!(BridgeConfig::default().forward_raw_provider_paths);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = BridgeConfig::load(&dir.path().join("bridge.json")).unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridge.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(BridgeConfig::load(&path).is_err());
    }
}
