// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines the structures that can be loaded from mxc.toml.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the data root.
pub const DATA_ROOT_ENV: &str = "MXC_DATA_ROOT";

/// The main configuration structure for mxc.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MxcConfig {
    /// Storage configuration.
    pub storage: StorageConfig,
}

impl MxcConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }

    /// Resolve the folder layout under the configured data root.
    pub fn data_paths(&self) -> DataPaths {
        DataPaths::new(self.storage.resolve_data_root())
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Root directory for exports and structured output. When unset, the
    /// `MXC_DATA_ROOT` environment variable applies, then the platform data
    /// directory.
    pub data_root: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the effective data root.
    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(ref root) = self.data_root {
            return root.clone();
        }
        if let Some(from_env) = std::env::var_os(DATA_ROOT_ENV) {
            let path = PathBuf::from(from_env);
            if !path.as_os_str().is_empty() {
                return path;
            }
        }
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mxc")
            .join("mendix-data")
    }
}

/// Folder layout under the data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub data_root: PathBuf,
    pub exports: PathBuf,
    pub structured: PathBuf,
    pub processed: PathBuf,
    pub errors: PathBuf,
}

impl DataPaths {
    /// Derive the folder layout from a data root.
    pub fn new(data_root: PathBuf) -> Self {
        Self {
            exports: data_root.join("exports"),
            structured: data_root.join("structured"),
            processed: data_root.join("processed"),
            errors: data_root.join("errors"),
            data_root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_paths_layout() {
        let paths = DataPaths::new(PathBuf::from("/data"));
        assert_eq!(paths.exports, PathBuf::from("/data/exports"));
        assert_eq!(paths.structured, PathBuf::from("/data/structured"));
        assert_eq!(paths.processed, PathBuf::from("/data/processed"));
        assert_eq!(paths.errors, PathBuf::from("/data/errors"));
    }

    #[test]
    fn test_explicit_data_root_wins() {
        let config = StorageConfig {
            data_root: Some(PathBuf::from("/explicit")),
        };
        assert_eq!(config.resolve_data_root(), PathBuf::from("/explicit"));
    }

    #[test]
    fn test_config_parses_from_toml() {
        let config: MxcConfig = toml::from_str(
            r#"
            [storage]
            data_root = "/srv/mendix-data"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.storage.data_root,
            Some(PathBuf::from("/srv/mendix-data"))
        );
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config: MxcConfig = toml::from_str("").unwrap();
        assert!(config.storage.data_root.is_none());
    }
}
