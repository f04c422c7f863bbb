// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for the mxc application.
//!
//! Only two conditions are fatal for a single export: the export file cannot
//! be found, or it cannot be parsed into the expected shape. Everything else
//! (blank fields, malformed free-text detail sections) degrades to a
//! documented default inside the pipeline and never surfaces here.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for mxc operations.
#[derive(Error, Debug)]
pub enum MxcError {
    // Export errors (the two fatal conditions per invocation)
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Raw-export errors. Both variants abort processing of one commit.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Export file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse export file {path}: {message}")]
    Malformed { path: PathBuf, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Persistence errors for the structured output.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to create output directory {path}: {message}")]
    CreateDirFailed { path: PathBuf, message: String },

    #[error("Failed to serialize structured commit: {message}")]
    SerializeFailed { message: String },

    #[error("Failed to write structured commit to {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },
}

/// Result type alias for mxc operations.
pub type Result<T> = std::result::Result<T, MxcError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| MxcError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_error_display() {
        let err = ExportError::NotFound {
            path: PathBuf::from("/data/exports/commit.json"),
        };
        assert!(err.to_string().contains("/data/exports/commit.json"));
    }

    #[test]
    fn test_malformed_carries_source() {
        let err = ExportError::Malformed {
            path: PathBuf::from("bad.json"),
            message: "unexpected end of input".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("bad.json"));
        assert!(msg.contains("unexpected end of input"));
    }

    #[test]
    fn test_mxc_error_from_export_error() {
        let export_err = ExportError::NotFound {
            path: PathBuf::from("missing.json"),
        };
        let mxc_err: MxcError = export_err.into();
        assert!(mxc_err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_result_ext_context() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk on fire",
        ));
        let err = res.context("writing output").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("writing output"));
        assert!(msg.contains("disk on fire"));
    }
}
