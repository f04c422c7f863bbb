// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Export loading and structured-output persistence.
//!
//! Loading surfaces the two fatal conditions (missing file, malformed JSON)
//! as typed errors. Writing goes through a temp file in the destination
//! directory followed by an atomic rename, so a partially-written record is
//! never observable.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{ExportError, MxcError, Result, StorageError};
use crate::model::{RawCommitData, StructuredCommitData};

/// Read and parse one raw export file.
pub fn load_export(path: &Path) -> Result<RawCommitData> {
    if !path.exists() {
        return Err(MxcError::Export(ExportError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        MxcError::Export(ExportError::Malformed {
            path: path.to_path_buf(),
            message: format!("Failed to read file: {}", e),
        })
    })?;

    parse_export(&content, path)
}

/// Parse a raw export from a JSON string.
///
/// `source` identifies the export in error messages.
pub fn parse_export(content: &str, source: &Path) -> Result<RawCommitData> {
    serde_json::from_str(content).map_err(|e| {
        MxcError::Export(ExportError::Malformed {
            path: source.to_path_buf(),
            message: e.to_string(),
        })
    })
}

/// Persist a structured commit record under `{commitId}.json`.
///
/// Returns the destination path.
pub fn save_structured(data: &StructuredCommitData, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir).map_err(|e| {
        MxcError::Storage(StorageError::CreateDirFailed {
            path: output_dir.to_path_buf(),
            message: e.to_string(),
        })
    })?;

    let json = serde_json::to_string_pretty(data).map_err(|e| {
        MxcError::Storage(StorageError::SerializeFailed {
            message: e.to_string(),
        })
    })?;

    let destination = output_dir.join(format!("{}.json", data.commit_id));

    // Temp file in the destination directory so the rename stays on one
    // filesystem.
    let write_result = NamedTempFile::new_in(output_dir)
        .and_then(|mut tmp| {
            tmp.write_all(json.as_bytes())?;
            Ok(tmp)
        })
        .map_err(|e| StorageError::WriteFailed {
            path: destination.clone(),
            message: e.to_string(),
        })?;

    write_result
        .persist(&destination)
        .map_err(|e| StorageError::WriteFailed {
            path: destination.clone(),
            message: e.to_string(),
        })?;

    tracing::debug!("Wrote structured commit to {:?}", destination);
    Ok(destination)
}
