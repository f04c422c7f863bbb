// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Raw export types as produced by the Studio Pro extension.
//!
//! The export is an opaque, already-serialized JSON payload. Every string
//! field is optional in the wire format and defaults to an empty string, so
//! deserialization never fails on a missing field; only a structurally
//! invalid document is rejected.

use serde::Deserialize;

/// One commit's raw change payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCommitData {
    pub schema_version: String,
    pub timestamp: String,
    pub project_name: String,
    pub branch_name: String,
    pub user_name: String,
    pub user_email: String,
    pub changes: Vec<RawFileChange>,
}

/// Per-file status, staged flag, diff text and optional model-level changes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFileChange {
    pub file_path: String,
    pub status: String,
    pub is_staged: bool,
    pub diff_text: String,
    pub model_changes: Option<Vec<RawModelChange>>,
    pub model_dump_artifact: Option<RawModelDumpArtifact>,
}

impl RawFileChange {
    /// Whether this file carries at least one nested model change.
    pub fn has_model_changes(&self) -> bool {
        self.model_changes
            .as_ref()
            .map(|changes| !changes.is_empty())
            .unwrap_or(false)
    }

    /// Number of nested model changes (0 when absent).
    pub fn model_change_count(&self) -> usize {
        self.model_changes
            .as_ref()
            .map(|changes| changes.len())
            .unwrap_or(0)
    }
}

/// One model-element change as reported by the model-diff tool.
///
/// `details` is a semi-structured free-text blob; it may embed
/// "actions used (N): ...", "action details: ..." and
/// "attributes added (N): ..." sub-sections, none of which are guaranteed
/// to be well-formed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawModelChange {
    pub change_type: String,
    pub element_type: String,
    pub element_name: String,
    pub details: Option<String>,
}

/// Full dump artifact paths recorded for a model file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawModelDumpArtifact {
    pub folder_path: String,
    pub working_dump_path: String,
    pub head_dump_path: String,
}
