// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Structured commit record types.
//!
//! Every type here is created fresh per pipeline invocation and is immutable
//! thereafter. Field presence, list caps and the ordering invariants noted on
//! the individual types are part of the compatibility surface for consumers.

use serde::Serialize;
use std::fmt;

/// Classification of one file change derived from its status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed,
}

impl ChangeKind {
    /// The canonical string form ("Added", "Modified", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added => "Added",
            ChangeKind::Modified => "Modified",
            ChangeKind::Deleted => "Deleted",
            ChangeKind::Renamed => "Renamed",
        }
    }

    /// Lowercase form used for file tags.
    pub fn tag(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Renamed => "renamed",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A high-level Mendix entity touched by the commit.
///
/// The (type, name, action) triple is unique within one record; insertion
/// order is otherwise preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedEntity {
    pub entity_type: String,
    pub name: String,
    pub action: String,
}

/// One normalized, tagged file change.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredFileChange {
    /// Forward-slash path, or `"<unknown>"` when the raw path was blank.
    pub file_path: String,
    pub file_name: String,
    pub folder_path: String,
    pub status: String,
    pub is_staged: bool,
    pub change_kind: ChangeKind,
    pub is_binary_diff: bool,
    pub diff_line_count: usize,
    pub model_change_count: usize,
    /// Deduplicated, lexicographically sorted (case-insensitive).
    pub tags: Vec<String>,
}

/// One model-level change flattened from the raw export.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredModelChange {
    pub file_path: String,
    pub change_type: ChangeKind,
    pub element_type: String,
    pub element_name: String,
    pub details: Option<String>,
}

/// A key→count grouping result.
///
/// Breakdown lists are sorted by count descending, then key ascending
/// (case-insensitive). This ordering is a hard invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelChangeBreakdown {
    pub key: String,
    pub count: usize,
}

/// Usage summary for one microflow action type.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroflowActionSummary {
    pub action_type: String,
    pub count: usize,
    /// At most 4, deduplicated and sorted case-insensitively.
    pub examples: Vec<String>,
}

/// Per-entity attribute changes extracted from free-text details.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityAttributeChange {
    pub entity_name: String,
    pub change_type: ChangeKind,
    /// Sorted, deduplicated; `+`-prefixed tokens excluded.
    pub added_attributes: Vec<String>,
}

/// Domain-model level view over the entity changes.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainModelSummary {
    pub added_entities: Vec<String>,
    pub modified_entities: Vec<String>,
    pub attribute_changes: Vec<EntityAttributeChange>,
}

/// Aggregate view over the flattened model changes.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelChangeSummary {
    pub total_model_changes: usize,
    pub by_element_type: Vec<ModelChangeBreakdown>,
    pub by_change_type: Vec<ModelChangeBreakdown>,
    pub by_file: Vec<ModelChangeBreakdown>,
    pub microflow_actions: Vec<MicroflowActionSummary>,
    pub domain_model: DomainModelSummary,
}

/// File-count partition by change kind.
///
/// Invariant: added + modified + deleted + renamed == total_files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitMetrics {
    pub total_files: usize,
    pub added: usize,
    pub modified: usize,
    pub deleted: usize,
    pub renamed: usize,
}

/// Derived commit-message suggestions.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitMessageContext {
    pub suggested_type: String,
    /// At most 5, sorted case-insensitively.
    pub suggested_scopes: Vec<String>,
    pub suggested_subject: String,
    /// At most 8, ordered by relevance.
    pub highlights: Vec<String>,
    pub risks: Vec<String>,
}

/// Stored full dump artifact paths for a model file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredModelDumpArtifact {
    pub file_path: String,
    pub folder_path: String,
    pub working_dump_path: String,
    pub head_dump_path: String,
}

/// The enriched commit record produced by the pipeline.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredCommitData {
    pub schema_version: String,
    /// Content-derived identifier; see `analysis::identity`.
    pub commit_id: String,
    pub timestamp: String,
    pub project_name: String,
    pub branch_name: String,
    pub user_name: String,
    pub user_email: String,
    pub entities: Vec<ExtractedEntity>,
    /// Sorted case-insensitively, deduplicated.
    pub affected_files: Vec<String>,
    pub metrics: CommitMetrics,
    pub file_changes: Vec<StructuredFileChange>,
    pub model_changes: Vec<StructuredModelChange>,
    pub model_summary: ModelChangeSummary,
    pub model_dump_artifacts: Vec<StructuredModelDumpArtifact>,
    pub message_context: CommitMessageContext,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_kind_strings() {
        assert_eq!(ChangeKind::Added.as_str(), "Added");
        assert_eq!(ChangeKind::Renamed.tag(), "renamed");
        assert_eq!(ChangeKind::Deleted.to_string(), "Deleted");
    }

    #[test]
    fn test_change_kind_serializes_as_canonical_string() {
        let json = serde_json::to_string(&ChangeKind::Modified).unwrap();
        assert_eq!(json, "\"Modified\"");
    }

    #[test]
    fn test_structured_record_field_names() {
        let breakdown = ModelChangeBreakdown {
            key: "Entity".to_string(),
            count: 2,
        };
        let json = serde_json::to_string(&breakdown).unwrap();
        assert!(json.contains("\"key\""));
        assert!(json.contains("\"count\""));
    }
}
