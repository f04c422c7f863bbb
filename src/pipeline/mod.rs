// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The structured-commit assembler.
//!
//! Orchestrates the analysis components over one raw export and produces the
//! final record. All-or-nothing: a record is either fully built or not at
//! all; nothing is emitted partially.

use crate::analysis::{
    build_message_context, compute_commit_id, extract_entities, flatten_model_changes,
    normalize_file_change, summarize_model_changes,
};
use crate::analysis::files::normalize_path;
use crate::model::{
    ChangeKind, CommitMetrics, RawCommitData, StructuredCommitData, StructuredFileChange,
    StructuredModelDumpArtifact, STRUCTURED_SCHEMA_VERSION,
};

/// Transform one raw export into a structured commit record.
///
/// Pure function of its input; identical exports yield identical records,
/// including the content-derived commit identifier.
pub fn assemble(raw: &RawCommitData) -> StructuredCommitData {
    let entities = extract_entities(&raw.changes);
    let file_changes: Vec<StructuredFileChange> =
        raw.changes.iter().map(normalize_file_change).collect();
    let model_changes = flatten_model_changes(&raw.changes);
    let model_summary = summarize_model_changes(&model_changes);
    let metrics = build_metrics(&file_changes);
    let affected_files = collect_affected_files(&raw.changes);
    let model_dump_artifacts = collect_dump_artifacts(&raw.changes);

    let commit_id = compute_commit_id(
        &raw.timestamp,
        &raw.project_name,
        &raw.branch_name,
        &raw.user_email,
        &affected_files,
    );

    let message_context = build_message_context(
        &file_changes,
        &model_changes,
        &model_summary,
        &metrics,
        &raw.project_name,
    );

    StructuredCommitData {
        schema_version: STRUCTURED_SCHEMA_VERSION.to_string(),
        commit_id,
        timestamp: raw.timestamp.clone(),
        project_name: raw.project_name.clone(),
        branch_name: raw.branch_name.clone(),
        user_name: raw.user_name.clone(),
        user_email: raw.user_email.clone(),
        entities,
        affected_files,
        metrics,
        file_changes,
        model_changes,
        model_summary,
        model_dump_artifacts,
        message_context,
    }
}

/// Partition the file count by change kind.
fn build_metrics(file_changes: &[StructuredFileChange]) -> CommitMetrics {
    let mut metrics = CommitMetrics {
        total_files: file_changes.len(),
        ..Default::default()
    };
    for change in file_changes {
        match change.change_kind {
            ChangeKind::Added => metrics.added += 1,
            ChangeKind::Modified => metrics.modified += 1,
            ChangeKind::Deleted => metrics.deleted += 1,
            ChangeKind::Renamed => metrics.renamed += 1,
        }
    }
    metrics
}

/// Unique normalized file paths, sorted case-insensitively. Blank paths are
/// skipped.
fn collect_affected_files(changes: &[crate::model::RawFileChange]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut files: Vec<String> = changes
        .iter()
        .filter(|change| !change.file_path.trim().is_empty())
        .map(|change| normalize_path(&change.file_path))
        .filter(|path| seen.insert(path.to_lowercase()))
        .collect();
    files.sort_by_key(|f| f.to_lowercase());
    files
}

fn collect_dump_artifacts(
    changes: &[crate::model::RawFileChange],
) -> Vec<StructuredModelDumpArtifact> {
    changes
        .iter()
        .filter_map(|change| {
            let artifact = change.model_dump_artifact.as_ref()?;
            Some(StructuredModelDumpArtifact {
                file_path: normalize_path(&change.file_path),
                folder_path: artifact.folder_path.clone(),
                working_dump_path: artifact.working_dump_path.clone(),
                head_dump_path: artifact.head_dump_path.clone(),
            })
        })
        .collect()
}
