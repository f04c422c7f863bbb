// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! File change normalization and tagging.

use crate::model::{ChangeKind, RawFileChange, StructuredFileChange};

/// Sentinel used when a raw path is blank.
pub const UNKNOWN_PATH: &str = "<unknown>";

/// Marker emitted by the exporter when a diff could not be produced.
const BINARY_DIFF_MARKER: &str = "binary file changed - diff not available";

/// Normalize a raw path to forward-slash form.
///
/// Blank paths become [`UNKNOWN_PATH`].
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return UNKNOWN_PATH.to_string();
    }
    trimmed.replace('\\', "/")
}

/// Classify a status text into a change kind.
///
/// Case-insensitive substring match; anything unrecognized (including blank)
/// is `Modified`.
pub fn classify_change_kind(status: &str) -> ChangeKind {
    let lower = status.to_lowercase();
    if lower.contains("added") {
        ChangeKind::Added
    } else if lower.contains("deleted") {
        ChangeKind::Deleted
    } else if lower.contains("renamed") {
        ChangeKind::Renamed
    } else {
        ChangeKind::Modified
    }
}

/// Whether the diff text is the exporter's binary-file placeholder.
pub fn is_binary_diff(diff_text: &str) -> bool {
    diff_text.to_lowercase().contains(BINARY_DIFF_MARKER)
}

/// Count changed lines in a unified diff text.
///
/// Counts non-empty lines starting with `+` or `-`, excluding the `+++`/`---`
/// file headers. Blank or binary-marked diffs count as 0.
pub fn count_diff_lines(diff_text: &str) -> usize {
    if diff_text.trim().is_empty() || is_binary_diff(diff_text) {
        return 0;
    }

    diff_text
        .split(['\r', '\n'])
        .filter(|line| !line.is_empty())
        .filter(|line| {
            (line.starts_with('+') && !line.starts_with("+++"))
                || (line.starts_with('-') && !line.starts_with("---"))
        })
        .count()
}

/// Normalize one raw file change into a tagged record.
pub fn normalize_file_change(change: &RawFileChange) -> StructuredFileChange {
    let file_path = normalize_path(&change.file_path);
    let (folder_path, file_name) = split_path(&file_path);
    let change_kind = classify_change_kind(&change.status);
    let is_binary = is_binary_diff(&change.diff_text);
    let diff_line_count = count_diff_lines(&change.diff_text);
    let model_change_count = change.model_change_count();

    let mut tags = vec![change_kind.tag().to_string()];
    tags.push(if change.is_staged { "staged" } else { "unstaged" }.to_string());
    let lower_path = file_path.to_lowercase();
    if lower_path.ends_with(".mpr") {
        tags.push("mendix-model".to_string());
    }
    if lower_path.ends_with(".mprops") {
        tags.push("mendix-settings".to_string());
    }
    if is_binary {
        tags.push("binary-diff".to_string());
    }
    if model_change_count > 0 {
        tags.push("has-model-changes".to_string());
    }
    let tags = dedup_sort_tags(tags);

    StructuredFileChange {
        file_path,
        file_name,
        folder_path,
        status: change.status.clone(),
        is_staged: change.is_staged,
        change_kind,
        is_binary_diff: is_binary,
        diff_line_count,
        model_change_count,
        tags,
    }
}

/// Split a normalized path into (folder, file name).
///
/// The folder is empty when the path has no separator or the separator is at
/// index 0.
fn split_path(path: &str) -> (String, String) {
    match path.rfind('/') {
        Some(idx) if idx > 0 => (path[..idx].to_string(), path[idx + 1..].to_string()),
        Some(idx) => (String::new(), path[idx + 1..].to_string()),
        None => (String::new(), path.to_string()),
    }
}

/// Deduplicate (case-insensitive) and sort tags for stable output.
fn dedup_sort_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out: Vec<String> = tags
        .into_iter()
        .filter(|tag| seen.insert(tag.to_lowercase()))
        .collect();
    out.sort_by_key(|tag| tag.to_lowercase());
    out
}
