// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Entity extraction from raw file changes.
//!
//! Model-change data is preferred when present; files without model changes
//! fall back to path-convention heuristics. Every malformed or blank field
//! degrades to a default, so extraction never fails.

use std::collections::HashSet;

use crate::model::{ExtractedEntity, RawFileChange};

use super::files::classify_change_kind;

/// Extract a deduplicated list of domain entities touched by the commit.
///
/// Uniqueness is set semantics over the (type, name, action) triple;
/// insertion order is otherwise preserved.
pub fn extract_entities(changes: &[RawFileChange]) -> Vec<ExtractedEntity> {
    let mut entities = Vec::with_capacity(changes.len());
    let mut seen = HashSet::new();

    for change in changes {
        if let Some(model_changes) = change.model_changes.as_ref().filter(|mc| !mc.is_empty()) {
            for model_change in model_changes {
                let entity_type = non_blank_or(&model_change.element_type, "Model");
                let name = non_blank_or(&model_change.element_name, "Unknown");
                let action = if model_change.change_type.trim().is_empty() {
                    normalize_action(&change.status)
                } else {
                    normalize_action(&model_change.change_type)
                };
                add_entity(&mut entities, &mut seen, entity_type, name, action);
            }
            continue;
        }

        let path = change.file_path.replace('\\', "/");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let action = normalize_action(&change.status);

        let (entity_type, name) = classify_by_path(&segments, &path);
        add_entity(&mut entities, &mut seen, entity_type, name, action);
    }

    entities
}

/// Classify a file without model changes by its first path segment.
fn classify_by_path(segments: &[&str], path: &str) -> (String, String) {
    if segments.len() > 1 {
        let last = segments[segments.len() - 1];
        match segments[0].to_lowercase().as_str() {
            "domain" => return ("Domain".to_string(), stem_or_unknown(last)),
            "pages" => return ("Page".to_string(), stem_or_unknown(last)),
            "microflows" => return ("Microflow".to_string(), stem_or_unknown(last)),
            "resources" => return ("Resource".to_string(), last.to_string()),
            _ => {}
        }
    }

    let fallback = path.rsplit('/').next().unwrap_or("").trim();
    let name = if fallback.is_empty() {
        "Unknown".to_string()
    } else {
        fallback.to_string()
    };
    ("Unknown".to_string(), name)
}

/// File stem of a path segment, "Unknown" when it would be blank.
fn stem_or_unknown(segment: &str) -> String {
    let stem = match segment.rfind('.') {
        Some(idx) if idx > 0 => &segment[..idx],
        _ => segment,
    };
    if stem.trim().is_empty() {
        "Unknown".to_string()
    } else {
        stem.to_string()
    }
}

/// Map a status or change-type text onto a normalized action.
fn normalize_action(status: &str) -> String {
    if status.trim().is_empty() {
        return "Modified".to_string();
    }
    classify_change_kind(status).as_str().to_string()
}

fn add_entity(
    target: &mut Vec<ExtractedEntity>,
    seen: &mut HashSet<String>,
    entity_type: String,
    name: String,
    action: String,
) {
    let entity_type = non_blank_or(&entity_type, "Unknown");
    let name = non_blank_or(&name, "Unknown");
    let action = non_blank_or(&action, "Modified");
    let key = format!(
        "{}|{}|{}",
        entity_type.to_lowercase(),
        name.to_lowercase(),
        action.to_lowercase()
    );
    if !seen.insert(key) {
        return;
    }
    target.push(ExtractedEntity {
        entity_type,
        name,
        action,
    });
}

fn non_blank_or(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
