// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Flattening of nested model changes into one ordered sequence.

use crate::model::{RawFileChange, StructuredModelChange};

use super::files::{classify_change_kind, normalize_path};

/// Flatten every file's nested model changes, in file order then nested order.
pub fn flatten_model_changes(changes: &[RawFileChange]) -> Vec<StructuredModelChange> {
    let mut flat = Vec::new();

    for change in changes {
        let Some(model_changes) = change.model_changes.as_ref().filter(|mc| !mc.is_empty())
        else {
            continue;
        };

        let file_path = normalize_path(&change.file_path);
        for model_change in model_changes {
            flat.push(StructuredModelChange {
                file_path: file_path.clone(),
                change_type: classify_change_kind(&model_change.change_type),
                element_type: default_blank(&model_change.element_type, "Unknown"),
                element_name: default_blank(&model_change.element_name, "Unknown"),
                details: model_change.details.clone(),
            });
        }
    }

    flat
}

fn default_blank(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
