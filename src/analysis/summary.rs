// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Aggregation of flattened model changes into breakdowns and summaries.
//!
//! The free-text `details` blobs are scanned with small, independent pattern
//! matchers. A section that does not match its sub-grammar contributes
//! nothing; extraction never fails.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::{
    ChangeKind, DomainModelSummary, EntityAttributeChange, MicroflowActionSummary,
    ModelChangeBreakdown, ModelChangeSummary, StructuredModelChange,
};

use super::files::UNKNOWN_PATH;

/// Maximum example length before truncation.
const MAX_EXAMPLE_LEN: usize = 220;
/// Maximum examples kept per microflow action.
const MAX_EXAMPLES: usize = 4;

lazy_static! {
    /// "actions used (N): Action1 x3, Action2 x1"
    static ref ACTIONS_USED_RE: Regex =
        Regex::new(r"(?i)\bactions\s+used\s*\(\d+\)\s*:\s*([^;]*)").unwrap();

    /// "<identifier> x<integer>" tokens inside an actions-used section.
    static ref ACTION_COUNT_RE: Regex =
        Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\s*x(\d+)").unwrap();

    /// "action details: Action1: <text>; Action2: <text>"
    static ref ACTION_DETAILS_RE: Regex =
        Regex::new(r"(?i)\baction\s+details\s*:\s*(.*)").unwrap();

    /// "<identifier>: <free text>" inside an action-details section.
    static ref ACTION_EXAMPLE_RE: Regex =
        Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*:\s*(.+)$").unwrap();

    /// "attributes added (N): attr1, attr2"
    static ref ATTRIBUTES_ADDED_RE: Regex =
        Regex::new(r"(?i)\battributes\s+added\s*\(\d+\)\s*:\s*([^;\r\n]*)").unwrap();
}

/// Build the full aggregate summary over the flattened model changes.
pub fn summarize_model_changes(changes: &[StructuredModelChange]) -> ModelChangeSummary {
    ModelChangeSummary {
        total_model_changes: changes.len(),
        by_element_type: build_breakdown(changes, "Unknown", |c| c.element_type.as_str()),
        by_change_type: build_breakdown(changes, "Modified", |c| c.change_type.as_str()),
        by_file: build_breakdown(changes, UNKNOWN_PATH, |c| c.file_path.as_str()),
        microflow_actions: summarize_microflow_actions(changes),
        domain_model: summarize_domain_model(changes),
    }
}

/// Group changes by a key, case-insensitively.
///
/// Blank keys are replaced by `blank_default`. The result is sorted by count
/// descending, then key ascending (case-insensitive).
pub fn build_breakdown<'a>(
    changes: &'a [StructuredModelChange],
    blank_default: &str,
    key_fn: impl Fn(&'a StructuredModelChange) -> &'a str,
) -> Vec<ModelChangeBreakdown> {
    // lowercase key -> (display key, count); first-seen casing wins
    let mut groups: HashMap<String, (String, usize)> = HashMap::new();

    for change in changes {
        let raw_key = key_fn(change).trim();
        let key = if raw_key.is_empty() {
            blank_default
        } else {
            raw_key
        };
        let entry = groups
            .entry(key.to_lowercase())
            .or_insert_with(|| (key.to_string(), 0));
        entry.1 += 1;
    }

    let mut breakdown: Vec<ModelChangeBreakdown> = groups
        .into_values()
        .map(|(key, count)| ModelChangeBreakdown { key, count })
        .collect();
    breakdown.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.key.to_lowercase().cmp(&b.key.to_lowercase()))
    });
    breakdown
}

/// Parse the compact "actions used (N): A x3, B x1" count summary.
///
/// The last occurrence of a given action within one details blob wins.
pub fn parse_action_counts(details: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    let Some(section) = ACTIONS_USED_RE
        .captures(details)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
    else {
        return counts;
    };

    for token in ACTION_COUNT_RE.captures_iter(section) {
        let action = token[1].to_string();
        if let Ok(count) = token[2].parse::<usize>() {
            counts.insert(action, count);
        }
    }
    counts
}

/// Parse the verbose "action details: A: <text>; B: <text>" section into
/// per-action examples.
pub fn parse_action_examples(details: &str) -> Vec<(String, String)> {
    let Some(section) = ACTION_DETAILS_RE
        .captures(details)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
    else {
        return Vec::new();
    };

    section
        .split(';')
        .filter_map(|part| {
            let captures = ACTION_EXAMPLE_RE.captures(part)?;
            let action = captures[1].to_string();
            let example = collapse_and_truncate(&captures[2]);
            if example.is_empty() {
                None
            } else {
                Some((action, example))
            }
        })
        .collect()
}

/// Parse the "attributes added (N): attr1, attr2" list.
///
/// Tokens starting with `+` are discarded.
pub fn parse_added_attributes(details: &str) -> Vec<String> {
    let Some(section) = ATTRIBUTES_ADDED_RE
        .captures(details)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
    else {
        return Vec::new();
    };

    section
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty() && !token.starts_with('+'))
        .map(str::to_string)
        .collect()
}

/// Summarize microflow action usage across all microflow changes.
fn summarize_microflow_actions(changes: &[StructuredModelChange]) -> Vec<MicroflowActionSummary> {
    // lowercase action -> (display name, total count, lowercase example -> example)
    let mut actions: HashMap<String, (String, usize, HashMap<String, String>)> = HashMap::new();

    for change in changes {
        if !change.element_type.eq_ignore_ascii_case("Microflow") {
            continue;
        }
        let Some(details) = change.details.as_deref() else {
            continue;
        };

        let mut counts = parse_action_counts(details);
        let examples = parse_action_examples(details);

        // An example for an action absent from the count pass seeds it at 1.
        for (action, _) in &examples {
            counts.entry(action.clone()).or_insert(1);
        }

        for (action, count) in counts {
            let entry = actions
                .entry(action.to_lowercase())
                .or_insert_with(|| (action.clone(), 0, HashMap::new()));
            entry.1 += count;
        }
        for (action, example) in examples {
            let entry = actions
                .entry(action.to_lowercase())
                .or_insert_with(|| (action.clone(), 0, HashMap::new()));
            entry.2.entry(example.to_lowercase()).or_insert(example);
        }
    }

    let mut summaries: Vec<MicroflowActionSummary> = actions
        .into_values()
        .map(|(action_type, count, examples)| {
            let mut examples: Vec<String> = examples.into_values().collect();
            examples.sort_by_key(|e| e.to_lowercase());
            examples.truncate(MAX_EXAMPLES);
            MicroflowActionSummary {
                action_type,
                count,
                examples,
            }
        })
        .collect();
    summaries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.action_type.to_lowercase().cmp(&b.action_type.to_lowercase()))
    });
    summaries
}

/// Summarize entity-level changes into the domain-model view.
fn summarize_domain_model(changes: &[StructuredModelChange]) -> DomainModelSummary {
    let mut added = Vec::new();
    let mut modified = Vec::new();
    // lowercase entity name -> (display name, last contributing change kind, attributes)
    let mut attributes: HashMap<String, (String, ChangeKind, HashMap<String, String>)> =
        HashMap::new();

    for change in changes {
        if !change.element_type.eq_ignore_ascii_case("Entity") {
            continue;
        }

        match change.change_type {
            ChangeKind::Added => added.push(change.element_name.clone()),
            ChangeKind::Modified => modified.push(change.element_name.clone()),
            _ => {}
        }

        let Some(details) = change.details.as_deref() else {
            continue;
        };
        let parsed = parse_added_attributes(details);
        if parsed.is_empty() {
            continue;
        }

        let entry = attributes
            .entry(change.element_name.to_lowercase())
            .or_insert_with(|| {
                (change.element_name.clone(), ChangeKind::Modified, HashMap::new())
            });
        entry.1 = change.change_type;
        for attribute in parsed {
            entry.2.entry(attribute.to_lowercase()).or_insert(attribute);
        }
    }

    let mut attribute_changes: Vec<EntityAttributeChange> = attributes
        .into_values()
        .map(|(entity_name, change_type, attrs)| {
            let mut added_attributes: Vec<String> = attrs.into_values().collect();
            added_attributes.sort_by_key(|a| a.to_lowercase());
            EntityAttributeChange {
                entity_name,
                change_type,
                added_attributes,
            }
        })
        .collect();
    attribute_changes.sort_by_key(|c| c.entity_name.to_lowercase());

    DomainModelSummary {
        added_entities: dedup_sort(added),
        modified_entities: dedup_sort(modified),
        attribute_changes,
    }
}

/// Deduplicate case-insensitively and sort case-insensitively.
fn dedup_sort(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out: Vec<String> = values
        .into_iter()
        .filter(|v| seen.insert(v.to_lowercase()))
        .collect();
    out.sort_by_key(|v| v.to_lowercase());
    out
}

/// Collapse runs of whitespace and truncate long examples.
fn collapse_and_truncate(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_EXAMPLE_LEN {
        return collapsed;
    }
    let truncated: String = collapsed.chars().take(MAX_EXAMPLE_LEN).collect();
    format!("{}…", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_change(
        file: &str,
        kind: ChangeKind,
        element_type: &str,
        element_name: &str,
        details: Option<&str>,
    ) -> StructuredModelChange {
        StructuredModelChange {
            file_path: file.to_string(),
            change_type: kind,
            element_type: element_type.to_string(),
            element_name: element_name.to_string(),
            details: details.map(str::to_string),
        }
    }

    #[test]
    fn test_breakdown_ordering() {
        let changes = vec![
            model_change("a.mpr", ChangeKind::Modified, "Entity", "A", None),
            model_change("a.mpr", ChangeKind::Modified, "entity", "B", None),
            model_change("a.mpr", ChangeKind::Modified, "Microflow", "C", None),
            model_change("a.mpr", ChangeKind::Modified, "Attribute", "D", None),
        ];
        let breakdown = build_breakdown(&changes, "Unknown", |c| c.element_type.as_str());
        // Count descending, then key ascending case-insensitive
        assert_eq!(breakdown[0].key, "Entity");
        assert_eq!(breakdown[0].count, 2);
        assert_eq!(breakdown[1].key, "Attribute");
        assert_eq!(breakdown[2].key, "Microflow");
    }

    #[test]
    fn test_breakdown_blank_key_default() {
        let changes = vec![model_change("a.mpr", ChangeKind::Modified, "  ", "A", None)];
        let breakdown = build_breakdown(&changes, "Unknown", |c| c.element_type.as_str());
        assert_eq!(breakdown[0].key, "Unknown");
    }

    #[test]
    fn test_parse_action_counts() {
        let counts =
            parse_action_counts("Actions used (2): CreateObject x3, ChangeObject x1");
        assert_eq!(counts["CreateObject"], 3);
        assert_eq!(counts["ChangeObject"], 1);
    }

    #[test]
    fn test_parse_action_counts_last_occurrence_wins() {
        let counts = parse_action_counts("actions used (2): Retrieve x1, Retrieve x4");
        assert_eq!(counts["Retrieve"], 4);
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_parse_action_counts_malformed() {
        assert!(parse_action_counts("no section here").is_empty());
        assert!(parse_action_counts("actions used (1): ???").is_empty());
    }

    #[test]
    fn test_parse_action_examples() {
        let examples = parse_action_examples(
            "Action details: CreateObject: sets   Name; ChangeObject: sets Status",
        );
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0], ("CreateObject".to_string(), "sets Name".to_string()));
        assert_eq!(examples[1], ("ChangeObject".to_string(), "sets Status".to_string()));
    }

    #[test]
    fn test_example_truncation() {
        let long = "x".repeat(400);
        let examples = parse_action_examples(&format!("action details: Log: {}", long));
        let (_, example) = &examples[0];
        assert_eq!(example.chars().count(), MAX_EXAMPLE_LEN + 1);
        assert!(example.ends_with('…'));
    }

    #[test]
    fn test_parse_added_attributes_excludes_plus_tokens() {
        let attrs = parse_added_attributes("Attributes added (2): Email, +Email_Old");
        assert_eq!(attrs, vec!["Email"]);
    }

    #[test]
    fn test_microflow_summary_counts_and_examples() {
        let changes = vec![model_change(
            "App.mpr",
            ChangeKind::Modified,
            "Microflow",
            "ACT_Save",
            Some(
                "Actions used (2): CreateObject x3, ChangeObject x1; \
                 Action details: CreateObject: sets Name; ChangeObject: sets Status",
            ),
        )];
        let summary = summarize_microflow_actions(&changes);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].action_type, "CreateObject");
        assert_eq!(summary[0].count, 3);
        assert!(summary[0].examples[0].contains("sets Name"));
        assert_eq!(summary[1].action_type, "ChangeObject");
        assert_eq!(summary[1].count, 1);
        assert!(summary[1].examples[0].contains("sets Status"));
    }

    #[test]
    fn test_microflow_example_only_action_seeds_count() {
        let changes = vec![model_change(
            "App.mpr",
            ChangeKind::Modified,
            "Microflow",
            "ACT_Save",
            Some("Action details: Rollback: undoes changes"),
        )];
        let summary = summarize_microflow_actions(&changes);
        assert_eq!(summary[0].action_type, "Rollback");
        assert_eq!(summary[0].count, 1);
    }

    #[test]
    fn test_microflow_counts_summed_across_changes() {
        let changes = vec![
            model_change(
                "a.mpr",
                ChangeKind::Modified,
                "Microflow",
                "A",
                Some("actions used (1): Retrieve x2"),
            ),
            model_change(
                "b.mpr",
                ChangeKind::Modified,
                "microflow",
                "B",
                Some("actions used (1): Retrieve x3"),
            ),
            model_change(
                "c.mpr",
                ChangeKind::Modified,
                "Entity",
                "C",
                Some("actions used (1): Retrieve x9"),
            ),
        ];
        let summary = summarize_microflow_actions(&changes);
        assert_eq!(summary.len(), 1);
        // The Entity change is not examined
        assert_eq!(summary[0].count, 5);
    }

    #[test]
    fn test_microflow_examples_capped_and_sorted() {
        let changes: Vec<StructuredModelChange> = (0..6)
            .map(|i| {
                model_change(
                    "a.mpr",
                    ChangeKind::Modified,
                    "Microflow",
                    "A",
                    Some(&format!("action details: Log: message {}", i)),
                )
            })
            .collect();
        let summary = summarize_microflow_actions(&changes);
        assert_eq!(summary[0].examples.len(), MAX_EXAMPLES);
        assert_eq!(summary[0].examples[0], "message 0");
    }

    #[test]
    fn test_domain_summary_added_and_modified() {
        let changes = vec![
            model_change("a.mpr", ChangeKind::Added, "Entity", "Customer", None),
            model_change("a.mpr", ChangeKind::Modified, "Entity", "Order", None),
            model_change("a.mpr", ChangeKind::Modified, "Entity", "order", None),
            model_change("a.mpr", ChangeKind::Deleted, "Entity", "Legacy", None),
        ];
        let summary = summarize_domain_model(&changes);
        assert_eq!(summary.added_entities, vec!["Customer"]);
        assert_eq!(summary.modified_entities, vec!["Order"]);
        assert!(summary.attribute_changes.is_empty());
    }

    #[test]
    fn test_domain_summary_attribute_union() {
        let changes = vec![
            model_change(
                "a.mpr",
                ChangeKind::Added,
                "Entity",
                "Customer",
                Some("Attributes added (1): Email"),
            ),
            model_change(
                "a.mpr",
                ChangeKind::Modified,
                "Entity",
                "Customer",
                Some("Attributes added (2): Name, email"),
            ),
        ];
        let summary = summarize_domain_model(&changes);
        assert_eq!(summary.attribute_changes.len(), 1);
        let change = &summary.attribute_changes[0];
        assert_eq!(change.entity_name, "Customer");
        // Last contributing entry wins
        assert_eq!(change.change_type, ChangeKind::Modified);
        assert_eq!(change.added_attributes, vec!["Email", "Name"]);
    }

    #[test]
    fn test_added_entity_double_bookkeeping_preserved() {
        let changes = vec![model_change(
            "a.mpr",
            ChangeKind::Added,
            "Entity",
            "Customer",
            Some("Attributes added (1): Email"),
        )];
        let summary = summarize_domain_model(&changes);
        assert_eq!(summary.added_entities, vec!["Customer"]);
        assert_eq!(summary.attribute_changes.len(), 1);
    }

    #[test]
    fn test_full_summary_totals() {
        let changes = vec![
            model_change("a.mpr", ChangeKind::Added, "Entity", "Customer", None),
            model_change("b.mpr", ChangeKind::Modified, "Microflow", "ACT", None),
        ];
        let summary = summarize_model_changes(&changes);
        assert_eq!(summary.total_model_changes, 2);
        assert_eq!(summary.by_file.len(), 2);
        assert_eq!(summary.by_change_type.len(), 2);
    }
}
