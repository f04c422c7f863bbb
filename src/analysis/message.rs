// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message heuristics: type, scopes, subject, highlights, risks.

use crate::model::{
    ChangeKind, CommitMessageContext, CommitMetrics, ModelChangeSummary, StructuredFileChange,
    StructuredModelChange,
};

/// Maximum suggested scopes.
const MAX_SCOPES: usize = 5;
/// Maximum highlight lines.
const MAX_HIGHLIGHTS: usize = 8;
/// Breakdown count above which template churn is flagged.
const CHURN_THRESHOLD: usize = 20;

/// Derive commit-message suggestions from the aggregated data.
pub fn build_message_context(
    file_changes: &[StructuredFileChange],
    model_changes: &[StructuredModelChange],
    summary: &ModelChangeSummary,
    metrics: &CommitMetrics,
    project_name: &str,
) -> CommitMessageContext {
    let suggested_scopes = derive_scopes(file_changes, model_changes, project_name);
    let suggested_type = infer_type(file_changes, summary);
    let highlights = build_highlights(summary, metrics);
    let risks = build_risks(file_changes, summary);
    let suggested_subject = derive_subject(
        summary,
        metrics,
        &suggested_scopes,
        &suggested_type,
    );

    CommitMessageContext {
        suggested_type,
        suggested_scopes,
        suggested_subject,
        highlights,
        risks,
    }
}

/// Candidate scopes from element-name prefixes and first path segments.
fn derive_scopes(
    file_changes: &[StructuredFileChange],
    model_changes: &[StructuredModelChange],
    project_name: &str,
) -> Vec<String> {
    let mut candidates = Vec::new();

    for change in model_changes {
        if let Some(idx) = change.element_name.find('.') {
            if idx > 0 {
                candidates.push(change.element_name[..idx].to_string());
            }
        }
    }

    for change in file_changes {
        let segments: Vec<&str> = change
            .file_path
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(first) = segments.first() {
            // A bare project file contributes no scope
            if segments.len() == 1 && first.to_lowercase().ends_with(".mpr") {
                continue;
            }
            candidates.push((*first).to_string());
        }
    }

    let mut seen = std::collections::HashSet::new();
    let mut scopes: Vec<String> = candidates
        .into_iter()
        .filter(|c| seen.insert(c.to_lowercase()))
        .collect();
    scopes.sort_by_key(|s| s.to_lowercase());
    scopes.truncate(MAX_SCOPES);

    if scopes.is_empty() {
        if let Some(token) = project_name.split_whitespace().next() {
            scopes.push(token.to_string());
        }
    }

    scopes
}

/// First matching rule wins: feat, refactor, chore.
fn infer_type(file_changes: &[StructuredFileChange], summary: &ModelChangeSummary) -> String {
    let has_added_entity = !summary.domain_model.added_entities.is_empty();
    let has_added_file = file_changes
        .iter()
        .any(|c| c.change_kind == ChangeKind::Added);
    if has_added_entity || has_added_file {
        return "feat".to_string();
    }

    if file_changes
        .iter()
        .any(|c| c.change_kind == ChangeKind::Deleted)
    {
        return "refactor".to_string();
    }

    "chore".to_string()
}

/// Ordered highlight lines, capped at [`MAX_HIGHLIGHTS`].
fn build_highlights(summary: &ModelChangeSummary, metrics: &CommitMetrics) -> Vec<String> {
    let mut highlights = vec![format!(
        "{} file(s) changed ({} added, {} modified, {} deleted, {} renamed).",
        metrics.total_files, metrics.added, metrics.modified, metrics.deleted, metrics.renamed
    )];

    let added = &summary.domain_model.added_entities;
    if !added.is_empty() {
        let shown: Vec<&str> = added.iter().take(4).map(String::as_str).collect();
        let mut line = format!("New entities: {}", shown.join(", "));
        if added.len() > shown.len() {
            line.push_str(&format!(" (+{} more)", added.len() - shown.len()));
        }
        highlights.push(line);
    }

    let attribute_changes = &summary.domain_model.attribute_changes;
    if !attribute_changes.is_empty() {
        let parts: Vec<String> = attribute_changes
            .iter()
            .take(3)
            .map(|change| {
                let attrs: Vec<&str> = change
                    .added_attributes
                    .iter()
                    .take(3)
                    .map(String::as_str)
                    .collect();
                format!("{} ({})", change.entity_name, attrs.join(", "))
            })
            .collect();
        highlights.push(format!("Attributes added: {}", parts.join(", ")));
    }

    if !summary.microflow_actions.is_empty() {
        let parts: Vec<String> = summary
            .microflow_actions
            .iter()
            .take(5)
            .map(|action| format!("{} x{}", action.action_type, action.count))
            .collect();
        highlights.push(format!("Microflow actions: {}", parts.join(", ")));
    }

    if !summary.by_element_type.is_empty() {
        let parts: Vec<String> = summary
            .by_element_type
            .iter()
            .take(4)
            .map(|entry| format!("{} x{}", entry.key, entry.count))
            .collect();
        highlights.push(format!("Element changes: {}", parts.join(", ")));
    }

    highlights.truncate(MAX_HIGHLIGHTS);
    highlights
}

/// Risk notes; each condition is independent.
fn build_risks(file_changes: &[StructuredFileChange], summary: &ModelChangeSummary) -> Vec<String> {
    let mut risks = Vec::new();

    if file_changes.iter().any(|c| c.is_binary_diff) {
        risks.push(
            "Binary diffs present; line-level review is not possible for those files.".to_string(),
        );
    }

    let model_file_without_changes = file_changes.iter().any(|c| {
        c.file_path.to_lowercase().ends_with(".mpr") && c.model_change_count == 0
    });
    if model_file_without_changes {
        risks.push(
            "A model file changed but no model-level changes were parsed; model analysis is unavailable.".to_string(),
        );
    }

    for entry in &summary.by_element_type {
        let key = entry.key.to_lowercase();
        if (key == "pagetemplate" || key == "buildingblock") && entry.count >= CHURN_THRESHOLD {
            risks.push(format!(
                "{} {} changes; likely template churn rather than functional edits.",
                entry.count, entry.key
            ));
        }
    }

    if !summary.domain_model.attribute_changes.is_empty() {
        risks.push(
            "Entity attributes changed; verify data migration and backwards compatibility."
                .to_string(),
        );
    }

    risks
}

/// First matching subject rule wins.
fn derive_subject(
    summary: &ModelChangeSummary,
    metrics: &CommitMetrics,
    scopes: &[String],
    suggested_type: &str,
) -> String {
    let added = summary.domain_model.added_entities.len();
    if added > 0 {
        let noun = if added == 1 {
            "domain entity"
        } else {
            "domain entities"
        };
        return format!("add {} {} and update related flows", added, noun);
    }

    if let Some(top) = summary.microflow_actions.first() {
        return format!("update microflow logic around {}", top.action_type);
    }

    if metrics.total_files == 1 {
        let scope = scopes.first().map(String::as_str).unwrap_or("model");
        return format!("update {} change set", scope);
    }

    if suggested_type == "feat" {
        "introduce model changes".to_string()
    } else {
        "refine model change set".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::files::normalize_file_change;
    use crate::analysis::summary::summarize_model_changes;
    use crate::model::RawFileChange;

    fn file(path: &str, status: &str) -> StructuredFileChange {
        normalize_file_change(&RawFileChange {
            file_path: path.to_string(),
            status: status.to_string(),
            ..Default::default()
        })
    }

    fn model_change(element_type: &str, name: &str, kind: ChangeKind) -> StructuredModelChange {
        StructuredModelChange {
            file_path: "App.mpr".to_string(),
            change_type: kind,
            element_type: element_type.to_string(),
            element_name: name.to_string(),
            details: None,
        }
    }

    fn metrics(total: usize, added: usize) -> CommitMetrics {
        CommitMetrics {
            total_files: total,
            added,
            modified: total - added,
            deleted: 0,
            renamed: 0,
        }
    }

    #[test]
    fn test_scopes_from_element_prefix_and_path() {
        let files = vec![file("Orders/Microflows/ACT_Save.mf", "modified")];
        let model_changes = vec![model_change("Entity", "Billing.Invoice", ChangeKind::Modified)];
        let summary = summarize_model_changes(&model_changes);
        let ctx = build_message_context(&files, &model_changes, &summary, &metrics(1, 0), "");
        assert_eq!(ctx.suggested_scopes, vec!["Billing", "Orders"]);
    }

    #[test]
    fn test_bare_project_file_contributes_no_scope() {
        let files = vec![file("App.mpr", "modified")];
        let summary = ModelChangeSummary::default();
        let ctx = build_message_context(&files, &[], &summary, &metrics(1, 0), "Order Portal");
        // Falls back to the first project-name token
        assert_eq!(ctx.suggested_scopes, vec!["Order"]);
    }

    #[test]
    fn test_scopes_capped_and_sorted() {
        let files: Vec<StructuredFileChange> = ["Zeta/a", "alpha/b", "Beta/c", "gamma/d", "Delta/e", "Eta/f"]
            .iter()
            .map(|p| file(p, "modified"))
            .collect();
        let summary = ModelChangeSummary::default();
        let ctx = build_message_context(&files, &[], &summary, &metrics(6, 0), "");
        assert_eq!(ctx.suggested_scopes.len(), 5);
        assert_eq!(ctx.suggested_scopes[0], "alpha");
    }

    #[test]
    fn test_type_feat_on_added_file() {
        let files = vec![file("Domain/Customer.mpr", "added")];
        let summary = ModelChangeSummary::default();
        let ctx = build_message_context(&files, &[], &summary, &metrics(1, 1), "");
        assert_eq!(ctx.suggested_type, "feat");
    }

    #[test]
    fn test_type_refactor_on_deleted_file() {
        let files = vec![file("Pages/Old.page.xml", "deleted")];
        let summary = ModelChangeSummary::default();
        let ctx = build_message_context(&files, &[], &summary, &metrics(1, 0), "");
        assert_eq!(ctx.suggested_type, "refactor");
    }

    #[test]
    fn test_type_chore_default() {
        let files = vec![file("Settings.mprops", "modified")];
        let summary = ModelChangeSummary::default();
        let ctx = build_message_context(&files, &[], &summary, &metrics(1, 0), "");
        assert_eq!(ctx.suggested_type, "chore");
    }

    #[test]
    fn test_metrics_highlight_always_first() {
        let summary = ModelChangeSummary::default();
        let ctx = build_message_context(&[], &[], &summary, &metrics(3, 1), "");
        assert!(ctx.highlights[0].contains("3 file(s) changed"));
        assert!(ctx.highlights[0].contains("1 added"));
    }

    #[test]
    fn test_added_entity_highlight_truncation() {
        let model_changes: Vec<StructuredModelChange> = (0..6)
            .map(|i| model_change("Entity", &format!("Entity{}", i), ChangeKind::Added))
            .collect();
        let summary = summarize_model_changes(&model_changes);
        let ctx = build_message_context(&[], &model_changes, &summary, &metrics(1, 0), "");
        let entity_line = ctx
            .highlights
            .iter()
            .find(|h| h.starts_with("New entities"))
            .unwrap();
        assert!(entity_line.contains("(+2 more)"));
    }

    #[test]
    fn test_risk_binary_diff() {
        let changed = normalize_file_change(&RawFileChange {
            file_path: "App.mpr".to_string(),
            status: "modified".to_string(),
            diff_text: "Binary file changed - diff not available".to_string(),
            ..Default::default()
        });
        let summary = ModelChangeSummary::default();
        let ctx = build_message_context(&[changed], &[], &summary, &metrics(1, 0), "");
        assert!(ctx.risks.iter().any(|r| r.contains("Binary diffs")));
        // .mpr with zero parsed model changes also flagged
        assert!(ctx.risks.iter().any(|r| r.contains("model analysis is unavailable")));
    }

    #[test]
    fn test_risk_template_churn() {
        let model_changes: Vec<StructuredModelChange> = (0..25)
            .map(|i| model_change("PageTemplate", &format!("T{}", i), ChangeKind::Modified))
            .collect();
        let summary = summarize_model_changes(&model_changes);
        let ctx = build_message_context(&[], &model_changes, &summary, &metrics(1, 0), "");
        assert!(ctx.risks.iter().any(|r| r.contains("template churn")));
    }

    #[test]
    fn test_subject_added_entities_singular() {
        let model_changes = vec![model_change("Entity", "Customer", ChangeKind::Added)];
        let summary = summarize_model_changes(&model_changes);
        let ctx = build_message_context(&[], &model_changes, &summary, &metrics(1, 0), "");
        assert_eq!(
            ctx.suggested_subject,
            "add 1 domain entity and update related flows"
        );
    }

    #[test]
    fn test_subject_top_microflow_action() {
        let model_changes = vec![StructuredModelChange {
            file_path: "App.mpr".to_string(),
            change_type: ChangeKind::Modified,
            element_type: "Microflow".to_string(),
            element_name: "ACT_Save".to_string(),
            details: Some("actions used (1): CreateObject x2".to_string()),
        }];
        let summary = summarize_model_changes(&model_changes);
        let ctx = build_message_context(&[], &model_changes, &summary, &metrics(2, 0), "");
        assert_eq!(ctx.suggested_subject, "update microflow logic around CreateObject");
    }

    #[test]
    fn test_subject_single_file_uses_scope() {
        let files = vec![file("Orders/Domain.mpr", "modified")];
        let summary = ModelChangeSummary::default();
        let ctx = build_message_context(&files, &[], &summary, &metrics(1, 0), "");
        assert_eq!(ctx.suggested_subject, "update Orders change set");
    }

    #[test]
    fn test_subject_fallbacks() {
        let summary = ModelChangeSummary::default();
        let chore_ctx = build_message_context(&[], &[], &summary, &metrics(2, 0), "");
        assert_eq!(chore_ctx.suggested_subject, "refine model change set");

        let files = vec![file("Pages/New.page.xml", "added"), file("Other.txt", "added")];
        let feat_ctx = build_message_context(&files, &[], &summary, &metrics(2, 2), "");
        assert_eq!(feat_ctx.suggested_subject, "introduce model changes");
    }
}
