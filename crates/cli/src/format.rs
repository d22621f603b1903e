//! Result → human/json string formatting.

use coursepack_engine::ExportInfo;
use serde_json::json;

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Format the summary of an export.
pub fn format_export_info(info: &ExportInfo, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => json!({
            "path": info.path.display().to_string(),
            "course": info.course_key.to_string(),
            "published_nodes": info.published_nodes,
            "extra_items": info.extra_items,
            "draft_nodes": info.draft_nodes,
            "draft_roots": info.draft_roots,
            "orphans_skipped": info.orphans_skipped,
        })
        .to_string(),
        OutputMode::Human => {
            let mut out = format!(
                "Exported {} to {}\n  published nodes: {}\n  extra items: {}\n  draft subtrees: {} ({} draft nodes)",
                info.course_key,
                info.path.display(),
                info.published_nodes,
                info.extra_items,
                info.draft_roots,
                info.draft_nodes,
            );
            if info.orphans_skipped > 0 {
                out.push_str(&format!("\n  orphaned drafts skipped: {}", info.orphans_skipped));
            }
            out
        }
    }
}

/// Format a layout version (`None` when the marker has no version key).
pub fn format_version(version: Option<i64>, mode: OutputMode) -> String {
    match (mode, version) {
        (OutputMode::Json, v) => json!({ "version": v }).to_string(),
        (OutputMode::Human, Some(v)) => v.to_string(),
        (OutputMode::Human, None) => "(unknown)".to_string(),
    }
}

/// Format an error.
pub fn format_error(message: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => json!({ "error": message }).to_string(),
        OutputMode::Human => format!("Error: {}", message),
    }
}
