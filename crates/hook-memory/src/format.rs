//! Markdown rendering of assembled memories.

use crate::schema::AssembleResult;

pub const CONTEXT_START: &str = "<!-- MEMORY_FABRIC_CONTEXT -->";
pub const CONTEXT_END: &str = "<!-- END_MEMORY_FABRIC_CONTEXT -->";

pub const MAX_MEMORIES: usize = 5;
pub const MAX_MEMORY_CHARS: usize = 200;
pub const MAX_SUMMARIES: usize = 3;
pub const MAX_SUMMARY_CHARS: usize = 150;

const DEFAULT_MEMORY_TYPE: &str = "general";

/// Render the context pack. `None` renders the bare sentinels.
pub fn format_context(result: Option<&AssembleResult>) -> String {
    let mut md = format!("{}\n\n", CONTEXT_START);

    if let Some(result) = result {
        if !result.memories.is_empty() {
            md.push_str("## Relevant Memories\n\n");
            for mem in result.memories.iter().take(MAX_MEMORIES) {
                let content = truncate(mem.content.as_deref().unwrap_or(""), MAX_MEMORY_CHARS);
                let mtype = mem.memory_type.as_deref().unwrap_or(DEFAULT_MEMORY_TYPE);
                md.push_str(&format!("- [{}] {}\n", mtype, content));
            }
            md.push('\n');
        }

        if !result.summaries.is_empty() {
            md.push_str("## Summaries\n\n");
            for summary in result.summaries.iter().take(MAX_SUMMARIES) {
                let content = truncate(summary.content.as_deref().unwrap_or(""), MAX_SUMMARY_CHARS);
                md.push_str(&format!("- {}\n", content));
            }
            md.push('\n');
        }
    }

    md.push_str(CONTEXT_END);
    md
}

/// First `max` characters of `s`, never splitting a code point.
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{MemoryItem, SummaryItem};

    fn memory(content: &str, mtype: Option<&str>) -> MemoryItem {
        MemoryItem {
            content: Some(content.to_string()),
            memory_type: mtype.map(str::to_string),
        }
    }

    fn summary(content: &str) -> SummaryItem {
        SummaryItem {
            content: Some(content.to_string()),
        }
    }

    #[test]
    fn test_layout() {
        let result = AssembleResult {
            memories: vec![
                memory("Prefer thiserror in libraries", Some("decision")),
                memory("CI runs on nightly", None),
            ],
            summaries: vec![summary("Refactored the parser")],
        };

        insta::assert_snapshot!(format_context(Some(&result)), @r"
        <!-- MEMORY_FABRIC_CONTEXT -->

        ## Relevant Memories

        - [decision] Prefer thiserror in libraries
        - [general] CI runs on nightly

        ## Summaries

        - Refactored the parser

        <!-- END_MEMORY_FABRIC_CONTEXT -->
        ");
    }

    #[test]
    fn test_empty_and_absent_render_only_sentinels() {
        let expected = format!("{}\n\n{}", CONTEXT_START, CONTEXT_END);
        assert_eq!(format_context(None), expected);
        assert_eq!(format_context(Some(&AssembleResult::default())), expected);
    }

    #[test]
    fn test_entry_limits() {
        let result = AssembleResult {
            memories: (0..9).map(|i| memory(&format!("m{i}"), None)).collect(),
            summaries: (0..7).map(|i| summary(&format!("s{i}"))).collect(),
        };
        let md = format_context(Some(&result));

        let memory_bullets = md.lines().filter(|l| l.starts_with("- [")).count();
        let summary_bullets = md.lines().filter(|l| l.starts_with("- s")).count();
        assert_eq!(memory_bullets, MAX_MEMORIES);
        assert_eq!(summary_bullets, MAX_SUMMARIES);
        assert!(md.contains("- [general] m4\n"));
        assert!(!md.contains("m5"));
        assert!(!md.contains("s3"));
        assert!(md.starts_with(CONTEXT_START));
        assert!(md.ends_with(CONTEXT_END));
    }

    #[test]
    fn test_truncation_lengths() {
        let result = AssembleResult {
            memories: vec![memory(&"a".repeat(500), Some("note"))],
            summaries: vec![summary(&"b".repeat(500))],
        };
        let md = format_context(Some(&result));

        let mem_line = md.lines().find(|l| l.starts_with("- [note] ")).unwrap();
        assert_eq!(mem_line.len(), "- [note] ".len() + MAX_MEMORY_CHARS);

        let sum_line = md.lines().find(|l| l.starts_with("- b")).unwrap();
        assert_eq!(sum_line.len(), "- ".len() + MAX_SUMMARY_CHARS);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let text = "日本語".repeat(100);
        assert_eq!(truncate(&text, MAX_MEMORY_CHARS).chars().count(), MAX_MEMORY_CHARS);
        assert_eq!(truncate("short", 200), "short");
    }

    #[test]
    fn test_missing_content_renders_empty() {
        let result = AssembleResult {
            memories: vec![MemoryItem::default()],
            summaries: vec![SummaryItem::default()],
        };
        let md = format_context(Some(&result));
        assert!(md.contains("- [general] \n"));
        assert!(md.contains("## Summaries\n\n- \n"));
    }

    #[test]
    fn test_sentinels_survive_marker_like_content() {
        let result = AssembleResult {
            memories: vec![memory(CONTEXT_END, None)],
            summaries: vec![],
        };
        let md = format_context(Some(&result));
        assert_eq!(md.lines().next(), Some(CONTEXT_START));
        assert_eq!(md.lines().last(), Some(CONTEXT_END));
    }
}
