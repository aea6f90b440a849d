//! Markdown listing entries.

use super::EntryRenderer;
use crate::fields::CaseFields;

/// Renders cases as Markdown bullet blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl EntryRenderer for MarkdownRenderer {
    fn render(&self, fields: &CaseFields) -> String {
        format!(
            "- **{}**\n  \
             - Author: {}\n  \
             - Court: {}\n  \
             - Date: {}\n  \
             - Publisher: {}\n  \
             - Pages: {}\n  \
             - URL: <{}>\n",
            fields.title,
            fields.author,
            fields.court,
            fields.date,
            fields.subjects,
            fields.case_number,
            fields.url
        )
    }

    fn separator(&self) -> &'static str {
        "\n\n"
    }
}
