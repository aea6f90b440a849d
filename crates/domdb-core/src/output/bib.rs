//! BibTeX entries.

use super::EntryRenderer;
use crate::fields::CaseFields;

/// Renders cases as `@article` BibTeX entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct BibRenderer;

impl EntryRenderer for BibRenderer {
    fn render(&self, fields: &CaseFields) -> String {
        // Fields in alphabetical order, one-space indent
        let pairs = [
            ("author", fields.author.as_str()),
            ("court", fields.court.as_str()),
            ("date", fields.date.as_str()),
            ("pages", fields.case_number.as_str()),
            ("publisher", fields.subjects.as_str()),
            ("title", fields.title.as_str()),
            ("url", fields.url.as_str()),
        ];

        let body = pairs
            .iter()
            .map(|(key, value)| format!(" {} = {{{}}}", key, escape_braces(value)))
            .collect::<Vec<_>>()
            .join(",\n");

        format!("@article{{{},\n{}\n}}\n", fields.entry_id, body)
    }

    fn separator(&self) -> &'static str {
        "\n"
    }
}

/// Balance-safe value: unmatched braces would end the field early.
fn escape_braces(value: &str) -> String {
    let mut depth = 0i32;
    let balanced = value.chars().all(|c| {
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
        depth >= 0
    }) && depth == 0;

    if balanced {
        value.to_string()
    } else {
        value.replace('{', "\\{").replace('}', "\\}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CaseRecord, DocumentRecord, Label};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_entry() {
        let case = CaseRecord {
            headline: Some("Test Case".to_string()),
            author: Some("Test Author".to_string()),
            court_case_number: Some("123/2023".to_string()),
            instance: Some(Label::new("Byret")),
            case_subjects: vec![Label::new("Subject1"), Label::new("Subject2")],
            documents: vec![DocumentRecord {
                verdict_date_time: Some("2023-01-01T12:00:00".to_string()),
                ..Default::default()
            }],
            ..CaseRecord::new("test123")
        };

        let entry = BibRenderer.entry(&case);
        assert_eq!(entry.entry_id, "1232023");
        assert_eq!(entry.date, "2023-01-01");
        assert_eq!(
            entry.body,
            "@article{1232023,\n \
             author = {Test Author},\n \
             court = {Unknown, Byret, Unknown},\n \
             date = {2023-01-01},\n \
             pages = {123/2023},\n \
             publisher = {Subject1, Subject2},\n \
             title = {Test Case},\n \
             url = {https://domsdatabasen.dk/#sag/test123}\n}\n"
        );
    }

    #[test]
    fn test_fallbacks() {
        let entry = BibRenderer.entry(&CaseRecord::new("x"));
        assert!(entry.body.starts_with("@article{unknown,\n"));
        assert!(entry.body.contains(" author = {Domstol}"));
        assert!(entry.body.contains(" title = {No Title}"));
        assert!(entry.body.contains(" date = {Unknown}"));
        assert!(entry.body.contains(" publisher = {Unknown}"));
    }

    #[test]
    fn test_escape_braces() {
        assert_eq!(escape_braces("a {b} c"), "a {b} c");
        assert_eq!(escape_braces("a } b"), "a \\} b");
        assert_eq!(escape_braces("{open"), "\\{open");
    }

    #[test]
    fn test_document_separates_entries() {
        let a = BibRenderer.entry(&CaseRecord::new("a"));
        let doc = BibRenderer.document(&[a.clone(), a]);
        assert_eq!(doc.matches("@article{").count(), 2);
        assert!(doc.contains("}\n\n@article{"));
    }
}
