//! Regex patterns used when normalizing case identifiers.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Anything that is not a (Unicode) word character
    pub static ref NON_WORD: Regex = Regex::new(r"\W+").unwrap();

    // Typst markup characters that must be escaped in body text
    pub static ref TYPST_SPECIAL: Regex = Regex::new(r"[\\#$*_`@<>\[\]~]").unwrap();

    // Line-leading markers Typst would read as headings or list items
    pub static ref TYPST_LINE_MARKER: Regex = Regex::new(r"(?m)^(\s*)([=+\-/])").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_word() {
        assert_eq!(NON_WORD.replace_all("BS-123/2023", ""), "BS1232023");
        assert_eq!(NON_WORD.replace_all("a_b c", ""), "a_bc");
        assert_eq!(NON_WORD.replace_all("Ærø 1", ""), "Ærø1");
    }

    #[test]
    fn test_typst_special() {
        assert!(TYPST_SPECIAL.is_match("#let"));
        assert!(!TYPST_SPECIAL.is_match("plain text."));
    }
}
