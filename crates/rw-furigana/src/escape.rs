//! Escape guard and the final unescape pass.

use std::borrow::Cow;

use crate::chars::ESCAPE;

/// Whether a match at `start` in `text` must be left verbatim.
///
/// A match is suppressed when it contains the escape character or is
/// immediately preceded by one.
pub(crate) fn is_escaped(text: &str, start: usize, matched: &str) -> bool {
    matched.contains(ESCAPE) || text[..start].ends_with(ESCAPE)
}

/// Remove an escape character placed directly before either bracket glyph.
///
/// Applies anywhere in the text, so `\【note\】` renders as `【note】`.
pub fn unescape_brackets(text: &str, open: char, close: char) -> Cow<'_, str> {
    if !text.contains(ESCAPE) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ESCAPE && chars.peek().is_some_and(|&next| next == open || next == close) {
            continue;
        }
        out.push(c);
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unescape_fallback_brackets() {
        assert_eq!(unescape_brackets(r"\【note\】", '【', '】'), "【note】");
    }

    #[test]
    fn test_unescape_leaves_other_escapes() {
        assert_eq!(unescape_brackets(r"a\b \[x]", '【', '】'), r"a\b \[x]");
    }

    #[test]
    fn test_unescape_custom_brackets() {
        assert_eq!(unescape_brackets(r"\《x\》\【", '《', '》'), r"《x》\【");
    }

    #[test]
    fn test_unescape_borrows_without_escape() {
        assert!(matches!(unescape_brackets("plain", '【', '】'), Cow::Borrowed(_)));
    }

    #[test]
    fn test_double_escape_keeps_one() {
        assert_eq!(unescape_brackets(r"\\【", '【', '】'), r"\【");
    }

    #[test]
    fn test_is_escaped() {
        let text = r"a\[字]^(じ)";
        assert!(is_escaped(text, 2, "[字]^(じ)"));
        assert!(!is_escaped("a[字]^(じ)", 1, "[字]^(じ)"));
        assert!(is_escaped("x", 0, r"\字"));
        assert!(!is_escaped("字", 0, "字"));
    }
}
