//! Character classes shared by every matcher and alignment step.
//!
//! Each class is exposed twice: as a `char` predicate for the alignment
//! algorithms and as a regex class body for the compiled matchers. Both views
//! are derived from the same range tables.

use std::ops::RangeInclusive;

/// Logographic (kanji) block.
const LOGOGRAPHIC_RANGES: &[RangeInclusive<char>] = &['\u{4e00}'..='\u{9faf}'];

/// Kana plus voicing marks and the prolonged sound mark.
const ANNOTATION_RANGES: &[RangeInclusive<char>] = &[
    '\u{3041}'..='\u{3095}',
    '\u{3099}'..='\u{309c}',
    '\u{3081}'..='\u{30fa}',
    '\u{30fc}'..='\u{30fc}',
];

/// Glyphs that split a gloss into per-character readings.
pub const SEPARATORS: &[char] = &['.', '．', '。', '・'];

/// Escape character that suppresses conversion.
pub const ESCAPE: char = '\\';

/// Returns true for characters in the logographic block.
pub fn is_logographic(c: char) -> bool {
    LOGOGRAPHIC_RANGES.iter().any(|range| range.contains(&c))
}

/// Returns true for kana and kana marks that may trail a logographic base.
pub fn is_annotation(c: char) -> bool {
    ANNOTATION_RANGES.iter().any(|range| range.contains(&c))
}

/// Returns true for gloss separator glyphs.
pub fn is_separator(c: char) -> bool {
    SEPARATORS.contains(&c)
}

/// Returns true for characters allowed inside an explicit-form word or gloss:
/// anything outside ASCII, plus ASCII letters, digits and underscore.
pub fn is_inner(c: char) -> bool {
    !c.is_ascii() || c.is_ascii_alphanumeric() || c == '_'
}

fn class_body(ranges: &[RangeInclusive<char>]) -> String {
    let mut body = String::new();
    for range in ranges {
        let (start, end) = (*range.start(), *range.end());
        if start == end {
            body.push_str(&format!("\\x{{{:x}}}", u32::from(start)));
        } else {
            body.push_str(&format!(
                "\\x{{{:x}}}-\\x{{{:x}}}",
                u32::from(start),
                u32::from(end)
            ));
        }
    }
    body
}

/// Regex class body (without brackets) matching logographic characters.
pub fn logographic_class() -> String {
    class_body(LOGOGRAPHIC_RANGES)
}

/// Regex class body (without brackets) matching annotation characters.
pub fn annotation_class() -> String {
    class_body(ANNOTATION_RANGES)
}

/// Regex class body (without brackets) matching separator glyphs.
pub fn separator_class() -> String {
    SEPARATORS
        .iter()
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect()
}

/// Regex fragment matching one or more inner characters.
pub const INNER_PATTERN: &str = r"(?:[^\x00-\x7F]|[0-9A-Za-z_])+";

/// A maximal slice of a word that is entirely logographic or entirely not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run<'a> {
    /// The slice of the word.
    pub text: &'a str,
    /// Whether every character of `text` is logographic.
    pub logographic: bool,
}

/// Partition `word` into alternating logographic and non-logographic runs.
///
/// Concatenating the returned runs reproduces `word` exactly.
pub fn runs(word: &str) -> Vec<Run<'_>> {
    let mut result = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (idx, c) in word.char_indices() {
        let logographic = is_logographic(c);
        match current {
            Some(kind) if kind != logographic => {
                result.push(Run {
                    text: &word[start..idx],
                    logographic: kind,
                });
                start = idx;
                current = Some(logographic);
            }
            Some(_) => {}
            None => current = Some(logographic),
        }
    }

    if let Some(logographic) = current {
        result.push(Run {
            text: &word[start..],
            logographic,
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use regex::Regex;

    #[test]
    fn test_logographic_bounds() {
        assert!(is_logographic('\u{4e00}'));
        assert!(is_logographic('\u{9faf}'));
        assert!(!is_logographic('\u{9fb0}'));
        assert!(!is_logographic('あ'));
        assert!(!is_logographic('a'));
    }

    #[test]
    fn test_annotation_covers_kana_and_marks() {
        assert!(is_annotation('ぁ'));
        assert!(is_annotation('ゔ'));
        assert!(is_annotation('゛'));
        assert!(is_annotation('カ'));
        assert!(is_annotation('ー'));
        assert!(!is_annotation('漢'));
        assert!(!is_annotation('・'));
    }

    #[test]
    fn test_inner_excludes_ascii_punctuation() {
        assert!(is_inner('x'));
        assert!(is_inner('_'));
        assert!(is_inner('9'));
        assert!(is_inner('字'));
        assert!(!is_inner('['));
        assert!(!is_inner('\\'));
        assert!(!is_inner(' '));
    }

    #[test]
    fn test_class_bodies_agree_with_predicates() {
        let logographic = Regex::new(&format!("^[{}]$", logographic_class())).unwrap();
        let annotation = Regex::new(&format!("^[{}]$", annotation_class())).unwrap();
        let separator = Regex::new(&format!("^[{}]$", separator_class())).unwrap();

        for c in ['漢', '字', 'あ', 'ア', 'ー', '・', '.', 'x', '【'] {
            let s = c.to_string();
            assert_eq!(logographic.is_match(&s), is_logographic(c), "{c}");
            assert_eq!(annotation.is_match(&s), is_annotation(c), "{c}");
            assert_eq!(separator.is_match(&s), is_separator(c), "{c}");
        }
    }

    #[test]
    fn test_runs_alternate() {
        let runs = runs("食べ物を");
        assert_eq!(
            runs,
            vec![
                Run {
                    text: "食",
                    logographic: true
                },
                Run {
                    text: "べ",
                    logographic: false
                },
                Run {
                    text: "物",
                    logographic: true
                },
                Run {
                    text: "を",
                    logographic: false
                },
            ]
        );
    }

    #[test]
    fn test_runs_empty_word() {
        assert!(runs("").is_empty());
    }

    proptest! {
        #[test]
        fn prop_runs_partition_word(word in "[a-zあ-ん一-龯]{0,16}") {
            let runs = runs(&word);
            let joined: String = runs.iter().map(|run| run.text).collect();
            prop_assert_eq!(&joined, &word);
            for pair in runs.windows(2) {
                prop_assert_ne!(pair[0].logographic, pair[1].logographic);
            }
            for run in &runs {
                prop_assert!(!run.text.is_empty());
                prop_assert!(run.text.chars().all(|c| is_logographic(c) == run.logographic));
            }
        }
    }
}
