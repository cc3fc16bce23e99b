//! Separator-driven splitting for auto-detected glosses.
//!
//! `東京都【とう.きょう.と】` distributes one reading per base character.
//! Trailing kana written after the base (`食べる【たべる】`) are stripped
//! from the end of the gloss and passed through after the annotations.

use crate::chars::is_separator;
use crate::ruby::Segment;

/// Split an auto-detected `base` + `suffix` + `gloss` into segments.
///
/// The returned segments reproduce `base` followed by `suffix` when their
/// base text is concatenated.
pub fn split<'a>(base: &'a str, suffix: &'a str, gloss: &'a str) -> Vec<Segment<'a>> {
    let reading = strip_suffix_reading(gloss, suffix);
    let mut segments = distribute(base, reading);
    if !suffix.is_empty() {
        segments.push(Segment::Literal(suffix));
    }
    segments
}

/// Remove the tail of `gloss` that repeats `suffix`.
///
/// Characters are compared from the end until the suffix is exhausted or a
/// character differs. A gloss made entirely of the suffix is kept whole.
pub fn strip_suffix_reading<'a>(gloss: &'a str, suffix: &str) -> &'a str {
    let mut suffix_chars = suffix.chars().rev();
    for (idx, c) in gloss.char_indices().rev() {
        match suffix_chars.next() {
            Some(s) if s == c => {}
            _ => return &gloss[..idx + c.len_utf8()],
        }
    }
    gloss
}

/// Distribute separator-delimited readings over the characters of `base`.
///
/// Every character except the last takes one reading; the last reading goes
/// to all remaining characters. Without separators, or with more readings
/// than characters, the whole base takes the whole reading.
pub fn distribute<'a>(base: &'a str, reading: &'a str) -> Vec<Segment<'a>> {
    let whole = || {
        vec![Segment::Ruby {
            base,
            gloss: reading,
        }]
    };

    if !reading.contains(is_separator) {
        return whole();
    }

    let parts: Vec<&str> = reading.split(is_separator).collect();
    let char_count = base.chars().count();
    if parts.is_empty() || parts.len() > char_count {
        tracing::trace!(base, reading, "More readings than characters");
        return whole();
    }

    let mut segments = Vec::with_capacity(parts.len());
    let mut offsets = base.char_indices();
    let (last, leading) = match parts.split_last() {
        Some(split) => split,
        None => return whole(),
    };

    let mut tail_start = 0;
    for &part in leading {
        let Some((start, c)) = offsets.next() else {
            break;
        };
        let end = start + c.len_utf8();
        segments.push(Segment::Ruby {
            base: &base[start..end],
            gloss: part,
        });
        tail_start = end;
    }

    segments.push(Segment::Ruby {
        base: &base[tail_start..],
        gloss: last,
    });
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn ruby<'a>(base: &'a str, gloss: &'a str) -> Segment<'a> {
        Segment::Ruby { base, gloss }
    }

    #[test]
    fn test_no_separator_is_whole() {
        assert_eq!(split("明日", "", "あす"), vec![ruby("明日", "あす")]);
    }

    #[test]
    fn test_one_reading_per_character() {
        assert_eq!(
            split("東京都", "", "とう.きょう.と"),
            vec![ruby("東", "とう"), ruby("京", "きょう"), ruby("都", "と")]
        );
    }

    #[test]
    fn test_full_width_separators() {
        assert_eq!(
            split("東京", "", "とう・きょう"),
            vec![ruby("東", "とう"), ruby("京", "きょう")]
        );
        assert_eq!(
            split("東京", "", "とう．きょう"),
            vec![ruby("東", "とう"), ruby("京", "きょう")]
        );
    }

    #[test]
    fn test_last_reading_absorbs_remaining_characters() {
        assert_eq!(
            split("東京都", "", "とう.きょうと"),
            vec![ruby("東", "とう"), ruby("京都", "きょうと")]
        );
    }

    #[test]
    fn test_too_many_readings_is_whole() {
        assert_eq!(split("東", "", "と.う"), vec![ruby("東", "と.う")]);
    }

    #[test]
    fn test_suffix_is_stripped_and_kept() {
        assert_eq!(
            split("食", "べる", "たべる"),
            vec![ruby("食", "た"), Segment::Literal("べる")]
        );
    }

    #[test]
    fn test_suffix_mismatch_keeps_gloss() {
        assert_eq!(
            split("食", "べる", "しょく"),
            vec![ruby("食", "しょく"), Segment::Literal("べる")]
        );
    }

    #[test]
    fn test_strip_suffix_reading() {
        assert_eq!(strip_suffix_reading("たべる", "べる"), "た");
        assert_eq!(strip_suffix_reading("たべる", "る"), "たべ");
        assert_eq!(strip_suffix_reading("たべる", ""), "たべる");
        assert_eq!(strip_suffix_reading("たべ", "る"), "たべ");
        assert_eq!(strip_suffix_reading("べる", "べる"), "べる");
    }

    #[test]
    fn test_separators_with_suffix() {
        assert_eq!(
            split("話合", "い", "はな.あい"),
            vec![ruby("話", "はな"), ruby("合", "あ"), Segment::Literal("い")]
        );
    }

    proptest! {
        #[test]
        fn prop_bases_reproduce_base_and_suffix(
            base in "[一-龯]{1,6}",
            suffix in "[あ-ん]{0,3}",
            gloss in "[あ-ん.・]{1,12}",
        ) {
            let segments = split(&base, &suffix, &gloss);
            let bases: String = segments.iter().map(Segment::base).collect();
            prop_assert_eq!(bases, format!("{base}{suffix}"));
        }
    }
}
