//! Auto-detection of glosses already written in bracket notation.
//!
//! Prose such as `明日【あす】` or `食べる【たべる】` is converted without
//! the explicit two-part form. Each configured bracket pair compiles to one
//! matcher:
//!
//! ```text
//! (boundary)(logographic+)(kana*)open(gloss)close
//! ```
//!
//! The boundary is start of text or one non-logographic character and is
//! passed through unchanged.

use std::borrow::Cow;

use regex::{Captures, Regex};

use crate::chars::{annotation_class, logographic_class, separator_class};
use crate::escape::is_escaped;
use crate::form::escape_char;
use crate::options::bracket_pair;
use crate::ruby::RubyTemplate;
use crate::split::split;

/// Pair used when a configured pair is not exactly two characters.
pub const DEFAULT_AUTO_PAIR: (char, char) = ('【', '】');

/// A compiled auto-detection matcher for one bracket pair.
#[derive(Clone, Debug)]
pub struct AutoMatcher {
    open: char,
    close: char,
    regex: Regex,
}

/// Regex source for auto-detecting `open`/`close` glosses.
///
/// Groups: 1 boundary, 2 logographic base, 3 trailing kana, 4 gloss.
pub fn auto_pattern(open: char, close: char) -> String {
    let logographic = logographic_class();
    let annotation = annotation_class();
    let separators = separator_class();
    let (open, close) = (escape_char(open), escape_char(close));
    format!(
        "(^|[^{logographic}]|)([{logographic}]+)([{annotation}]*)\
         {open}((?:[^{open}{close}\\x00-\\x7F]|[0-9A-Za-z_]|[{separators}])+){close}"
    )
}

impl AutoMatcher {
    /// Compile a matcher for one bracket pair.
    pub fn new(open: char, close: char) -> Result<Self, regex::Error> {
        let regex = Regex::new(&auto_pattern(open, close))?;
        Ok(Self { open, close, regex })
    }

    /// The bracket pair this matcher detects.
    pub fn brackets(&self) -> (char, char) {
        (self.open, self.close)
    }

    /// Replace every unescaped auto-detected gloss in `text`.
    pub fn apply<'t>(
        &self,
        text: &'t str,
        pattern_matching: bool,
        template: &RubyTemplate,
    ) -> Cow<'t, str> {
        self.regex.replace_all(text, |caps: &Captures<'_>| {
            let whole = &caps[0];
            let start = caps.get(0).map_or(0, |m| m.start());
            if is_escaped(text, start, whole) {
                return whole.to_owned();
            }

            let boundary = &caps[1];
            let base = &caps[2];
            let suffix = &caps[3];
            let gloss = &caps[4];

            let mut out = String::with_capacity(whole.len() * 4);
            out.push_str(boundary);
            if pattern_matching {
                template.push_segments(&mut out, &split(base, suffix, gloss));
            } else {
                template.push_ruby(&mut out, base, gloss);
                out.push_str(suffix);
            }
            out
        })
    }
}

/// Compile a `|`-separated list of bracket pairs, in declaration order.
///
/// Pairs that are not exactly two characters fall back to `【】`.
pub fn compile_auto(sets: &str) -> Vec<AutoMatcher> {
    sets.split('|')
        .map(|pair| {
            bracket_pair(pair).unwrap_or_else(|| {
                tracing::debug!(pair, "Malformed auto bracket pair");
                DEFAULT_AUTO_PAIR
            })
        })
        .filter_map(|(open, close)| match AutoMatcher::new(open, close) {
            Ok(matcher) => Some(matcher),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to compile auto bracket pair");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn apply_all(sets: &str, text: &str, pattern_matching: bool) -> String {
        let template = RubyTemplate::default();
        let mut text = text.to_owned();
        for matcher in compile_auto(sets) {
            text = matcher
                .apply(&text, pattern_matching, &template)
                .into_owned();
        }
        text
    }

    #[test]
    fn test_compile_default_pairs() {
        let matchers = compile_auto("【】|{}");
        assert_eq!(matchers.len(), 2);
        assert_eq!(matchers[0].brackets(), ('【', '】'));
        assert_eq!(matchers[1].brackets(), ('{', '}'));
    }

    #[test]
    fn test_malformed_pair_falls_back() {
        let matchers = compile_auto("《|{}}");
        assert_eq!(matchers.len(), 2);
        assert_eq!(matchers[0].brackets(), DEFAULT_AUTO_PAIR);
        assert_eq!(matchers[1].brackets(), DEFAULT_AUTO_PAIR);
    }

    #[test]
    fn test_detects_whole_word() {
        assert_eq!(
            apply_all("【】", "明日【あす】", true),
            "<ruby>明日<rp>【</rp><rt>あす</rt><rp>】</rp></ruby>"
        );
    }

    #[test]
    fn test_boundary_is_preserved() {
        assert_eq!(
            apply_all("【】", "今日は明日【あす】だ", true),
            "今日は<ruby>明日<rp>【</rp><rt>あす</rt><rp>】</rp></ruby>だ"
        );
    }

    #[test]
    fn test_separator_distribution() {
        assert_eq!(
            apply_all("【】", "東京都【とう.きょう.と】", true),
            "<ruby>東<rp>【</rp><rt>とう</rt><rp>】</rp></ruby>\
             <ruby>京<rp>【</rp><rt>きょう</rt><rp>】</rp></ruby>\
             <ruby>都<rp>【</rp><rt>と</rt><rp>】</rp></ruby>"
        );
    }

    #[test]
    fn test_trailing_kana_stripped_from_gloss() {
        assert_eq!(
            apply_all("【】", "食べる【たべる】", true),
            "<ruby>食<rp>【</rp><rt>た</rt><rp>】</rp></ruby>べる"
        );
    }

    #[test]
    fn test_atomic_keeps_trailing_kana_after_ruby() {
        assert_eq!(
            apply_all("【】", "食べる【たべる】", false),
            "<ruby>食<rp>【</rp><rt>たべる</rt><rp>】</rp></ruby>べる"
        );
    }

    #[test]
    fn test_ascii_brackets() {
        assert_eq!(
            apply_all("{}", "漢字{かんじ}", true),
            "<ruby>漢字<rp>【</rp><rt>かんじ</rt><rp>】</rp></ruby>"
        );
    }

    #[test]
    fn test_gloss_with_spaces_is_ignored() {
        assert_eq!(apply_all("【】", "明日【a b】", true), "明日【a b】");
    }

    #[test]
    fn test_escaped_boundary_suppresses() {
        assert_eq!(apply_all("【】", r"\明日【あす】", true), r"\明日【あす】");
    }

    #[test]
    fn test_no_logographic_base() {
        assert_eq!(apply_all("【】", "あした【あす】", true), "あした【あす】");
    }
}
