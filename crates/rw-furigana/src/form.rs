//! Explicit bracket forms such as `[記憶]^(きおく)`.
//!
//! A form is written `main:separator:gloss`, where `main` and `gloss` are two
//! glyphs each (open, close). Several forms are joined with `|`:
//!
//! ```text
//! []:^:()|[]::{}
//! ```
//!
//! matches both `[記憶]^(きおく)` and `[記憶]{きおく}`.

use std::borrow::Cow;

use regex::{Captures, Regex};

use crate::align::align;
use crate::chars::INNER_PATTERN;
use crate::escape::is_escaped;
use crate::options::bracket_pair;
use crate::ruby::RubyTemplate;

/// Form used when a form string does not parse.
pub const DEFAULT_FORM: &str = "[]:^:()";

/// A parsed explicit form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BracketForm {
    main: (char, char),
    separator: String,
    gloss: (char, char),
}

impl Default for BracketForm {
    fn default() -> Self {
        Self {
            main: ('[', ']'),
            separator: "^".to_owned(),
            gloss: ('(', ')'),
        }
    }
}

impl BracketForm {
    /// Parse `main:separator:gloss`, or `None` if malformed.
    ///
    /// The separator may be empty; both bracket parts must be exactly two
    /// characters.
    pub fn try_parse(form: &str) -> Option<Self> {
        let mut parts = form.split(':');
        let (Some(main), Some(separator), Some(gloss), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return None;
        };

        Some(Self {
            main: bracket_pair(main)?,
            separator: separator.to_owned(),
            gloss: bracket_pair(gloss)?,
        })
    }

    /// Parse a form, falling back to [`DEFAULT_FORM`] when malformed.
    pub fn parse(form: &str) -> Self {
        Self::try_parse(form).unwrap_or_else(|| {
            tracing::debug!(form, fallback = DEFAULT_FORM, "Malformed furigana form");
            Self::default()
        })
    }

    /// Regex source locating `open word close separator open gloss close`.
    ///
    /// Group 1 is the word, group 2 the gloss.
    pub fn pattern(&self) -> String {
        format!(
            "{}({INNER_PATTERN}){}{}{}({INNER_PATTERN}){}",
            escape_char(self.main.0),
            escape_char(self.main.1),
            regex::escape(&self.separator),
            escape_char(self.gloss.0),
            escape_char(self.gloss.1),
        )
    }
}

pub(crate) fn escape_char(c: char) -> String {
    regex::escape(c.encode_utf8(&mut [0; 4]))
}

/// A compiled explicit form.
#[derive(Clone, Debug)]
pub struct FormMatcher {
    form: BracketForm,
    regex: Regex,
}

impl FormMatcher {
    /// Compile a parsed form.
    pub fn new(form: BracketForm) -> Result<Self, regex::Error> {
        let regex = Regex::new(&form.pattern())?;
        Ok(Self { form, regex })
    }

    /// The form this matcher was compiled from.
    pub fn form(&self) -> &BracketForm {
        &self.form
    }

    /// Replace every unescaped occurrence in `text` with ruby markup.
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

            let word = &caps[1];
            let gloss = &caps[2];
            let mut out = String::with_capacity(whole.len() * 4);
            if pattern_matching {
                template.push_segments(&mut out, &align(word, gloss));
            } else {
                template.push_ruby(&mut out, word, gloss);
            }
            out
        })
    }
}

/// Compile a `|`-separated list of forms, in declaration order.
///
/// Malformed forms are replaced by [`DEFAULT_FORM`].
pub fn compile_forms(list: &str) -> Vec<FormMatcher> {
    list.split('|')
        .map(BracketForm::parse)
        .filter_map(|form| match FormMatcher::new(form) {
            Ok(matcher) => Some(matcher),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to compile furigana form");
                None
            }
        })
        .collect()
}
