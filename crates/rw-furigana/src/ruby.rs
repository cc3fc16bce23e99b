//! Ruby markup output.

use crate::options::{DEFAULT_FALLBACK_BRACKETS, bracket_pair};

/// Structural tags emitted by the renderer.
///
/// Hosts that sanitize HTML must let these through.
pub const RUBY_TAGS: [&str; 3] = ["ruby", "rt", "rp"];

/// One piece of a converted match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Base text annotated with a gloss.
    Ruby {
        /// Base text.
        base: &'a str,
        /// Phonetic gloss.
        gloss: &'a str,
    },
    /// Text passed through unannotated.
    Literal(&'a str),
}

impl<'a> Segment<'a> {
    /// The base-text portion: the annotated base or the literal text.
    pub fn base(&self) -> &'a str {
        match self {
            Self::Ruby { base, .. } => base,
            Self::Literal(text) => text,
        }
    }
}

/// Formats segments into `<ruby>` markup.
///
/// The gloss is wrapped by `<rp>` fallback brackets so consumers that drop
/// the tags still show `base【gloss】`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RubyTemplate {
    open: char,
    close: char,
}

impl Default for RubyTemplate {
    fn default() -> Self {
        Self {
            open: '【',
            close: '】',
        }
    }
}

impl RubyTemplate {
    /// Build a template from a two-glyph bracket string.
    ///
    /// Anything other than exactly two characters falls back to `【】`.
    pub fn from_brackets(brackets: &str) -> Self {
        match bracket_pair(brackets) {
            Some((open, close)) => Self { open, close },
            None => {
                tracing::trace!(
                    brackets,
                    fallback = DEFAULT_FALLBACK_BRACKETS,
                    "Invalid fallback brackets"
                );
                Self::default()
            }
        }
    }

    /// Opening fallback glyph.
    pub fn open(&self) -> char {
        self.open
    }

    /// Closing fallback glyph.
    pub fn close(&self) -> char {
        self.close
    }

    /// Append one annotation.
    pub fn push_ruby(&self, out: &mut String, base: &str, gloss: &str) {
        out.push_str("<ruby>");
        out.push_str(base);
        out.push_str("<rp>");
        out.push(self.open);
        out.push_str("</rp><rt>");
        out.push_str(gloss);
        out.push_str("</rt><rp>");
        out.push(self.close);
        out.push_str("</rp></ruby>");
    }

    /// Append a sequence of segments.
    pub fn push_segments(&self, out: &mut String, segments: &[Segment<'_>]) {
        for segment in segments {
            match *segment {
                Segment::Ruby { base, gloss } => self.push_ruby(out, base, gloss),
                Segment::Literal(text) => out.push_str(text),
            }
        }
    }

    /// Render one annotation to a new string.
    #[must_use]
    pub fn ruby(&self, base: &str, gloss: &str) -> String {
        let mut out = String::with_capacity(base.len() + gloss.len() + 48);
        self.push_ruby(&mut out, base, gloss);
        out
    }
}
