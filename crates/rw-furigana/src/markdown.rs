//! `pulldown-cmark` integration.
//!
//! [`FuriganaEvents`] wraps a markdown event stream and converts furigana in
//! text nodes to inline HTML. Hosts that sanitize the rendered HTML must
//! allow [`ALLOWED_TAGS`].

use std::borrow::Cow;
use std::iter::Peekable;
use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::engine::FuriganaEngine;
use crate::options::FuriganaOptions;
use crate::ruby::RUBY_TAGS;

/// Tag names a host sanitizer must pass through.
pub const ALLOWED_TAGS: [&str; 3] = RUBY_TAGS;

/// Parser options used by [`render_markdown_html`] (GitHub Flavored Markdown).
#[must_use]
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Event adapter rendering furigana inside text events.
///
/// Consumes an offset stream (`Parser::into_offset_iter`) over `source`.
/// Adjacent text events are merged first, since the parser splits text at
/// bracket characters. Backslashes the parser consumed as markdown escapes
/// are put back before rendering, so `\[記憶]^(きおく)` stays verbatim just as
/// it does outside markdown. Converted text is HTML-escaped and emitted as
/// [`Event::InlineHtml`]; untouched text stays a [`Event::Text`]. Code blocks
/// and image alt text are never converted.
pub struct FuriganaEvents<'e, 'a, I>
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    inner: Peekable<I>,
    source: &'a str,
    engine: &'e FuriganaEngine,
    options: &'e FuriganaOptions,
    code_depth: usize,
    image_depth: usize,
}

impl<'e, 'a, I> FuriganaEvents<'e, 'a, I>
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    /// Wrap the offset `events` parsed from `source`, rendering text through
    /// `engine` with `options`.
    pub fn new(
        source: &'a str,
        events: I,
        engine: &'e FuriganaEngine,
        options: &'e FuriganaOptions,
    ) -> Self {
        Self {
            inner: events.peekable(),
            source,
            engine,
            options,
            code_depth: 0,
            image_depth: 0,
        }
    }

    /// Check if the text at `range` followed a backslash the parser dropped.
    ///
    /// The parser ends the preceding text right before an escaping
    /// backslash, so a backslash inside the previous piece is literal.
    fn follows_escape(&self, range: &Range<usize>, prev_end: Option<usize>) -> bool {
        let bytes = self.source.as_bytes();
        prev_end != Some(range.start)
            && range
                .start
                .checked_sub(1)
                .and_then(|before| bytes.get(before))
                == Some(&b'\\')
            && bytes
                .get(range.start)
                .is_some_and(u8::is_ascii_punctuation)
    }

    /// Merge the text run starting with `first` and convert it.
    fn convert_text(&mut self, first: &str, range: &Range<usize>) -> Event<'a> {
        let mut plain = String::from(first);
        let mut raw = String::with_capacity(first.len() + 1);
        if self.follows_escape(range, None) {
            raw.push('\\');
        }
        raw.push_str(first);

        let mut prev_end = range.end;
        while let Some((Event::Text(_), _)) = self.inner.peek() {
            let Some((Event::Text(text), next)) = self.inner.next() else {
                break;
            };
            if self.follows_escape(&next, Some(prev_end)) {
                raw.push('\\');
            }
            raw.push_str(&text);
            plain.push_str(&text);
            prev_end = next.end;
        }

        let rendered = self.engine.render(&escape_html(&raw), self.options);
        let rendered = unescape_markdown(&rendered);
        if rendered == escape_html(&plain) {
            Event::Text(plain.into())
        } else {
            Event::InlineHtml(rendered.into_owned().into())
        }
    }
}

impl<'a, I> Iterator for FuriganaEvents<'_, 'a, I>
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (event, range) = self.inner.next()?;
        match &event {
            Event::Start(Tag::CodeBlock(_)) => self.code_depth += 1,
            Event::End(TagEnd::CodeBlock) => self.code_depth = self.code_depth.saturating_sub(1),
            Event::Start(Tag::Image { .. }) => self.image_depth += 1,
            Event::End(TagEnd::Image) => self.image_depth = self.image_depth.saturating_sub(1),
            Event::Text(text) if self.code_depth == 0 && self.image_depth == 0 => {
                return Some(self.convert_text(text, &range));
            }
            _ => {}
        }
        Some(event)
    }
}

/// Render markdown to HTML with furigana converted.
#[must_use]
pub fn render_markdown_html(
    markdown: &str,
    engine: &FuriganaEngine,
    options: &FuriganaOptions,
) -> String {
    let events = Parser::new_ext(markdown, parser_options()).into_offset_iter();
    let mut html = String::with_capacity(markdown.len() * 2);
    pulldown_cmark::html::push_html(
        &mut html,
        FuriganaEvents::new(markdown, events, engine, options),
    );
    html
}

/// Drop the backslash of each markdown escape (`\` before ASCII punctuation).
fn unescape_markdown(text: &str) -> Cow<'_, str> {
    if !text.contains('\\') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek().filter(|next| next.is_ascii_punctuation()) {
                out.push(next);
                chars.next();
                continue;
            }
        }
        out.push(c);
    }
    Cow::Owned(out)
}

/// Escape HTML special characters in text content.
fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(markdown: &str) -> String {
        render_markdown_html(markdown, &FuriganaEngine::new(), &FuriganaOptions::default())
    }

    #[test]
    fn test_paragraph_with_auto_detected_gloss() {
        assert_eq!(
            render("明日【あす】"),
            "<p><ruby>明日<rp>【</rp><rt>あす</rt><rp>】</rp></ruby></p>\n"
        );
    }

    #[test]
    fn test_explicit_form_survives_link_brackets() {
        assert_eq!(
            render("[記憶]^(きおく)"),
            "<p><ruby>記憶<rp>【</rp><rt>きおく</rt><rp>】</rp></ruby></p>\n"
        );
    }

    #[test]
    fn test_surrounding_text_is_escaped() {
        assert_eq!(
            render("a < b 明日【あす】"),
            "<p>a &lt; b <ruby>明日<rp>【</rp><rt>あす</rt><rp>】</rp></ruby></p>\n"
        );
    }

    #[test]
    fn test_code_is_untouched() {
        assert_eq!(
            render("```\n明日【あす】\n```"),
            "<pre><code>明日【あす】\n</code></pre>\n"
        );
        assert_eq!(
            render("`明日【あす】`"),
            "<p><code>明日【あす】</code></p>\n"
        );
    }

    #[test]
    fn test_escaped_brackets_in_markdown() {
        assert_eq!(render(r"\【note\】"), "<p>【note】</p>\n");
    }

    #[test]
    fn test_markdown_escape_suppresses_explicit_form() {
        assert_eq!(render(r"\[記憶]^(きおく)"), "<p>[記憶]^(きおく)</p>\n");
        assert_eq!(
            render(r"see \[記憶]^(きおく) and [記憶]^(きおく)"),
            "<p>see [記憶]^(きおく) and \
             <ruby>記憶<rp>【</rp><rt>きおく</rt><rp>】</rp></ruby></p>\n"
        );
    }

    #[test]
    fn test_escaped_backslash_still_guards_match() {
        // `\\` is a literal backslash, which guards the form that follows it.
        assert_eq!(render(r"\\[記憶]^(きおく)"), "<p>\\[記憶]^(きおく)</p>\n");
    }

    #[test]
    fn test_markdown_escape_elsewhere_keeps_conversion() {
        assert_eq!(
            render(r"\[注] 明日【あす】"),
            "<p>[注] <ruby>明日<rp>【</rp><rt>あす</rt><rp>】</rp></ruby></p>\n"
        );
    }

    #[test]
    fn test_unescape_markdown() {
        assert_eq!(unescape_markdown(r"\[a\\b\記"), r"[a\b\記");
        assert!(matches!(unescape_markdown("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_plain_text_stays_text_event() {
        let engine = FuriganaEngine::new();
        let options = FuriganaOptions::default();
        let events: Vec<Event<'_>> =
            FuriganaEvents::new("plain", Parser::new("plain").into_offset_iter(), &engine, &options)
                .collect();
        assert!(matches!(events[1], Event::Text(_)));
    }

    #[test]
    fn test_heading() {
        assert_eq!(
            render("# 漢字{かん.じ}"),
            "<h1><ruby>漢<rp>【</rp><rt>かん</rt><rp>】</rp></ruby>\
             <ruby>字<rp>【</rp><rt>じ</rt><rp>】</rp></ruby></h1>\n"
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & <b> \"c\""), "a &amp; &lt;b&gt; &quot;c&quot;");
        assert!(matches!(escape_html("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_allowed_tags() {
        assert_eq!(ALLOWED_TAGS, ["ruby", "rt", "rp"]);
    }
}
