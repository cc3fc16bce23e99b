//! The furigana engine: matcher passes over a text buffer.

use std::borrow::Cow;

use crate::auto::{AutoMatcher, compile_auto};
use crate::cache::MatcherCache;
use crate::escape::unescape_brackets;
use crate::form::{FormMatcher, compile_forms};
use crate::options::FuriganaOptions;
use crate::ruby::RubyTemplate;

/// Converts inline furigana notation to ruby markup.
///
/// Compiled matchers are cached per configuration string, so an engine can be
/// constructed once and shared (it is `Send + Sync`) across render calls with
/// any mix of options.
///
/// # Example
///
/// ```
/// use rw_furigana::{FuriganaEngine, FuriganaOptions};
///
/// let engine = FuriganaEngine::new();
/// let html = engine.render("[食べる]^(たべる)", &FuriganaOptions::default());
/// assert_eq!(html, "<ruby>食<rp>【</rp><rt>た</rt><rp>】</rp></ruby>べる");
/// ```
#[derive(Default)]
pub struct FuriganaEngine {
    forms: MatcherCache<Vec<FormMatcher>>,
    auto: MatcherCache<Vec<AutoMatcher>>,
}

impl FuriganaEngine {
    /// Create an engine with empty matcher caches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `text` with the default options.
    #[must_use]
    pub fn render_default(&self, text: &str) -> String {
        self.render(text, &FuriganaOptions::default())
    }

    /// Render `text`, converting explicit forms and (unless strict) auto-detected
    /// glosses, then unescaping fallback brackets.
    ///
    /// Matchers run in declaration order; each pass sees the output of the
    /// previous one.
    #[must_use]
    pub fn render(&self, text: &str, options: &FuriganaOptions) -> String {
        let template = RubyTemplate::from_brackets(&options.fallback_brackets);
        let mut out = text.to_owned();

        if options.enabled {
            let forms = self.forms.get_or_build(&options.forms, |list| {
                let matchers = compile_forms(list);
                tracing::debug!(
                    forms = list,
                    count = matchers.len(),
                    "Compiled furigana forms"
                );
                matchers
            });
            for matcher in forms.iter() {
                if let Some(replaced) =
                    changed(matcher.apply(&out, options.pattern_matching, &template))
                {
                    out = replaced;
                }
            }

            if !options.strict_mode {
                let auto = self.auto.get_or_build(&options.auto_bracket_sets, |sets| {
                    let matchers = compile_auto(sets);
                    tracing::debug!(sets, count = matchers.len(), "Compiled auto bracket sets");
                    matchers
                });
                for matcher in auto.iter() {
                    if let Some(replaced) =
                        changed(matcher.apply(&out, options.pattern_matching, &template))
                    {
                        out = replaced;
                    }
                }
            }
        }

        match unescape_brackets(&out, template.open(), template.close()) {
            Cow::Borrowed(_) => out,
            Cow::Owned(unescaped) => unescaped,
        }
    }

    /// Number of distinct form configurations compiled so far.
    pub fn cached_form_sets(&self) -> usize {
        self.forms.len()
    }

    /// Number of distinct auto bracket configurations compiled so far.
    pub fn cached_auto_sets(&self) -> usize {
        self.auto.len()
    }
}

/// Detach a replacement result from the buffer it borrowed.
fn changed(result: Cow<'_, str>) -> Option<String> {
    match result {
        Cow::Borrowed(_) => None,
        Cow::Owned(replaced) => Some(replaced),
    }
}
