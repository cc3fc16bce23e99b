//! Per-call rendering options.

/// Default explicit bracket forms.
pub const DEFAULT_FORMS: &str = "[]:^:()|[]::{}";

/// Default fallback brackets wrapping the gloss inside `<rp>`.
pub const DEFAULT_FALLBACK_BRACKETS: &str = "【】";

/// Default bracket pairs recognized by auto-detection.
pub const DEFAULT_AUTO_BRACKET_SETS: &str = "【】|{}";

/// Options controlling a single render call.
///
/// The engine never rejects malformed values: unparsable forms, bracket
/// pairs and fallback brackets degrade to the defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FuriganaOptions {
    /// Master switch. When false only the unescape pass runs.
    pub enabled: bool,
    /// Explicit forms, `main:separator:gloss` joined by `|`.
    pub forms: String,
    /// Two glyphs used as the plain-text degradation of the gloss.
    pub fallback_brackets: String,
    /// Disables auto-detection of already bracketed glosses.
    pub strict_mode: bool,
    /// Two-glyph bracket pairs for auto-detection, joined by `|`.
    pub auto_bracket_sets: String,
    /// Distributes glosses across character runs instead of pairing atomically.
    pub pattern_matching: bool,
}

impl Default for FuriganaOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            forms: DEFAULT_FORMS.to_owned(),
            fallback_brackets: DEFAULT_FALLBACK_BRACKETS.to_owned(),
            strict_mode: false,
            auto_bracket_sets: DEFAULT_AUTO_BRACKET_SETS.to_owned(),
            pattern_matching: true,
        }
    }
}

/// Split a two-glyph string into its open and close glyphs.
///
/// Returns `None` unless `pair` is exactly two characters.
pub(crate) fn bracket_pair(pair: &str) -> Option<(char, char)> {
    let mut chars = pair.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(open), Some(close), None) => Some((open, close)),
        _ => None,
    }
}
