//! Inline furigana notation to ruby markup.
//!
//! Authors annotate logographic text inline and the engine emits
//! `<ruby>base<rp>【</rp><rt>gloss</rt><rp>】</rp></ruby>`:
//!
//! - Explicit forms: `[記憶]^(きおく)` or `[記憶]{きおく}` (configurable).
//! - Auto-detection: `明日【あす】`, `東京都【とう.きょう.と】`, `食べる【たべる】`.
//! - Escapes: a leading `\` leaves a match verbatim, and `\【` renders `【`.
//!
//! With pattern matching enabled (the default), one gloss is distributed over
//! the logographic runs of the word: `[食べ物]^(たべもの)` annotates `食` with
//! `た` and `物` with `もの`, leaving `べ` plain.
//!
//! # Example
//!
//! ```
//! use rw_furigana::{FuriganaEngine, FuriganaOptions};
//!
//! let engine = FuriganaEngine::new();
//! let options = FuriganaOptions {
//!     pattern_matching: false,
//!     ..FuriganaOptions::default()
//! };
//! assert_eq!(
//!     engine.render("[記憶]^(きおく)", &options),
//!     "<ruby>記憶<rp>【</rp><rt>きおく</rt><rp>】</rp></ruby>"
//! );
//! ```
//!
//! # Features
//!
//! - `serde`: `Deserialize`/`Serialize` for [`FuriganaOptions`].
//! - `markdown`: `pulldown-cmark` event adapter in [`markdown`].

pub mod align;
pub mod auto;
mod cache;
pub mod chars;
mod engine;
mod escape;
pub mod form;
#[cfg(feature = "markdown")]
pub mod markdown;
mod options;
mod ruby;
pub mod split;

pub use auto::{AutoMatcher, compile_auto};
pub use cache::{DEFAULT_CACHE_LIMIT, MatcherCache};
pub use engine::FuriganaEngine;
pub use escape::unescape_brackets;
pub use form::{BracketForm, FormMatcher, compile_forms};
pub use options::{
    DEFAULT_AUTO_BRACKET_SETS, DEFAULT_FALLBACK_BRACKETS, DEFAULT_FORMS, FuriganaOptions,
};
pub use ruby::{RUBY_TAGS, RubyTemplate, Segment};
