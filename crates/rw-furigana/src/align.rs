//! Distributes an explicit-form gloss across the logographic runs of a word.
//!
//! A word such as `食べ物` is written with one gloss `たべもの`. The
//! non-logographic runs (`べ`) act as anchors: the gloss is cut at each
//! anchor, so `食` reads `た` and `物` reads `もの`.

use crate::chars::{self, is_logographic};
use crate::ruby::Segment;

/// Align `gloss` against the runs of `word`.
///
/// Falls back to a single whole-word annotation when the word does not start
/// with a logographic character, has no non-logographic anchor, or when the
/// gloss cannot be fully distributed.
pub fn align<'a>(word: &'a str, gloss: &'a str) -> Vec<Segment<'a>> {
    let whole = || {
        vec![Segment::Ruby {
            base: word,
            gloss,
        }]
    };

    if !word.chars().next().is_some_and(is_logographic) {
        return whole();
    }

    let runs = chars::runs(word);
    let logographic: Vec<&str> = runs
        .iter()
        .filter(|run| run.logographic)
        .map(|run| run.text)
        .collect();
    let anchors: Vec<&str> = runs
        .iter()
        .filter(|run| !run.logographic)
        .map(|run| run.text)
        .collect();

    if anchors.is_empty() {
        return whole();
    }

    let mut segments = Vec::with_capacity(runs.len());
    let mut remaining = Some(gloss);
    let mut next_run = 0;

    for (index, anchor) in anchors.iter().copied().enumerate() {
        let base = logographic.get(index).copied();
        match remaining {
            Some(rest) => {
                let (slice, after) = cut_at_anchor(rest, anchor);
                if let Some(base) = base {
                    segments.push(Segment::Ruby { base, gloss: slice });
                    next_run = index + 1;
                }
                segments.push(Segment::Literal(anchor));
                remaining = after;
            }
            None => {
                if let Some(base) = base {
                    segments.push(Segment::Literal(base));
                    next_run = index + 1;
                }
                segments.push(Segment::Literal(anchor));
            }
        }
    }

    match (remaining, logographic.get(next_run)) {
        (Some(rest), Some(&base)) => segments.push(Segment::Ruby { base, gloss: rest }),
        (Some(_), None) => {
            tracing::trace!(word, gloss, "Gloss not consumed by runs, annotating whole word");
            return whole();
        }
        (None, Some(&base)) => segments.push(Segment::Literal(base)),
        (None, None) => {}
    }

    segments
}

/// Cut `gloss` at the first occurrence of `anchor`.
///
/// Returns the text before the anchor and the non-empty text after it. When
/// the anchor does not occur, the whole gloss is returned with no remainder.
fn cut_at_anchor<'a>(gloss: &'a str, anchor: &str) -> (&'a str, Option<&'a str>) {
    match gloss.find(anchor) {
        Some(pos) => {
            let after = &gloss[pos + anchor.len()..];
            (&gloss[..pos], (!after.is_empty()).then_some(after))
        }
        None => (gloss, None),
    }
}
