//! Ratio-family scores: full-string ratio and partial (substring) ratio.
//!
//! A ratio is a similarity score in `0..=100` derived either from edit
//! distance or from block matching, selected by
//! [`ScoreOptions::ratio_alg`](crate::ScoreOptions). Partial ratio aligns the
//! shorter input against the best-matching window of the longer one.

use std::sync::Once;

use crate::blocks::{matching_blocks, total_matched};
use crate::distance::{CharCollator, DiacriticInsensitive, edit_distance};
use crate::options::{RatioAlg, ScoreOptions};
use crate::process::prepare;

/// Any window scoring above this is treated as a perfect partial match.
/// Empirically tuned in the reference algorithm; preserved exactly.
const PARTIAL_PERFECT_THRESHOLD: f64 = 99.5;

static COLLATOR_BLOCKMATCH_ADVISORY: Once = Once::new();

/// The block matcher indexes characters by raw equality and cannot apply a
/// pairwise collation predicate, so collator requests degrade silently to
/// code-point equality. Advise once per process via the caller's tracing
/// subscriber.
fn advise_collator_unsupported() {
    COLLATOR_BLOCKMATCH_ADVISORY.call_once(|| {
        tracing::warn!(
            "block-matching ratio does not support collator-aware equality; \
             falling back to code-point equality"
        );
    });
}

/// Unrounded ratio over already-prepared code-point slices.
///
/// Returns 0.0 when either side is empty (the validation short-circuit).
pub(crate) fn ratio_unrounded(a: &[char], b: &[char], opts: &ScoreOptions) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let lensum = (a.len() + b.len()) as f64;

    match opts.ratio_alg {
        RatioAlg::Distance => {
            let collator: Option<&dyn CharCollator> = if opts.use_collator {
                Some(&DiacriticInsensitive)
            } else {
                None
            };
            let dist = edit_distance(a, b, opts.ratio_subcost(), collator);
            100.0 * (lensum - dist as f64) / lensum
        }
        RatioAlg::BlockMatch => {
            if opts.use_collator {
                advise_collator_unsupported();
            }
            let matched = total_matched(&matching_blocks(a, b));
            100.0 * (2 * matched) as f64 / lensum
        }
    }
}

/// Compute the similarity ratio between two strings.
///
/// Inputs are preprocessed according to `opts`; if either side is empty after
/// preprocessing the score is 0. Otherwise the score is
/// `round(100 * (lensum - distance) / lensum)` for the edit-distance backend
/// (substitution cost 2 by default), or the block-matching equivalent when
/// [`RatioAlg::BlockMatch`] is selected.
///
/// # Examples
///
/// ```
/// use fuzzrank::{ratio, ScoreOptions};
///
/// let opts = ScoreOptions::default();
/// assert_eq!(ratio("hello world", "hello world", &opts), 100);
/// assert_eq!(ratio("this is a test", "this is a test!", &opts), 100); // "!" trimmed
/// assert_eq!(ratio("", "anything", &opts), 0);
///
/// let close = ratio("new york mets", "new york meats", &opts);
/// assert!(close > 90 && close < 100);
/// ```
pub fn ratio(a: &str, b: &str, opts: &ScoreOptions) -> u32 {
    let pa = prepare(a, opts);
    let pb = prepare(b, opts);
    let ca: Vec<char> = pa.chars().collect();
    let cb: Vec<char> = pb.chars().collect();
    ratio_unrounded(&ca, &cb, opts).round() as u32
}

/// Unrounded best-window score for already-prepared slices.
///
/// Designates the shorter slice as the needle, computes matching blocks
/// against the longer slice, and for each block scores the needle against the
/// window of the longer slice that the block implies. Short-circuits to 100
/// as soon as any window exceeds the perfect-match threshold.
pub(crate) fn partial_ratio_unrounded(a: &[char], b: &[char], opts: &ScoreOptions) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    // Exact containment fast path: an ASCII needle found verbatim in the
    // haystack is a perfect window under either ratio backend. Collation
    // changes equality, so skip when a collator is requested.
    if !opts.use_collator && shorter.iter().all(|c| c.is_ascii()) && longer.iter().all(|c| c.is_ascii())
    {
        let needle: String = shorter.iter().collect();
        let haystack: String = longer.iter().collect();
        if memchr::memmem::find(haystack.as_bytes(), needle.as_bytes()).is_some() {
            return 100.0;
        }
    }

    let mut best = 0.0f64;
    for block in matching_blocks(shorter, longer) {
        let start = block.b.saturating_sub(block.a);
        let end = (start + shorter.len()).min(longer.len());
        let window = &longer[start..end];
        let score = ratio_unrounded(shorter, window, opts);
        if score > PARTIAL_PERFECT_THRESHOLD {
            return 100.0;
        }
        if score > best {
            best = score;
        }
    }
    best
}

/// Compute the partial similarity ratio between two strings.
///
/// The shorter input (after preprocessing) is aligned against the
/// best-matching window of the longer one; candidate windows are derived from
/// the matching blocks between the two. Any window scoring above 99.5 makes
/// the result an exact 100. Empty inputs score 0.
///
/// Partial matching never scores worse than [`ratio`] when one string is
/// contained in the other.
///
/// # Examples
///
/// ```
/// use fuzzrank::{partial_ratio, ScoreOptions};
///
/// let opts = ScoreOptions::default();
/// assert_eq!(partial_ratio("test", "this is a test!", &opts), 100);
/// assert_eq!(partial_ratio("", "anything", &opts), 0);
/// ```
pub fn partial_ratio(a: &str, b: &str, opts: &ScoreOptions) -> u32 {
    let pa = prepare(a, opts);
    let pb = prepare(b, opts);
    let ca: Vec<char> = pa.chars().collect();
    let cb: Vec<char> = pb.chars().collect();
    partial_ratio_unrounded(&ca, &cb, opts).round() as u32
}
