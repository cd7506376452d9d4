//! Composite scorers that combine several strategies.
//!
//! [`wratio`] runs the base ratio alongside partial and token strategies with
//! length-ratio-dependent weights and keeps the best result. [`qratio`] is
//! the plain full-process ratio, kept as the quick single-strategy baseline.

use crate::options::ScoreOptions;
use crate::process::prepare;
use crate::ratio::{partial_ratio_unrounded, ratio_unrounded};
use crate::token::{sorted_token_join, token_set_score, word_set};

/// Weight applied to token-reordering strategies, which are treated as
/// slightly less authoritative than the direct ratio.
const UNBASE_SCALE: f64 = 0.95;

/// Length ratio at which partial-family strategies start contributing.
const TRY_PARTIAL_THRESHOLD: f64 = 1.5;

/// Weighted composite ratio: the best of several strategies.
///
/// Both inputs are preprocessed once. The base ratio always participates.
/// When the longer input is at least 1.5 times the length of the shorter,
/// the partial-ratio family joins in, scaled by 0.90 (or 0.60 when the
/// length ratio exceeds 8); otherwise the token sort/set strategies are used
/// at a 0.95 discount. Each strategy's integer score is scaled and the
/// maximum is rounded to the nearest integer.
///
/// `wratio` never scores below [`qratio`] for the same pair, since the base
/// ratio is always among the candidates.
///
/// # Examples
///
/// ```
/// use fuzzrank::{qratio, wratio, ScoreOptions};
///
/// let opts = ScoreOptions::default();
/// assert_eq!(wratio("hello world", "hello world", &opts), 100);
/// assert!(wratio("mets", "new york mets", &opts) >= qratio("mets", "new york mets", &opts));
/// assert_eq!(wratio("", "anything", &opts), 0);
/// ```
pub fn wratio(a: &str, b: &str, opts: &ScoreOptions) -> u32 {
    let pa = prepare(a, opts);
    let pb = prepare(b, opts);
    let ca: Vec<char> = pa.chars().collect();
    let cb: Vec<char> = pb.chars().collect();
    if ca.is_empty() || cb.is_empty() {
        return 0;
    }

    let inner = opts.preprocessed();
    // Each strategy contributes its rounded integer score; only the scale
    // factors introduce fractional values.
    let base = ratio_unrounded(&ca, &cb, &inner).round();

    let longest = ca.len().max(cb.len()) as f64;
    let shortest = ca.len().min(cb.len()) as f64;
    let len_ratio = longest / shortest;

    if len_ratio >= TRY_PARTIAL_THRESHOLD {
        let partial_scale = if len_ratio > 8.0 { 0.60 } else { 0.90 };
        let partial = partial_ratio_unrounded(&ca, &cb, &inner).round() * partial_scale;

        let sorted_a = sorted_token_join(&pa);
        let sorted_b = sorted_token_join(&pb);
        let sca: Vec<char> = sorted_a.chars().collect();
        let scb: Vec<char> = sorted_b.chars().collect();
        let ptsor =
            partial_ratio_unrounded(&sca, &scb, &inner).round() * UNBASE_SCALE * partial_scale;

        let set_a = word_set(&pa);
        let set_b = word_set(&pb);
        let ptset =
            token_set_score(&set_a, &set_b, true, &inner).round() * UNBASE_SCALE * partial_scale;

        base.max(partial).max(ptsor).max(ptset).round() as u32
    } else {
        let sorted_a = sorted_token_join(&pa);
        let sorted_b = sorted_token_join(&pb);
        let sca: Vec<char> = sorted_a.chars().collect();
        let scb: Vec<char> = sorted_b.chars().collect();
        let tsor = ratio_unrounded(&sca, &scb, &inner).round() * UNBASE_SCALE;

        let set_a = word_set(&pa);
        let set_b = word_set(&pb);
        let tset = token_set_score(&set_a, &set_b, false, &inner).round() * UNBASE_SCALE;

        base.max(tsor).max(tset).round() as u32
    }
}

/// Quick ratio: the base ratio with full preprocessing forced on.
///
/// # Examples
///
/// ```
/// use fuzzrank::{qratio, ScoreOptions};
///
/// let opts = ScoreOptions::default();
/// assert_eq!(qratio("Hello, World!", "hello world", &opts), 100);
/// ```
pub fn qratio(a: &str, b: &str, opts: &ScoreOptions) -> u32 {
    let full = ScoreOptions {
        full_process: true,
        ..opts.clone()
    };
    crate::ratio::ratio(a, b, &full)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ScoreOptions {
        ScoreOptions::default()
    }

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(wratio("new york mets", "new york mets", &opts()), 100);
    }

    #[test]
    fn empty_operands_score_zero() {
        assert_eq!(wratio("", "", &opts()), 0);
        assert_eq!(wratio("", "abc", &opts()), 0);
        assert_eq!(wratio("abc", "", &opts()), 0);
    }

    #[test]
    fn never_below_qratio() {
        let cases = [
            ("new york mets", "new YORK mets"),
            ("mets", "new york mets"),
            ("a b c", "c b a"),
            ("x", "a very much longer string than the query is"),
            ("fuzzy wuzzy was a bear", "wuzzy fuzzy was a hare"),
        ];
        for (a, b) in cases {
            assert!(
                wratio(a, b, &opts()) >= qratio(a, b, &opts()),
                "wratio < qratio for {a:?} vs {b:?}"
            );
        }
    }

    #[test]
    fn close_lengths_use_token_strategies() {
        // Same tokens reordered, lengths equal: token sort contributes
        // 100 * 0.95 = 95.
        assert_eq!(wratio("a b c d", "d c b a", &opts()), 95);
    }

    #[test]
    fn partial_family_kicks_in_for_length_gap() {
        // "mets" is contained in "new york mets"; partial gives 100 * 0.9.
        assert_eq!(wratio("mets", "new york mets", &opts()), 90);
    }

    #[test]
    fn extreme_length_gap_uses_low_partial_scale() {
        // len ratio > 8 drops the partial scale to 0.6.
        let long = "the new york mets were one of baseball expansion teams of 1962";
        let score = wratio("mets", long, &opts());
        assert_eq!(score, 60);
    }

    #[test]
    fn composes_rounded_integer_sub_scores() {
        use crate::ratio::{partial_ratio, ratio};
        use crate::token::{
            partial_token_set_ratio, partial_token_sort_ratio, token_set_ratio, token_sort_ratio,
        };

        let scale = |score: u32, factor: f64| (f64::from(score) * factor).round() as u32;

        // Close lengths: base plus the token strategies at 0.95.
        let (a, b) = ("great is scala", "java is great");
        let expected = ratio(a, b, &opts())
            .max(scale(token_sort_ratio(a, b, &opts()), UNBASE_SCALE))
            .max(scale(token_set_ratio(a, b, &opts()), UNBASE_SCALE));
        assert_eq!(wratio(a, b, &opts()), expected);

        // Length gap below 8x: partial family at 0.9.
        let (a, b) = ("tesst", "this is a test of sorts");
        let expected = ratio(a, b, &opts())
            .max(scale(partial_ratio(a, b, &opts()), 0.90))
            .max(scale(partial_token_sort_ratio(a, b, &opts()), UNBASE_SCALE * 0.90))
            .max(scale(partial_token_set_ratio(a, b, &opts()), UNBASE_SCALE * 0.90));
        assert_eq!(wratio(a, b, &opts()), expected);
    }

    #[test]
    fn symmetry() {
        let a = "fuzzy was a bear";
        let b = "wuzzy fuzzy was a hare today";
        assert_eq!(wratio(a, b, &opts()), wratio(b, a, &opts()));
    }

    #[test]
    fn qratio_applies_full_processing_even_when_disabled() {
        let raw = ScoreOptions {
            full_process: false,
            ..Default::default()
        };
        assert_eq!(qratio("HELLO!", "hello", &raw), 100);
    }
}
