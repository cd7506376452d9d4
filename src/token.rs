//! Token-based scoring strategies: sort and set normalization.
//!
//! Both strategies tokenize on whitespace after preprocessing and then
//! delegate to the ratio module. Token sort cancels word-order differences;
//! token set additionally cancels duplicated words and rewards a shared token
//! core when one side has extra tokens appended.

use std::collections::BTreeSet;

use crate::options::ScoreOptions;
use crate::process::prepare;
use crate::ratio::{partial_ratio_unrounded, ratio_unrounded};

/// Tokenize, sort lexicographically, and rejoin with single spaces.
pub(crate) fn sorted_token_join(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Unique tokens of a string, ordered lexicographically.
pub(crate) fn word_set(s: &str) -> BTreeSet<String> {
    s.split_whitespace().map(str::to_owned).collect()
}

/// Join the sorted intersection with one side's leftover tokens, trimmed.
fn combine(intersection: &str, rest: &str) -> String {
    if rest.is_empty() {
        intersection.to_owned()
    } else if intersection.is_empty() {
        rest.to_owned()
    } else {
        format!("{intersection} {rest}")
    }
}

fn score_pair(a: &str, b: &str, partial: bool, opts: &ScoreOptions) -> f64 {
    let ca: Vec<char> = a.chars().collect();
    let cb: Vec<char> = b.chars().collect();
    if partial {
        partial_ratio_unrounded(&ca, &cb, opts)
    } else {
        ratio_unrounded(&ca, &cb, opts)
    }
}

/// Unrounded token-set score over precomputed word sets.
///
/// Builds the three comparison strings (intersection, intersection +
/// A-only, intersection + B-only), scores each pairing with the selected
/// ratio function, and returns the maximum.
pub(crate) fn token_set_score(
    sa: &BTreeSet<String>,
    sb: &BTreeSet<String>,
    partial: bool,
    opts: &ScoreOptions,
) -> f64 {
    let intersection = sa
        .intersection(sb)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    let a_only = sa
        .difference(sb)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    let b_only = sb
        .difference(sa)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    let combined_a = combine(&intersection, &a_only);
    let combined_b = combine(&intersection, &b_only);

    score_pair(&intersection, &combined_a, partial, opts)
        .max(score_pair(&intersection, &combined_b, partial, opts))
        .max(score_pair(&combined_a, &combined_b, partial, opts))
}

fn token_sort_impl(a: &str, b: &str, partial: bool, opts: &ScoreOptions) -> u32 {
    let pa = prepare(a, opts);
    let pb = prepare(b, opts);
    let sa = sorted_token_join(&pa);
    let sb = sorted_token_join(&pb);
    score_pair(&sa, &sb, partial, &opts.preprocessed()).round() as u32
}

fn token_set_impl(a: &str, b: &str, partial: bool, opts: &ScoreOptions) -> u32 {
    let pa = prepare(a, opts);
    let pb = prepare(b, opts);
    let sa = word_set(&pa);
    let sb = word_set(&pb);
    token_set_score(&sa, &sb, partial, &opts.preprocessed()).round() as u32
}

/// Score two strings after canonicalizing token order.
///
/// Both inputs are tokenized, the tokens sorted lexicographically and
/// rejoined with single spaces, and the results scored with [`ratio`].
///
/// # Examples
///
/// ```
/// use fuzzrank::{token_sort_ratio, ScoreOptions};
///
/// let opts = ScoreOptions::default();
/// assert_eq!(
///     token_sort_ratio("fuzzy wuzzy was a bear", "wuzzy fuzzy bear was a", &opts),
///     100
/// );
/// ```
///
/// [`ratio`]: crate::ratio
pub fn token_sort_ratio(a: &str, b: &str, opts: &ScoreOptions) -> u32 {
    token_sort_impl(a, b, false, opts)
}

/// [`token_sort_ratio`] scored with [`partial_ratio`] instead of the full
/// ratio.
///
/// [`partial_ratio`]: crate::partial_ratio
pub fn partial_token_sort_ratio(a: &str, b: &str, opts: &ScoreOptions) -> u32 {
    token_sort_impl(a, b, true, opts)
}

/// Score two strings on token membership rather than token order.
///
/// Tokens are collapsed to sets; the sorted intersection and the two
/// "intersection plus leftovers" strings are pairwise scored and the best
/// pairing wins. Identical token multisets always score 100 regardless of
/// order or duplication.
///
/// # Examples
///
/// ```
/// use fuzzrank::{token_set_ratio, ScoreOptions};
///
/// let opts = ScoreOptions::default();
/// assert_eq!(token_set_ratio("bad bad apple", "apple bad bad", &opts), 100);
/// ```
pub fn token_set_ratio(a: &str, b: &str, opts: &ScoreOptions) -> u32 {
    token_set_impl(a, b, false, opts)
}

/// [`token_set_ratio`] scored with [`partial_ratio`] instead of the full
/// ratio.
///
/// [`partial_ratio`]: crate::partial_ratio
pub fn partial_token_set_ratio(a: &str, b: &str, opts: &ScoreOptions) -> u32 {
    token_set_impl(a, b, true, opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ScoreOptions {
        ScoreOptions::default()
    }

    #[test]
    fn sorted_token_join_orders_lexicographically() {
        assert_eq!(sorted_token_join("c b a"), "a b c");
        assert_eq!(sorted_token_join("  one   two  "), "one two");
        assert_eq!(sorted_token_join(""), "");
    }

    #[test]
    fn word_set_collapses_duplicates() {
        let set = word_set("bad bad apple");
        assert_eq!(set.len(), 2);
        assert!(set.contains("bad"));
        assert!(set.contains("apple"));
    }

    #[test]
    fn token_sort_cancels_word_order() {
        assert_eq!(
            token_sort_ratio("new york mets vs atlanta braves", "atlanta braves vs new york mets", &opts()),
            100
        );
    }

    #[test]
    fn token_sort_keeps_duplicates() {
        // Multisets differ ("bad" twice vs once), so token sort is below 100.
        let score = token_sort_ratio("bad bad apple", "bad apple", &opts());
        assert!(score < 100, "got {score}");
    }

    #[test]
    fn token_set_ignores_order_and_duplication() {
        assert_eq!(token_set_ratio("bad bad apple", "apple bad bad", &opts()), 100);
    }

    #[test]
    fn token_set_rewards_shared_core_with_extra_tokens() {
        // One side has strictly extra tokens; the intersection-vs-combined
        // pairing still scores 100.
        assert_eq!(
            token_set_ratio("new york mets", "new york mets baseball club", &opts()),
            100
        );
    }

    #[test]
    fn token_set_no_overlap_compares_leftovers() {
        let score = token_set_ratio("alpha beta", "gamma delta", &opts());
        assert!(score < 60, "got {score}");
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(token_sort_ratio("", "anything", &opts()), 0);
        assert_eq!(token_set_ratio("", "anything", &opts()), 0);
        assert_eq!(partial_token_sort_ratio("", "", &opts()), 0);
        assert_eq!(partial_token_set_ratio("", "", &opts()), 0);
    }

    #[test]
    fn punctuation_is_canceled_by_preprocessing() {
        assert_eq!(
            token_sort_ratio("great is scala", "java is great", &opts()),
            token_sort_ratio("great is scala!", "Java is GREAT?", &opts())
        );
    }

    #[test]
    fn partial_token_sort_at_least_token_sort_on_containment() {
        let a = "mets new york";
        let b = "the new york mets organization";
        assert!(
            partial_token_sort_ratio(a, b, &opts()) >= token_sort_ratio(a, b, &opts())
        );
    }

    #[test]
    fn symmetry() {
        let a = "fuzzy was a bear";
        let b = "wuzzy fuzzy was a hare";
        assert_eq!(token_sort_ratio(a, b, &opts()), token_sort_ratio(b, a, &opts()));
        assert_eq!(token_set_ratio(a, b, &opts()), token_set_ratio(b, a, &opts()));
    }
}
