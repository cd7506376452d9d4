//! Edit-distance engine operating on Unicode code points.
//!
//! The engine computes a minimum-cost edit distance with insertion cost 1,
//! deletion cost 1, and a configurable substitution cost. All arithmetic is
//! over code points, never bytes, so characters outside the basic
//! multilingual plane count as one unit each.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::options::ScoreOptions;
use crate::process::prepare;

/// Character equality capability used by the distance engine in place of raw
/// code-point equality.
///
/// Supplying a collator only changes which cells of the distance matrix count
/// as zero-cost matches; the algorithm itself is unchanged.
pub trait CharCollator {
    /// Returns `true` when `a` and `b` should be treated as the same
    /// character for matching purposes.
    fn eq(&self, a: char, b: char) -> bool;
}

/// Collator that treats characters as equal when they share a base letter,
/// ignoring case and diacritical marks.
///
/// Equality is decided by NFD-decomposing each character, dropping combining
/// marks, and lowercasing the remaining base character.
///
/// # Examples
///
/// ```
/// use fuzzrank::{CharCollator, DiacriticInsensitive};
///
/// let collator = DiacriticInsensitive;
/// assert!(collator.eq('e', '\u{00e9}'));
/// assert!(collator.eq('A', 'a'));
/// assert!(!collator.eq('e', 'f'));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DiacriticInsensitive;

impl DiacriticInsensitive {
    fn base_char(c: char) -> char {
        // NFD splits a precomposed character into base + combining marks;
        // the first non-mark code point is the base letter.
        let base = c.nfd().find(|d| !is_combining_mark(*d)).unwrap_or(c);
        base.to_lowercase().next().unwrap_or(base)
    }
}

impl CharCollator for DiacriticInsensitive {
    fn eq(&self, a: char, b: char) -> bool {
        a == b || Self::base_char(a) == Self::base_char(b)
    }
}

/// Core two-row dynamic program over code-point slices.
///
/// Insertion and deletion cost 1; substitution costs `subcost`. When a
/// collator is supplied, its equality predicate replaces raw `char` equality.
pub(crate) fn edit_distance(
    a: &[char],
    b: &[char],
    subcost: usize,
    collator: Option<&dyn CharCollator>,
) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let n = b.len();
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr: Vec<usize> = vec![0; n + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let same = match collator {
                Some(c) => c.eq(ca, cb),
                None => ca == cb,
            };
            let cost = if same { 0 } else { subcost };
            curr[j + 1] = (curr[j] + 1).min(prev[j + 1] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Compute the edit distance between two strings.
///
/// Inputs are preprocessed according to `opts` (full processing is on by
/// default). The substitution cost is `opts.subcost`, defaulting to 1 for
/// this operation. With `opts.use_collator`, character equality is decided by
/// [`DiacriticInsensitive`].
///
/// Degenerate cases: `distance("", s) == s.chars().count()` and
/// `distance(s, s) == 0`.
///
/// # Examples
///
/// ```
/// use fuzzrank::{distance, ScoreOptions};
///
/// let opts = ScoreOptions::default();
/// assert_eq!(distance("kitten", "sitting", &opts), 3);
/// assert_eq!(distance("same", "same", &opts), 0);
/// assert_eq!(distance("", "abc", &opts), 3);
/// ```
pub fn distance(a: &str, b: &str, opts: &ScoreOptions) -> usize {
    let pa = prepare(a, opts);
    let pb = prepare(b, opts);
    let ca: Vec<char> = pa.chars().collect();
    let cb: Vec<char> = pb.chars().collect();

    let collator: Option<&dyn CharCollator> = if opts.use_collator {
        Some(&DiacriticInsensitive)
    } else {
        None
    };
    edit_distance(&ca, &cb, opts.distance_subcost(), collator)
}
