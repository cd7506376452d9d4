//! Longest-matching-block alignment between two code-point sequences.
//!
//! This is the block-matching complement to the edit-distance engine: it
//! finds every maximal common contiguous run between two sequences, which the
//! ratio module uses both as an alternative ratio backend and to pick
//! candidate alignment windows for partial matching.

use std::collections::HashMap;

/// A maximal common contiguous run between two sequences.
///
/// `a` is the offset in the first sequence, `b` the offset in the second, and
/// `len` the run length, all in code points. The block list produced by
/// [`matching_blocks`] always ends with a zero-length sentinel block at
/// `(len_a, len_b, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingBlock {
    /// Offset of the run in the first sequence.
    pub a: usize,
    /// Offset of the run in the second sequence.
    pub b: usize,
    /// Length of the run; 0 only for the terminating sentinel.
    pub len: usize,
}

/// Find the longest matching run between `a[a_lo..a_hi]` and `b[b_lo..b_hi]`.
///
/// `b2j` maps each character of `b` to its (ascending) positions. The rolling
/// `j2len` map carries run lengths ending at each `b` position on the
/// previous `a` row. Of equally long runs, the earliest in `a` (then in `b`)
/// wins, which keeps the block decomposition deterministic.
fn find_longest_match(
    a: &[char],
    b: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> (usize, usize, usize) {
    let mut best_i = a_lo;
    let mut best_j = b_lo;
    let mut best_size = 0usize;

    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for i in a_lo..a_hi {
        let mut new_j2len: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(&a[i]) {
            for &j in positions {
                if j < b_lo {
                    continue;
                }
                if j >= b_hi {
                    break;
                }
                let k = if j > 0 {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                } else {
                    1
                };
                new_j2len.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        j2len = new_j2len;
    }

    (best_i, best_j, best_size)
}

/// Compute all maximal matching blocks between two code-point sequences.
///
/// Divide-and-conquer around the longest match: the longest common run is
/// recorded, then the regions before and after it are searched independently.
/// Adjacent blocks are merged, and a zero-length sentinel at
/// `(a.len(), b.len(), 0)` terminates the list.
///
/// # Examples
///
/// ```
/// use fuzzrank::{matching_blocks, MatchingBlock};
///
/// let a: Vec<char> = "abxcd".chars().collect();
/// let b: Vec<char> = "abcd".chars().collect();
/// let blocks = matching_blocks(&a, &b);
/// assert_eq!(
///     blocks,
///     vec![
///         MatchingBlock { a: 0, b: 0, len: 2 },
///         MatchingBlock { a: 3, b: 2, len: 2 },
///         MatchingBlock { a: 5, b: 4, len: 0 },
///     ]
/// );
/// ```
pub fn matching_blocks(a: &[char], b: &[char]) -> Vec<MatchingBlock> {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        b2j.entry(c).or_default().push(j);
    }

    // LIFO work list of unexamined (a_lo, a_hi, b_lo, b_hi) regions.
    let mut queue: Vec<(usize, usize, usize, usize)> = vec![(0, a.len(), 0, b.len())];
    let mut raw: Vec<(usize, usize, usize)> = Vec::new();

    while let Some((a_lo, a_hi, b_lo, b_hi)) = queue.pop() {
        let (i, j, k) = find_longest_match(a, b, &b2j, a_lo, a_hi, b_lo, b_hi);
        if k > 0 {
            raw.push((i, j, k));
            if a_lo < i && b_lo < j {
                queue.push((a_lo, i, b_lo, j));
            }
            if i + k < a_hi && j + k < b_hi {
                queue.push((i + k, a_hi, j + k, b_hi));
            }
        }
    }

    raw.sort_unstable();

    // Merge blocks that are adjacent in both sequences.
    let mut blocks: Vec<MatchingBlock> = Vec::with_capacity(raw.len() + 1);
    let (mut i1, mut j1, mut k1) = (0usize, 0usize, 0usize);
    for (i2, j2, k2) in raw {
        if i1 + k1 == i2 && j1 + k1 == j2 {
            k1 += k2;
        } else {
            if k1 > 0 {
                blocks.push(MatchingBlock {
                    a: i1,
                    b: j1,
                    len: k1,
                });
            }
            i1 = i2;
            j1 = j2;
            k1 = k2;
        }
    }
    if k1 > 0 {
        blocks.push(MatchingBlock {
            a: i1,
            b: j1,
            len: k1,
        });
    }

    blocks.push(MatchingBlock {
        a: a.len(),
        b: b.len(),
        len: 0,
    });
    blocks
}

/// Total matched length across all blocks (the sentinel contributes 0).
pub(crate) fn total_matched(blocks: &[MatchingBlock]) -> usize {
    blocks.iter().map(|blk| blk.len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn identical_sequences_one_full_block() {
        let a = chars("abcdef");
        let blocks = matching_blocks(&a, &a);
        assert_eq!(
            blocks,
            vec![
                MatchingBlock { a: 0, b: 0, len: 6 },
                MatchingBlock { a: 6, b: 6, len: 0 },
            ]
        );
    }

    #[test]
    fn disjoint_sequences_only_sentinel() {
        let a = chars("abc");
        let b = chars("xyz");
        assert_eq!(
            matching_blocks(&a, &b),
            vec![MatchingBlock { a: 3, b: 3, len: 0 }]
        );
    }

    #[test]
    fn empty_inputs_only_sentinel() {
        let blocks = matching_blocks(&[], &chars("abc"));
        assert_eq!(blocks, vec![MatchingBlock { a: 0, b: 3, len: 0 }]);
    }

    #[test]
    fn split_around_insertion() {
        let a = chars("abxcd");
        let b = chars("abcd");
        assert_eq!(
            matching_blocks(&a, &b),
            vec![
                MatchingBlock { a: 0, b: 0, len: 2 },
                MatchingBlock { a: 3, b: 2, len: 2 },
                MatchingBlock { a: 5, b: 4, len: 0 },
            ]
        );
    }

    #[test]
    fn substring_alignment() {
        let a = chars("bcd");
        let b = chars("abcde");
        assert_eq!(
            matching_blocks(&a, &b),
            vec![
                MatchingBlock { a: 0, b: 1, len: 3 },
                MatchingBlock { a: 3, b: 5, len: 0 },
            ]
        );
    }

    #[test]
    fn adjacent_blocks_are_merged() {
        // A single common run must never be reported as two touching blocks.
        let a = chars("abcd");
        let b = chars("abcd");
        let blocks = matching_blocks(&a, &b);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].len, 4);
    }

    #[test]
    fn total_matched_sums_block_lengths() {
        let a = chars("abxcd");
        let b = chars("abcd");
        assert_eq!(total_matched(&matching_blocks(&a, &b)), 4);
    }

    #[test]
    fn earliest_longest_match_wins() {
        // "ab" appears twice in b; the earliest occurrence is chosen.
        let a = chars("ab");
        let b = chars("abab");
        let blocks = matching_blocks(&a, &b);
        assert_eq!(blocks[0], MatchingBlock { a: 0, b: 0, len: 2 });
    }

    #[test]
    fn unicode_code_point_offsets() {
        let a = chars("\u{1f600}xy");
        let b = chars("zz\u{1f600}xy");
        let blocks = matching_blocks(&a, &b);
        assert_eq!(blocks[0], MatchingBlock { a: 0, b: 2, len: 3 });
    }
}
