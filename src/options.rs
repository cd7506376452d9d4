//! Configuration options for scoring calls.
//!
//! [`ScoreOptions`] is an immutable-per-call configuration bag consumed by the
//! distance engine, the ratio family, and the token strategies.

/// Selects which backend computes the 0-100 ratio.
///
/// Downstream components (token strategies, the composite scorer, the ranking
/// pipeline) treat both backends as interchangeable: either way the result is
/// a similarity score in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RatioAlg {
    /// Edit-distance based ratio: `round(100 * (lensum - distance) / lensum)`
    /// with substitution cost 2 by default.
    #[default]
    Distance,
    /// Block-matching ratio: `round(100 * 2 * matched / lensum)` where
    /// `matched` is the total length of all matching blocks.
    BlockMatch,
}

/// Per-call scoring configuration.
///
/// # Defaults
///
/// - `full_process`: `true` (lowercase, collapse non-alphanumeric runs, trim)
/// - `force_ascii`: `true` (strip non-ASCII characters during preprocessing)
/// - `subcost`: `None` (the distance engine uses 1, the ratio family uses 2)
/// - `use_collator`: `false` (raw code-point equality)
/// - `normalize`: `false` (no NFC normalization before comparison)
/// - `ratio_alg`: [`RatioAlg::Distance`]
///
/// # Examples
///
/// ```
/// use fuzzrank::{RatioAlg, ScoreOptions};
///
/// let opts = ScoreOptions::default();
/// assert!(opts.full_process);
/// assert!(opts.force_ascii);
/// assert_eq!(opts.subcost, None);
/// assert_eq!(opts.ratio_alg, RatioAlg::Distance);
///
/// // Compare raw strings with the block-matching backend.
/// let opts = ScoreOptions {
///     full_process: false,
///     ratio_alg: RatioAlg::BlockMatch,
///     ..Default::default()
/// };
/// assert!(!opts.full_process);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreOptions {
    /// Apply full preprocessing (lowercase, collapse non-alphanumeric runs to
    /// single spaces, trim) to both inputs before scoring.
    pub full_process: bool,
    /// During preprocessing, strip characters outside the ASCII range instead
    /// of converting them to spaces.
    pub force_ascii: bool,
    /// Substitution cost override for the edit-distance computation. `None`
    /// means the per-family default: 1 for raw distance, 2 for all
    /// ratio-family scores.
    pub subcost: Option<usize>,
    /// Use the built-in diacritic-insensitive collator for character equality
    /// inside the distance engine, instead of raw code-point equality.
    pub use_collator: bool,
    /// NFC-normalize both inputs before any other processing, so that
    /// precomposed and decomposed forms of the same text compare equal.
    pub normalize: bool,
    /// Which backend computes ratio-family scores.
    pub ratio_alg: RatioAlg,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            full_process: true,
            force_ascii: true,
            subcost: None,
            use_collator: false,
            normalize: false,
            ratio_alg: RatioAlg::Distance,
        }
    }
}

impl ScoreOptions {
    /// Effective substitution cost for the raw distance operation.
    pub(crate) fn distance_subcost(&self) -> usize {
        self.subcost.unwrap_or(1)
    }

    /// Effective substitution cost for ratio-family scores.
    pub(crate) fn ratio_subcost(&self) -> usize {
        self.subcost.unwrap_or(2)
    }

    /// A copy of these options with preprocessing disabled, for internal
    /// delegation on strings that have already been preprocessed.
    pub(crate) fn preprocessed(&self) -> Self {
        Self {
            full_process: false,
            normalize: false,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let opts = ScoreOptions::default();
        assert!(opts.full_process);
        assert!(opts.force_ascii);
        assert_eq!(opts.subcost, None);
        assert!(!opts.use_collator);
        assert!(!opts.normalize);
        assert_eq!(opts.ratio_alg, RatioAlg::Distance);
    }

    #[test]
    fn per_family_subcost_defaults() {
        let opts = ScoreOptions::default();
        assert_eq!(opts.distance_subcost(), 1);
        assert_eq!(opts.ratio_subcost(), 2);
    }

    #[test]
    fn subcost_override_applies_to_both_families() {
        let opts = ScoreOptions {
            subcost: Some(3),
            ..Default::default()
        };
        assert_eq!(opts.distance_subcost(), 3);
        assert_eq!(opts.ratio_subcost(), 3);
    }

    #[test]
    fn preprocessed_disables_processing_only() {
        let opts = ScoreOptions {
            use_collator: true,
            normalize: true,
            ratio_alg: RatioAlg::BlockMatch,
            ..Default::default()
        };
        let inner = opts.preprocessed();
        assert!(!inner.full_process);
        assert!(!inner.normalize);
        assert!(inner.use_collator);
        assert_eq!(inner.ratio_alg, RatioAlg::BlockMatch);
    }

    #[test]
    fn clone_produces_equal_value() {
        let opts = ScoreOptions {
            subcost: Some(2),
            ..Default::default()
        };
        assert_eq!(opts.clone(), opts);
    }
}
