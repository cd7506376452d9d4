#![warn(missing_docs)]

//! A fuzzy string scoring and ranking library.
//!
//! `fuzzrank` compares strings with edit-distance and block-matching ratios,
//! token-order-insensitive strategies, and a weighted composite scorer, and
//! ranks candidate collections against a query with a cutoff/limit pipeline.
//!
//! All scores are integers in `0..=100`; lengths and offsets are counted in
//! Unicode code points. Empty or whitespace-only inputs score 0 rather than
//! erroring.
//!
//! # Examples
//!
//! ```
//! use fuzzrank::{ratio, wratio, Extractor, Scorer, ScoreOptions};
//!
//! let opts = ScoreOptions::default();
//! assert_eq!(ratio("this is a test", "This is a TEST!", &opts), 100);
//! assert_eq!(wratio("mets", "new york mets", &opts), 90);
//!
//! let results = Extractor::default()
//!     .scorer(Scorer::WRatio)
//!     .limit(2)
//!     .extract_strs("new york mets", &["atlanta braves", "new york mets", "ny mets"])
//!     .unwrap();
//! assert_eq!(results[0].item, &"new york mets");
//! ```

/// String preprocessing applied before comparison.
pub mod process;

/// Configuration options for scoring calls.
pub mod options;

/// Edit-distance engine and character collation.
pub mod distance;

/// Longest-matching-block alignment between sequences.
pub mod blocks;

/// Ratio-family scores: full and partial.
pub mod ratio;

/// Token sort and token set strategies.
pub mod token;

/// Composite scorers built from the other strategies.
pub mod composite;

/// Ranking pipeline over candidate collections.
pub mod extract;

// Re-export primary public API types and functions at the crate root.
pub use blocks::{MatchingBlock, matching_blocks};
pub use composite::{qratio, wratio};
pub use distance::{CharCollator, DiacriticInsensitive, distance};
pub use extract::{
    dedupe, ExtractError, Extractor, MapSearchResult, ScoredIter, Scorer, SearchResult,
};
pub use options::{RatioAlg, ScoreOptions};
pub use process::full_process;
pub use ratio::{partial_ratio, ratio};
pub use token::{
    partial_token_set_ratio, partial_token_sort_ratio, token_set_ratio, token_sort_ratio,
};
