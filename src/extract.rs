//! Ranking pipeline: score every candidate against a query and return the
//! best matches.
//!
//! The pipeline is a linear scan. A query is prepared once, each candidate is
//! processed and scored, scores strictly above the cutoff are retained, and
//! the retained results are returned top-K (partial selection), fully sorted,
//! or in scan order depending on configuration. [`extract_iter`] exposes the
//! same scan as a lazy iterator for cooperative scheduling.

use std::borrow::Cow;
use std::collections::BTreeSet;

use thiserror::Error;

use crate::composite::wratio;
use crate::options::ScoreOptions;
use crate::process::prepare;
use crate::ratio::{partial_ratio_unrounded, ratio_unrounded};
use crate::token::{sorted_token_join, token_set_score, word_set};

/// Errors reported by the ranking pipeline.
///
/// These are caller contract violations and fail fast, before any candidate
/// is scored. Empty strings are never an error: they score 0 through the
/// validation short-circuit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// The candidate collection contained no elements.
    #[error("candidate collection is empty")]
    EmptyCandidates,
}

/// Scoring strategy applied by the ranking pipeline.
///
/// The builtin kinds are tagged explicitly so the pipeline can precompute the
/// query's canonical form once per call (token-sorted string or token set)
/// instead of once per candidate. [`Scorer::Custom`] is opaque: the pipeline
/// passes the raw query and raw candidate text straight through and the
/// callable is fully responsible for its own normalization.
#[derive(Default)]
pub enum Scorer {
    /// Plain full-string ratio (the default).
    #[default]
    Ratio,
    /// Best-window substring ratio.
    PartialRatio,
    /// Ratio over token-sorted strings.
    TokenSort,
    /// Partial ratio over token-sorted strings.
    PartialTokenSort,
    /// Best pairing of token-set comparison strings.
    TokenSet,
    /// Token-set comparison scored with partial ratio.
    PartialTokenSet,
    /// Weighted composite of the above.
    WRatio,
    /// Caller-supplied scorer of shape `(query, candidate) -> score`.
    Custom(Box<dyn Fn(&str, &str) -> u32 + Send + Sync>),
}

impl std::fmt::Debug for Scorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Scorer::Ratio => "Ratio",
            Scorer::PartialRatio => "PartialRatio",
            Scorer::TokenSort => "TokenSort",
            Scorer::PartialTokenSort => "PartialTokenSort",
            Scorer::TokenSet => "TokenSet",
            Scorer::PartialTokenSet => "PartialTokenSet",
            Scorer::WRatio => "WRatio",
            Scorer::Custom(_) => "Custom(..)",
        };
        f.write_str(name)
    }
}

/// One retained candidate from a slice-shaped extraction.
#[derive(Debug)]
pub struct SearchResult<'a, T> {
    /// The original, unmodified candidate.
    pub item: &'a T,
    /// Similarity score in `0..=100`.
    pub score: u32,
    /// The candidate's index in the input slice.
    pub index: usize,
}

// Hand-written instead of derived: the fields only hold a reference, so the
// impls must not require `T: Copy` / `T: Clone`.
impl<T> Clone for SearchResult<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SearchResult<'_, T> {}

impl<T: PartialEq> PartialEq for SearchResult<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.score == other.score && self.item == other.item
    }
}

impl<T: Eq> Eq for SearchResult<'_, T> {}

/// One retained candidate from a map-shaped extraction.
#[derive(Debug)]
pub struct MapSearchResult<'a, K, V> {
    /// The original, unmodified candidate value.
    pub item: &'a V,
    /// Similarity score in `0..=100`.
    pub score: u32,
    /// The candidate's key in the input map.
    pub key: &'a K,
}

impl<K, V> Clone for MapSearchResult<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for MapSearchResult<'_, K, V> {}

impl<K: PartialEq, V: PartialEq> PartialEq for MapSearchResult<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.score == other.score && self.item == other.item
    }
}

impl<K: Eq, V: Eq> Eq for MapSearchResult<'_, K, V> {}

/// Ranking pipeline configuration.
///
/// Built in the options style: construct with [`Extractor::default`] and
/// override fields, or chain the builder methods.
///
/// # Defaults
///
/// - `scorer`: [`Scorer::Ratio`]
/// - `options`: [`ScoreOptions::default`]
/// - `cutoff`: `-1` — scores must be strictly greater, so 0 is retained
/// - `limit`: `None` (return everything retained)
/// - `unsorted`: `false`
///
/// # Examples
///
/// ```
/// use fuzzrank::{Extractor, Scorer};
///
/// let extractor = Extractor::default().scorer(Scorer::WRatio).limit(5).cutoff(50);
/// let results = extractor
///     .extract_strs("apple", &["apple", "appel", "banana"])
///     .unwrap();
/// assert_eq!(results[0].item, &"apple");
/// assert_eq!(results[0].score, 100);
/// ```
#[derive(Debug)]
pub struct Extractor {
    /// Scoring strategy.
    pub scoring: Scorer,
    /// Scoring options passed to every builtin scorer invocation.
    pub options: ScoreOptions,
    /// Inclusive-exclusive lower bound: a candidate is retained only when its
    /// score is strictly greater than this value.
    pub score_cutoff: i64,
    /// Maximum number of results to return, best-first. `None` returns all.
    pub result_limit: Option<usize>,
    /// Skip ranking entirely and return retained results in scan order.
    pub scan_order: bool,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            scoring: Scorer::default(),
            options: ScoreOptions::default(),
            // -1, not 0: retention is strictly-greater, and 0-scoring
            // candidates must survive the default configuration.
            score_cutoff: -1,
            result_limit: None,
            scan_order: false,
        }
    }
}

impl Extractor {
    /// Set the scoring strategy.
    pub fn scorer(mut self, scorer: Scorer) -> Self {
        self.scoring = scorer;
        self
    }

    /// Set the scoring options.
    pub fn options(mut self, options: ScoreOptions) -> Self {
        self.options = options;
        self
    }

    /// Retain only scores strictly greater than `cutoff`.
    pub fn cutoff(mut self, cutoff: i64) -> Self {
        self.score_cutoff = cutoff;
        self
    }

    /// Return at most `limit` results, best-first.
    pub fn limit(mut self, limit: usize) -> Self {
        self.result_limit = Some(limit);
        self
    }

    /// Return retained results in scan order, skipping selection and sorting.
    pub fn unsorted(mut self) -> Self {
        self.scan_order = true;
        self
    }

    /// Rank `candidates` against `query`, extracting each candidate's text
    /// with `processor`.
    ///
    /// Fails with [`ExtractError::EmptyCandidates`] when the slice is empty.
    /// Ties between equal scores break arbitrarily; with a `limit`, exactly
    /// `limit` results are returned whenever at least that many candidates
    /// pass the cutoff.
    pub fn extract<'a, T, F>(
        &self,
        query: &str,
        candidates: &'a [T],
        processor: F,
    ) -> Result<Vec<SearchResult<'a, T>>, ExtractError>
    where
        F: for<'b> Fn(&'b T) -> Cow<'b, str>,
    {
        if candidates.is_empty() {
            return Err(ExtractError::EmptyCandidates);
        }

        let prepared = PreparedQuery::new(query, &self.scoring, &self.options);
        tracing::debug!(candidates = candidates.len(), scorer = ?self.scoring, "extract scan");

        let mut results: Vec<SearchResult<'a, T>> = Vec::new();
        for (index, item) in candidates.iter().enumerate() {
            let text = processor(item);
            let score = prepared.score(&text, &self.scoring, &self.options);
            if i64::from(score) > self.score_cutoff {
                results.push(SearchResult { item, score, index });
            }
        }

        Ok(self.finish(results))
    }

    /// [`extract`](Self::extract) for candidates that are already string-like.
    pub fn extract_strs<'a, T: AsRef<str>>(
        &self,
        query: &str,
        candidates: &'a [T],
    ) -> Result<Vec<SearchResult<'a, T>>, ExtractError> {
        self.extract(query, candidates, |item| Cow::Borrowed(item.as_ref()))
    }

    /// Rank the values of a key-value collection against `query`.
    ///
    /// Accepts anything iterable as `(key, value)` pairs (e.g.
    /// `HashMap::iter`, `BTreeMap::iter`); the result carries the original
    /// key. Scan order is the collection's iteration order, which for hash
    /// maps makes the `unsorted` output order unspecified.
    pub fn extract_map<'a, K, V, I, F>(
        &self,
        query: &str,
        candidates: I,
        processor: F,
    ) -> Result<Vec<MapSearchResult<'a, K, V>>, ExtractError>
    where
        I: IntoIterator<Item = (&'a K, &'a V)>,
        K: 'a,
        V: 'a,
        F: for<'b> Fn(&'b V) -> Cow<'b, str>,
    {
        let prepared = PreparedQuery::new(query, &self.scoring, &self.options);

        let mut scanned = 0usize;
        let mut results: Vec<MapSearchResult<'a, K, V>> = Vec::new();
        for (key, item) in candidates {
            scanned += 1;
            let text = processor(item);
            let score = prepared.score(&text, &self.scoring, &self.options);
            if i64::from(score) > self.score_cutoff {
                results.push(MapSearchResult { item, score, key });
            }
        }
        if scanned == 0 {
            return Err(ExtractError::EmptyCandidates);
        }

        Ok(self.finish_map(results))
    }

    /// Rank and return only the single best match, or `None` when nothing
    /// passes the cutoff.
    pub fn extract_one<'a, T: AsRef<str>>(
        &self,
        query: &str,
        candidates: &'a [T],
    ) -> Result<Option<SearchResult<'a, T>>, ExtractError> {
        if candidates.is_empty() {
            return Err(ExtractError::EmptyCandidates);
        }
        let prepared = PreparedQuery::new(query, &self.scoring, &self.options);

        let mut best: Option<SearchResult<'a, T>> = None;
        for (index, item) in candidates.iter().enumerate() {
            let score = prepared.score(item.as_ref(), &self.scoring, &self.options);
            if i64::from(score) > self.score_cutoff
                && best.as_ref().is_none_or(|b| score > b.score)
            {
                best = Some(SearchResult { item, score, index });
            }
        }
        Ok(best)
    }

    /// Lazily score candidates one at a time.
    ///
    /// The returned iterator performs the same scan as
    /// [`extract`](Self::extract) with `unsorted` semantics: candidates are
    /// scored in index order and retained results are yielded as they are
    /// found. Each `next()` call scores at least one candidate, so a caller's
    /// cooperative scheduler can interleave other work between candidates.
    /// No ordering is applied; collecting the iterator equals an unsorted
    /// extraction.
    pub fn extract_iter<'a, 'e, T, F>(
        &'e self,
        query: &str,
        candidates: &'a [T],
        processor: F,
    ) -> ScoredIter<'a, 'e, T, F>
    where
        F: for<'b> Fn(&'b T) -> Cow<'b, str>,
    {
        ScoredIter {
            prepared: PreparedQuery::new(query, &self.scoring, &self.options),
            candidates: candidates.iter().enumerate(),
            processor,
            extractor: self,
        }
    }

    /// Apply selection/sorting policy to retained slice results.
    fn finish<'a, T>(&self, mut results: Vec<SearchResult<'a, T>>) -> Vec<SearchResult<'a, T>> {
        if self.scan_order {
            return results;
        }
        match self.result_limit {
            Some(0) => Vec::new(),
            Some(limit) if limit < results.len() => {
                // Partial selection: place the top `limit` entries in front
                // without fully sorting the tail, then order just the front.
                results.select_nth_unstable_by(limit - 1, |x, y| y.score.cmp(&x.score));
                results.truncate(limit);
                results.sort_unstable_by(|x, y| y.score.cmp(&x.score));
                results
            }
            _ => {
                results.sort_by(|x, y| y.score.cmp(&x.score));
                results
            }
        }
    }

    fn finish_map<'a, K, V>(
        &self,
        mut results: Vec<MapSearchResult<'a, K, V>>,
    ) -> Vec<MapSearchResult<'a, K, V>> {
        if self.scan_order {
            return results;
        }
        match self.result_limit {
            Some(0) => Vec::new(),
            Some(limit) if limit < results.len() => {
                results.select_nth_unstable_by(limit - 1, |x, y| y.score.cmp(&x.score));
                results.truncate(limit);
                results.sort_unstable_by(|x, y| y.score.cmp(&x.score));
                results
            }
            _ => {
                results.sort_by(|x, y| y.score.cmp(&x.score));
                results
            }
        }
    }
}

/// Query state prepared once per extraction call.
///
/// For the token strategies the query's canonical form (token-sorted string
/// or token set) is computed here, exactly once, and reused for every
/// candidate. For a custom scorer the raw query is kept untouched.
pub(crate) enum PreparedQuery {
    Plain(Vec<char>),
    TokenSorted(Vec<char>),
    Tokens(BTreeSet<String>),
    Full(String),
    Raw(String),
}

impl PreparedQuery {
    pub(crate) fn new(query: &str, scorer: &Scorer, opts: &ScoreOptions) -> Self {
        match scorer {
            Scorer::Ratio | Scorer::PartialRatio => {
                Self::Plain(prepare(query, opts).chars().collect())
            }
            Scorer::TokenSort | Scorer::PartialTokenSort => {
                Self::TokenSorted(sorted_token_join(&prepare(query, opts)).chars().collect())
            }
            Scorer::TokenSet | Scorer::PartialTokenSet => {
                Self::Tokens(word_set(&prepare(query, opts)))
            }
            // WRatio preprocesses internally; hand it the processed query so
            // the work still happens once per call.
            Scorer::WRatio => Self::Full(prepare(query, opts).into_owned()),
            Scorer::Custom(_) => Self::Raw(query.to_owned()),
        }
    }

    pub(crate) fn score(&self, candidate: &str, scorer: &Scorer, opts: &ScoreOptions) -> u32 {
        let inner = opts.preprocessed();
        match (self, scorer) {
            (Self::Plain(q), Scorer::Ratio) => {
                let c: Vec<char> = prepare(candidate, opts).chars().collect();
                ratio_unrounded(q, &c, &inner).round() as u32
            }
            (Self::Plain(q), Scorer::PartialRatio) => {
                let c: Vec<char> = prepare(candidate, opts).chars().collect();
                partial_ratio_unrounded(q, &c, &inner).round() as u32
            }
            (Self::TokenSorted(q), Scorer::TokenSort) => {
                let c: Vec<char> = sorted_token_join(&prepare(candidate, opts)).chars().collect();
                ratio_unrounded(q, &c, &inner).round() as u32
            }
            (Self::TokenSorted(q), Scorer::PartialTokenSort) => {
                let c: Vec<char> = sorted_token_join(&prepare(candidate, opts)).chars().collect();
                partial_ratio_unrounded(q, &c, &inner).round() as u32
            }
            (Self::Tokens(q), Scorer::TokenSet) => {
                let c = word_set(&prepare(candidate, opts));
                token_set_score(q, &c, false, &inner).round() as u32
            }
            (Self::Tokens(q), Scorer::PartialTokenSet) => {
                let c = word_set(&prepare(candidate, opts));
                token_set_score(q, &c, true, &inner).round() as u32
            }
            (Self::Full(q), Scorer::WRatio) => {
                let c = prepare(candidate, opts);
                wratio(q, &c, &inner)
            }
            (Self::Raw(q), Scorer::Custom(f)) => f(q, candidate),
            // PreparedQuery is always built from the same scorer it is
            // scored with; the arms above are exhaustive in practice.
            _ => unreachable!("prepared query does not match scorer kind"),
        }
    }
}

/// Lazy scoring iterator returned by [`Extractor::extract_iter`].
pub struct ScoredIter<'a, 'e, T, F> {
    prepared: PreparedQuery,
    candidates: std::iter::Enumerate<std::slice::Iter<'a, T>>,
    processor: F,
    extractor: &'e Extractor,
}

impl<'a, T, F> Iterator for ScoredIter<'a, '_, T, F>
where
    F: for<'b> Fn(&'b T) -> Cow<'b, str>,
{
    type Item = SearchResult<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, item) in self.candidates.by_ref() {
            let text = (self.processor)(item);
            let score = self
                .prepared
                .score(&text, &self.extractor.scoring, &self.extractor.options);
            if i64::from(score) > self.extractor.score_cutoff {
                return Some(SearchResult { item, score, index });
            }
        }
        None
    }
}

/// Collapse near-duplicate strings to canonical representatives.
///
/// For each candidate, every candidate scoring at or above `threshold`
/// against it (with the extractor's scorer) forms a duplicate group; the
/// longest member (ties: first scanned) represents the group. Returns unique
/// representatives in first-appearance order.
///
/// # Examples
///
/// ```
/// use fuzzrank::{dedupe, Extractor, Scorer};
///
/// let items = ["frodo baggins", "frodo baggin", "samwise gamgee"];
/// let extractor = Extractor::default().scorer(Scorer::TokenSet);
/// let unique = dedupe(&items, 70, &extractor);
/// assert_eq!(unique, vec![&"frodo baggins", &"samwise gamgee"]);
/// ```
pub fn dedupe<'a, T: AsRef<str>>(
    candidates: &'a [T],
    threshold: u32,
    extractor: &Extractor,
) -> Vec<&'a T> {
    let mut representatives: Vec<&'a T> = Vec::new();

    for item in candidates {
        let prepared = PreparedQuery::new(item.as_ref(), &extractor.scoring, &extractor.options);
        // Group = this item plus everything scoring at or above threshold.
        let mut group: Vec<&'a T> = candidates
            .iter()
            .filter(|other| {
                prepared.score(other.as_ref(), &extractor.scoring, &extractor.options) >= threshold
            })
            .collect();
        group.sort_by(|a, b| {
            b.as_ref()
                .chars()
                .count()
                .cmp(&a.as_ref().chars().count())
        });
        let representative = group.first().copied().unwrap_or(item);

        if !representatives
            .iter()
            .any(|r| std::ptr::eq(*r as *const T, representative as *const T))
        {
            representatives.push(representative);
        }
    }

    representatives
}
