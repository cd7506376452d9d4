//! Text preprocessing for the scoring engine.
//!
//! Scoring strategies normalize their inputs through [`full_process`] before
//! comparison: lowercase, collapse runs of non-alphanumeric characters to
//! single spaces, and trim. With `force_ascii`, non-ASCII characters are
//! stripped outright instead of being turned into spaces.

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;

use crate::options::ScoreOptions;

/// Normalize a string for fuzzy comparison.
///
/// Every maximal run of non-alphanumeric characters becomes a single space,
/// alphabetic characters are lowercased, and leading/trailing separators are
/// dropped. When `force_ascii` is `true`, characters outside the ASCII range
/// are removed before the run collapsing, so `"caf\u{00e9}!"` becomes `"caf"`
/// rather than `"caf "`.
///
/// # Examples
///
/// ```
/// use fuzzrank::full_process;
///
/// assert_eq!(full_process("  Hello,   WORLD! ", true), "hello world");
/// assert_eq!(full_process("new york mets - atlanta", true), "new york mets atlanta");
///
/// // Non-ASCII stripped vs. treated as alphanumeric:
/// assert_eq!(full_process("caf\u{00e9}", true), "caf");
/// assert_eq!(full_process("caf\u{00e9}", false), "caf\u{00e9}");
/// ```
pub fn full_process(text: &str, force_ascii: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if force_ascii && !c.is_ascii() {
            continue;
        }
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            // to_lowercase is an iterator: some characters lowercase to more
            // than one code point.
            for lc in c.to_lowercase() {
                out.push(lc);
            }
        } else {
            pending_space = true;
        }
    }

    out
}

/// NFC-normalize a string, borrowing when it is already in NFC form.
pub(crate) fn nfc_normalize(text: &str) -> Cow<'_, str> {
    if unicode_normalization::is_nfc(text) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.nfc().collect())
    }
}

/// Apply the preprocessing steps selected by `opts` to one input string.
///
/// Order: NFC normalization first (when `opts.normalize`), then full
/// processing (when `opts.full_process`). Returns borrowed input when neither
/// step changes anything.
pub(crate) fn prepare<'a>(text: &'a str, opts: &ScoreOptions) -> Cow<'a, str> {
    let normalized = if opts.normalize {
        nfc_normalize(text)
    } else {
        Cow::Borrowed(text)
    };

    if opts.full_process {
        Cow::Owned(full_process(&normalized, opts.force_ascii))
    } else {
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(full_process("  Hello World  ", true), "hello world");
    }

    #[test]
    fn collapses_punctuation_runs() {
        assert_eq!(full_process("a -- b...c", true), "a b c");
    }

    #[test]
    fn underscores_become_spaces() {
        assert_eq!(full_process("snake_case_word", true), "snake case word");
    }

    #[test]
    fn digits_are_kept() {
        assert_eq!(full_process("route 66!", true), "route 66");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(full_process("", true), "");
    }

    #[test]
    fn punctuation_only_input_becomes_empty() {
        assert_eq!(full_process("!!! ---", true), "");
    }

    #[test]
    fn force_ascii_strips_non_ascii() {
        // The accented e is removed entirely, not replaced by a space, so no
        // token boundary is introduced.
        assert_eq!(full_process("caf\u{00e9}bar", true), "cafbar");
    }

    #[test]
    fn non_ascii_kept_without_force_ascii() {
        assert_eq!(full_process("caf\u{00e9} bar", false), "caf\u{00e9} bar");
    }

    #[test]
    fn idempotent_on_clean_strings() {
        let once = full_process("New York Mets", true);
        assert_eq!(full_process(&once, true), once);
    }

    #[test]
    fn nfc_normalize_borrows_when_already_nfc() {
        let result = nfc_normalize("cafe");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn nfc_normalize_composes_decomposed_input() {
        // 'e' + combining acute -> precomposed e-acute.
        let result = nfc_normalize("cafe\u{0301}");
        assert_eq!(result, "caf\u{00e9}");
        assert!(matches!(result, Cow::Owned(_)));
    }

    #[test]
    fn prepare_respects_full_process_toggle() {
        let opts = ScoreOptions::default();
        assert_eq!(prepare("Hello!", &opts), "hello");

        let raw = ScoreOptions {
            full_process: false,
            ..Default::default()
        };
        assert_eq!(prepare("Hello!", &raw), "Hello!");
    }

    #[test]
    fn prepare_normalizes_before_processing() {
        let opts = ScoreOptions {
            normalize: true,
            force_ascii: false,
            ..Default::default()
        };
        // Decomposed input composes to one alphanumeric char and survives
        // full processing.
        assert_eq!(prepare("e\u{0301}", &opts), "\u{00e9}");
    }
}
