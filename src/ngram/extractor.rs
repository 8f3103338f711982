use crate::ngram::filter::GramFilter;
use crate::ngram::legacy::{for_each_legacy_gram, LEGACY_MAX_GRAM_LENGTH};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Gram -> occurrence count
pub type GramCounts = HashMap<String, u64>;

/// Errors raised while configuring an extractor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    #[error("Invalid gram length: {0} (must be >= 1)")]
    InvalidGramLength(usize),

    #[error("No gram lengths configured")]
    NoGramLengths,

    #[error("Legacy extraction supports gram lengths up to {max}, got {0}", max = LEGACY_MAX_GRAM_LENGTH)]
    LegacyGramLength(usize),
}

/// Which extraction algorithm to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Sliding window per length with symmetric padding
    #[default]
    Standard,

    /// Historical word-local extractor (leading pad only, max length 3)
    Legacy,
}

/// Extracts character N-grams from normalized text
///
/// The extractor holds no mutable state: build one, then share it freely
/// between profile builders, detectors and the validation harness.
///
/// # Example
/// ```
/// use langgram::NgramExtractor;
///
/// let extractor = NgramExtractor::gram_length(2).unwrap();
/// assert_eq!(
///     extractor.extract_grams("Foo bar"),
///     vec!["Fo", "oo", "o ", " b", "ba", "ar"]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct NgramExtractor {
    /// Ascending, de-duplicated
    gram_lengths: Vec<usize>,
    padding: Option<char>,
    filter: GramFilter,
    mode: ExtractionMode,
}

impl NgramExtractor {
    /// Create an extractor for the given gram lengths (no padding, no filter)
    pub fn new(gram_lengths: impl IntoIterator<Item = usize>) -> Result<Self, ExtractorError> {
        let mut lengths: Vec<usize> = gram_lengths.into_iter().collect();
        if lengths.is_empty() {
            return Err(ExtractorError::NoGramLengths);
        }
        if let Some(&bad) = lengths.iter().find(|&&n| n == 0) {
            return Err(ExtractorError::InvalidGramLength(bad));
        }
        lengths.sort_unstable();
        lengths.dedup();

        Ok(Self {
            gram_lengths: lengths,
            padding: None,
            filter: GramFilter::None,
            mode: ExtractionMode::Standard,
        })
    }

    /// Create an extractor for a single gram length
    pub fn gram_length(n: usize) -> Result<Self, ExtractorError> {
        Self::new([n])
    }

    /// Lengths 1, 2 and 3, space padding, standard filter
    pub fn standard() -> Self {
        Self {
            gram_lengths: vec![1, 2, 3],
            padding: Some(' '),
            filter: GramFilter::Standard,
            mode: ExtractionMode::Standard,
        }
    }

    /// The historical extractor (lengths 1, 2 and 3)
    pub fn legacy() -> Self {
        Self {
            gram_lengths: vec![1, 2, 3],
            padding: Some(' '),
            filter: GramFilter::None,
            mode: ExtractionMode::Legacy,
        }
    }

    /// Pad the text with `pad` at both ends before windowing
    pub fn with_padding(mut self, pad: char) -> Self {
        self.padding = Some(pad);
        self
    }

    /// Apply `filter` to every candidate gram
    pub fn with_filter(mut self, filter: GramFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Switch algorithm. Padding and filter are ignored in legacy mode,
    /// which also rejects lengths above [`LEGACY_MAX_GRAM_LENGTH`].
    pub fn with_mode(mut self, mode: ExtractionMode) -> Result<Self, ExtractorError> {
        if mode == ExtractionMode::Legacy {
            if let Some(&bad) = self
                .gram_lengths
                .iter()
                .find(|&&n| n > LEGACY_MAX_GRAM_LENGTH)
            {
                return Err(ExtractorError::LegacyGramLength(bad));
            }
        }
        self.mode = mode;
        Ok(self)
    }

    pub fn gram_lengths(&self) -> &[usize] {
        &self.gram_lengths
    }

    pub fn padding(&self) -> Option<char> {
        self.padding
    }

    pub fn filter(&self) -> GramFilter {
        self.filter
    }

    pub fn mode(&self) -> ExtractionMode {
        self.mode
    }

    /// Number of grams the standard algorithm yields for a text of
    /// `text_len` characters, before filtering
    pub fn expected_gram_count(&self, text_len: usize) -> usize {
        if text_len == 0 {
            return 0;
        }
        let padded = text_len + if self.padding.is_some() { 2 } else { 0 };
        self.gram_lengths
            .iter()
            .map(|&n| (padded + 1).saturating_sub(n))
            .sum()
    }

    /// Extract all grams in order of occurrence, duplicates kept
    ///
    /// Grams are grouped by length (ascending), each group in text order.
    pub fn extract_grams(&self, text: &str) -> Vec<String> {
        let mut grams = Vec::with_capacity(self.expected_gram_count(text.len()));
        self.for_each_gram(text, |gram| grams.push(gram));
        grams
    }

    /// Extract grams and tally them
    ///
    /// Grams of different lengths never collide: "a" and "ab" are distinct
    /// keys, so results for several lengths coexist in one map.
    pub fn extract_counted_grams(&self, text: &str) -> GramCounts {
        let mut counts = GramCounts::new();
        self.add_counted_grams(text, &mut counts);
        counts
    }

    /// Tally the grams of `text` into an existing map
    pub fn add_counted_grams(&self, text: &str, counts: &mut GramCounts) {
        self.for_each_gram(text, |gram| *counts.entry(gram).or_insert(0) += 1);
    }

    fn for_each_gram(&self, text: &str, mut emit: impl FnMut(String)) {
        if text.is_empty() {
            return;
        }

        match self.mode {
            ExtractionMode::Legacy => for_each_legacy_gram(text, &self.gram_lengths, emit),
            ExtractionMode::Standard => {
                let mut chars: Vec<char> = Vec::with_capacity(text.len() + 2);
                if let Some(pad) = self.padding {
                    chars.push(pad);
                }
                chars.extend(text.chars());
                if let Some(pad) = self.padding {
                    chars.push(pad);
                }

                for &n in &self.gram_lengths {
                    if n > chars.len() {
                        continue;
                    }
                    for window in chars.windows(n) {
                        let gram: String = window.iter().collect();
                        if self.filter.accepts(&gram) {
                            emit(gram);
                        }
                    }
                }
            }
        }
    }
}
