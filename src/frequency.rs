//! Gram -> per-language frequency table
//!
//! Built once from a set of language profiles restricted to chosen gram
//! lengths. Each gram maps to the relative frequency it has in every
//! language that contains it:
//!
//! `frequency = count(gram) / total occurrences of grams of that length`
//!
//! Normalizing per profile keeps languages with large training corpora from
//! dominating languages with small ones.
//!
//! The language order is fixed at construction. Probability vectors and
//! priors elsewhere in the crate are positional arrays indexed by it.

use crate::locale::Locale;
use crate::profile::LanguageProfile;
use fnv::FnvHashMap;
use serde::Serialize;
use std::collections::BTreeSet;

/// Frequency of one gram in one language
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LanguageFrequency {
    /// Position of the language in [`FrequencyTable::languages`]
    pub language: usize,

    /// Relative frequency within that language's profile, in (0, 1]
    pub frequency: f64,
}

/// Immutable lookup table from gram to language frequencies
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    languages: Vec<Locale>,
    gram_lengths: BTreeSet<usize>,
    /// Sparse: only languages containing the gram, ascending by position
    table: FnvHashMap<String, Vec<LanguageFrequency>>,
}

impl FrequencyTable {
    /// Build a table tracking `gram_lengths` over `profiles`
    ///
    /// Language order follows the iteration order of `profiles`. An empty
    /// profile set, or lengths no profile contains, give an empty table
    /// rather than an error.
    ///
    /// # Example
    /// ```
    /// use langgram::{FrequencyTable, Locale, ProfileBuilder};
    ///
    /// let mut en = ProfileBuilder::new(Locale::parse("en").unwrap());
    /// en.add_text("the damage is done");
    /// let mut de = ProfileBuilder::new(Locale::parse("de").unwrap());
    /// de.add_text("adam und der damm");
    /// let profiles = vec![en.build(), de.build()];
    ///
    /// let table = FrequencyTable::new(&profiles, [3]);
    /// assert_eq!(table.probabilities("dam").map(|p| p.len()), Some(2));
    /// assert!(table.probabilities("da").is_none());
    /// ```
    pub fn new<'a>(
        profiles: impl IntoIterator<Item = &'a LanguageProfile>,
        gram_lengths: impl IntoIterator<Item = usize>,
    ) -> Self {
        let gram_lengths: BTreeSet<usize> = gram_lengths.into_iter().filter(|&n| n > 0).collect();
        let mut languages = Vec::new();
        let mut table: FnvHashMap<String, Vec<LanguageFrequency>> = FnvHashMap::default();

        for (index, profile) in profiles.into_iter().enumerate() {
            languages.push(profile.locale().clone());
            for &len in &gram_lengths {
                let total = profile.total_occurrences(len);
                if total == 0 {
                    continue;
                }
                for (gram, count) in profile.grams_of_length(len) {
                    table
                        .entry(gram.to_string())
                        .or_default()
                        .push(LanguageFrequency {
                            language: index,
                            frequency: count as f64 / total as f64,
                        });
                }
            }
        }

        tracing::debug!(
            "Built frequency table: {} languages, {} grams, lengths {:?}",
            languages.len(),
            table.len(),
            gram_lengths
        );

        Self {
            languages,
            gram_lengths,
            table,
        }
    }

    /// Languages in table order
    pub fn languages(&self) -> &[Locale] {
        &self.languages
    }

    /// Language at `position`, agreeing with [`languages`](Self::languages)
    pub fn language_at(&self, position: usize) -> Option<&Locale> {
        self.languages.get(position)
    }

    /// Position of a locale in the table order
    pub fn position_of(&self, locale: &Locale) -> Option<usize> {
        self.languages.iter().position(|l| l == locale)
    }

    pub fn num_languages(&self) -> usize {
        self.languages.len()
    }

    /// Tracked gram lengths, ascending
    pub fn gram_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.gram_lengths.iter().copied()
    }

    /// Number of distinct grams in the table
    pub fn num_grams(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Frequencies of `gram` in the languages that contain it
    ///
    /// Returns `None` if the gram's length is not tracked (even when the same
    /// string exists at another length in some profile) or if no language
    /// contains it. The slice covers only the languages containing the gram.
    pub fn probabilities(&self, gram: &str) -> Option<&[LanguageFrequency]> {
        if !self.gram_lengths.contains(&gram.chars().count()) {
            return None;
        }
        self.table.get(gram).map(Vec::as_slice)
    }

    /// Dense variant of [`probabilities`](Self::probabilities), one entry per
    /// language in table order, 0.0 where the language lacks the gram
    pub fn dense_probabilities(&self, gram: &str) -> Option<Vec<f64>> {
        let sparse = self.probabilities(gram)?;
        let mut dense = vec![0.0; self.languages.len()];
        for entry in sparse {
            dense[entry.language] = entry.frequency;
        }
        Some(dense)
    }
}
