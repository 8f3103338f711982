use crate::locale::Locale;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Errors raised by profile queries with invalid arguments
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Invalid gram length: {0} (must be >= 1)")]
    InvalidGramLength(usize),
}

/// Summary statistics for all grams of one length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GramStats {
    /// Sum of all counts
    pub occurrences: u64,

    /// Count of the rarest gram (1, or more if a cutoff removed rare grams)
    pub min_count: u64,

    /// Count of the most frequent gram
    pub max_count: u64,
}

impl GramStats {
    fn from_counts<'a>(counts: impl Iterator<Item = &'a u64>) -> Self {
        let mut stats: Option<GramStats> = None;
        for &count in counts {
            let s = stats.get_or_insert(GramStats {
                occurrences: 0,
                min_count: count,
                max_count: count,
            });
            s.occurrences += count;
            s.min_count = s.min_count.min(count);
            s.max_count = s.max_count.max(count);
        }
        stats.unwrap_or_default()
    }
}

/// Immutable gram-count profile of one language
///
/// Statistics are computed once at construction. Equality and hashing use
/// the locale and the gram counts only; the statistics are derived from
/// them and never disagree.
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    locale: Locale,
    /// gram length (in chars) -> gram -> count; no empty inner maps
    grams: BTreeMap<usize, BTreeMap<String, u64>>,
    stats: BTreeMap<usize, GramStats>,
}

impl LanguageProfile {
    /// Build a profile from raw gram counts
    ///
    /// Grams are grouped by their length in characters. Empty grams and zero
    /// counts are dropped; repeated grams are summed.
    pub fn from_counts(locale: Locale, counts: impl IntoIterator<Item = (String, u64)>) -> Self {
        let mut grams: BTreeMap<usize, BTreeMap<String, u64>> = BTreeMap::new();
        for (gram, count) in counts {
            let len = gram.chars().count();
            if len == 0 || count == 0 {
                continue;
            }
            *grams.entry(len).or_default().entry(gram).or_insert(0) += count;
        }

        let stats = grams
            .iter()
            .map(|(&len, map)| (len, GramStats::from_counts(map.values())))
            .collect();

        Self {
            locale,
            grams,
            stats,
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Ascending gram lengths that have at least one gram
    pub fn gram_lengths(&self) -> Vec<usize> {
        self.grams.keys().copied().collect()
    }

    /// Count of an exact gram, 0 if absent
    pub fn frequency(&self, gram: &str) -> u64 {
        self.grams
            .get(&gram.chars().count())
            .and_then(|map| map.get(gram))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct grams over all lengths
    pub fn num_grams(&self) -> usize {
        self.grams.values().map(BTreeMap::len).sum()
    }

    /// Number of distinct grams of one length (0 for untracked lengths)
    pub fn num_grams_of_length(&self, gram_length: usize) -> Result<usize, ProfileError> {
        if gram_length == 0 {
            return Err(ProfileError::InvalidGramLength(gram_length));
        }
        Ok(self.grams.get(&gram_length).map_or(0, BTreeMap::len))
    }

    /// Statistics for one length; all zero for untracked lengths
    pub fn stats(&self, gram_length: usize) -> GramStats {
        self.stats.get(&gram_length).copied().unwrap_or_default()
    }

    pub fn total_occurrences(&self, gram_length: usize) -> u64 {
        self.stats(gram_length).occurrences
    }

    pub fn min_count(&self, gram_length: usize) -> u64 {
        self.stats(gram_length).min_count
    }

    pub fn max_count(&self, gram_length: usize) -> u64 {
        self.stats(gram_length).max_count
    }

    /// All (gram, count) pairs, by ascending length then gram
    pub fn grams(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.grams
            .values()
            .flat_map(|map| map.iter().map(|(g, &c)| (g.as_str(), c)))
    }

    /// (gram, count) pairs of one length; empty for untracked lengths
    pub fn grams_of_length(&self, gram_length: usize) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.grams
            .get(&gram_length)
            .into_iter()
            .flat_map(|map| map.iter().map(|(g, &c)| (g.as_str(), c)))
    }
}

impl PartialEq for LanguageProfile {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale && self.grams == other.grams
    }
}

impl Eq for LanguageProfile {}

impl Hash for LanguageProfile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.locale.hash(state);
        self.grams.hash(state);
    }
}

impl fmt::Display for LanguageProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LanguageProfile{{locale={}", self.locale)?;
        for (len, map) in &self.grams {
            write!(f, ",{}-grams={}", len, map.len())?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn de() -> Locale {
        Locale::parse("de").unwrap()
    }

    #[test]
    fn test_stats_from_counts() {
        let profile = LanguageProfile::from_counts(
            de(),
            [
                ("a".to_string(), 5),
                ("b".to_string(), 2),
                ("ab".to_string(), 1),
            ],
        );
        assert_eq!(
            profile.stats(1),
            GramStats {
                occurrences: 7,
                min_count: 2,
                max_count: 5
            }
        );
        assert_eq!(profile.total_occurrences(2), 1);
        assert_eq!(profile.min_count(2), 1);
        assert_eq!(profile.max_count(2), 1);
    }

    #[test]
    fn test_untracked_length_reports_zero() {
        let profile = LanguageProfile::from_counts(de(), [("ab".to_string(), 4)]);
        assert_eq!(profile.stats(3), GramStats::default());
        assert_eq!(profile.num_grams_of_length(3), Ok(0));
        assert_eq!(profile.grams_of_length(3).count(), 0);
        assert_eq!(
            profile.num_grams_of_length(0),
            Err(ProfileError::InvalidGramLength(0))
        );
    }

    #[test]
    fn test_zero_counts_and_empty_grams_dropped() {
        let profile = LanguageProfile::from_counts(
            de(),
            [
                ("".to_string(), 3),
                ("x".to_string(), 0),
                ("y".to_string(), 1),
            ],
        );
        assert_eq!(profile.num_grams(), 1);
        assert_eq!(profile.gram_lengths(), vec![1]);
    }

    #[test]
    fn test_duplicate_grams_are_summed() {
        let profile =
            LanguageProfile::from_counts(de(), [("q".to_string(), 2), ("q".to_string(), 3)]);
        assert_eq!(profile.frequency("q"), 5);
    }

    #[test]
    fn test_display() {
        let profile = LanguageProfile::from_counts(
            de(),
            [("a".to_string(), 1), ("b".to_string(), 1), ("ab".to_string(), 1)],
        );
        assert_eq!(
            profile.to_string(),
            "LanguageProfile{locale=de,1-grams=2,2-grams=1}"
        );
    }
}
