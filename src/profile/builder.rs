use crate::locale::Locale;
use crate::ngram::{GramCounts, NgramExtractor};
use crate::profile::LanguageProfile;

/// Accumulates gram counts for one language, then freezes them into a
/// [`LanguageProfile`]
///
/// Not meant to be shared between threads while texts are being added.
///
/// # Example
/// ```
/// use langgram::{Locale, NgramExtractor, ProfileBuilder};
///
/// let mut builder = ProfileBuilder::new(Locale::parse("en").unwrap())
///     .extractor(NgramExtractor::new([1, 2]).unwrap());
/// builder.add_text("hello").add_text("help");
///
/// let profile = builder.build();
/// assert_eq!(profile.frequency("he"), 2);
/// assert_eq!(profile.frequency("l"), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    locale: Locale,
    extractor: NgramExtractor,
    min_frequency: u64,
    counts: GramCounts,
}

impl ProfileBuilder {
    /// New builder using the standard extractor and no frequency cutoff
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            extractor: NgramExtractor::standard(),
            min_frequency: 1,
            counts: GramCounts::new(),
        }
    }

    /// Extractor applied by [`add_text`](Self::add_text)
    pub fn extractor(mut self, extractor: NgramExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Grams seen fewer than `min_frequency` times are dropped at build time.
    /// 0 and 1 both mean no cutoff: every gram seen at least once is kept.
    pub fn min_frequency(mut self, min_frequency: u64) -> Self {
        self.min_frequency = min_frequency.max(1);
        self
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn gram_extractor(&self) -> &NgramExtractor {
        &self.extractor
    }

    /// Empty builder with the same locale, extractor and cutoff
    pub fn fork(&self) -> Self {
        Self {
            locale: self.locale.clone(),
            extractor: self.extractor.clone(),
            min_frequency: self.min_frequency,
            counts: GramCounts::new(),
        }
    }

    /// Count the grams of `text`. O(len × number of gram lengths).
    pub fn add_text(&mut self, text: &str) -> &mut Self {
        self.extractor.add_counted_grams(text, &mut self.counts);
        self
    }

    pub fn add_gram(&mut self, gram: &str) -> &mut Self {
        self.add_gram_count(gram, 1)
    }

    pub fn add_gram_count(&mut self, gram: &str, count: u64) -> &mut Self {
        if !gram.is_empty() && count > 0 {
            *self.counts.entry(gram.to_string()).or_insert(0) += count;
        }
        self
    }

    /// Distinct grams counted so far (before the cutoff)
    pub fn num_grams(&self) -> usize {
        self.counts.len()
    }

    pub fn build(self) -> LanguageProfile {
        let min_frequency = self.min_frequency;
        let before = self.counts.len();
        let kept: Vec<(String, u64)> = self
            .counts
            .into_iter()
            .filter(|(_, count)| *count >= min_frequency)
            .collect();

        tracing::debug!(
            "Built profile {}: kept {} of {} grams (min frequency {})",
            self.locale,
            kept.len(),
            before,
            min_frequency
        );

        LanguageProfile::from_counts(self.locale, kept)
    }
}
