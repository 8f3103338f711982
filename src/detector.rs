//! Naive Bayes language detector over a frequency table
//!
//! The reference [`Classifier`] used by cross-validation. Grams are sampled
//! at random from the text; each sample multiplies every language's weight
//! by `alpha / base_frequency + frequency(gram, language)`. Weights are
//! renormalized every few samples and a trial stops once one language holds
//! more than `convergence_threshold` of the mass. Several trials with a
//! jittered smoothing constant are averaged.
//!
//! Foundation:
//! Shuyo, N. (2010). Language Detection Library for Java.
//! Seeded sampling makes results reproducible for a given configuration.

use crate::config::ConfigError;
use crate::frequency::FrequencyTable;
use crate::locale::Locale;
use crate::ngram::NgramExtractor;
use crate::probability::{format_weights, normalize_unchecked, prior_vector, ProbabilityError};
use crate::profile::LanguageProfile;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Weights are renormalized (and convergence checked) every this many samples
const NORMALIZE_INTERVAL: usize = 5;

/// Anything that can turn text into a probability distribution over languages
pub trait Classifier {
    fn classify(&self, text: &str) -> Detection;
}

/// A language and the probability assigned to it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedLanguage {
    pub locale: Locale,
    pub probability: f64,
}

/// Classifier output, sorted by descending probability
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Detection {
    languages: Vec<DetectedLanguage>,
}

impl Detection {
    /// Wrap results; sorts by descending probability
    pub fn new(mut languages: Vec<DetectedLanguage>) -> Self {
        languages.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        Self { languages }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn languages(&self) -> &[DetectedLanguage] {
        &self.languages
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Most probable language
    pub fn best(&self) -> Option<&DetectedLanguage> {
        self.languages.first()
    }

    /// Probability of an exact locale
    pub fn probability_of(&self, locale: &Locale) -> Option<f64> {
        self.languages
            .iter()
            .find(|d| &d.locale == locale)
            .map(|d| d.probability)
    }

    /// Probability of the first result whose language code matches,
    /// ignoring script and region
    pub fn probability_of_language(&self, language: &str) -> Option<f64> {
        self.languages
            .iter()
            .find(|d| d.locale.language() == language)
            .map(|d| d.probability)
    }
}

/// Tuning knobs for [`NaiveBayesDetector`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Additive smoothing constant
    pub alpha: f64,

    /// Standard deviation of the per-trial gaussian jitter on `alpha`
    pub alpha_width: f64,

    /// Number of independent sampling trials averaged together
    pub trials: usize,

    /// Maximum samples per trial
    pub iteration_limit: usize,

    /// A trial stops once the leading language exceeds this probability
    pub convergence_threshold: f64,

    /// Divisor turning `alpha` into the per-sample smoothing weight
    pub base_frequency: f64,

    /// Results at or below this probability are dropped
    pub min_probability: f64,

    /// RNG seed for gram sampling and alpha jitter
    pub seed: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            alpha_width: 0.05,
            trials: 7,
            iteration_limit: 10_000,
            convergence_threshold: 0.99999,
            base_frequency: 10_000.0,
            min_probability: 0.0,
            seed: 0,
        }
    }
}

impl DetectorConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(format!("alpha must be positive, got {}", self.alpha));
        }
        if !(self.alpha_width.is_finite() && self.alpha_width >= 0.0) {
            return Err(format!(
                "alpha_width must be non-negative, got {}",
                self.alpha_width
            ));
        }
        if self.trials == 0 {
            return Err("trials must be >= 1, got 0".to_string());
        }
        if self.iteration_limit == 0 {
            return Err("iteration_limit must be >= 1, got 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.convergence_threshold) {
            return Err(format!(
                "convergence_threshold must be in [0, 1], got {}",
                self.convergence_threshold
            ));
        }
        if !(self.base_frequency.is_finite() && self.base_frequency > 0.0) {
            return Err(format!(
                "base_frequency must be positive, got {}",
                self.base_frequency
            ));
        }
        if !(0.0..1.0).contains(&self.min_probability) {
            return Err(format!(
                "min_probability must be in [0, 1), got {}",
                self.min_probability
            ));
        }
        Ok(())
    }
}

/// Detector over a frequency table built from language profiles
///
/// Immutable after construction; `classify` takes `&self`, so one detector
/// can serve many threads.
#[derive(Debug, Clone)]
pub struct NaiveBayesDetector {
    table: FrequencyTable,
    extractor: NgramExtractor,
    config: DetectorConfig,
    prior: Option<Vec<f64>>,
}

impl NaiveBayesDetector {
    /// Build a detector tracking the extractor's gram lengths
    pub fn new(
        profiles: &[LanguageProfile],
        extractor: NgramExtractor,
        config: DetectorConfig,
    ) -> Result<Self, ConfigError> {
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(Self::from_validated(profiles, extractor, config))
    }

    /// Same as [`new`](Self::new) for a configuration already validated
    pub(crate) fn from_validated(
        profiles: &[LanguageProfile],
        extractor: NgramExtractor,
        config: DetectorConfig,
    ) -> Self {
        let table = FrequencyTable::new(profiles, extractor.gram_lengths().iter().copied());
        Self {
            table,
            extractor,
            config,
            prior: None,
        }
    }

    /// Bias detection towards the given languages
    pub fn with_prior(mut self, weighting: &HashMap<Locale, f64>) -> Result<Self, ProbabilityError> {
        self.prior = Some(prior_vector(weighting, self.table.languages())?);
        Ok(self)
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Averaged weight vector in table order; `None` if no gram of the text
    /// is known to the table
    pub fn weights(&self, text: &str) -> Option<Vec<f64>> {
        let n = self.table.num_languages();
        let grams: Vec<String> = self
            .extractor
            .extract_grams(text)
            .into_iter()
            .filter(|g| self.table.probabilities(g).is_some())
            .collect();
        if n == 0 || grams.is_empty() {
            return None;
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut total = vec![0.0; n];

        for _ in 0..self.config.trials {
            let mut prob = self
                .prior
                .clone()
                .unwrap_or_else(|| vec![1.0 / n as f64; n]);

            let alpha = (self.config.alpha + gaussian(&mut rng) * self.config.alpha_width)
                .max(f64::MIN_POSITIVE);
            let weight = alpha / self.config.base_frequency;

            let mut i = 0;
            loop {
                let gram = &grams[rng.gen_range(0..grams.len())];
                self.update(&mut prob, gram, weight);
                if i % NORMALIZE_INTERVAL == 0 {
                    let max = normalize_unchecked(&mut prob);
                    if max > self.config.convergence_threshold || i >= self.config.iteration_limit {
                        break;
                    }
                }
                i += 1;
            }

            for (t, p) in total.iter_mut().zip(&prob) {
                *t += p;
            }
        }
        for t in total.iter_mut() {
            *t /= self.config.trials as f64;
        }

        tracing::trace!(
            "weights:{}",
            format_weights(&total, self.table.languages())
        );
        Some(total)
    }

    fn update(&self, prob: &mut [f64], gram: &str, weight: f64) {
        let Some(entries) = self.table.probabilities(gram) else {
            return;
        };
        let mut next = entries.iter().peekable();
        for (j, p) in prob.iter_mut().enumerate() {
            let frequency = next
                .next_if(|e| e.language == j)
                .map_or(0.0, |e| e.frequency);
            *p *= weight + frequency;
        }
    }
}

impl Classifier for NaiveBayesDetector {
    fn classify(&self, text: &str) -> Detection {
        let Some(weights) = self.weights(text) else {
            return Detection::empty();
        };
        let languages = weights
            .into_iter()
            .enumerate()
            .filter(|(_, p)| *p > self.config.min_probability)
            .filter_map(|(j, probability)| {
                self.table.language_at(j).map(|locale| DetectedLanguage {
                    locale: locale.clone(),
                    probability,
                })
            })
            .collect();
        Detection::new(languages)
    }
}

/// Standard normal sample (Box-Muller)
fn gaussian(rng: &mut impl Rng) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileBuilder;

    const EN: &str = "the quick brown fox jumps over the lazy dog while the cat sleeps \
        in the warm sun and the birds are singing their songs in the trees";
    const DE: &str = "der schnelle braune fuchs springt über den faulen hund während die \
        katze in der warmen sonne schläft und die vögel in den bäumen singen";
    const IT: &str = "la volpe marrone veloce salta sopra il cane pigro mentre il gatto \
        dorme al sole caldo e gli uccelli cantano le loro canzoni sugli alberi";

    fn profiles() -> Vec<LanguageProfile> {
        [("en", EN), ("de", DE), ("it", IT)]
            .iter()
            .map(|(tag, text)| {
                let mut b = ProfileBuilder::new(Locale::parse(tag).unwrap());
                b.add_text(text);
                b.build()
            })
            .collect()
    }

    fn detector() -> NaiveBayesDetector {
        NaiveBayesDetector::new(&profiles(), NgramExtractor::standard(), DetectorConfig::default())
            .unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(DetectorConfig::default().validate().is_ok());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_configs_rejected() {
        let mut config = DetectorConfig::default();
        config.trials = 0;
        assert!(config.validate().is_err());

        let mut config = DetectorConfig::default();
        config.alpha = -1.0;
        assert!(config.validate().is_err());

        let mut config = DetectorConfig::default();
        config.convergence_threshold = 1.5;
        assert!(matches!(
            NaiveBayesDetector::new(&profiles(), NgramExtractor::standard(), config),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_detects_training_languages() {
        let detector = detector();
        let en = detector.classify("the dog and the cat are in the sun");
        assert_eq!(en.best().unwrap().locale.language(), "en");

        let de = detector.classify("die katze und der hund in der sonne");
        assert_eq!(de.best().unwrap().locale.language(), "de");

        let it = detector.classify("il gatto e il cane al sole");
        assert_eq!(it.best().unwrap().locale.language(), "it");
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let detection = detector().classify("the birds are singing");
        let sum: f64 = detection.languages().iter().map(|d| d.probability).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sorted_descending() {
        let detection = detector().classify("the warm sun");
        let probs: Vec<f64> = detection.languages().iter().map(|d| d.probability).collect();
        assert!(probs.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_deterministic_for_seed() {
        let detector = detector();
        let a = detector.classify("the quick fox");
        let b = detector.classify("the quick fox");
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_text_gives_empty_detection() {
        let detector = detector();
        assert!(detector.classify("").is_empty());
        assert!(detector.classify("ЖЖЖ").is_empty());
    }

    #[test]
    fn test_no_profiles_gives_empty_detection() {
        let detector =
            NaiveBayesDetector::new(&[], NgramExtractor::standard(), DetectorConfig::default())
                .unwrap();
        assert!(detector.classify("anything").is_empty());
    }

    #[test]
    fn test_one_hot_prior_forces_language() {
        let prior = HashMap::from([(Locale::parse("it").unwrap(), 1.0)]);
        let detector = detector().with_prior(&prior).unwrap();
        let detection = detector.classify("the dog and the cat");
        assert_eq!(detection.languages().len(), 1);
        assert_eq!(detection.probability_of_language("it"), Some(1.0));
    }

    #[test]
    fn test_detection_lookup() {
        let en = Locale::parse("en-GB").unwrap();
        let detection = Detection::new(vec![
            DetectedLanguage {
                locale: Locale::parse("de").unwrap(),
                probability: 0.2,
            },
            DetectedLanguage {
                locale: en.clone(),
                probability: 0.8,
            },
        ]);
        assert_eq!(detection.best().unwrap().locale, en);
        assert_eq!(detection.probability_of(&en), Some(0.8));
        assert_eq!(detection.probability_of_language("en"), Some(0.8));
        assert_eq!(detection.probability_of_language("fr"), None);
    }
}
