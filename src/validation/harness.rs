// K-fold cross-validation harness
//
// Owns the reference pool for the duration of a run. Each fold pushes one
// freshly trained profile onto the pool, builds a classifier over it and
// pops the profile again before classifying, so the pool is back in its
// pre-fold state whenever the classifier is queried.

use super::config::ValidationConfig;
use super::partition::partition;
use super::report::{FoldOutcome, ValidationReport};
use crate::detector::{Classifier, DetectorConfig, NaiveBayesDetector};
use crate::ngram::NgramExtractor;
use crate::profile::{LanguageProfile, ProfileBuilder};
use thiserror::Error;

/// Setup errors; all are reported before the first fold runs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("k has to be at least 3 but was: {0}")]
    InvalidFoldCount(usize),

    #[error("No profile builder set for the language under test")]
    MissingProfileBuilder,

    #[error("No input sample set")]
    MissingSample,

    #[error(
        "Sample split into {actual} fragments, need at least {required} \
         (whole-word fragments hold at most len/(k-1) chars; break words or pick a different k)"
    )]
    InsufficientFragments { required: usize, actual: usize },

    #[error("Invalid detector configuration: {0}")]
    InvalidDetectorConfig(String),
}

/// K-fold cross-validation of one language against a reference pool
///
/// # Example
/// ```
/// use langgram::validation::{CrossValidator, ValidationConfig};
/// use langgram::{Locale, ProfileBuilder};
///
/// let mut en = ProfileBuilder::new(Locale::parse("en").unwrap());
/// en.add_text("the cat sat on the mat and the dog lay in the sun");
///
/// let mut validator = CrossValidator::new(ValidationConfig::quick())
///     .unwrap()
///     .with_profile(en.build())
///     .with_builder(ProfileBuilder::new(Locale::parse("de").unwrap()))
///     .with_sample("der hund und die katze liegen in der sonne und schlafen");
///
/// let report = validator.run().unwrap();
/// assert_eq!(report.folds.len(), 3);
/// assert!(report.average > 0.0 && report.average <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct CrossValidator {
    config: ValidationConfig,
    profiles: Vec<LanguageProfile>,
    builder: Option<ProfileBuilder>,
    sample: Option<String>,
}

impl CrossValidator {
    /// New validator with an empty pool; fails on k < 3
    pub fn new(config: ValidationConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self {
            config,
            profiles: Vec::new(),
            builder: None,
            sample: None,
        })
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Add one reference profile to the pool
    pub fn with_profile(mut self, profile: LanguageProfile) -> Self {
        self.profiles.push(profile);
        self
    }

    /// Add reference profiles to the pool
    pub fn with_profiles(mut self, profiles: impl IntoIterator<Item = LanguageProfile>) -> Self {
        self.profiles.extend(profiles);
        self
    }

    /// Builder whose configuration (locale, extractor, cutoff) is forked
    /// for every fold; texts already added to it are not used
    pub fn with_builder(mut self, builder: ProfileBuilder) -> Self {
        self.builder = Some(builder);
        self
    }

    /// Labeled sample in the builder's language
    pub fn with_sample(mut self, sample: impl Into<String>) -> Self {
        self.sample = Some(sample.into());
        self
    }

    /// Current reference pool
    pub fn profiles(&self) -> &[LanguageProfile] {
        &self.profiles
    }

    /// Drop every pooled profile whose language code equals `language`;
    /// returns how many were removed
    pub fn remove_language(&mut self, language: &str) -> usize {
        let before = self.profiles.len();
        self.profiles
            .retain(|profile| profile.locale().language() != language);
        before - self.profiles.len()
    }

    /// Run with the naive Bayes detector on the standard extractor and
    /// default detector settings
    pub fn run(&mut self) -> Result<ValidationReport, ValidationError> {
        let config = DetectorConfig::default();
        self.run_with(|pool| {
            NaiveBayesDetector::from_validated(pool, NgramExtractor::standard(), config.clone())
        })
    }

    /// Run with the naive Bayes detector on the given extractor and settings
    pub fn run_with_detector(
        &mut self,
        extractor: &NgramExtractor,
        config: &DetectorConfig,
    ) -> Result<ValidationReport, ValidationError> {
        config
            .validate()
            .map_err(ValidationError::InvalidDetectorConfig)?;
        self.run_with(|pool| NaiveBayesDetector::from_validated(pool, extractor.clone(), config.clone()))
    }

    /// Run the k folds, building each fold's classifier with `factory`
    ///
    /// `factory` sees the pool with the fold's profile as its last element.
    pub fn run_with<C, F>(&mut self, mut factory: F) -> Result<ValidationReport, ValidationError>
    where
        C: Classifier,
        F: FnMut(&[LanguageProfile]) -> C,
    {
        let builder = self
            .builder
            .as_ref()
            .ok_or(ValidationError::MissingProfileBuilder)?
            .fork();
        let sample = self.sample.as_deref().ok_or(ValidationError::MissingSample)?;
        let k = self.config.k;

        let fragments = partition(sample, k, self.config.break_words);
        if fragments.len() < k {
            return Err(ValidationError::InsufficientFragments {
                required: k,
                actual: fragments.len(),
            });
        }
        let lengths: Vec<usize> = fragments.iter().map(|f| f.chars().count()).collect();
        let total_chars: usize = lengths.iter().sum();

        let locale = builder.locale().clone();
        let language = locale.language().to_string();
        let removed = self.remove_language(&language);
        if removed > 0 {
            tracing::debug!(
                "Removed {} reference profile(s) for '{}' from the pool",
                removed,
                language
            );
        }

        tracing::info!(
            "Running {}-fold cross-validation for '{}' ({} fragments, {} reference profiles)",
            k,
            locale,
            fragments.len(),
            self.profiles.len()
        );

        let mut folds = Vec::with_capacity(k);
        for (i, test) in fragments.iter().take(k).enumerate() {
            let mut fold_builder = builder.fork();
            for (j, fragment) in fragments.iter().enumerate() {
                if j != i {
                    fold_builder.add_text(fragment);
                }
            }

            self.profiles.push(fold_builder.build());
            let classifier = factory(&self.profiles);
            self.profiles.pop();

            let detection = classifier.classify(test);
            let outcome = match detection.probability_of_language(&language) {
                Some(probability) => {
                    tracing::info!("Fold {}/{}: probability {:.5}", i + 1, k, probability);
                    FoldOutcome {
                        fold: i,
                        train_chars: total_chars - lengths[i],
                        test_chars: lengths[i],
                        probability,
                        matched: true,
                    }
                }
                None => {
                    tracing::warn!("Fold {}/{}: no match for '{}', probability 0", i + 1, k, language);
                    FoldOutcome {
                        fold: i,
                        train_chars: total_chars - lengths[i],
                        test_chars: lengths[i],
                        probability: 0.0,
                        matched: false,
                    }
                }
            };
            folds.push(outcome);
        }

        let report = ValidationReport::new(locale, k, fragments.len(), folds);
        tracing::info!(
            "Average probability over {} folds: {:.5}",
            k,
            report.average
        );
        Ok(report)
    }
}
