//! Langgram - character n-gram language identification
//!
//! This library provides the statistical core of n-gram language detection:
//! gram extraction, per-language frequency profiles, a gram -> language
//! frequency table, probability utilities, a naive Bayes detector and
//! k-fold cross-validation of profiles.

pub mod cli;
pub mod config;
pub mod detector;
pub mod error;
pub mod frequency;
pub mod locale;
pub mod ngram;
pub mod probability;
pub mod profile;
pub mod validation;

pub use config::{ConfigError, ExtractionConfig, LanggramConfig};
pub use detector::{Classifier, DetectedLanguage, Detection, DetectorConfig, NaiveBayesDetector};
pub use error::LanggramError;
pub use frequency::{FrequencyTable, LanguageFrequency};
pub use locale::{Locale, LocaleError};
pub use ngram::{ExtractionMode, GramFilter, NgramExtractor};
pub use profile::{LanguageProfile, ProfileBuilder};
pub use validation::{CrossValidator, ValidationConfig, ValidationError, ValidationReport};
