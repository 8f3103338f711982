//! Configuration loading
//!
//! All sections are optional in the TOML file and fall back to their
//! defaults:
//!
//! ```toml
//! [extraction]
//! gram_lengths = [1, 2, 3]
//! padding = " "
//! filter = "standard"
//! mode = "standard"
//!
//! [validation]
//! k = 10
//! break_words = false
//!
//! [detector]
//! trials = 7
//! seed = 42
//! ```

use crate::detector::DetectorConfig;
use crate::ngram::{ExtractionMode, ExtractorError, GramFilter, NgramExtractor};
use crate::validation::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Extractor(#[from] ExtractorError),
}

/// Serializable description of an [`NgramExtractor`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub gram_lengths: Vec<usize>,
    pub padding: Option<char>,
    pub filter: GramFilter,
    pub mode: ExtractionMode,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            gram_lengths: vec![1, 2, 3],
            padding: Some(' '),
            filter: GramFilter::Standard,
            mode: ExtractionMode::Standard,
        }
    }
}

impl ExtractionConfig {
    /// Build the extractor; fails on empty or zero gram lengths
    pub fn extractor(&self) -> Result<NgramExtractor, ExtractorError> {
        let mut extractor = NgramExtractor::new(self.gram_lengths.iter().copied())?
            .with_filter(self.filter)
            .with_mode(self.mode)?;
        if let Some(pad) = self.padding {
            extractor = extractor.with_padding(pad);
        }
        Ok(extractor)
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LanggramConfig {
    pub extraction: ExtractionConfig,
    pub validation: ValidationConfig,
    pub detector: DetectorConfig,
}

impl LanggramConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.extraction.extractor()?;
        self.validation
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.detector.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LanggramConfig::default();
        assert!(config.validate().is_ok());
        let extractor = config.extraction.extractor().unwrap();
        assert_eq!(extractor.gram_lengths(), &[1, 2, 3]);
        assert_eq!(extractor.padding(), Some(' '));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = LanggramConfig::from_toml_str("").unwrap();
        assert_eq!(config.validation.k, 10);
        assert_eq!(config.detector.trials, 7);
    }

    #[test]
    fn test_partial_sections() {
        let config = LanggramConfig::from_toml_str(
            r#"
            [extraction]
            gram_lengths = [2, 3]
            filter = "require_letter"
            mode = "legacy"

            [validation]
            k = 5
            break_words = true

            [detector]
            seed = 99
            "#,
        )
        .unwrap();

        assert_eq!(config.extraction.gram_lengths, vec![2, 3]);
        assert_eq!(config.extraction.mode, ExtractionMode::Legacy);
        assert!(matches!(config.extraction.filter, GramFilter::RequireLetter));
        // unspecified keys keep defaults
        assert_eq!(config.extraction.padding, Some(' '));
        assert_eq!(config.validation.k, 5);
        assert!(config.validation.break_words);
        assert_eq!(config.detector.seed, 99);
        assert_eq!(config.detector.alpha, 0.5);
    }

    #[test]
    fn test_invalid_values_fail_fast() {
        assert!(matches!(
            LanggramConfig::from_toml_str("[validation]\nk = 2\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            LanggramConfig::from_toml_str("[extraction]\ngram_lengths = [0]\n"),
            Err(ConfigError::Extractor(ExtractorError::InvalidGramLength(0)))
        ));
        assert!(matches!(
            LanggramConfig::from_toml_str("[detector]\ntrials = 0\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            LanggramConfig::from_toml_str("[validation\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_legacy_mode_rejects_long_grams() {
        let result = LanggramConfig::from_toml_str(
            "[extraction]\ngram_lengths = [5]\nmode = \"legacy\"\n",
        );
        assert!(matches!(
            result,
            Err(ConfigError::Extractor(ExtractorError::LegacyGramLength(5)))
        ));

        // the same lengths are fine for the standard algorithm
        let config =
            LanggramConfig::from_toml_str("[extraction]\ngram_lengths = [5]\n").unwrap();
        assert!(!config
            .extraction
            .extractor()
            .unwrap()
            .extract_grams("hello world")
            .is_empty());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("langgram.toml");
        std::fs::write(&path, "[validation]\nk = 4\n").unwrap();
        let config = LanggramConfig::from_file(&path).unwrap();
        assert_eq!(config.validation.k, 4);

        assert!(matches!(
            LanggramConfig::from_file(&dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
