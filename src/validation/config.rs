// Configuration for k-fold cross-validation

use super::harness::ValidationError;
use serde::{Deserialize, Serialize};

/// Smallest usable fold count: every fold needs at least two training fragments
pub const MIN_FOLDS: usize = 3;

/// Cross-validation settings
///
/// # Example
/// ```
/// use langgram::validation::ValidationConfig;
///
/// let config = ValidationConfig::default();
/// assert_eq!(config.k, 10);
/// assert!(ValidationConfig::with_k(2).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Number of folds (and minimum number of fragments)
    pub k: usize,

    /// Cut the sample into fixed-size chunks of `k` characters instead of
    /// whitespace-aligned fragments
    ///
    /// Meant for scripts that do not separate words with spaces.
    pub break_words: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            k: 10,
            break_words: false,
        }
    }
}

impl ValidationConfig {
    /// Three folds: the fastest run that still holds out data
    pub fn quick() -> Self {
        Self {
            k: MIN_FOLDS,
            ..Self::default()
        }
    }

    pub fn with_k(k: usize) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }

    pub fn break_words(mut self, break_words: bool) -> Self {
        self.break_words = break_words;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.k < MIN_FOLDS {
            return Err(ValidationError::InvalidFoldCount(self.k));
        }
        Ok(())
    }
}
