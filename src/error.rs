//! Crate-wide error type
//!
//! Each module reports its own error enum; `LanggramError` gathers them for
//! callers that drive the whole pipeline.

use crate::config::ConfigError;
use crate::locale::LocaleError;
use crate::ngram::ExtractorError;
use crate::probability::ProbabilityError;
use crate::profile::ProfileError;
use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LanggramError {
    #[error(transparent)]
    Extractor(#[from] ExtractorError),

    #[error(transparent)]
    Locale(#[from] LocaleError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Probability(#[from] ProbabilityError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, LanggramError>;
