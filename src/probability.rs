//! Probability vector utilities
//!
//! Weight and prior vectors are dense and positionally aligned with a
//! [`FrequencyTable`](crate::FrequencyTable)'s language order.

use crate::locale::Locale;
use std::collections::HashMap;
use std::fmt::Write;
use thiserror::Error;

/// Entries below this are omitted by [`format_weights`]
pub const DISPLAY_THRESHOLD: f64 = 1e-5;

/// Errors for malformed weight vectors and prior maps
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProbabilityError {
    #[error("Cannot normalize an empty weight vector")]
    EmptyWeights,

    #[error("Language weighting map is empty")]
    EmptyWeighting,

    #[error("Weights sum to zero")]
    ZeroSum,

    #[error("Negative weight {weight} for {label}")]
    NegativeWeight { label: String, weight: f64 },

    #[error("Non-finite weight {weight} for {label}")]
    NonFinite { label: String, weight: f64 },
}

/// Normalize `weights` in place so they sum to 1 and return the largest entry
///
/// The maximum serves as a convergence signal for iterative classifiers:
/// once one language holds nearly all of the mass, refinement can stop.
/// Element order is preserved.
///
/// # Example
/// ```
/// use langgram::probability::normalize;
///
/// let mut weights = vec![1.0, 3.0, 0.0];
/// let max = normalize(&mut weights).unwrap();
/// assert_eq!(weights, vec![0.25, 0.75, 0.0]);
/// assert_eq!(max, 0.75);
/// ```
pub fn normalize(weights: &mut [f64]) -> Result<f64, ProbabilityError> {
    if weights.is_empty() {
        return Err(ProbabilityError::EmptyWeights);
    }
    for (i, &w) in weights.iter().enumerate() {
        if !w.is_finite() {
            return Err(ProbabilityError::NonFinite {
                label: format!("position {}", i),
                weight: w,
            });
        }
        if w < 0.0 {
            return Err(ProbabilityError::NegativeWeight {
                label: format!("position {}", i),
                weight: w,
            });
        }
    }
    if weights.iter().sum::<f64>() <= 0.0 {
        return Err(ProbabilityError::ZeroSum);
    }
    Ok(normalize_unchecked(weights))
}

/// [`normalize`] without validation, for hot loops whose inputs are
/// positive by construction
pub(crate) fn normalize_unchecked(weights: &mut [f64]) -> f64 {
    let sum: f64 = weights.iter().sum();
    debug_assert!(sum > 0.0, "normalize called on zero-sum vector");

    let mut max = 0.0;
    for w in weights.iter_mut() {
        *w /= sum;
        if *w > max {
            max = *w;
        }
    }
    max
}

/// Turn a sparse language -> weight map into a dense prior vector aligned
/// with `languages`
///
/// Languages missing from the map get 0. The result sums to 1. Fails if the
/// map is empty, holds a negative or non-finite weight, or gives the listed
/// languages a total weight of 0.
///
/// # Example
/// ```
/// use langgram::{probability::prior_vector, Locale};
/// use std::collections::HashMap;
///
/// let en = Locale::parse("en").unwrap();
/// let de = Locale::parse("de").unwrap();
/// let fr = Locale::parse("fr").unwrap();
///
/// let weighting = HashMap::from([(en.clone(), 3.0), (fr.clone(), 1.0)]);
/// let prior = prior_vector(&weighting, &[en, de, fr]).unwrap();
/// assert_eq!(prior, vec![0.75, 0.0, 0.25]);
/// ```
pub fn prior_vector(
    weighting: &HashMap<Locale, f64>,
    languages: &[Locale],
) -> Result<Vec<f64>, ProbabilityError> {
    if weighting.is_empty() {
        return Err(ProbabilityError::EmptyWeighting);
    }
    for (locale, &weight) in weighting {
        if !weight.is_finite() {
            return Err(ProbabilityError::NonFinite {
                label: locale.to_string(),
                weight,
            });
        }
        if weight < 0.0 {
            return Err(ProbabilityError::NegativeWeight {
                label: locale.to_string(),
                weight,
            });
        }
    }

    let mut prior: Vec<f64> = languages
        .iter()
        .map(|lang| weighting.get(lang).copied().unwrap_or(0.0))
        .collect();

    let sum: f64 = prior.iter().sum();
    if sum <= 0.0 {
        return Err(ProbabilityError::ZeroSum);
    }
    for p in prior.iter_mut() {
        *p /= sum;
    }
    Ok(prior)
}

/// Human-readable listing `" lang:0.12345"` of the entries at or above
/// [`DISPLAY_THRESHOLD`]. For logs only.
pub fn format_weights(weights: &[f64], languages: &[Locale]) -> String {
    let mut out = String::new();
    for (weight, locale) in weights.iter().zip(languages) {
        if *weight >= DISPLAY_THRESHOLD {
            let _ = write!(out, " {}:{:.5}", locale, weight);
        }
    }
    out
}
