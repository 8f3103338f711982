// K-fold Cross-Validation of Language Profiles
//
// Measures how well a profile trained on one labeled sample is recognized
// among a pool of reference profiles. The sample is cut into k fragments;
// each fold trains a fresh profile on k-1 of them, adds it to the pool,
// classifies the held-out fragment and records the probability assigned to
// the true language (0 when the language is missing from the result).
//
// Foundation:
// Kohavi, R. (1995). A study of cross-validation and bootstrap for accuracy
// estimation and model selection. IJCAI-95.
//
// Fold progress goes to `tracing`; the authoritative output is the returned
// `ValidationReport`.

mod config;
mod harness;
mod partition;
mod report;

pub use config::ValidationConfig;
pub use harness::{CrossValidator, ValidationError};
pub use partition::{partition, partition_fixed, partition_whitespace};
pub use report::{FoldOutcome, ValidationReport};
