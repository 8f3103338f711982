// Character N-gram Extraction
//
// Turns a normalized character sequence into fixed-length windows ("grams")
// that feed language profiles and frequency lookups.
//
// Foundation:
// Cavnar, W. B., & Trenkle, J. M. (1994). N-gram-based text categorization.
// Proceedings of SDAIR-94. Short character windows carry most of the signal
// needed to tell languages apart, independent of tokenization.
//
// Two algorithms live here:
// - Standard: sliding window per configured length, symmetric padding
// - Legacy: the historical word-local extractor, kept bit-for-bit so that
//   profiles trained with it remain comparable (see `legacy.rs`)

mod extractor;
mod filter;
mod legacy;

pub use extractor::{ExtractionMode, ExtractorError, GramCounts, NgramExtractor};
pub use filter::GramFilter;
pub use legacy::LEGACY_MAX_GRAM_LENGTH;
