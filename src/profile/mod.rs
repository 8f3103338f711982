// Language Profiles
//
// A profile is the per-language aggregate of gram occurrence counts, with
// summary statistics (total occurrences, min and max count) per gram length.
// Profiles are assembled by `ProfileBuilder` and never change afterwards,
// so they can be shared read-only between threads.

mod builder;
mod language_profile;

pub use builder::ProfileBuilder;
pub use language_profile::{GramStats, LanguageProfile, ProfileError};
