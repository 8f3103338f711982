use serde::{Deserialize, Serialize};

/// Per-gram predicate applied before a gram is emitted or counted
///
/// Filters are stateless; the same filter can be shared by any number of
/// extractors.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GramFilter {
    /// Keep every gram
    None,

    /// Drop grams that carry little language signal
    ///
    /// - 1-grams consisting of a single space
    /// - 2-grams and longer made entirely of upper-case letters (acronyms)
    /// - 3-grams and longer with a space strictly inside the window
    #[default]
    Standard,

    /// Drop grams that contain no alphabetic character at all
    RequireLetter,

    /// Caller-supplied predicate (not serializable)
    #[serde(skip)]
    Custom(fn(&str) -> bool),
}

impl GramFilter {
    /// Returns true if the gram should be kept
    pub fn accepts(&self, gram: &str) -> bool {
        match self {
            GramFilter::None => true,
            GramFilter::Standard => standard_accepts(gram),
            GramFilter::RequireLetter => gram.chars().any(char::is_alphabetic),
            GramFilter::Custom(predicate) => predicate(gram),
        }
    }
}

fn standard_accepts(gram: &str) -> bool {
    let chars: Vec<char> = gram.chars().collect();
    match chars.len() {
        0 => false,
        1 => chars[0] != ' ',
        n => {
            if chars.iter().all(|c| c.is_uppercase()) {
                return false;
            }
            n < 3 || !chars[1..n - 1].contains(&' ')
        }
    }
}
