// Historical word-local extractor
//
// Reproduces the gram stream of the original detector so that profiles
// trained with it stay comparable. Known quirks preserved on purpose:
// - every word gets a leading space gram (" fo"), but the last word of the
//   text never gets a trailing one ("oo " is missing for "foo")
// - the window resets at each space; consecutive spaces collapse
// - single-space 1-grams are never emitted
// - nothing is emitted while inside a run of upper-case letters

/// Largest gram length the legacy extractor can produce
pub const LEGACY_MAX_GRAM_LENGTH: usize = 3;

/// Rolling window over the current word
struct LegacyWindow {
    buf: Vec<char>,
    capital_word: bool,
}

impl LegacyWindow {
    fn new() -> Self {
        Self {
            buf: vec![' '],
            capital_word: false,
        }
    }

    fn push(&mut self, ch: char) {
        let last = *self.buf.last().unwrap_or(&' ');
        if last == ' ' {
            self.buf.clear();
            self.buf.push(' ');
            self.capital_word = false;
            if ch == ' ' {
                return;
            }
        } else if self.buf.len() >= LEGACY_MAX_GRAM_LENGTH {
            self.buf.remove(0);
        }
        self.buf.push(ch);

        if ch.is_uppercase() {
            if last.is_uppercase() {
                self.capital_word = true;
            }
        } else {
            self.capital_word = false;
        }
    }

    fn gram(&self, n: usize) -> Option<String> {
        if self.capital_word {
            return None;
        }
        let len = self.buf.len();
        if n < 1 || n > LEGACY_MAX_GRAM_LENGTH || len < n {
            return None;
        }
        if n == 1 {
            let ch = self.buf[len - 1];
            return (ch != ' ').then(|| ch.to_string());
        }
        Some(self.buf[len - n..].iter().collect())
    }
}

/// Feed every legacy gram whose length is in `lengths` to `emit`, in
/// position-major order (all lengths at position i before position i+1)
pub(crate) fn for_each_legacy_gram(text: &str, lengths: &[usize], mut emit: impl FnMut(String)) {
    let mut window = LegacyWindow::new();
    for ch in text.chars() {
        window.push(ch);
        for n in 1..=LEGACY_MAX_GRAM_LENGTH {
            if !lengths.contains(&n) {
                continue;
            }
            if let Some(gram) = window.gram(n) {
                emit(gram);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy(text: &str) -> Vec<String> {
        let mut out = Vec::new();
        for_each_legacy_gram(text, &[1, 2, 3], |g| out.push(g));
        out
    }

    #[test]
    fn test_leading_pad_but_no_trailing_pad() {
        let grams = legacy("foo");
        assert_eq!(grams, vec!["f", " f", "o", "fo", " fo", "o", "oo", "foo"]);
        assert!(!grams.contains(&"oo ".to_string()));
        assert!(!grams.contains(&"o ".to_string()));
    }

    #[test]
    fn test_word_boundary_inside_text_is_padded() {
        let grams = legacy("ab cd");
        // trailing pad appears after "ab" because a space follows it
        assert!(grams.contains(&"b ".to_string()));
        assert!(grams.contains(&"ab ".to_string()));
        assert!(grams.contains(&" c".to_string()));
        // ...but never after the final word
        assert!(!grams.contains(&"d ".to_string()));
        // single-space 1-grams are skipped
        assert!(!grams.contains(&" ".to_string()));
    }

    #[test]
    fn test_consecutive_spaces_collapse() {
        assert_eq!(legacy("a  b"), legacy("a b"));
    }

    #[test]
    fn test_capital_run_suppressed() {
        let grams = legacy("NATO");
        // "N" and " N" are emitted before the run is recognised
        assert_eq!(grams, vec!["N", " N"]);
    }

    #[test]
    fn test_respects_requested_lengths() {
        let mut out = Vec::new();
        for_each_legacy_gram("foo", &[3], |g| out.push(g));
        assert_eq!(out, vec![" fo", "foo"]);
    }

    #[test]
    fn test_lengths_above_max_are_rejected() {
        use crate::ngram::{ExtractionMode, ExtractorError, NgramExtractor};

        let err = NgramExtractor::new([2, 5])
            .unwrap()
            .with_mode(ExtractionMode::Legacy)
            .unwrap_err();
        assert_eq!(err, ExtractorError::LegacyGramLength(5));
        assert!(err.to_string().contains("up to 3"));

        // the standard algorithm has no upper bound
        assert!(NgramExtractor::new([5])
            .unwrap()
            .with_mode(ExtractionMode::Standard)
            .is_ok());
        let max = NgramExtractor::new(1..=LEGACY_MAX_GRAM_LENGTH)
            .unwrap()
            .with_mode(ExtractionMode::Legacy)
            .unwrap();
        assert_eq!(max.extract_grams("foo").len(), 8);
    }

    #[test]
    fn test_empty_text() {
        assert!(legacy("").is_empty());
    }
}
