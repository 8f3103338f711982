// Sample partitioning for k-fold cross-validation
//
// Two policies with deliberately different size parameters:
// - whitespace: fragments of at most ceil(len / (k - 1)) characters,
//   never cut inside a word
// - break words: fixed chunks of exactly k characters
//
// Sizes are counted in chars, not bytes.

/// Split `sample` with the policy selected by `break_words`
pub fn partition(sample: &str, k: usize, break_words: bool) -> Vec<String> {
    if break_words {
        partition_fixed(sample, k)
    } else {
        partition_whitespace(sample, k)
    }
}

/// Whitespace-respecting partition
///
/// Scans left to right: skip whitespace, then take the longest run of at
/// most `ceil(len / (k - 1))` characters that is followed by whitespace or
/// the end of the sample. Interior whitespace is kept. The scan stops as
/// soon as no such run exists (a single word longer than the limit), so the
/// remainder of the sample is not emitted.
///
/// # Example
/// ```
/// use langgram::validation::partition_whitespace;
///
/// assert_eq!(
///     partition_whitespace("aaa bbb ccc", 3),
///     vec!["aaa", "bbb", "ccc"]
/// );
/// ```
pub fn partition_whitespace(sample: &str, k: usize) -> Vec<String> {
    let chars: Vec<char> = sample.chars().collect();
    let len = chars.len();
    if k < 2 || len == 0 {
        return Vec::new();
    }
    let max = len.div_ceil(k - 1);

    let mut fragments = Vec::new();
    let mut pos = 0;
    loop {
        while pos < len && chars[pos].is_whitespace() {
            pos += 1;
        }
        if pos == len {
            break;
        }

        let limit = (pos + max).min(len);
        let end = (pos + 1..=limit)
            .rev()
            .find(|&end| end == len || chars[end].is_whitespace());
        let Some(end) = end else {
            break;
        };

        fragments.push(chars[pos..end].iter().collect());
        pos = end;
    }
    fragments
}

/// Fixed-size partition into chunks of `size` characters; the last chunk
/// may be shorter
///
/// # Example
/// ```
/// use langgram::validation::partition_fixed;
///
/// assert_eq!(partition_fixed("abcdefgh", 3), vec!["abc", "def", "gh"]);
/// ```
pub fn partition_fixed(sample: &str, size: usize) -> Vec<String> {
    if size == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = sample.chars().collect();
    chars.chunks(size).map(|chunk| chunk.iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_fragments_respect_words() {
        assert_eq!(
            partition_whitespace("one two three four five six", 3),
            vec!["one two three", "four five six"]
        );
        assert_eq!(
            partition_whitespace("a b c d e f g h i j", 4),
            vec!["a b c d", "e f g h", "i j"]
        );
    }

    #[test]
    fn test_whitespace_leading_whitespace_skipped_trailing_kept() {
        assert_eq!(
            partition_whitespace("  lead  and   trail  ", 3),
            vec!["lead  and  ", "trail  "]
        );
    }

    #[test]
    fn test_whitespace_scan_stops_at_oversized_word() {
        assert_eq!(partition_whitespace("tiny enormousword x", 3), vec!["tiny"]);
        assert!(partition_whitespace("abcdefgh", 3).is_empty());
    }

    #[test]
    fn test_whitespace_counts_chars_not_bytes() {
        // 11 chars, 14 bytes: limit is 6 chars
        assert_eq!(
            partition_whitespace("äää ööö üüü", 3),
            vec!["äää", "ööö", "üüü"]
        );
    }

    #[test]
    fn test_whitespace_degenerate_inputs() {
        assert!(partition_whitespace("", 3).is_empty());
        assert!(partition_whitespace("   ", 3).is_empty());
        assert!(partition_whitespace("word", 1).is_empty());
    }

    #[test]
    fn test_fixed_chunks_ignore_words() {
        assert_eq!(
            partition_fixed("aaa bbb ccc", 3),
            vec!["aaa", " bb", "b c", "cc"]
        );
        assert_eq!(partition_fixed("日本語のテキスト", 4), vec!["日本語の", "テキスト"]);
        assert!(partition_fixed("", 3).is_empty());
        assert!(partition_fixed("abc", 0).is_empty());
    }

    #[test]
    fn test_policy_dispatch() {
        assert_eq!(partition("aaa bbb ccc", 3, false).len(), 3);
        assert_eq!(partition("aaa bbb ccc", 3, true).len(), 4);
    }
}
