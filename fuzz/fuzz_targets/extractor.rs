#![no_main]

use libfuzzer_sys::fuzz_target;
use langgram::NgramExtractor;

fuzz_target!(|data: &[u8]| {
    // Only valid UTF-8 reaches the extractors
    if let Ok(input) = std::str::from_utf8(data) {
        let standard = NgramExtractor::standard();
        let counts = standard.extract_counted_grams(input);
        let total: u64 = counts.values().sum();
        assert_eq!(total as usize, standard.extract_grams(input).len());

        // Legacy extraction must not panic on any input either
        let _ = NgramExtractor::legacy().extract_grams(input);
    }
});
