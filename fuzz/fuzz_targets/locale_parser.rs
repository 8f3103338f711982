#![no_main]

use libfuzzer_sys::fuzz_target;
use langgram::Locale;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // A parsed tag must display back to a tag that parses to the same locale
        if let Ok(locale) = Locale::parse(input) {
            let again = Locale::parse(&locale.to_string());
            assert_eq!(again.ok(), Some(locale));
        }
    }
});
