#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the feed row parser.
///
/// Feeds arbitrary UTF-8 strings to `parse_feed_str`, which must either
/// reject the document or classify every row as valid or rejected without
/// panicking.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(outcomes) = medmatch::catalog::parse_feed_str(s) {
            let _ = medmatch::Catalog::from_outcomes(outcomes);
        }
    }
});
