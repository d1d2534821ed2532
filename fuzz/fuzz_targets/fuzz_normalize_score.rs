#![no_main]
use libfuzzer_sys::fuzz_target;
use medmatch::matching::{normalize, score, SimilarityAlgorithm};

/// Fuzz normalization and scoring.
///
/// Splits the input in two, normalizes both halves and checks that
/// normalization is idempotent and every algorithm stays within [0, 1].
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let mid = s.char_indices().nth(s.chars().count() / 2).map_or(s.len(), |(i, _)| i);
    let (a, b) = s.split_at(mid);
    let (na, nb) = (normalize(a), normalize(b));
    assert_eq!(normalize(&na), na);
    for algorithm in SimilarityAlgorithm::all() {
        let value = score(*algorithm, &na, &nb);
        assert!((0.0..=1.0).contains(&value));
    }
});
