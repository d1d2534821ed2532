//! Content hashing utilities.

use xxhash_rust::xxh3::xxh3_64;

/// Fingerprint a record by its normalized brand and generic names.
///
/// Used to recognize the same medicine arriving from two feeds. A separator
/// byte keeps `("ab", "c")` and `("a", "bc")` apart.
#[must_use]
pub fn record_fingerprint(normalized_brand: &str, normalized_generic: &str) -> u64 {
    let mut buf = Vec::with_capacity(normalized_brand.len() + normalized_generic.len() + 1);
    buf.extend_from_slice(normalized_brand.as_bytes());
    buf.push(0x1f);
    buf.extend_from_slice(normalized_generic.as_bytes());
    xxh3_64(&buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_fingerprint() {
        let hash = record_fingerprint("tylenol", "acetaminophen");
        assert_ne!(hash, 0);

        // Same input should produce same hash
        assert_eq!(hash, record_fingerprint("tylenol", "acetaminophen"));

        // Field boundaries matter
        assert_ne!(record_fingerprint("ab", "c"), record_fingerprint("a", "bc"));
    }
}
