//! Name canonicalization for comparison.

/// Canonicalize a free-text medicine name.
///
/// Lower-cases the input and then drops every character that is not an
/// ASCII letter or digit. The output is always lower-case ASCII, so the
/// function is idempotent: `normalize(&normalize(s)) == normalize(s)`.
///
/// ```
/// use medmatch::matching::normalize;
///
/// assert_eq!(normalize("Tylenol® Extra-Strength 500"), "tylenolextrastrength500");
/// assert_eq!(normalize(""), "");
/// ```
#[must_use]
pub fn normalize(value: &str) -> String {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation_and_spaces() {
        assert_eq!(normalize("Co-Amoxiclav 875/125"), "coamoxiclav875125");
        assert_eq!(normalize("  L-Thyroxine  "), "lthyroxine");
    }

    #[test]
    fn test_drops_non_ascii_letters() {
        assert_eq!(normalize("Paracétamol"), "paractamol");
        assert_eq!(normalize("日本"), "");
    }

    #[test]
    fn test_idempotent_on_samples() {
        for s in ["Tylenol", "ÄBC-12", "\u{212A}elvin", "", "!!!"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }
}
