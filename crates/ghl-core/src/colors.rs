//! Label color validation and generation.

use std::sync::LazyLock;

use regex::Regex;

static COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^#?[A-Fa-f0-9]{6}$").expect("valid color regex"));

/// Error returned for a malformed label color.
#[derive(Debug, thiserror::Error)]
#[error("colors must include 6 hexadecimal digits for RGB with optional \"#\" prefix")]
pub struct InvalidColorError;

/// Validate a label color and normalize it to 6 hex digits without `#`.
///
/// # Errors
///
/// Returns [`InvalidColorError`] unless the input matches `#?[A-Fa-f0-9]{6}`.
pub fn validate_color(s: &str) -> Result<String, InvalidColorError> {
    if !COLOR_RE.is_match(s) {
        return Err(InvalidColorError);
    }

    Ok(s.strip_prefix('#').unwrap_or(s).to_string())
}

/// Generate a random label color as 6 uppercase hex digits.
pub fn random_color() -> String {
    let r = rand::random::<u8>();
    let g = rand::random::<u8>();
    let b = rand::random::<u8>();

    format!("{r:02X}{g:02X}{b:02X}")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("d73a4a", "d73a4a")]
    #[case("#d73a4a", "d73a4a")]
    #[case("ABCDEF", "ABCDEF")]
    #[case("#ABCDEF", "ABCDEF")]
    #[case("000000", "000000")]
    #[case("123abc", "123abc")]
    fn test_should_normalize_valid_colors(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(validate_color(input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("#")]
    #[case("d73a4")]
    #[case("d73a4ab")]
    #[case("##d73a4a")]
    #[case("d73a4g")]
    #[case("red")]
    #[case("#d73a4a ")]
    fn test_should_reject_invalid_colors(#[case] input: &str) {
        assert!(validate_color(input).is_err());
    }

    #[test]
    fn test_should_describe_expected_format_in_error() {
        let err = validate_color("nope").unwrap_err();
        assert!(err.to_string().contains("6 hexadecimal digits"));
    }

    #[test]
    fn test_should_generate_six_uppercase_hex_digits() {
        for _ in 0..10 {
            let color = random_color();
            assert_eq!(color.len(), 6);
            assert!(
                color
                    .chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
            );
            // Random colors are always valid label colors.
            assert_eq!(validate_color(&color).unwrap(), color);
        }
    }

    // --- property-based tests ---

    mod prop {
        use proptest::prelude::*;

        use super::super::*;

        proptest! {
            #[test]
            fn normalizes_with_or_without_prefix(color in "[A-Fa-f0-9]{6}") {
                let bare = validate_color(&color)?;
                let prefixed = validate_color(&format!("#{color}"))?;
                prop_assert_eq!(&bare, &color);
                prop_assert_eq!(prefixed, bare);
            }

            #[test]
            fn rejects_wrong_lengths(color in "[A-Fa-f0-9]{0,5}|[A-Fa-f0-9]{7,12}") {
                prop_assert!(validate_color(&color).is_err());
            }
        }
    }
}
