/// ICAO Doc 9303 weights, applied cyclically by character position.
pub const WEIGHTS: [u32; 3] = [7, 3, 1];

/// Numeric value of an MRZ character. Anything outside `0-9`, `A-Z` counts as 0.
pub fn char_value(ch: char) -> u32 {
    match ch {
        '0'..='9' => ch as u32 - '0' as u32,
        'A'..='Z' => ch as u32 - 'A' as u32 + 10,
        _ => 0,
    }
}

/// 7-3-1 weighted sum of `field`, modulo 10.
///
/// Reduced at every step so the accumulator stays below 10 for any length.
pub fn compute_checksum(field: &str) -> u32 {
    field
        .chars()
        .enumerate()
        .fold(0, |acc, (i, ch)| (acc + char_value(ch) * WEIGHTS[i % 3]) % 10)
}

/// Check `field` against a single-digit check value.
///
/// An absent or empty field, or a check value that is not exactly one
/// decimal digit, verifies as `false`.
pub fn verify_checksum(field: Option<&str>, check_digit: Option<&str>) -> bool {
    let (field, check_digit) = match (field, check_digit) {
        (Some(f), Some(c)) if !f.is_empty() => (f, c),
        _ => return false,
    };

    let mut chars = check_digit.chars();
    match (chars.next().and_then(|c| c.to_digit(10)), chars.next()) {
        (Some(expected), None) => compute_checksum(field) == expected,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_values() {
        assert_eq!(char_value('<'), 0);
        assert_eq!(char_value('0'), 0);
        assert_eq!(char_value('7'), 7);
        assert_eq!(char_value('A'), 10);
        assert_eq!(char_value('Z'), 35);
        assert_eq!(char_value('a'), 0);
        assert_eq!(char_value(' '), 0);
        assert_eq!(char_value('É'), 0);
    }

    #[test]
    fn test_icao_specimen_check_digits() {
        assert_eq!(compute_checksum("L898902C3"), 6);
        assert_eq!(compute_checksum("740812"), 2);
        assert_eq!(compute_checksum("120415"), 9);
        assert_eq!(compute_checksum("ZE184226B<<<<<"), 1);
        // Composite over the full optional-data field, fillers included.
        assert_eq!(compute_checksum("L898902C3674081221204159ZE184226B<<<<<1"), 0);
    }

    #[test]
    fn test_filler_and_unknown_count_as_zero() {
        assert_eq!(compute_checksum("ZE184226B"), compute_checksum("ZE184226B<<<<<"));
        assert_eq!(compute_checksum("AB?"), compute_checksum("AB<"));
        assert_eq!(compute_checksum(""), 0);
    }

    #[test]
    fn test_very_long_field_does_not_overflow() {
        // 40M 'Z's push an unreduced u32 sum past u32::MAX.
        let field = "Z".repeat(40_000_000);
        assert_eq!(compute_checksum(&field), 0);
        assert!(verify_checksum(Some(&field), Some("0")));
    }

    #[test]
    fn test_verify_matches_compute() {
        for field in ["L898902C3", "740812", "D23145890", "<<<", "X"] {
            let expected = compute_checksum(field);
            for digit in 0..10u32 {
                let d = digit.to_string();
                assert_eq!(verify_checksum(Some(field), Some(d.as_str())), expected == digit);
            }
        }
    }

    #[test]
    fn test_verify_rejects_bad_input() {
        assert!(!verify_checksum(None, Some("6")));
        assert!(!verify_checksum(Some("L898902C3"), None));
        assert!(!verify_checksum(Some(""), Some("0")));
        assert!(!verify_checksum(Some("L898902C3"), Some("")));
        assert!(!verify_checksum(Some("L898902C3"), Some("<")));
        assert!(!verify_checksum(Some("L898902C3"), Some("06")));
        assert!(!verify_checksum(Some("L898902C3"), Some("６")));
    }
}
