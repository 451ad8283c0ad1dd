//! Permission string checks
//!
//! A permission specification is the familiar octal `chmod` string (`"750"`,
//! `"0644"`, ...). The first digit is the owner's level, where bit 4 is read.

use crate::error::{PermwalkError, Result};

/// Owner read bit within a single octal digit
const READ_BIT: u32 = 4;

/// Code points of the digit zero in every Unicode decimal-digit (`Nd`) run
///
/// Each run holds the ten digits `0..=9` contiguously from its zero.
const DECIMAL_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0,
    0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50,
    0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
    0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

/// Get the value of a Unicode decimal digit (`'7'`, `'٧'`, `'７'`, ...)
fn decimal_value(c: char) -> Option<u32> {
    let code = u32::from(c);
    let run = DECIMAL_ZEROS.partition_point(|&zero| zero <= code);
    let zero = DECIMAL_ZEROS[run.checked_sub(1)?];
    let value = code - zero;
    (value < 10).then_some(value)
}

/// Check whether `mode` grants the owner read access
///
/// Returns `false` for empty input or anything containing a character that is
/// not a decimal digit. No error is raised for malformed input; it simply does
/// not pass.
///
/// Any Unicode decimal digit counts, so `"٧٥٠"` and `"７５０"` read the same as
/// `"750"`. Only the first digit is inspected. Digits `8` and `9` are still
/// digits, so they pass the numeric check and compare as `>= 4`.
///
/// # Examples
///
/// ```
/// use permwalk::permissions::check_file_permissions;
///
/// assert!(check_file_permissions("750"));
/// assert!(check_file_permissions("٧٥٠"));
/// assert!(!check_file_permissions("350"));
/// assert!(!check_file_permissions("rwx"));
/// assert!(!check_file_permissions(""));
/// ```
#[must_use]
pub fn check_file_permissions(mode: &str) -> bool {
    let mut digits = mode.chars().map(decimal_value);
    let Some(Some(owner)) = digits.next() else {
        return false;
    };

    digits.all(|d| d.is_some()) && owner >= READ_BIT
}

/// Parse an octal mode string into permission bits
///
/// Accepts 3 digits (`"755"`) or 4 digits with the special bits (`"1777"`).
///
/// # Errors
///
/// Returns [`PermwalkError::InvalidMode`] if the string is empty, has the
/// wrong length, or contains a digit outside `0..=7`.
pub fn parse_mode(mode: &str) -> Result<u32> {
    if !(3..=4).contains(&mode.len()) {
        return Err(PermwalkError::InvalidMode(mode.to_string()));
    }

    mode.chars().try_fold(0u32, |bits, c| {
        c.to_digit(8)
            .map(|digit| (bits << 3) | digit)
            .ok_or_else(|| PermwalkError::InvalidMode(mode.to_string()))
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("750", true)]
    #[case("350", false)]
    #[case("400", true)]
    #[case("377", false)]
    #[case("7", true)]
    #[case("0", false)]
    #[case("0755", false)]
    #[case("9", true)]
    #[case("800", true)]
    fn test_owner_digit_decides(#[case] mode: &str, #[case] expected: bool) {
        assert_eq!(check_file_permissions(mode), expected);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("75a")]
    #[case("-750")]
    #[case(" 750")]
    #[case("7.5")]
    #[case("7½0")]
    #[case("Ⅶ50")]
    #[case("²50")]
    fn test_malformed_fails_closed(#[case] mode: &str) {
        assert!(!check_file_permissions(mode));
    }

    #[rstest]
    #[case("٧٥٠", true)]
    #[case("٣٥٠", false)]
    #[case("７５０", true)]
    #[case("３５０", false)]
    #[case("७5०", true)]
    #[case("𝟳𝟱𝟬", true)]
    #[case("٧5a", false)]
    fn test_unicode_decimal_digits(#[case] mode: &str, #[case] expected: bool) {
        assert_eq!(check_file_permissions(mode), expected);
    }

    #[test]
    fn test_decimal_value() {
        assert_eq!(decimal_value('0'), Some(0));
        assert_eq!(decimal_value('9'), Some(9));
        assert_eq!(decimal_value('٩'), Some(9));
        assert_eq!(decimal_value('０'), Some(0));
        assert_eq!(decimal_value('/'), None);
        assert_eq!(decimal_value(':'), None);
        assert_eq!(decimal_value('a'), None);
        assert_eq!(decimal_value('\u{19DA}'), None);
    }

    #[test]
    fn test_parse_mode_stays_ascii_octal() {
        assert!(parse_mode("٧٥٠").is_err());
    }

    #[test]
    fn test_matches_first_digit_for_all_numeric_strings() {
        for n in 0..10_000u32 {
            let mode = n.to_string();
            let first = mode.chars().next().unwrap().to_digit(10).unwrap();
            assert_eq!(check_file_permissions(&mode), first >= 4, "mode {mode}");
        }
    }

    #[rstest]
    #[case("755", 0o755)]
    #[case("644", 0o644)]
    #[case("000", 0)]
    #[case("1777", 0o1777)]
    #[case("0700", 0o700)]
    fn test_parse_mode(#[case] mode: &str, #[case] expected: u32) {
        assert_eq!(parse_mode(mode).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("75")]
    #[case("78")]
    #[case("789")]
    #[case("77777")]
    #[case("rwx")]
    fn test_parse_mode_rejects(#[case] mode: &str) {
        assert!(matches!(
            parse_mode(mode),
            Err(PermwalkError::InvalidMode(s)) if s == mode
        ));
    }
}
