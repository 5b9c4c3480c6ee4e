// ✅ Field validation for the booking form
// CPF format rule and dd/mm/yyyy date parsing

use crate::entities::NationalId;
use crate::error::{ReservationError, Result};
use chrono::NaiveDate;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Number of digits in a CPF
pub const NATIONAL_ID_LEN: usize = 11;

/// Date format used on the form and in the backing file
pub const DATE_FORMAT: &str = "%d/%m/%Y";

pub const INVALID_NATIONAL_ID_MESSAGE: &str = "Invalid CPF! It must contain exactly 11 digits.";

// ============================================================================
// NATIONAL ID
// ============================================================================

/// Validate a national ID (CPF) by format only
///
/// Accepts exactly 11 ASCII digits with no separators. The check digits are
/// NOT verified, so "00000000000" passes.
pub fn validate_national_id(text: &str) -> Result<NationalId> {
    let well_formed =
        text.len() == NATIONAL_ID_LEN && text.bytes().all(|b| b.is_ascii_digit());

    if !well_formed {
        tracing::debug!("Rejected national ID with {} chars", text.chars().count());
        return Err(ReservationError::InvalidFormat(
            INVALID_NATIONAL_ID_MESSAGE.to_string(),
        ));
    }

    Ok(NationalId::from_validated(text.to_string()))
}

// ============================================================================
// DATES
// ============================================================================

/// Parse a dd/mm/yyyy date, naming the form field on failure
pub fn parse_date(field: &str, text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| {
        ReservationError::InvalidDate {
            field: field.to_string(),
            value: text.to_string(),
        }
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_valid_national_ids() {
        for id in ["12345678901", "00000000000", "99999999999", "52998224725"] {
            let parsed = validate_national_id(id);
            assert!(parsed.is_ok(), "{} should be accepted", id);
            assert_eq!(parsed.unwrap().as_str(), id);
        }
    }

    #[test]
    fn test_wrong_length_rejected() {
        for id in ["", "123", "1234567890", "123456789012"] {
            let err = validate_national_id(id).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFormat, "{:?}", id);
        }
    }

    #[test]
    fn test_non_digits_rejected() {
        // Formatted CPF, letters, inner/outer whitespace, unicode digits
        for id in [
            "123.456.789-01",
            "1234567890a",
            "abcdefghijk",
            " 1234567890",
            "12345 78901",
            "١٢٣٤٥٦٧٨٩٠١",
        ] {
            let err = validate_national_id(id).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFormat, "{:?}", id);
            assert_eq!(err.to_string(), INVALID_NATIONAL_ID_MESSAGE);
        }
    }

    #[test]
    fn test_every_eleven_digit_pattern_passes() {
        for d in 0..10u8 {
            let id: String = std::iter::repeat((b'0' + d) as char).take(11).collect();
            assert!(validate_national_id(&id).is_ok());
        }
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("check-in", "01/06/2024").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(format_date(date), "01/06/2024");

        let err = parse_date("check-in", "2024-06-01").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDate);
        assert!(err.to_string().contains("check-in"));

        assert!(parse_date("birthdate", "31/02/2000").is_err());
    }
}
