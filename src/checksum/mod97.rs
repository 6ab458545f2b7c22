//! ISO 7064 mod 97-10, as used by ISO 11649 creditor references and IBANs.

use super::ChecksumError;

/// "RF" with letters expanded to numbers (R = 27, F = 15).
pub const CHECK_SUFFIX: &str = "2715";

/// Longest reference payload ISO 11649 allows (25 characters minus "RF" and two check digits).
pub const PAYLOAD_MAX: usize = 21;

/// Remainder modulo 97 of an alphanumeric string, letters expanded
/// ISO 7064 style (A = 10 … Z = 35).
///
/// Computed digit by digit so inputs of any length are fine.
/// Returns `None` for characters outside `[0-9A-Za-z]`.
pub fn mod97(value: &str) -> Option<u32> {
    let mut remainder = 0u32;
    for c in value.chars() {
        let n = c.to_digit(36)?;
        remainder = if n < 10 {
            (remainder * 10 + n) % 97
        } else {
            (remainder * 100 + n) % 97
        };
    }
    Some(remainder)
}

/// Find the two check digits that make `{base}2715{check}` congruent to 1 modulo 97.
///
/// Trial order is ascending (`00`, `01`, … `99`) and the first match is
/// returned. Fails if `base` is empty, longer than [`PAYLOAD_MAX`] or not
/// purely decimal.
pub fn find_check_digits(base: &str) -> Result<String, ChecksumError> {
    find_check_digits_with_suffix(base, CHECK_SUFFIX)
}

/// [`find_check_digits`] with a different expanded prefix, for clearing
/// schemes other than `RF`.
pub fn find_check_digits_with_suffix(base: &str, suffix: &str) -> Result<String, ChecksumError> {
    if base.is_empty() || base.len() > PAYLOAD_MAX {
        return Err(ChecksumError::new(
            base,
            format!("payload must be 1 to {PAYLOAD_MAX} digits, got {}", base.len()),
        ));
    }
    if !base.chars().all(|c| c.is_ascii_digit()) {
        return Err(ChecksumError::new(base, "payload must be decimal digits"));
    }
    if suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_digit()) {
        return Err(ChecksumError::new(suffix, "suffix must be decimal digits"));
    }

    let Some(prefix) = mod97(&format!("{base}{suffix}")) else {
        return Err(ChecksumError::new(base, "payload must be decimal digits"));
    };
    for tens in 0..10u32 {
        for units in 0..10u32 {
            if (prefix * 100 + tens * 10 + units) % 97 == 1 {
                return Ok(format!("{tens}{units}"));
            }
        }
    }
    // 100 consecutive candidates cover every residue modulo 97.
    Err(ChecksumError::new(base, "no check digits satisfy the congruence"))
}

/// Verify an ISO 11649 reference such as `RF18539007547034`.
///
/// Spaces are ignored; letters are case-insensitive.
pub fn verify_creditor_reference(reference: &str) -> bool {
    let compact: String = reference
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if !(5..=PAYLOAD_MAX + 4).contains(&compact.len())
        || !compact.starts_with("RF")
        || !compact.is_ascii()
    {
        return false;
    }
    let (head, payload) = compact.split_at(4);
    if !head[2..].chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    mod97(&format!("{payload}{head}")) == Some(1)
}

/// Verify an IBAN in electronic form (no spaces, upper case).
pub fn is_valid_iban(iban: &str) -> bool {
    if !(15..=34).contains(&iban.len()) || !iban.is_ascii() {
        return false;
    }
    let (head, account) = iban.split_at(4);
    let head_ok = head[..2].chars().all(|c| c.is_ascii_uppercase())
        && head[2..].chars().all(|c| c.is_ascii_digit());
    let account_ok = account
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase());
    head_ok && account_ok && mod97(&format!("{account}{head}")) == Some(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainder_matches_integer_arithmetic() {
        assert_eq!(mod97("0"), Some(0));
        assert_eq!(mod97("97"), Some(0));
        assert_eq!(mod97("98"), Some(1));
        let n = 123456789012345678901234567890u128;
        assert_eq!(mod97(&n.to_string()), Some((n % 97) as u32));
    }

    #[test]
    fn letters_expand() {
        // "RF" == "2715"
        assert_eq!(mod97("RF"), mod97("2715"));
        assert_eq!(mod97("rf"), mod97("2715"));
        assert_eq!(mod97("R-F"), None);
    }

    #[test]
    fn iso_11649_example() {
        assert_eq!(find_check_digits("539007547034").unwrap(), "18");
        assert!(verify_creditor_reference("RF18 5390 0754 7034"));
        assert!(!verify_creditor_reference("RF19539007547034"));
    }

    #[test]
    fn millisecond_timestamps() {
        assert_eq!(find_check_digits("1000000000000").unwrap(), "12");
        assert_eq!(find_check_digits("1600000000000").unwrap(), "75");
    }

    #[test]
    fn ascending_search_prefers_low_pair() {
        // "0" + "2715" leaves a residue satisfied by 04 (and nothing lower).
        assert_eq!(find_check_digits("0").unwrap(), "04");
    }

    #[test]
    fn rejects_out_of_contract_payloads() {
        assert!(find_check_digits("").is_err());
        assert!(find_check_digits("1234567890123456789012").is_err());
        assert!(find_check_digits("-1118102400000").is_err());
        assert!(find_check_digits("12a4").is_err());
        assert!(find_check_digits_with_suffix("1234", "RF").is_err());
    }

    #[test]
    fn payload_bound_is_inclusive() {
        assert!(find_check_digits("123456789012345678901").is_ok());
    }

    #[test]
    fn ibans() {
        assert!(is_valid_iban("CH4431999123000889012"));
        assert!(is_valid_iban("CH9300762011623852957"));
        assert!(is_valid_iban("DE89370400440532013000"));
        assert!(!is_valid_iban("CH4431999123000889013"));
        assert!(!is_valid_iban("CH44"));
        assert!(!is_valid_iban("ch4431999123000889012"));
    }
}
