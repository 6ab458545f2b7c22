//! Recursive modulo 10 check digit of Swiss QR references.

use super::ChecksumError;

/// Digits fed into the checksum.
pub const QR_BASE_LEN: usize = 26;
/// Full reference length, check digit included.
pub const QR_REFERENCE_LEN: usize = 27;

/// State transitions: `TRANSITIONS[state][digit]` is the next state.
const TRANSITIONS: [[u8; 10]; 10] = [
    [0, 9, 4, 6, 8, 2, 7, 1, 3, 5],
    [9, 4, 6, 8, 2, 7, 1, 3, 5, 0],
    [4, 6, 8, 2, 7, 1, 3, 5, 0, 9],
    [6, 8, 2, 7, 1, 3, 5, 0, 9, 4],
    [8, 2, 7, 1, 3, 5, 0, 9, 4, 6],
    [2, 7, 1, 3, 5, 0, 9, 4, 6, 8],
    [7, 1, 3, 5, 0, 9, 4, 6, 8, 2],
    [1, 3, 5, 0, 9, 4, 6, 8, 2, 7],
    [3, 5, 0, 9, 4, 6, 8, 2, 7, 1],
    [5, 0, 9, 4, 6, 8, 2, 7, 1, 3],
];

/// Check digit for each final state.
const CHECK_DIGITS: [u8; 10] = [0, 9, 8, 7, 6, 5, 4, 3, 2, 1];

/// Check digit of a 26-digit, zero-padded QR reference base.
pub fn compute_check_digit(base26: &str) -> Result<u8, ChecksumError> {
    if base26.len() != QR_BASE_LEN {
        return Err(ChecksumError::new(
            base26,
            format!("base must be {QR_BASE_LEN} digits, got {}", base26.len()),
        ));
    }
    let mut state = 0usize;
    for c in base26.chars() {
        let Some(digit) = c.to_digit(10) else {
            return Err(ChecksumError::new(base26, "base must be decimal digits"));
        };
        state = usize::from(TRANSITIONS[state][digit as usize]);
    }
    Ok(CHECK_DIGITS[state])
}

/// Verify a 27-digit QR reference (spaces ignored).
pub fn verify_qr_reference(reference: &str) -> bool {
    let compact: String = reference.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.len() != QR_REFERENCE_LEN || !compact.is_ascii() {
        return false;
    }
    let (base, check) = compact.split_at(QR_BASE_LEN);
    match (compute_check_digit(base), check.chars().next().and_then(|c| c.to_digit(10))) {
        (Ok(expected), Some(actual)) => u32::from(expected) == actual,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows_are_rotations() {
        for (state, row) in TRANSITIONS.iter().enumerate() {
            for (digit, next) in row.iter().enumerate() {
                assert_eq!(*next, TRANSITIONS[0][(state + digit) % 10]);
            }
        }
    }

    #[test]
    fn published_example() {
        assert_eq!(compute_check_digit("21000000000313947143000901").unwrap(), 7);
        assert!(verify_qr_reference("21 00000 00003 13947 14300 09017"));
        assert!(!verify_qr_reference("210000000003139471430009018"));
    }

    #[test]
    fn zero_base() {
        assert_eq!(compute_check_digit(&"0".repeat(26)).unwrap(), 0);
    }

    #[test]
    fn rejects_bad_bases() {
        assert!(compute_check_digit("123").is_err());
        assert!(compute_check_digit(&"0".repeat(27)).is_err());
        assert!(compute_check_digit("0000000000000000000000000a").is_err());
    }
}
