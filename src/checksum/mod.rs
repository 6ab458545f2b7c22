//! Check-digit algorithms for payment references and account numbers.
//!
//! # Algorithms
//!
//! | Algorithm | Used for |
//! |-----------|----------|
//! | ISO 7064 mod 97-10 | ISO 11649 creditor references (`RF..`), IBANs |
//! | Recursive mod 10 | 27-digit QR references (`QRR`) |
//!
//! All functions are pure and allocation-light; none of them panic on
//! arbitrary input.

mod mod97;
mod qr;

use std::fmt;

pub use mod97::{
    CHECK_SUFFIX, PAYLOAD_MAX, find_check_digits, find_check_digits_with_suffix, is_valid_iban,
    mod97, verify_creditor_reference,
};
pub use qr::{QR_BASE_LEN, QR_REFERENCE_LEN, compute_check_digit, verify_qr_reference};

/// Error returned when a checksum is asked for an input outside its contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumError {
    /// The rejected input.
    pub value: String,
    /// Why the input was rejected.
    pub reason: String,
}

impl ChecksumError {
    pub(crate) fn new(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ChecksumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot compute check digits for '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for ChecksumError {}
