//! Payment references for the bank's clearing system.
//!
//! The author's IBAN decides the reference type: a QR-IBAN requires a
//! 27-digit QR reference (`QRR`), any other account takes an ISO 11649
//! creditor reference (`SCOR`). Both are derived from the invoice
//! timestamp in milliseconds, so recomputing on an unchanged invoice always
//! yields the same string.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::checksum::{
    CHECK_SUFFIX, ChecksumError, QR_BASE_LEN, compute_check_digit, find_check_digits_with_suffix,
};
use crate::core::Invoice;

/// Kind of payment reference, as named in the QR-bill data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceType {
    /// 27-digit QR reference, mandatory with a QR-IBAN.
    #[serde(rename = "QRR")]
    Qrr,
    /// ISO 11649 structured creditor reference (`RF..`).
    #[serde(rename = "SCOR")]
    Scor,
    /// No reference.
    #[serde(rename = "NON")]
    Non,
}

impl ReferenceType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Qrr => "QRR",
            Self::Scor => "SCOR",
            Self::Non => "NON",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "QRR" => Some(Self::Qrr),
            "SCOR" => Some(Self::Scor),
            "NON" => Some(Self::Non),
            _ => None,
        }
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A computed payment reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub kind: ReferenceType,
    pub value: String,
}

/// Jurisdiction-specific constants of the creditor reference.
///
/// The defaults produce ISO 11649 `RF` references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceScheme {
    /// Literal prefix of the reference.
    pub prefix: String,
    /// The prefix with letters expanded to digits, appended before the check digits.
    pub check_suffix: String,
}

impl Default for ReferenceScheme {
    fn default() -> Self {
        Self {
            prefix: "RF".into(),
            check_suffix: CHECK_SUFFIX.into(),
        }
    }
}

impl ReferenceScheme {
    /// `{prefix}{check digits}{millis}`.
    pub fn creditor_reference(&self, invoice: &Invoice) -> Result<String, ChecksumError> {
        let payload = invoice.timestamp.millis().to_string();
        let check = find_check_digits_with_suffix(&payload, &self.check_suffix)?;
        Ok(format!("{}{check}{payload}", self.prefix))
    }

    /// Pick the reference type from the author's IBAN and compute it.
    pub fn resolve(&self, invoice: &Invoice) -> Result<Reference, ChecksumError> {
        let kind = reference_type(&invoice.author.iban);
        log::debug!("reference type {kind} for IBAN {}", invoice.author.iban);
        let value = match kind {
            ReferenceType::Qrr => qr_reference(invoice)?,
            _ => self.creditor_reference(invoice)?,
        };
        Ok(Reference { kind, value })
    }
}

/// Whether `iban` is a Swiss QR-IBAN: `CH`, two check digits, an
/// institution id starting `30` or `31`, then 15 more digits.
///
/// Spaces are ignored.
pub fn is_qr_iban(iban: &str) -> bool {
    let compact: String = iban.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = compact.as_bytes();
    bytes.len() == 21
        && compact.starts_with("CH")
        && bytes[2..].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'3'
        && matches!(bytes[5], b'0' | b'1')
}

/// `Qrr` for a QR-IBAN, `Scor` for any other account.
pub fn reference_type(iban: &str) -> ReferenceType {
    if is_qr_iban(iban) {
        ReferenceType::Qrr
    } else {
        ReferenceType::Scor
    }
}

/// ISO 11649 reference with the default `RF` scheme:
/// `"RF"` + two check digits + the invoice timestamp in milliseconds.
///
/// Fails for pre-1970 invoices, whose millisecond value is negative.
pub fn creditor_reference(invoice: &Invoice) -> Result<String, ChecksumError> {
    ReferenceScheme::default().creditor_reference(invoice)
}

/// 27-digit QR reference: the millisecond timestamp zero-padded to 26
/// digits followed by its recursive mod 10 check digit.
pub fn qr_reference(invoice: &Invoice) -> Result<String, ChecksumError> {
    let millis = invoice.timestamp.millis();
    if millis < 0 {
        return Err(ChecksumError::new(
            millis.to_string(),
            "pre-1970 timestamps have no QR reference",
        ));
    }
    let base = format!("{millis:0>width$}", width = QR_BASE_LEN);
    let check = compute_check_digit(&base)?;
    Ok(format!("{base}{check}"))
}

/// Reference for `invoice` with the default scheme.
pub fn resolve(invoice: &Invoice) -> Result<Reference, ChecksumError> {
    ReferenceScheme::default().resolve(invoice)
}
