//! Swiss QR-bill payment data (Swiss Payment Standards, version 2.0).
//!
//! Produces the text carried by the QR code; drawing the code itself is
//! left to the document composer.

use rust_decimal::Decimal;
use serde::Serialize;

use super::ConfigError;
use super::content::{PaymentTemplate, Source};
use super::field::Bindings;
use crate::core::to_display_amount;
use crate::reference::{ReferenceType, is_qr_iban};

const HEADER: &str = "SPC";
const VERSION: &str = "0200";
const CODING: &str = "1";
const TRAILER: &str = "EPD";
/// Combined address: name plus two free address lines.
const ADDRESS_TYPE: &str = "K";

const NAME_MAX: usize = 70;
const ADDRESS_LINE_MAX: usize = 70;
const MESSAGE_MAX: usize = 140;

/// A party printed in the payment part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillParty {
    pub name: String,
    /// Street and building number.
    pub street: String,
    /// Postal code and town.
    pub locality: String,
    /// ISO 3166-1 alpha-2.
    pub country: String,
}

impl BillParty {
    fn push_lines(party: Option<&Self>, lines: &mut Vec<String>) {
        match party {
            Some(p) => lines.extend([
                ADDRESS_TYPE.to_string(),
                p.name.clone(),
                p.street.clone(),
                p.locality.clone(),
                String::new(),
                String::new(),
                p.country.clone(),
            ]),
            None => lines.extend(std::iter::repeat_n(String::new(), 7)),
        }
    }
}

/// The data encoded in a QR bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QrBill {
    pub iban: String,
    pub creditor: BillParty,
    /// Open amount when `None`.
    pub amount: Option<Decimal>,
    pub currency: String,
    pub debtor: Option<BillParty>,
    pub reference_type: ReferenceType,
    pub reference: String,
    pub message: Option<String>,
}

impl QrBill {
    /// Resolve a payment template against one invoice.
    pub fn resolve(template: &PaymentTemplate, bindings: &Bindings<'_>) -> Result<Self, ConfigError> {
        let text = |name: &str, source: &Source| resolve_source(name, source, bindings);

        let amount = text("amount", &template.amount)?;
        let amount = if amount.is_empty() {
            None
        } else {
            Some(amount.parse::<Decimal>().map_err(|e| {
                ConfigError::Binding(format!("amount '{amount}' is not a number: {e}"))
            })?)
        };

        let reference_type = text("reference_type", &template.reference_type)?;
        let reference_type = ReferenceType::from_code(&reference_type).ok_or_else(|| {
            ConfigError::Binding(format!("unknown reference type '{reference_type}'"))
        })?;

        let debtor = match &template.debtor_name {
            Some(name) => Some(BillParty {
                name: text("debtor_name", name)?,
                street: optional(template.debtor_street.as_ref(), "debtor_street", bindings)?,
                locality: optional(template.debtor_locality.as_ref(), "debtor_locality", bindings)?,
                country: template.debtor_country.clone(),
            }),
            None => None,
        };

        let message = match &template.message {
            Some(source) => Some(text("message", source)?),
            None => None,
        };

        let bill = QrBill {
            iban: text("creditor_iban", &template.creditor_iban)?.replace(' ', ""),
            creditor: BillParty {
                name: text("creditor_name", &template.creditor_name)?,
                street: text("creditor_street", &template.creditor_street)?,
                locality: text("creditor_locality", &template.creditor_locality)?,
                country: template.creditor_country.clone(),
            },
            amount,
            currency: template.currency.clone(),
            debtor,
            reference_type,
            reference: text("reference", &template.reference)?,
            message,
        };
        bill.check()?;
        Ok(bill)
    }

    /// Rules the payment part must obey before it can be encoded.
    pub fn check(&self) -> Result<(), ConfigError> {
        let fail = |msg: String| Err(ConfigError::Binding(msg));

        if !matches!(self.currency.as_str(), "CHF" | "EUR") {
            return fail(format!("currency must be CHF or EUR, got '{}'", self.currency));
        }
        let qr_iban = is_qr_iban(&self.iban);
        match self.reference_type {
            ReferenceType::Qrr if !qr_iban => {
                return fail("a QR reference requires a QR-IBAN".into());
            }
            ReferenceType::Scor | ReferenceType::Non if qr_iban => {
                return fail("a QR-IBAN requires a QR reference".into());
            }
            ReferenceType::Non if !self.reference.is_empty() => {
                return fail("reference type NON must not carry a reference".into());
            }
            _ => {}
        }
        if let Some(amount) = self.amount {
            if amount <= Decimal::ZERO || amount > Decimal::from(999_999_999) {
                return fail(format!("amount {amount} out of range"));
            }
        }
        for party in std::iter::once(&self.creditor).chain(self.debtor.as_ref()) {
            if party.name.is_empty() || party.name.chars().count() > NAME_MAX {
                return fail(format!("party name must be 1 to {NAME_MAX} characters"));
            }
            for line in [&party.street, &party.locality] {
                if line.chars().count() > ADDRESS_LINE_MAX {
                    return fail(format!("address line exceeds {ADDRESS_LINE_MAX} characters"));
                }
            }
        }
        if self.message.as_ref().is_some_and(|m| m.chars().count() > MESSAGE_MAX) {
            return fail(format!("message exceeds {MESSAGE_MAX} characters"));
        }
        Ok(())
    }

    /// The QR code text, elements separated by `\n`.
    pub fn to_payload(&self) -> String {
        let mut lines: Vec<String> = vec![
            HEADER.into(),
            VERSION.into(),
            CODING.into(),
            self.iban.clone(),
        ];
        BillParty::push_lines(Some(&self.creditor), &mut lines);
        // Ultimate creditor, reserved for future use.
        BillParty::push_lines(None, &mut lines);
        lines.push(self.amount.map(to_display_amount).unwrap_or_default());
        lines.push(self.currency.clone());
        BillParty::push_lines(self.debtor.as_ref(), &mut lines);
        lines.push(self.reference_type.code().into());
        lines.push(self.reference.clone());
        lines.push(self.message.clone().unwrap_or_default());
        lines.push(TRAILER.into());
        lines.join("\n")
    }
}

fn resolve_source(name: &str, source: &Source, bindings: &Bindings<'_>) -> Result<String, ConfigError> {
    match source {
        Source::Literal(text) => Ok(text.clone()),
        Source::Field { field } => field.resolve(bindings, None).ok_or_else(|| {
            ConfigError::Binding(format!("payment field '{name}' has no value"))
        }),
    }
}

fn optional(
    source: Option<&Source>,
    name: &str,
    bindings: &Bindings<'_>,
) -> Result<String, ConfigError> {
    source.map_or(Ok(String::new()), |s| resolve_source(name, s, bindings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bill() -> QrBill {
        QrBill {
            iban: "CH4431999123000889012".into(),
            creditor: BillParty {
                name: "Cabinet Léman".into(),
                street: "Rue du Lac 4".into(),
                locality: "1003 Lausanne".into(),
                country: "CH".into(),
            },
            amount: Some(dec!(120)),
            currency: "CHF".into(),
            debtor: None,
            reference_type: ReferenceType::Qrr,
            reference: "000000000000016000000000002".into(),
            message: None,
        }
    }

    #[test]
    fn payload_layout() {
        let payload = bill().to_payload();
        let lines: Vec<&str> = payload.split('\n').collect();
        assert_eq!(lines.len(), 31);
        assert_eq!(&lines[..4], &["SPC", "0200", "1", "CH4431999123000889012"]);
        assert_eq!(&lines[4..11], &["K", "Cabinet Léman", "Rue du Lac 4", "1003 Lausanne", "", "", "CH"]);
        assert!(lines[11..18].iter().all(|l| l.is_empty()));
        assert_eq!(lines[18], "120.00");
        assert_eq!(lines[19], "CHF");
        assert!(lines[20..27].iter().all(|l| l.is_empty()));
        assert_eq!(&lines[27..], &["QRR", "000000000000016000000000002", "", "EPD"]);
    }

    #[test]
    fn open_amount_is_empty() {
        let mut b = bill();
        b.amount = None;
        assert!(b.check().is_ok());
        assert_eq!(b.to_payload().split('\n').nth(18), Some(""));
    }

    #[test]
    fn reference_type_must_match_iban() {
        let mut b = bill();
        b.reference_type = ReferenceType::Scor;
        assert!(b.check().is_err());

        let mut b = bill();
        b.iban = "CH9300762011623852957".into();
        assert!(b.check().is_err());
    }

    #[test]
    fn currency_is_chf_or_eur() {
        let mut b = bill();
        b.currency = "USD".into();
        assert!(b.check().is_err());
    }
}
