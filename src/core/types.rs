use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::tariff::TariffCode;
use super::timestamp::Timestamp;

/// Global Location Number printed for every billing entity.
pub const GLN: &str = "2099999999999";

/// Services per invoice must lie in `MIN_SERVICES..SERVICES_CAP`.
pub const MIN_SERVICES: usize = 1;
/// Exclusive upper bound on services per invoice.
pub const SERVICES_CAP: usize = 5;

/// Minutes per billing unit.
pub const MINUTES_PER_UNIT: u32 = 5;
/// Billing units per hour; the hourly rate is divided by this.
pub const UNITS_PER_HOUR: u32 = 12;

/// An invoice for one therapy engagement.
///
/// Only obtainable through [`Invoice::from_json`], `Invoice::try_from(InvoiceRecord)`
/// or [`InvoiceBuilder`](super::InvoiceBuilder), so every instance has passed validation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(rename = "naturapeuteID", skip_serializing_if = "Option::is_none")]
    pub naturapeute_id: Option<String>,
    /// Issuer of the invoice; receives the payment.
    pub author: Author,
    pub therapist: Therapist,
    pub patient: Patient,
    /// Hourly rate.
    pub service_price: u32,
    /// 1–4 services, in the order they were performed.
    pub services: Vec<Service>,
    #[serde(rename = "QRReference", skip_serializing_if = "Option::is_none")]
    pub qr_reference: Option<String>,
    /// When the treatment occurred; drives the payment reference.
    pub timestamp: Timestamp,
    pub paid: bool,
}

impl Invoice {
    /// Price of one 5-minute unit: `service_price / 12`.
    pub fn unit_price(&self) -> Decimal {
        Decimal::from(self.service_price) / Decimal::from(UNITS_PER_HOUR)
    }

    /// Total billed amount, rounded to cents.
    ///
    /// Equal to the sum of `service.amount(unit_price())`, but computed as
    /// `service_price × Σquantity / 12` so no intermediate rounding occurs.
    pub fn total_amount(&self) -> Decimal {
        let units: u64 = self.services.iter().map(|s| u64::from(s.quantity())).sum();
        let total = Decimal::from(self.service_price) * Decimal::from(units)
            / Decimal::from(UNITS_PER_HOUR);
        to_cents(total)
    }

    /// Earliest and latest service date.
    pub fn therapy_dates(&self) -> (Timestamp, Timestamp) {
        let mut dates = self.services.iter().map(|s| s.date);
        // Validation guarantees at least one service.
        let first = dates.next().unwrap_or(self.timestamp);
        dates.fold((first, first), |(min, max), d| (min.min(d), max.max(d)))
    }
}

/// Amount as printed on the invoice and in the QR bill, e.g. "48.00".
pub fn to_display_amount(amount: Decimal) -> String {
    to_cents(amount).to_string()
}

/// Round to two decimal places and fix the scale at 2.
pub(crate) fn to_cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// One therapy session.
#[derive(Debug, Clone, Serialize)]
pub struct Service {
    pub date: Timestamp,
    /// Minutes; a positive multiple of 5.
    pub duration: u32,
    pub code: TariffCode,
}

impl Service {
    /// Number of 5-minute units.
    pub fn quantity(&self) -> u32 {
        self.duration / MINUTES_PER_UNIT
    }

    /// `unit_price × quantity`.
    pub fn amount(&self, unit_price: Decimal) -> Decimal {
        unit_price * Decimal::from(self.quantity())
    }
}

/// Postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    pub street: String,
    pub zipcode: String,
    pub city: String,
}

impl Address {
    pub fn zip_city(&self) -> String {
        format!("{} {}", self.zipcode, self.city)
    }

    /// Single-line form, e.g. "Rue du Lac 4 · 1003 Lausanne".
    pub fn line(&self) -> String {
        format!("{} · {}", self.street, self.zip_city())
    }
}

/// The practice issuing the invoice.
#[derive(Debug, Clone, Serialize)]
pub struct Author {
    pub name: String,
    #[serde(flatten)]
    pub address: Address,
    pub phone: String,
    pub email: String,
    /// Normalised (upper-case, no spaces), checksum-valid IBAN.
    pub iban: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rcc: Option<String>,
}

/// The therapist who performed the services.
#[derive(Debug, Clone, Serialize)]
pub struct Therapist {
    pub firstname: String,
    pub lastname: String,
    #[serde(flatten)]
    pub address: Address,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rcc: Option<String>,
}

impl Therapist {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// Billing entities printed in the invoice header (author and therapist).
pub trait Entity {
    fn address(&self) -> &Address;
    fn phone(&self) -> &str;
    fn rcc(&self) -> Option<&str>;

    fn gln(&self) -> &'static str {
        GLN
    }

    fn phone_with_header(&self) -> String {
        format!("Tél.  {}", self.phone())
    }
}

impl Entity for Author {
    fn address(&self) -> &Address {
        &self.address
    }

    fn phone(&self) -> &str {
        &self.phone
    }

    fn rcc(&self) -> Option<&str> {
        self.rcc.as_deref()
    }
}

impl Entity for Therapist {
    fn address(&self) -> &Address {
        &self.address
    }

    fn phone(&self) -> &str {
        &self.phone
    }

    fn rcc(&self) -> Option<&str> {
        self.rcc.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Man,
    Woman,
}

impl Gender {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Man => "man",
            Self::Woman => "woman",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "man" => Some(Self::Man),
            "woman" => Some(Self::Woman),
            _ => None,
        }
    }
}

/// The person treated.
#[derive(Debug, Clone, Serialize)]
pub struct Patient {
    pub firstname: String,
    pub lastname: String,
    #[serde(flatten)]
    pub address: Address,
    /// Two-letter Swiss canton code.
    pub canton: String,
    pub birthdate: Timestamp,
    pub gender: Gender,
    pub email: String,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn service(duration: u32) -> Service {
        Service {
            date: Timestamp::from_raw(1_600_000_000_000).unwrap(),
            duration,
            code: TariffCode::new(1200).unwrap(),
        }
    }

    #[test]
    fn quantity_counts_five_minute_units() {
        assert_eq!(service(5).quantity(), 1);
        assert_eq!(service(20).quantity(), 4);
        assert_eq!(service(90).quantity(), 18);
    }

    #[test]
    fn amount_is_unit_price_times_quantity() {
        assert_eq!(service(20).amount(dec!(10)), dec!(40.0));
    }

    #[test]
    fn cents_rounding() {
        assert_eq!(to_cents(dec!(8.335)).to_string(), "8.34");
        assert_eq!(to_cents(dec!(120)).to_string(), "120.00");
    }

    #[test]
    fn address_line() {
        let address = Address {
            street: "Rue du Lac 4".into(),
            zipcode: "1003".into(),
            city: "Lausanne".into(),
        };
        assert_eq!(address.zip_city(), "1003 Lausanne");
        assert_eq!(address.line(), "Rue du Lac 4 · 1003 Lausanne");
    }
}
