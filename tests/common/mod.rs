//! Invoices shared by the integration tests.

#![allow(dead_code)]

use facture::core::*;

pub const QR_IBAN: &str = "CH4431999123000889012";
pub const IBAN: &str = "CH9300762011623852957";
pub const FIXTURE_INVOICE: &str = include_str!("../fixtures/invoice.json");

pub fn fixture_path(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

pub fn author(iban: &str) -> AuthorRecord {
    AuthorRecord {
        name: "Cabinet Léman".into(),
        address: AddressRecord::new("Rue du Lac 4", "1003", "Lausanne"),
        phone: "+41 21 555 12 12".into(),
        email: "contact@leman.ch".into(),
        iban: iban.into(),
        rcc: None,
    }
}

pub fn therapist() -> TherapistRecord {
    TherapistRecord {
        firstname: "Anna".into(),
        lastname: "Keller".into(),
        address: AddressRecord::new("Rue du Lac 4", "1003", "Lausanne"),
        phone: "+41 21 555 12 13".into(),
        iban: None,
        rcc: Some("A1234.56".into()),
    }
}

pub fn patient() -> PatientRecord {
    PatientRecord {
        firstname: "Nicholas".into(),
        lastname: "Ailleboust".into(),
        address: AddressRecord::new("Tösstalstrasse 97", "8872", "Weesen"),
        canton: "SG".into(),
        birthdate: RawTimestamp(-1118102400),
        gender: "man".into(),
        email: "NicholasAilleboust@teleworm.us".into(),
    }
}

/// A builder with every party set, one 60-minute service and price 120.
pub fn builder(iban: &str, timestamp: i64) -> InvoiceBuilder {
    InvoiceBuilder::new()
        .author(author(iban))
        .therapist(therapist())
        .patient(patient())
        .service_price(120)
        .timestamp(timestamp)
        .add_service(ServiceRecord::new(timestamp, 60, 1200))
}

pub fn invoice(iban: &str, timestamp: i64) -> Invoice {
    builder(iban, timestamp).build().unwrap()
}

/// A record with `count` valid services.
pub fn record_with_services(count: usize) -> InvoiceRecord {
    let mut record = builder(IBAN, 1_600_000_000_000).into_record().unwrap();
    record.services = (0..count)
        .map(|i| ServiceRecord::new(1_600_000_000_000 + i as i64 * 86_400_000, 30, 1200))
        .collect();
    record
}
