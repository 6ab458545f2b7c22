//! Untrusted invoice input, shaped like the client's JSON.
//!
//! Records carry strings and raw numbers exactly as received. Converting a
//! record into an [`Invoice`] runs every validation rule and either yields a
//! fully valid invoice or the complete list of violations.

use serde::{Deserialize, Serialize};

use super::error::{FactureError, ValidationError};
use super::tariff::TariffCode;
use super::timestamp::{RawTimestamp, Timestamp};
use super::types::*;
use super::validation::{normalize_iban, validate_invoice_record};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    #[serde(rename = "naturapeuteID", default)]
    pub naturapeute_id: Option<String>,
    pub author: AuthorRecord,
    pub therapist: TherapistRecord,
    pub patient: PatientRecord,
    pub service_price: i64,
    pub services: Vec<ServiceRecord>,
    #[serde(rename = "QRReference", default)]
    pub qr_reference: Option<String>,
    pub timestamp: RawTimestamp,
    #[serde(default)]
    pub paid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressRecord {
    pub street: String,
    pub zipcode: String,
    pub city: String,
}

impl AddressRecord {
    pub fn new(street: impl Into<String>, zipcode: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            street: street.into(),
            zipcode: zipcode.into(),
            city: city.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub name: String,
    #[serde(flatten)]
    pub address: AddressRecord,
    pub phone: String,
    pub email: String,
    pub iban: String,
    #[serde(default)]
    pub rcc: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TherapistRecord {
    pub firstname: String,
    pub lastname: String,
    #[serde(flatten)]
    pub address: AddressRecord,
    pub phone: String,
    #[serde(default)]
    pub iban: Option<String>,
    #[serde(default)]
    pub rcc: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub firstname: String,
    pub lastname: String,
    #[serde(flatten)]
    pub address: AddressRecord,
    pub canton: String,
    pub birthdate: RawTimestamp,
    pub gender: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub date: RawTimestamp,
    pub duration: i64,
    pub code: i64,
}

impl ServiceRecord {
    pub fn new(date: i64, duration: i64, code: i64) -> Self {
        Self {
            date: RawTimestamp(date),
            duration,
            code,
        }
    }
}

impl Invoice {
    /// Parse and validate an invoice from the client's JSON.
    ///
    /// Malformed JSON or missing fields are reported as a single validation
    /// error on the field `record`.
    pub fn from_json(json: &str) -> Result<Self, FactureError> {
        let record: InvoiceRecord = serde_json::from_str(json).map_err(|e| {
            FactureError::Validation(vec![ValidationError::with_rule(
                "record",
                e.to_string(),
                "schema",
            )])
        })?;
        Self::try_from(record)
    }
}

impl TryFrom<InvoiceRecord> for Invoice {
    type Error = FactureError;

    fn try_from(record: InvoiceRecord) -> Result<Self, Self::Error> {
        let errors = validate_invoice_record(&record);
        if !errors.is_empty() {
            return Err(FactureError::Validation(errors));
        }

        let services = record
            .services
            .into_iter()
            .enumerate()
            .map(|(i, s)| service(s, i))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Invoice {
            naturapeute_id: record.naturapeute_id,
            author: Author {
                name: record.author.name,
                address: address(record.author.address),
                phone: record.author.phone,
                email: record.author.email,
                iban: normalize_iban(&record.author.iban),
                rcc: record.author.rcc,
            },
            therapist: Therapist {
                firstname: record.therapist.firstname,
                lastname: record.therapist.lastname,
                address: address(record.therapist.address),
                phone: record.therapist.phone,
                iban: record.therapist.iban.as_deref().map(normalize_iban),
                rcc: record.therapist.rcc,
            },
            patient: Patient {
                firstname: record.patient.firstname,
                lastname: record.patient.lastname,
                address: address(record.patient.address),
                canton: record.patient.canton,
                birthdate: record
                    .patient
                    .birthdate
                    .decode_birthdate()
                    .map_err(|e| invalid("patient.birthdate", e.to_string()))?,
                gender: Gender::from_code(&record.patient.gender).ok_or_else(|| {
                    invalid("patient.gender", "gender must be 'man' or 'woman'")
                })?,
                email: record.patient.email,
            },
            service_price: u32::try_from(record.service_price)
                .map_err(|_| invalid("servicePrice", "service price out of range"))?,
            services,
            qr_reference: record.qr_reference.map(|r| r.trim().to_string()),
            timestamp: timestamp(record.timestamp, "timestamp")?,
            paid: record.paid,
        })
    }
}

fn address(record: AddressRecord) -> Address {
    Address {
        street: record.street,
        zipcode: record.zipcode,
        city: record.city,
    }
}

fn service(record: ServiceRecord, index: usize) -> Result<Service, FactureError> {
    let field = |name: &str| format!("services[{index}].{name}");
    Ok(Service {
        date: timestamp(record.date, &field("date"))?,
        duration: u32::try_from(record.duration)
            .map_err(|_| invalid(field("duration"), "duration out of range"))?,
        code: TariffCode::new(record.code)
            .ok_or_else(|| invalid(field("code"), "unknown tariff code"))?,
    })
}

fn timestamp(raw: RawTimestamp, field: &str) -> Result<Timestamp, FactureError> {
    raw.decode().map_err(|e| invalid(field, e.to_string()))
}

// Only reachable if conversion and validation disagree.
fn invalid(field: impl Into<String>, message: impl Into<String>) -> FactureError {
    FactureError::Validation(vec![ValidationError::new(field, message)])
}
