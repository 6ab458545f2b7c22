//! Invoice fields a template can bind to.

use serde::{Deserialize, Serialize};

use crate::core::{Entity, Invoice, Timestamp, to_display_amount};
use crate::reference::Reference;

/// Date format printed on invoices.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// A named invoice field, written in templates as e.g. `"patient.birthdate"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "author.name")]
    AuthorName,
    #[serde(rename = "author.street")]
    AuthorStreet,
    #[serde(rename = "author.zip_city")]
    AuthorZipCity,
    #[serde(rename = "author.address")]
    AuthorAddress,
    #[serde(rename = "author.phone")]
    AuthorPhone,
    #[serde(rename = "author.phone_with_header")]
    AuthorPhoneWithHeader,
    #[serde(rename = "author.email")]
    AuthorEmail,
    #[serde(rename = "author.iban")]
    AuthorIban,
    #[serde(rename = "author.rcc")]
    AuthorRcc,
    #[serde(rename = "author.gln")]
    AuthorGln,

    #[serde(rename = "therapist.name")]
    TherapistName,
    #[serde(rename = "therapist.street")]
    TherapistStreet,
    #[serde(rename = "therapist.zip_city")]
    TherapistZipCity,
    #[serde(rename = "therapist.address")]
    TherapistAddress,
    #[serde(rename = "therapist.phone")]
    TherapistPhone,
    #[serde(rename = "therapist.phone_with_header")]
    TherapistPhoneWithHeader,
    #[serde(rename = "therapist.rcc")]
    TherapistRcc,
    #[serde(rename = "therapist.gln")]
    TherapistGln,

    #[serde(rename = "patient.name")]
    PatientName,
    #[serde(rename = "patient.firstname")]
    PatientFirstname,
    #[serde(rename = "patient.lastname")]
    PatientLastname,
    #[serde(rename = "patient.street")]
    PatientStreet,
    #[serde(rename = "patient.zip_city")]
    PatientZipCity,
    #[serde(rename = "patient.canton")]
    PatientCanton,
    #[serde(rename = "patient.birthdate")]
    PatientBirthdate,
    #[serde(rename = "patient.gender")]
    PatientGender,
    #[serde(rename = "patient.email")]
    PatientEmail,

    #[serde(rename = "invoice.date")]
    InvoiceDate,
    #[serde(rename = "invoice.total")]
    InvoiceTotal,
    #[serde(rename = "invoice.reference")]
    InvoiceReference,
    #[serde(rename = "invoice.reference_type")]
    InvoiceReferenceType,
    #[serde(rename = "invoice.service_price")]
    InvoiceServicePrice,
    #[serde(rename = "invoice.therapy_start")]
    InvoiceTherapyStart,
    #[serde(rename = "invoice.therapy_end")]
    InvoiceTherapyEnd,
    #[serde(rename = "invoice.naturapeute_id")]
    InvoiceNaturapeuteId,

    #[serde(rename = "service.date")]
    ServiceDate,
    #[serde(rename = "service.code")]
    ServiceCode,
    #[serde(rename = "service.duration")]
    ServiceDuration,
    #[serde(rename = "service.quantity")]
    ServiceQuantity,
    #[serde(rename = "service.unit_price")]
    ServiceUnitPrice,
    #[serde(rename = "service.amount")]
    ServiceAmount,
}

/// Per-render data a binding reads from.
#[derive(Debug, Clone, Copy)]
pub struct Bindings<'a> {
    pub invoice: &'a Invoice,
    pub reference: &'a Reference,
}

impl Field {
    /// Whether the field belongs to one service row and needs a row index.
    pub fn is_service_row(&self) -> bool {
        matches!(
            self,
            Self::ServiceDate
                | Self::ServiceCode
                | Self::ServiceDuration
                | Self::ServiceQuantity
                | Self::ServiceUnitPrice
                | Self::ServiceAmount
        )
    }

    /// Display text of the field.
    ///
    /// `None` when the invoice has no such data: an absent optional field,
    /// or a service row beyond the invoice's services.
    pub fn resolve(&self, bindings: &Bindings<'_>, row: Option<usize>) -> Option<String> {
        let invoice = bindings.invoice;
        let author = &invoice.author;
        let therapist = &invoice.therapist;
        let patient = &invoice.patient;

        if self.is_service_row() {
            let service = invoice.services.get(row?)?;
            let unit_price = invoice.unit_price();
            return Some(match self {
                Self::ServiceDate => date(&service.date),
                Self::ServiceCode => service.code.to_string(),
                Self::ServiceDuration => service.duration.to_string(),
                Self::ServiceQuantity => service.quantity().to_string(),
                Self::ServiceUnitPrice => to_display_amount(unit_price),
                _ => to_display_amount(service.amount(unit_price)),
            });
        }

        let text = match self {
            Self::AuthorName => author.name.clone(),
            Self::AuthorStreet => author.address.street.clone(),
            Self::AuthorZipCity => author.address.zip_city(),
            Self::AuthorAddress => author.address().line(),
            Self::AuthorPhone => author.phone().to_string(),
            Self::AuthorPhoneWithHeader => author.phone_with_header(),
            Self::AuthorEmail => author.email.clone(),
            Self::AuthorIban => author.iban.clone(),
            Self::AuthorRcc => author.rcc()?.to_string(),
            Self::AuthorGln => author.gln().to_string(),

            Self::TherapistName => therapist.full_name(),
            Self::TherapistStreet => therapist.address.street.clone(),
            Self::TherapistZipCity => therapist.address.zip_city(),
            Self::TherapistAddress => therapist.address().line(),
            Self::TherapistPhone => therapist.phone().to_string(),
            Self::TherapistPhoneWithHeader => therapist.phone_with_header(),
            Self::TherapistRcc => therapist.rcc()?.to_string(),
            Self::TherapistGln => therapist.gln().to_string(),

            Self::PatientName => patient.full_name(),
            Self::PatientFirstname => patient.firstname.clone(),
            Self::PatientLastname => patient.lastname.clone(),
            Self::PatientStreet => patient.address.street.clone(),
            Self::PatientZipCity => patient.address.zip_city(),
            Self::PatientCanton => patient.canton.clone(),
            Self::PatientBirthdate => date(&patient.birthdate),
            Self::PatientGender => patient.gender.code().to_string(),
            Self::PatientEmail => patient.email.clone(),

            Self::InvoiceDate => date(&invoice.timestamp),
            Self::InvoiceTotal => to_display_amount(invoice.total_amount()),
            Self::InvoiceReference => bindings.reference.value.clone(),
            Self::InvoiceReferenceType => bindings.reference.kind.code().to_string(),
            Self::InvoiceServicePrice => to_display_amount(invoice.service_price.into()),
            Self::InvoiceTherapyStart => date(&invoice.therapy_dates().0),
            Self::InvoiceTherapyEnd => date(&invoice.therapy_dates().1),
            Self::InvoiceNaturapeuteId => invoice.naturapeute_id.clone()?,

            // Service rows are handled above.
            _ => return None,
        };
        Some(text)
    }
}

fn date(timestamp: &Timestamp) -> String {
    timestamp.date().format(DATE_FORMAT).to_string()
}
