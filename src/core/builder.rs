use super::error::FactureError;
use super::record::*;
use super::timestamp::RawTimestamp;
use super::types::Invoice;

/// Builder for constructing valid invoices in code.
///
/// Runs the same rules as [`Invoice::from_json`].
///
/// ```
/// use facture::core::*;
///
/// let invoice = InvoiceBuilder::new()
///     .author(AuthorRecord {
///         name: "Cabinet Léman".into(),
///         address: AddressRecord::new("Rue du Lac 4", "1003", "Lausanne"),
///         phone: "+41 21 555 12 12".into(),
///         email: "contact@leman.ch".into(),
///         iban: "CH93 0076 2011 6238 5295 7".into(),
///         rcc: None,
///     })
///     .therapist(TherapistRecord {
///         firstname: "Anna".into(),
///         lastname: "Keller".into(),
///         address: AddressRecord::new("Rue du Lac 4", "1003", "Lausanne"),
///         phone: "+41 21 555 12 13".into(),
///         iban: None,
///         rcc: Some("A1234.56".into()),
///     })
///     .patient(PatientRecord {
///         firstname: "Nicholas".into(),
///         lastname: "Ailleboust".into(),
///         address: AddressRecord::new("Tösstalstrasse 97", "8872", "Weesen"),
///         canton: "SG".into(),
///         birthdate: RawTimestamp(-1118102400),
///         gender: "woman".into(),
///         email: "NicholasAilleboust@teleworm.us".into(),
///     })
///     .service_price(96)
///     .timestamp(1_600_000_000_000)
///     .add_service(ServiceRecord::new(1_600_000_000_000, 30, 1200))
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.total_amount().to_string(), "48.00");
/// ```
#[derive(Debug, Default)]
pub struct InvoiceBuilder {
    naturapeute_id: Option<String>,
    author: Option<AuthorRecord>,
    therapist: Option<TherapistRecord>,
    patient: Option<PatientRecord>,
    service_price: Option<i64>,
    services: Vec<ServiceRecord>,
    qr_reference: Option<String>,
    timestamp: Option<RawTimestamp>,
    paid: bool,
}

impl InvoiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn naturapeute_id(mut self, id: impl Into<String>) -> Self {
        self.naturapeute_id = Some(id.into());
        self
    }

    pub fn author(mut self, author: AuthorRecord) -> Self {
        self.author = Some(author);
        self
    }

    pub fn therapist(mut self, therapist: TherapistRecord) -> Self {
        self.therapist = Some(therapist);
        self
    }

    pub fn patient(mut self, patient: PatientRecord) -> Self {
        self.patient = Some(patient);
        self
    }

    pub fn service_price(mut self, price: i64) -> Self {
        self.service_price = Some(price);
        self
    }

    pub fn add_service(mut self, service: ServiceRecord) -> Self {
        self.services.push(service);
        self
    }

    pub fn qr_reference(mut self, reference: impl Into<String>) -> Self {
        self.qr_reference = Some(reference.into());
        self
    }

    /// Raw client timestamp (milliseconds if non-negative, seconds if negative).
    pub fn timestamp(mut self, raw: i64) -> Self {
        self.timestamp = Some(RawTimestamp(raw));
        self
    }

    pub fn paid(mut self, paid: bool) -> Self {
        self.paid = paid;
        self
    }

    /// Assemble the record and validate it.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Invoice, FactureError> {
        Invoice::try_from(self.into_record()?)
    }

    /// The assembled record, without validation.
    pub fn into_record(self) -> Result<InvoiceRecord, FactureError> {
        let required = |what: &str| FactureError::Builder(format!("{what} is required"));
        Ok(InvoiceRecord {
            naturapeute_id: self.naturapeute_id,
            author: self.author.ok_or_else(|| required("author"))?,
            therapist: self.therapist.ok_or_else(|| required("therapist"))?,
            patient: self.patient.ok_or_else(|| required("patient"))?,
            service_price: self.service_price.ok_or_else(|| required("service price"))?,
            services: self.services,
            qr_reference: self.qr_reference,
            timestamp: self.timestamp.ok_or_else(|| required("timestamp"))?,
            paid: self.paid,
        })
    }
}
