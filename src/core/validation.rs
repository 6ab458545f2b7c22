//! Field rules for invoice records.
//!
//! Each rule is a named function appending to an error list, so a record is
//! always checked in full and every violation is reported together.

use super::cantons::is_known_canton;
use super::error::ValidationError;
use super::record::*;
use super::tariff::is_known_tariff_code;
use super::timestamp::RawTimestamp;
use super::types::{Gender, MIN_SERVICES, MINUTES_PER_UNIT, SERVICES_CAP};
use crate::checksum::is_valid_iban;

/// Maximum length of a single first or last name.
pub const NAME_MAX: usize = 35;
/// Maximum length of a joined "first last" name or an organisation name.
pub const FULL_NAME_MAX: usize = 70;
pub const STREET_MAX: usize = 40;
pub const CITY_MAX: usize = 35;

/// Validate an invoice record. Returns all validation errors found (not just the first).
pub fn validate_invoice_record(record: &InvoiceRecord) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(id) = &record.naturapeute_id {
        if !(id.len() == 24 && id.chars().all(|c| c.is_ascii_hexdigit())) {
            errors.push(ValidationError::with_rule(
                "naturapeuteID",
                "must be 24 hexadecimal characters",
                "pattern",
            ));
        }
    }

    validate_author(&record.author, "author", &mut errors);
    validate_therapist(&record.therapist, "therapist", &mut errors);
    validate_patient(&record.patient, "patient", &mut errors);

    if record.service_price <= 0 || record.service_price > i64::from(u32::MAX) {
        errors.push(ValidationError::with_rule(
            "servicePrice",
            format!("service price must be positive, got {}", record.service_price),
            "range",
        ));
    }

    if !(MIN_SERVICES..SERVICES_CAP).contains(&record.services.len()) {
        errors.push(ValidationError::with_rule(
            "services",
            format!(
                "an invoice needs {MIN_SERVICES} to {} services, got {}",
                SERVICES_CAP - 1,
                record.services.len()
            ),
            "services-count",
        ));
    }
    for (i, service) in record.services.iter().enumerate() {
        validate_service(service, &format!("services[{i}]"), &mut errors);
    }

    if let Some(reference) = &record.qr_reference {
        let reference = reference.trim();
        if !(reference.len() == 27 && reference.chars().all(|c| c.is_ascii_digit())) {
            errors.push(ValidationError::with_rule(
                "QRReference",
                "QR reference must be 27 digits",
                "pattern",
            ));
        }
    }

    validate_timestamp(record.timestamp, "timestamp", &mut errors);

    errors
}

/// Validate one service entry.
pub fn validate_service(service: &ServiceRecord, path: &str, errors: &mut Vec<ValidationError>) {
    validate_timestamp(service.date, &format!("{path}.date"), errors);

    let step = i64::from(MINUTES_PER_UNIT);
    if service.duration < step || service.duration > i64::from(u32::MAX) {
        errors.push(ValidationError::with_rule(
            format!("{path}.duration"),
            format!("duration must be at least {step} minutes, got {}", service.duration),
            "range",
        ));
    } else if service.duration % step != 0 {
        errors.push(ValidationError::with_rule(
            format!("{path}.duration"),
            format!("duration must be a multiple of {step} minutes, got {}", service.duration),
            "multiple-of",
        ));
    }

    let known = u16::try_from(service.code).is_ok_and(is_known_tariff_code);
    if !known {
        errors.push(ValidationError::with_rule(
            format!("{path}.code"),
            format!("'{}' is not a Tarif 590 code", service.code),
            "tariff-code",
        ));
    }
}

pub fn validate_author(author: &AuthorRecord, path: &str, errors: &mut Vec<ValidationError>) {
    check_length(&author.name, &format!("{path}.name"), 1, FULL_NAME_MAX, errors);
    validate_address(&author.address, path, errors);
    validate_phone(&author.phone, &format!("{path}.phone"), errors);
    validate_email(&author.email, &format!("{path}.email"), errors);
    validate_iban(&author.iban, &format!("{path}.iban"), errors);
    if let Some(rcc) = &author.rcc {
        validate_rcc(rcc, &format!("{path}.rcc"), errors);
    }
}

pub fn validate_therapist(
    therapist: &TherapistRecord,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    validate_person_name(&therapist.firstname, &therapist.lastname, path, errors);
    validate_address(&therapist.address, path, errors);
    validate_phone(&therapist.phone, &format!("{path}.phone"), errors);
    if let Some(iban) = &therapist.iban {
        validate_iban(iban, &format!("{path}.iban"), errors);
    }
    if let Some(rcc) = &therapist.rcc {
        validate_rcc(rcc, &format!("{path}.rcc"), errors);
    }
}

pub fn validate_patient(patient: &PatientRecord, path: &str, errors: &mut Vec<ValidationError>) {
    validate_person_name(&patient.firstname, &patient.lastname, path, errors);
    validate_address(&patient.address, path, errors);
    if !is_known_canton(&patient.canton) {
        errors.push(ValidationError::with_rule(
            format!("{path}.canton"),
            format!("'{}' is not a Swiss canton", patient.canton),
            "canton",
        ));
    }
    if let Err(e) = patient.birthdate.decode_birthdate() {
        errors.push(ValidationError::with_rule(
            format!("{path}.birthdate"),
            e.reason,
            "range",
        ));
    }
    if Gender::from_code(&patient.gender).is_none() {
        errors.push(ValidationError::with_rule(
            format!("{path}.gender"),
            format!("gender must be 'man' or 'woman', got '{}'", patient.gender),
            "gender",
        ));
    }
    validate_email(&patient.email, &format!("{path}.email"), errors);
}

/// First and last name, each bounded, and the joined name fitting a QR-bill name field.
pub fn validate_person_name(
    firstname: &str,
    lastname: &str,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    let first_ok = check_length(firstname, &format!("{path}.firstname"), 1, NAME_MAX, errors);
    let last_ok = check_length(lastname, &format!("{path}.lastname"), 1, NAME_MAX, errors);
    let joined = firstname.chars().count() + 1 + lastname.chars().count();
    if first_ok && last_ok && joined > FULL_NAME_MAX {
        errors.push(ValidationError::with_rule(
            format!("{path}.lastname"),
            format!("full name must not exceed {FULL_NAME_MAX} characters, got {joined}"),
            "length",
        ));
    }
}

pub fn validate_address(address: &AddressRecord, path: &str, errors: &mut Vec<ValidationError>) {
    check_length(&address.street, &format!("{path}.street"), 1, STREET_MAX, errors);
    if !(address.zipcode.len() == 4 && address.zipcode.chars().all(|c| c.is_ascii_digit())) {
        errors.push(ValidationError::with_rule(
            format!("{path}.zipcode"),
            format!("zip code must be 4 digits, got '{}'", address.zipcode),
            "pattern",
        ));
    }
    check_length(&address.city, &format!("{path}.city"), 1, CITY_MAX, errors);
}

/// Optional leading `+`, then 6 to 20 digits or spaces.
pub fn validate_phone(phone: &str, field: &str, errors: &mut Vec<ValidationError>) {
    let body = phone.strip_prefix('+').unwrap_or(phone);
    let digits = body.chars().filter(|c| c.is_ascii_digit()).count();
    let ok = (6..=20).contains(&body.len())
        && body.chars().all(|c| c.is_ascii_digit() || c == ' ')
        && digits >= 6;
    if !ok {
        errors.push(ValidationError::with_rule(
            field,
            format!("'{phone}' is not a phone number"),
            "pattern",
        ));
    }
}

pub fn validate_email(email: &str, field: &str, errors: &mut Vec<ValidationError>) {
    if !is_valid_email(email) {
        errors.push(ValidationError::with_rule(
            field,
            format!("'{email}' is not an e-mail address"),
            "pattern",
        ));
    }
}

/// `local@domain.tld`, no whitespace, non-empty labels, alphabetic TLD of at least 2 letters.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return false;
    }
    labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}

/// Upper-case and strip spaces, the form IBANs are stored and compared in.
pub fn normalize_iban(iban: &str) -> String {
    iban.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

pub fn validate_iban(iban: &str, field: &str, errors: &mut Vec<ValidationError>) {
    if !is_valid_iban(&normalize_iban(iban)) {
        errors.push(ValidationError::with_rule(
            field,
            format!("'{iban}' is not a valid IBAN"),
            "iban",
        ));
    }
}

/// Creditor code of the Swiss RCC registry, e.g. "A1234.56".
pub fn validate_rcc(rcc: &str, field: &str, errors: &mut Vec<ValidationError>) {
    let compact: String = rcc.chars().filter(|&c| c != '.').collect();
    let dots = rcc.len() - compact.len();
    let ok = dots <= 1
        && (dots == 0 || rcc.find('.') == Some(5))
        && compact.len() == 7
        && compact.starts_with(|c: char| c.is_ascii_uppercase())
        && compact[1..].chars().all(|c| c.is_ascii_digit());
    if !ok {
        errors.push(ValidationError::with_rule(
            field,
            format!("'{rcc}' is not an RCC number"),
            "pattern",
        ));
    }
}

pub fn validate_timestamp(raw: RawTimestamp, field: &str, errors: &mut Vec<ValidationError>) {
    if let Err(e) = raw.decode() {
        errors.push(ValidationError::with_rule(field, e.reason, "timestamp-floor"));
    }
}

/// Character-count bounds, inclusive. Returns whether the value passed.
pub fn check_length(
    value: &str,
    field: &str,
    min: usize,
    max: usize,
    errors: &mut Vec<ValidationError>,
) -> bool {
    let len = value.chars().count();
    if len < min || len > max {
        errors.push(ValidationError::with_rule(
            field,
            format!("length must be between {min} and {max} characters, got {len}"),
            "length",
        ));
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors_for(f: impl FnOnce(&mut Vec<ValidationError>)) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        f(&mut errors);
        errors
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("NicholasAilleboust@teleworm.us"));
        assert!(is_valid_email("a.b@mail.example.ch"));
        assert!(!is_valid_email("NicholasAilleboust@teleworm."));
        assert!(!is_valid_email("NicholasAilleboust@teleworm"));
        assert!(!is_valid_email("NicholasAilleboust@"));
        assert!(!is_valid_email("NicholasAilleboust"));
        assert!(!is_valid_email("a b@c.ch"));
    }

    #[test]
    fn phone_shapes() {
        assert!(errors_for(|e| validate_phone("+41 21 555 12 12", "p", e)).is_empty());
        assert!(errors_for(|e| validate_phone("0215551212", "p", e)).is_empty());
        assert_eq!(errors_for(|e| validate_phone("12-34", "p", e)).len(), 1);
        assert_eq!(errors_for(|e| validate_phone("", "p", e)).len(), 1);
    }

    #[test]
    fn rcc_shapes() {
        assert!(errors_for(|e| validate_rcc("A1234.56", "r", e)).is_empty());
        assert!(errors_for(|e| validate_rcc("A123456", "r", e)).is_empty());
        assert_eq!(errors_for(|e| validate_rcc("A12.3456", "r", e)).len(), 1);
        assert_eq!(errors_for(|e| validate_rcc("1234567", "r", e)).len(), 1);
    }

    #[test]
    fn iban_normalised_before_check() {
        assert_eq!(normalize_iban("ch44 3199 9123 0008 8901 2"), "CH4431999123000889012");
        assert!(errors_for(|e| validate_iban("CH44 3199 9123 0008 8901 2", "i", e)).is_empty());
        assert_eq!(errors_for(|e| validate_iban("CH4431999123000889013", "i", e)).len(), 1);
    }

    #[test]
    fn joined_name_limit() {
        let first = "Nicholas Nicholas Nicholas Nicholas";
        let last = "Ailleboust Ailleboust Ailleboust Ai";
        let errors = errors_for(|e| validate_person_name(first, last, "patient", e));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "patient.lastname");
    }

    #[test]
    fn length_counts_characters() {
        // 'ö' is two bytes but one character
        assert!(errors_for(|e| { check_length("Tösstal", "s", 1, 7, e); }).is_empty());
    }

    #[test]
    fn zipcode_is_four_digits() {
        let address = AddressRecord::new("Tösstalstrasse 97", "8872887288", "Weesen");
        let errors = errors_for(|e| validate_address(&address, "patient", e));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "patient.zipcode");
    }
}
