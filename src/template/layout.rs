//! Bind a template set to one invoice.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Serialize;

use super::content::{Align, ContentItem, Font, Position, Size};
use super::field::Bindings;
use super::qrbill::QrBill;
use super::set::TemplateSet;
use crate::core::{FactureError, Invoice};
use crate::reference::{Reference, ReferenceScheme};

/// A content item with every binding resolved, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placed {
    Text {
        position: Position,
        content: String,
        font: Font,
        align: Align,
    },
    Graphic {
        position: Position,
        size: Size,
        source: PathBuf,
    },
    PaymentBlock {
        position: Position,
        size: f32,
        bill: QrBill,
        /// Text to encode in the QR code.
        payload: String,
    },
}

/// One rendered invoice page, in paint order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub reference: Reference,
    pub total_amount: Decimal,
    pub items: Vec<Placed>,
}

/// Resolve every item of `set` against `invoice`.
///
/// Value items whose service row does not exist, or whose optional field
/// is absent, are left out. A payment block that cannot be filled fails
/// the whole document.
pub fn compose(
    set: &TemplateSet,
    invoice: &Invoice,
    scheme: &ReferenceScheme,
) -> Result<Document, FactureError> {
    let reference = scheme.resolve(invoice)?;
    let bindings = Bindings {
        invoice,
        reference: &reference,
    };

    let mut items = Vec::with_capacity(set.len());
    for item in set.items() {
        match item {
            ContentItem::Text(text) => items.push(Placed::Text {
                position: text.position,
                content: text.content.clone(),
                font: text.font.clone(),
                align: text.align,
            }),
            ContentItem::Graphic(graphic) => items.push(Placed::Graphic {
                position: graphic.position,
                size: graphic.size,
                source: graphic.source.clone(),
            }),
            ContentItem::Value(value) => {
                if let Some(row) = value.row {
                    if row >= invoice.services.len() {
                        log::debug!("skipping {:?}: no service row {row}", value.field);
                        continue;
                    }
                }
                match value.field.resolve(&bindings, value.row) {
                    Some(content) => items.push(Placed::Text {
                        position: value.position,
                        content,
                        font: value.font.clone(),
                        align: value.align,
                    }),
                    None => log::warn!("skipping {:?}: invoice has no value", value.field),
                }
            }
            ContentItem::SwissQrCode(code) => {
                let bill = QrBill::resolve(&code.payment, &bindings)?;
                let payload = bill.to_payload();
                items.push(Placed::PaymentBlock {
                    position: code.position,
                    size: code.size,
                    bill,
                    payload,
                });
            }
        }
    }

    log::debug!(
        "composed invoice {}: {} item(s)",
        reference.value,
        items.len()
    );
    Ok(Document {
        total_amount: invoice.total_amount(),
        reference,
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::*;
    use crate::template::{ContentKind, parse_template};
    use rust_decimal_macros::dec;

    fn invoice(iban: &str, services: usize) -> Invoice {
        let mut builder = InvoiceBuilder::new()
            .author(AuthorRecord {
                name: "Cabinet Léman".into(),
                address: AddressRecord::new("Rue du Lac 4", "1003", "Lausanne"),
                phone: "+41 21 555 12 12".into(),
                email: "contact@leman.ch".into(),
                iban: iban.into(),
                rcc: None,
            })
            .therapist(TherapistRecord {
                firstname: "Anna".into(),
                lastname: "Keller".into(),
                address: AddressRecord::new("Rue du Lac 4", "1003", "Lausanne"),
                phone: "+41 21 555 12 13".into(),
                iban: None,
                rcc: Some("A1234.56".into()),
            })
            .patient(PatientRecord {
                firstname: "Nicholas".into(),
                lastname: "Ailleboust".into(),
                address: AddressRecord::new("Tösstalstrasse 97", "8872", "Weesen"),
                canton: "SG".into(),
                birthdate: RawTimestamp(-1118102400),
                gender: "man".into(),
                email: "nicholas@example.ch".into(),
            })
            .service_price(120)
            .timestamp(1_600_000_000_000);
        for i in 0..services {
            builder = builder.add_service(ServiceRecord::new(
                1_600_000_000_000 + i as i64 * 86_400_000,
                60,
                1200,
            ));
        }
        builder.build().unwrap()
    }

    const FONT: &str = r#"{"family": "Arial", "size": 9}"#;

    fn values(json: &str) -> Vec<ContentItem> {
        parse_template(json, ContentKind::Value).unwrap()
    }

    #[test]
    fn missing_rows_are_skipped() {
        let set = TemplateSet::from_items(values(&format!(
            r#"[{{"x": 10, "y": 100, "field": "service.code", "row": 0, "font": {FONT}}},
                {{"x": 10, "y": 106, "field": "service.code", "row": 1, "font": {FONT}}},
                {{"x": 150, "y": 140, "field": "invoice.total", "font": {FONT}}}]"#
        )));
        let doc = compose(&set, &invoice("CH4431999123000889012", 1), &ReferenceScheme::default())
            .unwrap();
        assert_eq!(doc.items.len(), 2);
        assert_eq!(doc.total_amount, dec!(120.00));
        match &doc.items[1] {
            Placed::Text { content, .. } => assert_eq!(content, "120.00"),
            other => panic!("unexpected item {other:?}"),
        }
    }

    #[test]
    fn absent_optional_field_is_skipped() {
        let set = TemplateSet::from_items(values(&format!(
            r#"[{{"x": 10, "y": 10, "field": "author.rcc", "font": {FONT}}},
                {{"x": 10, "y": 16, "field": "therapist.rcc", "font": {FONT}}}]"#
        )));
        let doc = compose(&set, &invoice("CH4431999123000889012", 1), &ReferenceScheme::default())
            .unwrap();
        assert_eq!(doc.items.len(), 1);
    }

    #[test]
    fn reference_follows_iban() {
        let set = TemplateSet::default();
        let qrr = compose(&set, &invoice("CH4431999123000889012", 1), &ReferenceScheme::default())
            .unwrap();
        assert_eq!(qrr.reference.value, "000000000000016000000000002");

        let scor = compose(&set, &invoice("CH9300762011623852957", 1), &ReferenceScheme::default())
            .unwrap();
        assert_eq!(scor.reference.kind, crate::reference::ReferenceType::Scor);
        assert!(scor.reference.value.starts_with("RF"));
        assert!(scor.items.is_empty());
    }

    #[test]
    fn payment_block_carries_payload() {
        let set = TemplateSet::from_items(
            parse_template(
                r#"[{"x": 67, "y": 209, "payment": {
                    "creditor_iban": {"field": "author.iban"},
                    "creditor_name": {"field": "author.name"},
                    "creditor_street": {"field": "author.street"},
                    "creditor_locality": {"field": "author.zip_city"},
                    "amount": {"field": "invoice.total"},
                    "reference": {"field": "invoice.reference"},
                    "reference_type": {"field": "invoice.reference_type"},
                    "debtor_name": {"field": "patient.name"},
                    "debtor_street": {"field": "patient.street"},
                    "debtor_locality": {"field": "patient.zip_city"}
                }}]"#,
                ContentKind::SwissQrCode,
            )
            .unwrap(),
        );
        let doc = compose(&set, &invoice("CH4431999123000889012", 2), &ReferenceScheme::default())
            .unwrap();
        match &doc.items[0] {
            Placed::PaymentBlock { bill, payload, size, .. } => {
                assert_eq!(*size, 46.0);
                assert_eq!(bill.amount, Some(dec!(240.00)));
                assert_eq!(bill.debtor.as_ref().map(|d| d.name.as_str()), Some("Nicholas Ailleboust"));
                assert!(payload.starts_with("SPC\n0200\n1\nCH4431999123000889012\n"));
                assert!(payload.ends_with("QRR\n000000000000016000000000002\n\nEPD"));
            }
            other => panic!("unexpected item {other:?}"),
        }
    }
}
