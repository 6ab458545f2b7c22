use std::path::Path;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use facture::checksum::{compute_check_digit, find_check_digits};
use facture::core::*;
use facture::reference::{ReferenceScheme, resolve};
use facture::template::{Environment, RenderConfig, TemplateSet, compose};

const QR_IBAN: &str = "CH4431999123000889012";
const IBAN: &str = "CH9300762011623852957";

fn build_invoice(iban: &str, services: usize) -> Invoice {
    let address = || AddressRecord::new("Rue du Lac 4", "1003", "Lausanne");
    let mut builder = InvoiceBuilder::new()
        .author(AuthorRecord {
            name: "Cabinet Léman".into(),
            address: address(),
            phone: "+41 21 555 12 12".into(),
            email: "contact@leman.ch".into(),
            iban: iban.into(),
            rcc: Some("A1234.56".into()),
        })
        .therapist(TherapistRecord {
            firstname: "Anna".into(),
            lastname: "Keller".into(),
            address: address(),
            phone: "+41 21 555 12 13".into(),
            iban: None,
            rcc: Some("B9876.54".into()),
        })
        .patient(PatientRecord {
            firstname: "Nicholas".into(),
            lastname: "Ailleboust".into(),
            address: AddressRecord::new("Tösstalstrasse 97", "8872", "Weesen"),
            canton: "SG".into(),
            birthdate: RawTimestamp(-1118102400),
            gender: "man".into(),
            email: "NicholasAilleboust@teleworm.us".into(),
        })
        .service_price(120)
        .timestamp(1_600_000_000_000);
    for i in 0..services {
        builder = builder.add_service(ServiceRecord::new(
            1_600_000_000_000 + i as i64 * 86_400_000,
            45,
            1200,
        ));
    }
    builder.build().unwrap()
}

fn bundled_templates() -> TemplateSet {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("templates/config.json");
    let config = RenderConfig::load(&path, Environment::Dev).unwrap();
    TemplateSet::load(&config).unwrap()
}

// ── Checksums ──────────────────────────────────────────────────────

fn bench_check_digits(c: &mut Criterion) {
    c.bench_function("find_check_digits_13", |b| {
        b.iter(|| black_box(find_check_digits(black_box("1600000000000"))));
    });
    c.bench_function("find_check_digits_21", |b| {
        b.iter(|| black_box(find_check_digits(black_box("999999999999999999999"))));
    });
    c.bench_function("qr_check_digit", |b| {
        b.iter(|| black_box(compute_check_digit(black_box("00000000000001600000000000"))));
    });
}

// ── References ─────────────────────────────────────────────────────

fn bench_resolve(c: &mut Criterion) {
    let qrr = build_invoice(QR_IBAN, 4);
    let scor = build_invoice(IBAN, 4);
    c.bench_function("resolve_qrr", |b| {
        b.iter(|| black_box(resolve(black_box(&qrr))));
    });
    c.bench_function("resolve_scor", |b| {
        b.iter(|| black_box(resolve(black_box(&scor))));
    });
}

// ── Invoices ───────────────────────────────────────────────────────

fn bench_build_invoice(c: &mut Criterion) {
    c.bench_function("build_invoice_4_services", |b| {
        b.iter(|| black_box(build_invoice(QR_IBAN, 4)));
    });
}

fn bench_parse_invoice(c: &mut Criterion) {
    let json = include_str!("../tests/fixtures/invoice.json");
    c.bench_function("invoice_from_json", |b| {
        b.iter(|| black_box(Invoice::from_json(black_box(json))));
    });
}

// ── Layout ─────────────────────────────────────────────────────────

fn bench_load_templates(c: &mut Criterion) {
    c.bench_function("load_template_set", |b| {
        b.iter(|| black_box(bundled_templates()));
    });
}

fn bench_compose(c: &mut Criterion) {
    let set = bundled_templates();
    let invoice = build_invoice(QR_IBAN, 4);
    let scheme = ReferenceScheme::default();
    c.bench_function("compose_4_services", |b| {
        b.iter(|| black_box(compose(black_box(&set), black_box(&invoice), &scheme)));
    });
}

criterion_group!(
    benches,
    bench_check_digits,
    bench_resolve,
    bench_build_invoice,
    bench_parse_invoice,
    bench_load_templates,
    bench_compose,
);
criterion_main!(benches);
