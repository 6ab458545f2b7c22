//! Compute payment references for a timestamp under both account kinds.
//!
//! ```sh
//! cargo run --example payment_reference -- 1600000000000
//! ```

use facture::checksum::{
    compute_check_digit, find_check_digits, verify_creditor_reference, verify_qr_reference,
};
use facture::core::{RawTimestamp, Timestamp};
use facture::reference::{ReferenceType, is_qr_iban, reference_type};

fn main() {
    env_logger::init();

    let raw: i64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1_600_000_000_000);

    let timestamp = match RawTimestamp(raw).decode() {
        Ok(ts) => ts,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    println!("Timestamp {raw} decodes to {}", timestamp.datetime());

    for iban in ["CH4431999123000889012", "CH9300762011623852957"] {
        let kind = reference_type(iban);
        println!("\n{iban} (QR-IBAN: {})", is_qr_iban(iban));
        match reference(kind, &timestamp) {
            Ok(value) => {
                let valid = match kind {
                    ReferenceType::Qrr => verify_qr_reference(&value),
                    _ => verify_creditor_reference(&value),
                };
                println!("  {kind}: {value} (verifies: {valid})");
            }
            Err(e) => println!("  {kind}: {e}"),
        }
    }
}

fn reference(kind: ReferenceType, timestamp: &Timestamp) -> Result<String, String> {
    let millis = timestamp.millis();
    if millis < 0 {
        return Err("pre-1970 timestamps carry no reference".into());
    }
    match kind {
        ReferenceType::Qrr => {
            let base = format!("{millis:0>26}");
            let check = compute_check_digit(&base).map_err(|e| e.to_string())?;
            Ok(format!("{base}{check}"))
        }
        _ => {
            let payload = millis.to_string();
            let check = find_check_digits(&payload).map_err(|e| e.to_string())?;
            Ok(format!("RF{check}{payload}"))
        }
    }
}
