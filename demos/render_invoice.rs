//! Lay out an invoice with the bundled templates and print the result.
//!
//! ```sh
//! ENV=PROD RUST_LOG=debug cargo run --example render_invoice -- tests/fixtures/invoice.json
//! ```

use std::error::Error;
use std::path::Path;
use std::process::ExitCode;

use facture::core::{FactureError, Invoice};
use facture::template::{RenderConfig, TemplateSet, compose};

fn main() -> ExitCode {
    env_logger::init();

    let Some(invoice_path) = std::env::args().nth(1) else {
        eprintln!("usage: render_invoice <invoice.json>");
        return ExitCode::FAILURE;
    };

    match run(Path::new(&invoice_path)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            if let Some(err) = err.downcast_ref::<FactureError>() {
                for e in err.validation_errors() {
                    eprintln!("  {e}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(invoice_path: &Path) -> Result<String, Box<dyn Error>> {
    let config_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("templates/config.json");
    let config = RenderConfig::from_env_file(&config_path)?;
    // Loaded once; every render borrows it.
    let templates = TemplateSet::load(&config)?;

    let json = std::fs::read_to_string(invoice_path)
        .map_err(|e| format!("{}: {e}", invoice_path.display()))?;
    let invoice = Invoice::from_json(&json)?;
    let document = compose(&templates, &invoice, &config.reference)?;

    println!("Reference: {} ({})", document.reference.value, document.reference.kind);
    println!("Total:     CHF {}", document.total_amount);

    Ok(serde_json::to_string_pretty(&document)?)
}
