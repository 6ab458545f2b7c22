#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Errors are fine, panics are bugs.
        if let Ok(invoice) = facture::core::Invoice::from_json(s) {
            let _ = invoice.total_amount();
            let _ = invoice.therapy_dates();
            let _ = facture::reference::resolve(&invoice);
        }
    }
});
