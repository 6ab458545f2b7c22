#![no_main]

use facture::checksum::*;
use facture::reference::is_qr_iban;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = mod97(s);
        let _ = find_check_digits(s);
        let _ = compute_check_digit(s);
        let _ = verify_creditor_reference(s);
        let _ = verify_qr_reference(s);
        let _ = is_valid_iban(s);
        let _ = is_qr_iban(s);
    }
});
