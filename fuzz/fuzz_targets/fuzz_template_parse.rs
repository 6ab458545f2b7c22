#![no_main]

use facture::template::{ContentKind, parse_template};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for kind in [
            ContentKind::Text,
            ContentKind::Graphic,
            ContentKind::Value,
            ContentKind::SwissQrCode,
        ] {
            let _ = parse_template(s, kind);
        }
    }
});
