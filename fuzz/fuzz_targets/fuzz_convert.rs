#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // The whole pipeline must reject bad input gracefully.
        let _ = camt_upgrade::convert_xml(s);
    }
});
