#![no_main]

use libfuzzer_sys::fuzz_target;
use toleo::parse_software_arg;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let (source, name) = parse_software_arg(s);

        // If source is Some, the original string should have contained a ':'
        if source.is_some() {
            assert!(s.contains(':'));
        }

        // If no source prefix, name should equal original input
        if source.is_none() {
            assert_eq!(name, s);
        }
    }
});
