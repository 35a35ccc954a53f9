#![no_main]

use libfuzzer_sys::fuzz_target;
use toleo::ParsedVersion;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let parsed = ParsedVersion::parse(s);

        // Fields are always slices of the input
        assert!(s.contains(parsed.version));
        if let Some(epoch) = parsed.epoch {
            assert!(s.starts_with(epoch));
            assert!(!epoch.contains(':'));
        }
        if let Some(release) = parsed.release {
            assert!(s.ends_with(release));
            assert!(!release.contains('-'));
        }

        // Formatting only loses empty epochs and releases
        let formatted = parsed.to_string();
        if parsed.epoch.is_some_and(|e| !e.is_empty()) && parsed.release.is_some_and(|r| !r.is_empty()) {
            assert_eq!(formatted, s);
        }
    }
});
