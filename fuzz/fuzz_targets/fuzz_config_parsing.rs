#![no_main]

use libfuzzer_sys::fuzz_target;
use toleo::config::Config;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let Ok(config) = Config::parse(s) else { return };

        // A parsed config always has something to probe
        assert!(!config.backends.is_empty());

        // Every entry is reachable by its own name
        for software in &config.software {
            let found = config.find(&software.name).unwrap();
            assert_eq!(found.name, software.name);
            assert_eq!(found.source, software.source);
        }
    }
});
