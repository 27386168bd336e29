#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Editors save half-written files; the parser must never panic on them
        if let Ok(parsed) = golive::infrastructure::parse_imports_str(content) {
            assert!(!parsed.package.is_empty());
        }
    }
});
