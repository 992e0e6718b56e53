#![no_main]

use credhash::HashedKey;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsing arbitrary input must never panic.
    if let Ok(parsed) = HashedKey::try_from(data) {
        let reserialized = parsed.to_string();
        let reparsed =
            HashedKey::try_from(reserialized.as_str()).expect("serialized form must parse");
        if parsed.is_closed() {
            assert!(reparsed.is_closed());
        } else {
            assert_eq!(reparsed, parsed);
        }
    }
});
