#![no_main]

use credhash::HashedPassword;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsing arbitrary input must never panic.
    if let Ok(parsed) = HashedPassword::try_from(data) {
        // Anything that parses must re-serialize to a value that parses
        // back equal (or to the sentinel).
        let reserialized = parsed.to_string();
        let reparsed = HashedPassword::try_from(reserialized.as_str())
            .expect("serialized form must parse");
        if parsed.is_closed() {
            assert!(reparsed.is_closed());
        } else {
            assert_eq!(reparsed, parsed);
        }
    }
});
