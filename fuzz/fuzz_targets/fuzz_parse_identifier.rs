#![no_main]

use credhash::{Identifier, SmallIdentifier};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsing arbitrary input must never panic, and any accepted input
    // round-trips exactly.
    if let Ok(id) = Identifier::try_from(data) {
        assert_eq!(id.to_string(), data);
    }
    if let Ok(id) = SmallIdentifier::try_from(data) {
        assert_eq!(id.to_string(), data);
    }
});
