#![no_main]

//! Fuzz target for identifier and URL validation.
//!
//! Any string accepted as an id must be a positive `i64`, and `UserId`
//! must agree with the plain predicate. URL validation must never panic.

use libfuzzer_sys::fuzz_target;
use userstore_core::{is_valid_id, is_valid_url, UserId};

fuzz_target!(|data: &str| {
    let valid = is_valid_id(data);

    if valid {
        let value: i64 = data.parse().expect("accepted id must parse");
        assert!(value >= 1, "accepted non-positive id {data:?}");
    }

    match UserId::parse(data) {
        Ok(id) => {
            assert!(valid);
            assert_eq!(id.as_str(), data);
        },
        Err(_) => assert!(!valid),
    }

    let _ = is_valid_url(data);
});
