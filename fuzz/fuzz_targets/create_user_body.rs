#![no_main]

//! Fuzz target for create-user body decoding.
//!
//! Decoding arbitrary bytes must never panic, and any `User` that decodes
//! must carry a valid id and survive re-encoding unchanged.

use libfuzzer_sys::fuzz_target;
use userstore_core::{is_valid_id, CreateUserRequest, User};

fuzz_target!(|data: &[u8]| {
    let _ = serde_json::from_slice::<CreateUserRequest>(data);

    if let Ok(user) = serde_json::from_slice::<User>(data) {
        assert!(is_valid_id(user.id.as_str()));

        let encoded = serde_json::to_vec(&user).expect("user must encode");
        let decoded: User = serde_json::from_slice(&encoded).expect("user must decode");
        assert_eq!(decoded, user);
    }
});
