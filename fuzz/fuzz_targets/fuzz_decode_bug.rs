#![no_main]

//! Fuzz target for the bug payload decoder.
//!
//! Arbitrary bytes must either decode to a bug or fail with a decode error,
//! never panic. Anything that decodes must survive an encode/decode cycle.

use libfuzzer_sys::fuzz_target;

use bugsift::models::Bug;

fuzz_target!(|data: &[u8]| {
    let bug = match Bug::from_json_bytes(data) {
        Ok(bug) => bug,
        Err(_) => return,
    };

    let json = match bug.to_json() {
        Ok(json) => json,
        Err(_) => return,
    };
    let decoded = Bug::from_json(&json);
    assert_eq!(decoded.ok(), Some(bug));
});
