#![no_main]

//! Fuzz target for age/state classification.
//!
//! Every bug must land in exactly one range/state group regardless of how its
//! timestamp relates to the reference instant.

use arbitrary::Arbitrary;
use chrono::DateTime;
use libfuzzer_sys::fuzz_target;

use bugsift::{AgeRange, Bug, BugClassifier, BugState};

#[derive(Arbitrary, Debug)]
struct ClassifyInput {
    /// Reference instant, seconds since the epoch
    now: u32,
    /// (open?, seconds since the epoch) per bug
    bugs: Vec<(bool, u32)>,
}

fuzz_target!(|input: ClassifyInput| {
    let now = match DateTime::from_timestamp(i64::from(input.now), 0) {
        Some(now) => now,
        None => return,
    };

    let bugs: Vec<Bug> = input
        .bugs
        .iter()
        .take(200)
        .filter_map(|(open, secs)| {
            let state = if *open { BugState::Open } else { BugState::Closed };
            DateTime::from_timestamp(i64::from(*secs), 0)
                .map(|ts| Bug::new(state, ts, String::new()))
        })
        .collect();

    let classifier = BugClassifier::new(bugs.clone(), now);
    let total: usize = AgeRange::ALL
        .into_iter()
        .map(|range| classifier.get(range, None).len())
        .sum();
    assert_eq!(total, bugs.len());
});
