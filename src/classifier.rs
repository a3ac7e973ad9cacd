//! Age/state bucketing of bugs relative to a reference instant.
//!
//! Ranges are assigned first-match in increasing order, so the four ranges
//! partition the input: a bug 30 hours old is in `PastWeek` and never in
//! `PastDay` or `PastMonth`.

use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use crate::models::{Bug, BugState};

pub const VALID_RANGES: [&str; 4] = ["past-day", "past-week", "past-month", "other"];

const DAY_HOURS: i64 = 24;
const WEEK_HOURS: i64 = DAY_HOURS * 7;
// Thirty weeks. The bucket is still called "past month".
const MONTH_HOURS: i64 = WEEK_HOURS * 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeRange {
    PastDay,
    PastWeek,
    PastMonth,
    Other,
}

impl AgeRange {
    pub const ALL: [AgeRange; 4] = [
        AgeRange::PastDay,
        AgeRange::PastWeek,
        AgeRange::PastMonth,
        AgeRange::Other,
    ];

    /// Range for a bug of the given age. Negative ages (timestamps after the
    /// reference instant) count as the past day.
    pub fn for_age(age: Duration) -> Self {
        if age <= Duration::hours(DAY_HOURS) {
            AgeRange::PastDay
        } else if age <= Duration::hours(WEEK_HOURS) {
            AgeRange::PastWeek
        } else if age <= Duration::hours(MONTH_HOURS) {
            AgeRange::PastMonth
        } else {
            AgeRange::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        VALID_RANGES[self.index()]
    }

    fn index(self) -> usize {
        match self {
            AgeRange::PastDay => 0,
            AgeRange::PastWeek => 1,
            AgeRange::PastMonth => 2,
            AgeRange::Other => 3,
        }
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid range '{0}'. Must be one of: {valid}", valid = VALID_RANGES.join(", "))]
pub struct ParseRangeError(pub String);

impl FromStr for AgeRange {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgeRange::ALL
            .into_iter()
            .find(|range| range.as_str() == s)
            .ok_or_else(|| ParseRangeError(s.to_string()))
    }
}

#[derive(Debug, Default, Clone)]
struct Bucket {
    open: Vec<Bug>,
    closed: Vec<Bug>,
}

impl Bucket {
    fn push(&mut self, bug: Bug) {
        match bug.state() {
            BugState::Open => self.open.push(bug),
            BugState::Closed => self.closed.push(bug),
        }
    }
}

/// Number of closed and open bugs in one range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeCount {
    pub range: AgeRange,
    pub closed: usize,
    pub open: usize,
}

/// Snapshot partition of a bug list into range × state groups.
///
/// Built once against a fixed `now`; it never sees later changes to the list
/// or the clock.
#[derive(Debug, Clone)]
pub struct BugClassifier {
    buckets: [Bucket; 4],
}

impl BugClassifier {
    pub fn new<I>(bugs: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = Bug>,
    {
        let mut buckets: [Bucket; 4] = Default::default();
        for bug in bugs {
            let range = AgeRange::for_age(now.signed_duration_since(bug.timestamp()));
            buckets[range.index()].push(bug);
        }

        let classifier = BugClassifier { buckets };
        debug!(counts = ?classifier.counts(), "classified bugs");
        classifier
    }

    /// Bugs in `range`, restricted to `state` if given.
    ///
    /// With no state the closed bugs come first, then the open ones. Each
    /// group keeps the input order.
    pub fn get(&self, range: AgeRange, state: Option<BugState>) -> Vec<Bug> {
        let bucket = &self.buckets[range.index()];
        match state {
            Some(BugState::Open) => bucket.open.clone(),
            Some(BugState::Closed) => bucket.closed.clone(),
            None => bucket
                .closed
                .iter()
                .chain(bucket.open.iter())
                .cloned()
                .collect(),
        }
    }

    pub fn counts(&self) -> Vec<RangeCount> {
        AgeRange::ALL
            .into_iter()
            .map(|range| {
                let bucket = &self.buckets[range.index()];
                RangeCount {
                    range,
                    closed: bucket.closed.len(),
                    open: bucket.open.len(),
                }
            })
            .collect()
    }
}
