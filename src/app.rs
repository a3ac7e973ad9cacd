use chrono::{DateTime, Utc};
use tracing::debug;

use crate::classifier::{AgeRange, BugClassifier};
use crate::models::{Bug, BugState};

/// Owns the full bug list and answers range/state queries against it.
///
/// Every query classifies the list afresh relative to the time of the call,
/// so the same list can give different answers as the clock moves on.
#[derive(Debug, Clone, Default)]
pub struct Application {
    bugs: Vec<Bug>,
}

impl Application {
    pub fn new(bugs: Vec<Bug>) -> Self {
        Application { bugs }
    }

    pub fn bugs(&self) -> &[Bug] {
        &self.bugs
    }

    pub fn find_bugs(&self, state: Option<BugState>, range: AgeRange) -> Vec<Bug> {
        self.find_bugs_at(state, range, Utc::now())
    }

    pub fn find_bugs_at(
        &self,
        state: Option<BugState>,
        range: AgeRange,
        now: DateTime<Utc>,
    ) -> Vec<Bug> {
        let classifier = BugClassifier::new(self.bugs.iter().cloned(), now);
        let found = classifier.get(range, state);
        debug!(
            range = %range,
            state = state.map(|s| s.as_str()).unwrap_or("any"),
            found = found.len(),
            "find bugs"
        );
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_bugs(now: DateTime<Utc>) -> Vec<Bug> {
        vec![
            Bug::new(BugState::Open, now, "Bug 1"),
            Bug::new(BugState::Open, now - Duration::hours(26), "Bug 2"),
            Bug::new(BugState::Closed, now - Duration::days(14), "Bug 3"),
        ]
    }

    #[test]
    fn test_find_open_bugs_in_the_past_day() {
        let app = Application::new(sample_bugs(Utc::now()));
        let bugs = app.find_bugs(Some(BugState::Open), AgeRange::PastDay);
        assert_eq!(bugs.len(), 1);
        assert_eq!(bugs[0].comment(), "Bug 1");
    }

    #[test]
    fn test_find_closed_bugs_in_the_past_month() {
        let app = Application::new(sample_bugs(Utc::now()));
        let bugs = app.find_bugs(Some(BugState::Closed), AgeRange::PastMonth);
        assert_eq!(bugs.len(), 1);
        assert_eq!(bugs[0].comment(), "Bug 3");
    }

    #[test]
    fn test_find_closed_bugs_in_the_past_week() {
        let app = Application::new(sample_bugs(Utc::now()));
        let bugs = app.find_bugs(Some(BugState::Closed), AgeRange::PastWeek);
        assert!(bugs.is_empty());
    }

    #[test]
    fn test_find_open_bugs_in_the_past_week() {
        let app = Application::new(sample_bugs(Utc::now()));
        let bugs = app.find_bugs(Some(BugState::Open), AgeRange::PastWeek);
        assert_eq!(bugs.len(), 1);
        assert_eq!(bugs[0].comment(), "Bug 2");
    }

    #[test]
    fn test_results_follow_query_time() {
        let created = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let app = Application::new(sample_bugs(created));

        let day = app.find_bugs_at(Some(BugState::Open), AgeRange::PastDay, created);
        assert_eq!(day.len(), 1);

        // Two days later the newest bug has aged out of the past day.
        let later = created + Duration::days(2);
        let day = app.find_bugs_at(Some(BugState::Open), AgeRange::PastDay, later);
        assert!(day.is_empty());
        let week = app.find_bugs_at(Some(BugState::Open), AgeRange::PastWeek, later);
        assert_eq!(week.len(), 2);
    }

    #[test]
    fn test_empty_application() {
        let app = Application::default();
        for range in AgeRange::ALL {
            assert!(app.find_bugs(None, range).is_empty());
            assert!(app.find_bugs(Some(BugState::Open), range).is_empty());
            assert!(app.find_bugs(Some(BugState::Closed), range).is_empty());
        }
    }

    #[test]
    fn test_list_is_not_consumed_by_queries() {
        let app = Application::new(sample_bugs(Utc::now()));
        app.find_bugs(None, AgeRange::Other);
        assert_eq!(app.bugs().len(), 3);
    }
}
