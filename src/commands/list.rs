use anyhow::Result;
use chrono::Utc;

use bugsift::classifier::{BugClassifier, RangeCount};
use bugsift::db::Database;
use bugsift::models::{Bug, BugState};

pub fn run(db: &Database, state: Option<BugState>, summary: bool) -> Result<()> {
    let bugs = match state {
        Some(state) => db.list_bugs_by_state(state)?,
        None => db.list_bugs()?,
    };

    if summary {
        let counts = BugClassifier::new(bugs, Utc::now()).counts();
        for line in summary_lines(&counts) {
            println!("{}", line);
        }
        return Ok(());
    }

    if bugs.is_empty() {
        println!("No bugs found.");
        return Ok(());
    }

    for bug in &bugs {
        println!("{}", format_bug(bug));
    }

    Ok(())
}

pub fn format_bug(bug: &Bug) -> String {
    let state_display = format!("[{}]", bug.state());
    let date = bug.timestamp().format("%Y-%m-%d %H:%M");
    format!(
        "{:8} {:<60} {}",
        state_display,
        truncate(bug.comment(), 60),
        date
    )
}

fn summary_lines(counts: &[RangeCount]) -> Vec<String> {
    let mut lines = vec![format!("{:<12} {:>6} {:>6}", "range", "closed", "open")];
    for count in counts {
        lines.push(format!(
            "{:<12} {:>6} {:>6}",
            count.range.as_str(),
            count.closed,
            count.open
        ));
    }
    lines
}

fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugsift::classifier::AgeRange;
    use chrono::DateTime;
    use proptest::prelude::*;

    #[test]
    fn test_truncate_short() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn test_truncate_long() {
        assert_eq!(truncate("a long bug comment", 10), "a long ...");
    }

    #[test]
    fn test_truncate_unicode() {
        assert_eq!(truncate("バグバグバグバグ", 6), "バグバ...");
    }

    #[test]
    fn test_format_bug() {
        let bug = Bug::new(
            BugState::Closed,
            DateTime::from_timestamp(1493393946, 0).unwrap(),
            "Bug via JSON",
        );
        let line = format_bug(&bug);
        assert!(line.starts_with("[closed]"));
        assert!(line.contains("Bug via JSON"));
        assert!(line.ends_with("2017-04-28 15:39"));
    }

    #[test]
    fn test_summary_lines() {
        let counts = vec![
            RangeCount {
                range: AgeRange::PastDay,
                closed: 1,
                open: 2,
            },
            RangeCount {
                range: AgeRange::Other,
                closed: 0,
                open: 5,
            },
        ];
        let lines = summary_lines(&counts);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("past-day"));
        assert!(lines[2].trim_end().ends_with('5'));
    }

    proptest! {
        #[test]
        fn prop_truncate_never_panics(s in "\\PC{0,100}", max in 3usize..80) {
            let out = truncate(&s, max);
            prop_assert!(out.chars().count() <= max);
        }
    }
}
