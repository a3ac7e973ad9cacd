use anyhow::Result;

use bugsift::app::Application;
use bugsift::classifier::AgeRange;
use bugsift::db::Database;
use bugsift::models::BugState;

use super::list::format_bug;

pub fn find_lines(
    db: &Database,
    state: Option<BugState>,
    range: AgeRange,
) -> Result<Vec<String>> {
    let app = Application::new(db.list_bugs()?);
    let bugs = app.find_bugs(state, range);

    if bugs.is_empty() {
        let line = match state {
            Some(state) => format!("No {} bugs in {}.", state, range),
            None => format!("No bugs in {}.", range),
        };
        return Ok(vec![line]);
    }

    Ok(bugs.iter().map(format_bug).collect())
}

pub fn run(db: &Database, state: Option<BugState>, range: AgeRange) -> Result<()> {
    for line in find_lines(db, state, range)? {
        println!("{}", line);
    }
    Ok(())
}
