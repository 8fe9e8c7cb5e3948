use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::tracker::{Issue, IssueTracker};

/// Working-day length used for the seconds → days effort conversion.
pub const SECONDS_PER_DAY: f64 = 8.0 * 60.0 * 60.0;

/// Fixed tracker page size; not user-configurable.
pub const PAGE_SIZE: usize = 50;

/// A schedulable task mapped from one tracker issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub key: String,
    pub summary: String,
    pub properties: TaskProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskProperties {
    /// Assignee display name; absent when the issue is unassigned.
    pub allocate: Option<String>,
    /// Estimated effort in working days; absent when the issue has no estimate.
    pub effort: Option<f64>,
    /// Keys of issues blocking this one, in link order. Always present.
    pub depends: Vec<String>,
}

/// Lazy, finite sequence of issue pages. Terminates on the first empty page;
/// the offset advances by the number of items actually returned, so a short
/// page at the end of the result set still paginates correctly.
struct Pages<'a, T> {
    tracker: &'a T,
    query: &'a str,
    start_at: usize,
    done: bool,
}

impl<'a, T: IssueTracker> Pages<'a, T> {
    fn new(tracker: &'a T, query: &'a str) -> Self {
        Self {
            tracker,
            query,
            start_at: 0,
            done: false,
        }
    }
}

impl<T: IssueTracker> Iterator for Pages<'_, T> {
    type Item = Result<Vec<Issue>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.tracker.search(self.query, PAGE_SIZE, self.start_at) {
            Ok(page) if page.is_empty() => {
                self.done = true;
                None
            }
            Ok(page) => {
                self.start_at += page.len();
                Some(Ok(page))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Converts tracker issues matching a query into `Task` records.
///
/// Each `juggle()` call rebuilds the full list from the tracker's current
/// state; nothing is cached between calls, and the tracker is never written
/// to. Tasks come back in tracker order, first page first.
pub struct Juggler<T> {
    query: String,
    tracker: T,
}

impl<T: IssueTracker> Juggler<T> {
    pub fn new(query: &str, tracker: T) -> Self {
        Self {
            query: query.to_string(),
            tracker,
        }
    }

    pub fn juggle(&self) -> Result<Vec<Task>> {
        let mut tasks = Vec::new();
        for page in Pages::new(&self.tracker, &self.query) {
            for issue in page? {
                tasks.push(map_issue(issue)?);
            }
        }
        debug!(count = tasks.len(), "converted issues to tasks");
        Ok(tasks)
    }
}

/// Map one issue to a task. Missing key or summary is fatal: a dropped task
/// would leave dangling `depends` references in the generated schedule.
fn map_issue(issue: Issue) -> Result<Task> {
    let key = issue
        .key
        .ok_or_else(|| Error::MalformedIssue("issue without a key".to_string()))?;
    let summary = issue
        .summary
        .ok_or_else(|| Error::MalformedIssue(format!("issue {key} has no summary")))?;

    let depends: Vec<String> = issue
        .links
        .iter()
        .filter(|link| link.type_name == "Blocker")
        .filter_map(|link| link.inward_key.clone())
        .collect();

    Ok(Task {
        key,
        summary,
        properties: TaskProperties {
            allocate: issue.assignee,
            effort: issue.estimate_seconds.map(|secs| secs / SECONDS_PER_DAY),
            depends,
        },
    })
}
