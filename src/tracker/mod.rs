pub mod jira;

use crate::error::Result;

/// One issue as returned by the tracker's search operation.
///
/// `key` and `summary` are structurally optional here; the converter enforces
/// their presence so that a malformed payload surfaces as a distinct error
/// instead of a generic decode failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub key: Option<String>,
    pub summary: Option<String>,
    pub assignee: Option<String>,
    pub estimate_seconds: Option<f64>,
    pub links: Vec<IssueLink>,
}

/// An issue link carrying the link-type name and, for inward links,
/// the key of the issue on the other end.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueLink {
    pub type_name: String,
    pub inward_key: Option<String>,
}

/// Narrow seam over the tracker: one paged search operation.
/// Tests substitute a deterministic in-memory fake.
pub trait IssueTracker {
    /// Return at most `max_results` issues matching `query`, starting at the
    /// zero-based offset `start_at`. An empty page signals end of results.
    fn search(&self, query: &str, max_results: usize, start_at: usize) -> Result<Vec<Issue>>;
}

impl<T: IssueTracker + ?Sized> IssueTracker for &T {
    fn search(&self, query: &str, max_results: usize, start_at: usize) -> Result<Vec<Issue>> {
        (**self).search(query, max_results, start_at)
    }
}
