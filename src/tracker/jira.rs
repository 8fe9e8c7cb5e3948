use std::thread;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};

use super::{Issue, IssueLink, IssueTracker};

const SEARCH_PATH: &str = "/rest/api/2/search";
const SEARCH_FIELDS: &str = "summary,assignee,aggregatetimeoriginalestimate,issuelinks";
const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 500;

/// Resolve the JIRA API token from the configured environment variable.
pub fn resolve_token(token_env: &str) -> Result<String> {
    std::env::var(token_env)
        .map_err(|_| Error::Tracker(format!("JIRA API token not found in ${token_env}")))
}

// ---------------------------------------------------------------------------
// Transport abstraction (for testability)
// ---------------------------------------------------------------------------

pub trait JiraTransport {
    fn search_page(
        &self,
        query: &str,
        max_results: usize,
        start_at: usize,
    ) -> Result<serde_json::Value>;
}

/// Blocking HTTP transport with Basic auth and transient-error retry.
struct HttpTransport {
    base_url: String,
    authorization: String,
}

impl HttpTransport {
    fn new(base_url: &str, user: &str, token: &str) -> Self {
        let credentials = BASE64.encode(format!("{user}:{token}"));
        Self {
            base_url: base_url.to_string(),
            authorization: format!("Basic {credentials}"),
        }
    }
}

impl JiraTransport for HttpTransport {
    fn search_page(
        &self,
        query: &str,
        max_results: usize,
        start_at: usize,
    ) -> Result<serde_json::Value> {
        let url = format!("{}{SEARCH_PATH}", self.base_url);

        let mut backoff_ms = INITIAL_BACKOFF_MS;
        for attempt in 1..=MAX_RETRIES {
            match ureq::get(&url)
                .set("Authorization", &self.authorization)
                .set("Accept", "application/json")
                .query("jql", query)
                .query("maxResults", &max_results.to_string())
                .query("startAt", &start_at.to_string())
                .query("fields", SEARCH_FIELDS)
                .call()
            {
                Ok(response) => {
                    return response.into_json().map_err(|e| {
                        Error::Tracker(format!("failed to read JIRA response: {e}"))
                    });
                }
                Err(ureq::Error::Status(401 | 403, _)) => {
                    return Err(Error::Tracker(
                        "JIRA authentication failed (check user and token)".to_string(),
                    ));
                }
                Err(ref e) if attempt < MAX_RETRIES && is_retryable(e) => {
                    warn!(
                        attempt,
                        error = %e,
                        backoff_ms,
                        "retrying JIRA search after transient error"
                    );
                    thread::sleep(Duration::from_millis(backoff_ms));
                    backoff_ms *= 2;
                }
                Err(e) => {
                    return Err(Error::Tracker(format!("JIRA search request failed: {e}")));
                }
            }
        }
        unreachable!()
    }
}

/// Only retry rate-limits (429), server errors (5xx), and transport/network errors.
fn is_retryable(err: &ureq::Error) -> bool {
    match err {
        ureq::Error::Status(code, _) => *code == 429 || *code >= 500,
        ureq::Error::Transport(_) => true,
    }
}

// ---------------------------------------------------------------------------
// Search payload types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<RawIssue>,
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    key: Option<String>,
    #[serde(default)]
    fields: RawFields,
}

#[derive(Debug, Deserialize, Default)]
struct RawFields {
    summary: Option<String>,
    assignee: Option<RawAssignee>,
    aggregatetimeoriginalestimate: Option<f64>,
    #[serde(default)]
    issuelinks: Vec<RawLink>,
}

#[derive(Debug, Deserialize)]
struct RawAssignee {
    #[serde(rename = "displayName")]
    display_name: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    #[serde(rename = "type")]
    link_type: Option<RawLinkType>,
    #[serde(rename = "inwardIssue")]
    inward_issue: Option<RawInwardIssue>,
}

#[derive(Debug, Deserialize)]
struct RawLinkType {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawInwardIssue {
    key: Option<String>,
}

// ---------------------------------------------------------------------------
// JiraTracker
// ---------------------------------------------------------------------------

pub struct JiraTracker {
    transport: Box<dyn JiraTransport>,
}

impl JiraTracker {
    pub fn new(config: &Config) -> Result<Self> {
        let token = resolve_token(&config.token_env)?;
        Ok(Self {
            transport: Box::new(HttpTransport::new(&config.url, &config.user, &token)),
        })
    }

    #[cfg(test)]
    fn with_transport(transport: Box<dyn JiraTransport>) -> Self {
        Self { transport }
    }

    fn parse_issue(raw: RawIssue) -> Issue {
        let assignee = raw
            .fields
            .assignee
            .and_then(|a| a.display_name.or(a.name));

        let links = raw
            .fields
            .issuelinks
            .into_iter()
            .map(|link| IssueLink {
                type_name: link.link_type.and_then(|t| t.name).unwrap_or_default(),
                inward_key: link.inward_issue.and_then(|i| i.key),
            })
            .collect();

        Issue {
            key: raw.key,
            summary: raw.fields.summary,
            assignee,
            estimate_seconds: raw.fields.aggregatetimeoriginalestimate,
            links,
        }
    }
}

impl IssueTracker for JiraTracker {
    fn search(&self, query: &str, max_results: usize, start_at: usize) -> Result<Vec<Issue>> {
        let payload = self.transport.search_page(query, max_results, start_at)?;

        let response: SearchResponse = serde_json::from_value(payload)
            .map_err(|e| Error::Tracker(format!("failed to parse JIRA search payload: {e}")))?;

        let issues: Vec<Issue> = response
            .issues
            .into_iter()
            .map(Self::parse_issue)
            .collect();

        debug!(count = issues.len(), start_at, "fetched issue page");
        Ok(issues)
    }
}
