//! Access to the remote issue tracker. Everything above this module talks to [IssueTracker], the
//! REST realization lives in [client::JiraClient].

pub mod client;
pub mod models;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;

use crate::worklog::payload::WorklogPayload;

pub use client::JiraClient;

/// Intended to serve as a contract for the two remote calls the application makes. One request
/// per call, no retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Summary of an issue, `None` if the tracker doesn't know the issue.
    async fn issue_summary(&self, issue_id: &str) -> Result<Option<String>>;

    /// Submits a worklog and returns the raw status of the response, successful or not.
    async fn add_worklog(&self, issue_id: &str, payload: &WorklogPayload) -> Result<StatusCode>;
}
