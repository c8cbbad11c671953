use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use base64::{prelude::BASE64_STANDARD, Engine};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client, StatusCode,
};
use tracing::{debug, info};

use crate::{config::AppConfig, worklog::payload::WorklogPayload};

use super::{models::IssueResponse, IssueTracker};

const API_PREFIX: &str = "rest/api/3";

/// Jira Cloud REST client authenticated with basic auth (`user:token`).
pub struct JiraClient {
    http: Client,
    base_url: String,
}

impl JiraClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut authorization = HeaderValue::from_str(&basic_auth(&config.user, &config.token))
            .context("Api credentials contain characters that can't be sent in a header")?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create http client")?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    fn issue_url(&self, issue_id: &str) -> String {
        format!("{}/{API_PREFIX}/issue/{issue_id}", self.base_url)
    }
}

/// Value of the `Authorization` header for a user and api token.
pub fn basic_auth(user: &str, token: &str) -> String {
    format!("Basic {}", BASE64_STANDARD.encode(format!("{user}:{token}")))
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn issue_summary(&self, issue_id: &str) -> Result<Option<String>> {
        let url = format!("{}?fields=summary", self.issue_url(issue_id));
        debug!("Requesting {url}");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to request issue {issue_id}"))?;

        let status = response.status();
        debug!("Issue lookup for {issue_id} responded with {status}");
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            bail!("Issue lookup for {issue_id} failed with status {status}");
        }

        let issue: IssueResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse issue {issue_id}"))?;
        debug!("Found issue {:?}", issue.key);
        Ok(issue.fields.summary)
    }

    async fn add_worklog(&self, issue_id: &str, payload: &WorklogPayload) -> Result<StatusCode> {
        let url = format!("{}/worklog", self.issue_url(issue_id));
        info!("Posting worklog to {url}");
        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("Failed to post worklog for {issue_id}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Worklog rejected with {status}: {body}");
        }
        Ok(status)
    }
}
