use serde::Deserialize;

/// Response of `GET /rest/api/3/issue/{id}?fields=summary`. Only the requested field is read.
#[derive(Debug, Deserialize)]
pub struct IssueResponse {
    #[serde(default)]
    pub key: Option<String>,
    pub fields: IssueFields,
}

#[derive(Debug, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: Option<String>,
}
