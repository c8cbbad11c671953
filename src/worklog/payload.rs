use serde::Serialize;

/// Body of `POST /rest/api/3/issue/{id}/worklog`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorklogPayload {
    pub comment: Document,
    /// Start of the work, see [crate::utils::time::JIRA_TIMESTAMP_FORMAT].
    pub started: String,
    /// Jira duration notation like `90m` or `8h`.
    pub time_spent: String,
    /// Always sent, `null` keeps the worklog visible to everyone who can see the issue.
    pub visibility: Option<serde_json::Value>,
}

/// Comment in Atlassian document format. Only a single paragraph of plain text is ever produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    #[serde(rename = "type")]
    kind: &'static str,
    version: u8,
    content: Vec<Paragraph>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Paragraph {
    #[serde(rename = "type")]
    kind: &'static str,
    content: Vec<TextNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct TextNode {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
}

impl Document {
    pub fn paragraph(text: &str) -> Self {
        // Empty text nodes are rejected by Jira, an empty paragraph is not.
        let content = if text.is_empty() {
            vec![]
        } else {
            vec![TextNode {
                kind: "text",
                text: text.to_string(),
            }]
        };
        Self {
            kind: "doc",
            version: 1,
            content: vec![Paragraph {
                kind: "paragraph",
                content,
            }],
        }
    }
}
