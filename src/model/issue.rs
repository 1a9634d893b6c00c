use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use crate::util::adf;

/// Placeholder for any name the remote payload omits. All defaulting of
/// missing fields goes through the accessors below so the rule lives in
/// one place.
pub const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueFields {
    pub summary: Option<String>,
    /// ADF document; kept raw and flattened to text on demand.
    pub description: Option<serde_json::Value>,
    pub status: Option<Named>,
    pub assignee: Option<User>,
    pub priority: Option<Named>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub comment: Option<CommentPage>,
}

/// Shared shape for status and priority fields.
#[derive(Debug, Clone, Deserialize)]
pub struct Named {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub account_id: Option<String>,
    pub display_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentPage {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub author: Option<User>,
    pub body: Option<serde_json::Value>,
}

/// One workflow move currently allowed for an issue.
#[derive(Debug, Clone, Deserialize)]
pub struct Transition {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    #[serde(default)]
    pub account_id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub key: String,
    pub name: String,
}

impl Issue {
    pub fn summary(&self) -> &str {
        self.fields.summary.as_deref().unwrap_or("")
    }

    pub fn status_name(&self) -> &str {
        self.fields
            .status
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or(UNKNOWN)
    }

    pub fn priority_name(&self) -> &str {
        self.fields
            .priority
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or(UNKNOWN)
    }

    pub fn assignee_name(&self) -> &str {
        self.fields
            .assignee
            .as_ref()
            .map(|u| u.display_name.as_str())
            .unwrap_or("-")
    }

    pub fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
        self.fields.updated.as_deref().and_then(parse_timestamp)
    }

    pub fn updated_display(&self) -> String {
        display_timestamp(self.fields.updated.as_deref())
    }

    pub fn created_display(&self) -> String {
        display_timestamp(self.fields.created.as_deref())
    }

    pub fn description_text(&self) -> Option<String> {
        self.fields.description.as_ref().and_then(adf::extract_text)
    }

    pub fn comments(&self) -> &[Comment] {
        self.fields
            .comment
            .as_ref()
            .map(|c| c.comments.as_slice())
            .unwrap_or(&[])
    }
}

impl Comment {
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|u| u.display_name.as_str())
            .unwrap_or(UNKNOWN)
    }

    pub fn body_text(&self) -> String {
        self.body
            .as_ref()
            .and_then(adf::extract_text)
            .unwrap_or_default()
    }
}

/// Jira emits `2024-05-13T09:30:12.345+0900`; fall back to RFC 3339 for
/// servers that send a colon in the offset.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.3f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

fn display_timestamp(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => match parse_timestamp(raw) {
            Some(t) => t.format("%Y-%m-%d %H:%M").to_string(),
            None => raw.to_string(),
        },
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_issue(key: &str) -> Issue {
        Issue {
            key: key.to_string(),
            fields: IssueFields::default(),
        }
    }

    #[test]
    fn missing_fields_default_at_the_accessor() {
        let issue = bare_issue("DEMO-1");
        assert_eq!(issue.summary(), "");
        assert_eq!(issue.status_name(), UNKNOWN);
        assert_eq!(issue.priority_name(), UNKNOWN);
        assert_eq!(issue.assignee_name(), "-");
        assert!(issue.updated_at().is_none());
        assert_eq!(issue.updated_display(), "");
        assert!(issue.comments().is_empty());
    }

    #[test]
    fn deserializes_search_hit() {
        let raw = r#"{
            "key": "DEMO-7",
            "fields": {
                "summary": "Fix login",
                "status": {"name": "In Progress"},
                "assignee": {"accountId": "abc123", "displayName": "Dana"},
                "priority": {"name": "High"},
                "created": "2024-05-10T08:00:00.000+0900",
                "updated": "2024-05-13T09:30:12.345+0900"
            }
        }"#;
        let issue: Issue = serde_json::from_str(raw).unwrap();
        assert_eq!(issue.key, "DEMO-7");
        assert_eq!(issue.summary(), "Fix login");
        assert_eq!(issue.status_name(), "In Progress");
        assert_eq!(issue.assignee_name(), "Dana");
        assert!(issue.updated_at().is_some());
        assert_eq!(issue.updated_display(), "2024-05-13 09:30");
    }

    #[test]
    fn null_assignee_deserializes() {
        let raw = r#"{"key": "DEMO-8", "fields": {"summary": "x", "assignee": null}}"#;
        let issue: Issue = serde_json::from_str(raw).unwrap();
        assert_eq!(issue.assignee_name(), "-");
    }

    #[test]
    fn parses_both_offset_forms() {
        assert!(parse_timestamp("2024-05-13T09:30:12.345+0900").is_some());
        assert!(parse_timestamp("2024-05-13T09:30:12.345+09:00").is_some());
        assert!(parse_timestamp("not a date").is_none());
    }

    #[test]
    fn comment_body_flattens_adf() {
        let raw = r#"{
            "author": {"displayName": "Sam"},
            "body": {
                "type": "doc",
                "version": 1,
                "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "looks good"}]}
                ]
            }
        }"#;
        let comment: Comment = serde_json::from_str(raw).unwrap();
        assert_eq!(comment.author_name(), "Sam");
        assert_eq!(comment.body_text(), "looks good");
    }
}
