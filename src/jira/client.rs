use std::time::Duration;

use base64::Engine;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::jira::error::{Error, Result};
use crate::jira::jql;
use crate::model::issue::{CurrentUser, Issue, Project, Transition};
use crate::util::adf;

/// Field projection for list views; detail adds description and comments.
const LIST_FIELDS: &str = "summary,status,assignee,priority,created,updated";
const DETAIL_FIELDS: &str = "summary,description,status,assignee,priority,created,updated,comment";
const MAX_RESULTS: u32 = 50;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Authenticated session against one Jira site. Basic auth (email + API
/// token) on every request, one attempt per call, no retries.
pub struct JiraClient {
    base_url: String,
    auth_header: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<Issue>,
}

#[derive(Deserialize)]
struct TransitionsResponse {
    #[serde(default)]
    transitions: Vec<Transition>,
}

#[derive(Deserialize)]
struct ProjectSearchResponse {
    #[serde(default)]
    values: Vec<Project>,
}

#[derive(Deserialize)]
struct CreatedIssue {
    key: String,
}

impl JiraClient {
    pub fn new(base_url: &str, email: &str, api_token: &str) -> Result<Self> {
        let creds = format!("{email}:{api_token}");
        let encoded = base64::engine::general_purpose::STANDARD.encode(creds);
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: format!("Basic {encoded}"),
            client,
        })
    }

    /// Verify the credentials against the current-user endpoint.
    pub async fn current_user(&self) -> Result<CurrentUser> {
        let resp = self.get("/rest/api/3/myself").send().await?;
        if !resp.status().is_success() {
            return Err(fail(resp, |status, body| Error::Connect { status, body }).await);
        }
        Ok(resp.json().await?)
    }

    /// Issues assigned to the calling user. `None` fetches without a status
    /// clause; an explicit empty selection matches nothing and returns
    /// without a request.
    pub async fn my_issues(&self, statuses: Option<&[String]>) -> Result<Vec<Issue>> {
        if matches!(statuses, Some(s) if s.is_empty()) {
            return Ok(Vec::new());
        }
        self.search(&jql::my_issues(statuses)).await
    }

    /// All issues of one project, newest first.
    pub async fn project_issues(&self, project_key: &str) -> Result<Vec<Issue>> {
        self.search(&jql::project_issues(project_key)).await
    }

    async fn search(&self, jql: &str) -> Result<Vec<Issue>> {
        let path = format!(
            "/rest/api/3/search?jql={}&fields={}&maxResults={}",
            urlencoding::encode(jql),
            LIST_FIELDS,
            MAX_RESULTS
        );
        let resp = self.get(&path).send().await?;
        if !resp.status().is_success() {
            return Err(fail(resp, |status, body| Error::Query { status, body }).await);
        }
        let page: SearchResponse = resp.json().await?;
        Ok(page.issues)
    }

    /// One issue with description and the full embedded comment list.
    pub async fn issue(&self, key: &str) -> Result<Issue> {
        let path = format!("/rest/api/3/issue/{key}?fields={DETAIL_FIELDS}");
        let resp = self.get(&path).send().await?;
        if !resp.status().is_success() {
            return Err(fail(resp, |status, body| Error::Query { status, body }).await);
        }
        Ok(resp.json().await?)
    }

    /// Workflow moves currently allowed for the issue, fetched fresh each
    /// time.
    pub async fn transitions(&self, key: &str) -> Result<Vec<Transition>> {
        let path = format!("/rest/api/3/issue/{key}/transitions");
        let resp = self.get(&path).send().await?;
        if !resp.status().is_success() {
            return Err(fail(resp, |status, body| Error::Query { status, body }).await);
        }
        let page: TransitionsResponse = resp.json().await?;
        Ok(page.transitions)
    }

    pub async fn run_transition(&self, key: &str, transition_id: &str) -> Result<()> {
        let path = format!("/rest/api/3/issue/{key}/transitions");
        let resp = self
            .post(&path)
            .json(&transition_payload(transition_id))
            .send()
            .await?;
        self.check_mutation(resp).await
    }

    pub async fn add_comment(&self, key: &str, body_text: &str) -> Result<()> {
        let path = format!("/rest/api/3/issue/{key}/comment");
        let resp = self
            .post(&path)
            .json(&comment_payload(body_text))
            .send()
            .await?;
        self.check_mutation(resp).await
    }

    pub async fn assign(&self, key: &str, account_id: &str) -> Result<()> {
        let path = format!("/rest/api/3/issue/{key}/assignee");
        let resp = self
            .client
            .put(format!("{}{path}", self.base_url))
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .json(&assignee_payload(account_id))
            .send()
            .await?;
        self.check_mutation(resp).await
    }

    /// Projects visible to the user, for the creation form picker.
    pub async fn projects(&self) -> Result<Vec<Project>> {
        let resp = self.get("/rest/api/3/project/search").send().await?;
        if !resp.status().is_success() {
            return Err(fail(resp, |status, body| Error::Query { status, body }).await);
        }
        let page: ProjectSearchResponse = resp.json().await?;
        Ok(page.values)
    }

    /// Create a Task issue; returns the new issue key.
    pub async fn create_issue(
        &self,
        project_key: &str,
        summary: &str,
        description: Option<&str>,
    ) -> Result<String> {
        let resp = self
            .post("/rest/api/3/issue")
            .json(&create_payload(project_key, summary, description))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(fail(resp, |status, body| Error::Mutation { status, body }).await);
        }
        let created: CreatedIssue = resp.json().await?;
        Ok(created.key)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{path}", self.base_url))
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{path}", self.base_url))
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
    }

    async fn check_mutation(&self, resp: Response) -> Result<()> {
        if !resp.status().is_success() {
            return Err(fail(resp, |status, body| Error::Mutation { status, body }).await);
        }
        Ok(())
    }
}

async fn fail(resp: Response, make: fn(StatusCode, String) -> Error) -> Error {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    make(status, body)
}

fn transition_payload(transition_id: &str) -> Value {
    json!({"transition": {"id": transition_id}})
}

fn comment_payload(body_text: &str) -> Value {
    json!({"body": adf::document(body_text)})
}

fn assignee_payload(account_id: &str) -> Value {
    json!({"accountId": account_id})
}

fn create_payload(project_key: &str, summary: &str, description: Option<&str>) -> Value {
    let mut fields = json!({
        "project": {"key": project_key},
        "summary": summary,
        "issuetype": {"name": "Task"}
    });
    if let Some(desc) = description.filter(|d| !d.trim().is_empty()) {
        fields["description"] = adf::document(desc);
    }
    json!({"fields": fields})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slash() {
        let client = JiraClient::new("https://acme.atlassian.net/", "a@b.c", "tok").unwrap();
        assert_eq!(client.base_url, "https://acme.atlassian.net");
    }

    #[test]
    fn auth_header_is_basic_base64() {
        let client = JiraClient::new("https://acme.atlassian.net", "a@b.c", "tok").unwrap();
        // base64("a@b.c:tok")
        assert_eq!(client.auth_header, "Basic YUBiLmM6dG9r");
    }

    #[test]
    fn transition_payload_wraps_id() {
        assert_eq!(
            transition_payload("31"),
            json!({"transition": {"id": "31"}})
        );
    }

    #[test]
    fn comment_payload_is_an_adf_document() {
        let payload = comment_payload("done");
        assert_eq!(payload["body"]["type"], "doc");
        assert_eq!(
            payload["body"]["content"][0]["content"][0]["text"],
            "done"
        );
    }

    #[test]
    fn assignee_payload_uses_account_id() {
        assert_eq!(assignee_payload("abc-123"), json!({"accountId": "abc-123"}));
    }

    #[test]
    fn create_payload_includes_adf_description() {
        let payload = create_payload("DEMO", "New task", Some("details"));
        assert_eq!(payload["fields"]["project"]["key"], "DEMO");
        assert_eq!(payload["fields"]["summary"], "New task");
        assert_eq!(payload["fields"]["issuetype"]["name"], "Task");
        assert_eq!(payload["fields"]["description"]["type"], "doc");
    }

    #[test]
    fn create_payload_omits_blank_description() {
        let payload = create_payload("DEMO", "New task", Some("   "));
        assert!(payload["fields"].get("description").is_none());
        let payload = create_payload("DEMO", "New task", None);
        assert!(payload["fields"].get("description").is_none());
    }
}
