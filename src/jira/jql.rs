//! JQL string builders.

/// Issues assigned to the calling user. `None` means no status clause;
/// a populated slice becomes a quoted IN-list. Callers resolve an empty
/// selection before building a query, so no slice here ever produces
/// `status in ()`.
pub fn my_issues(statuses: Option<&[String]>) -> String {
    let mut jql = String::from("assignee = currentUser()");
    if let Some(statuses) = statuses {
        if !statuses.is_empty() {
            let quoted: Vec<String> = statuses.iter().map(|s| quote(s)).collect();
            jql.push_str(" AND status in (");
            jql.push_str(&quoted.join(","));
            jql.push(')');
        }
    }
    jql
}

/// All issues of one project, newest first.
pub fn project_issues(project_key: &str) -> String {
    format!("project = {} ORDER BY created DESC", quote(project_key))
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_filter_has_no_status_clause() {
        assert_eq!(my_issues(None), "assignee = currentUser()");
    }

    #[test]
    fn statuses_become_quoted_in_list() {
        let statuses = vec!["To Do".to_string(), "In Progress".to_string()];
        assert_eq!(
            my_issues(Some(statuses.as_slice())),
            "assignee = currentUser() AND status in (\"To Do\",\"In Progress\")"
        );
    }

    #[test]
    fn empty_selection_never_builds_a_malformed_in_list() {
        // The matches-nothing case is short-circuited by the client; the
        // builder itself must still not emit `status in ()`.
        let empty: Vec<String> = Vec::new();
        let jql = my_issues(Some(empty.as_slice()));
        assert!(!jql.contains("status in"));
    }

    #[test]
    fn embedded_quotes_are_escaped() {
        let statuses = vec!["Waiting for \"QA\"".to_string()];
        assert_eq!(
            my_issues(Some(statuses.as_slice())),
            "assignee = currentUser() AND status in (\"Waiting for \\\"QA\\\"\")"
        );
    }

    #[test]
    fn project_clause_orders_by_created_descending() {
        assert_eq!(
            project_issues("DEMO"),
            "project = \"DEMO\" ORDER BY created DESC"
        );
    }
}
