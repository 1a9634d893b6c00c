use std::collections::BTreeMap;

use crate::model::issue::Issue;

/// Issue count per status name. Missing statuses land in the single
/// placeholder bucket the accessor defaults to.
pub fn count_by_status(issues: &[Issue]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for issue in issues {
        *counts.entry(issue.status_name().to_string()).or_insert(0) += 1;
    }
    counts
}

/// Issue count per priority name.
pub fn count_by_priority(issues: &[Issue]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for issue in issues {
        *counts.entry(issue.priority_name().to_string()).or_insert(0) += 1;
    }
    counts
}

/// Order by updated timestamp, newest first. `sort_by` is stable, so issues
/// with equal timestamps keep their fetch order; unparsable or missing
/// timestamps sort last.
pub fn sort_by_updated(issues: &mut [Issue]) {
    issues.sort_by(|a, b| match (a.updated_at(), b.updated_at()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
