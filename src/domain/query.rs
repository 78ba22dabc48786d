//! Free-text search and category filters shared by the board and list views.

use crate::domain::issue::{Issue, IssueStatus, IssueType, Priority};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Filter categories a [`FilterSet`] understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCategory {
    Status,
    Priority,
    Type,
}

impl FromStr for FilterCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "status" => Ok(FilterCategory::Status),
            "priority" => Ok(FilterCategory::Priority),
            "type" => Ok(FilterCategory::Type),
            _ => Err(format!(
                "Invalid filter category '{}'. Valid categories: status, priority, type",
                s
            )),
        }
    }
}

/// Accepted values per category.
///
/// An empty set leaves its category inactive. Values are compared with the
/// issue's wire form (`in-progress`, `high`, `bug`), so a value no issue
/// carries simply matches nothing. Unknown keys are ignored when
/// deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
    pub status: BTreeSet<String>,
    pub priority: BTreeSet<String>,
    #[serde(rename = "type")]
    pub issue_type: BTreeSet<String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: &IssueStatus) -> Self {
        self.status.insert(status.as_str().to_string());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority.insert(priority.as_str().to_string());
        self
    }

    pub fn with_type(mut self, issue_type: IssueType) -> Self {
        self.issue_type.insert(issue_type.as_str().to_string());
        self
    }

    fn values_mut(&mut self, category: FilterCategory) -> &mut BTreeSet<String> {
        match category {
            FilterCategory::Status => &mut self.status,
            FilterCategory::Priority => &mut self.priority,
            FilterCategory::Type => &mut self.issue_type,
        }
    }

    /// Adds `value` to the category, or removes it if already present
    pub fn toggle(&mut self, category: FilterCategory, value: &str) {
        let values = self.values_mut(category);
        if !values.remove(value) {
            values.insert(value.to_string());
        }
    }

    /// Total number of selected values across all categories
    pub fn active_count(&self) -> usize {
        self.status.len() + self.priority.len() + self.issue_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    pub fn clear(&mut self) {
        self.status.clear();
        self.priority.clear();
        self.issue_type.clear();
    }

    /// Checks a single issue against every active category
    pub fn matches(&self, issue: &Issue) -> bool {
        accepts(&self.status, issue.status.as_str())
            && accepts(&self.priority, issue.priority.as_str())
            && accepts(&self.issue_type, issue.issue_type.as_str())
    }
}

fn accepts(values: &BTreeSet<String>, value: &str) -> bool {
    values.is_empty() || values.contains(value)
}

/// Normalized search term, or `None` when the query matches everything
fn search_term(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Checks if an issue contains an already lowercased search term
fn matches_term(issue: &Issue, term: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(term);

    contains(issue.title.as_str())
        || contains(issue.description.as_str())
        || contains(issue.display_id.as_str())
        || issue.assignee.as_deref().map(contains).unwrap_or(false)
        || issue.labels.iter().any(|label| contains(label.as_str()))
}

/// Issues whose title, description, display id, assignee or labels contain
/// `query`, case-insensitively. A blank query returns every issue.
pub fn search(issues: &[Issue], query: &str) -> Vec<Issue> {
    match search_term(query) {
        Some(term) => issues
            .iter()
            .filter(|issue| matches_term(issue, &term))
            .cloned()
            .collect(),
        None => issues.to_vec(),
    }
}

/// Issues passing every active category of `filters`
pub fn filter(issues: &[Issue], filters: &FilterSet) -> Vec<Issue> {
    issues
        .iter()
        .filter(|issue| filters.matches(issue))
        .cloned()
        .collect()
}

/// Search first, then filter
pub fn search_and_filter(issues: &[Issue], query: &str, filters: &FilterSet) -> Vec<Issue> {
    let searched = search(issues, query);
    if filters.is_empty() {
        return searched;
    }
    filter(&searched, filters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IssueDefaults;
    use crate::domain::issue::{DisplayId, NewIssue};
    use chrono::Utc;

    fn issue(id: u64, new_issue: NewIssue) -> Issue {
        Issue::from_new(
            id,
            DisplayId::new("TRACK", 3, id as usize),
            new_issue,
            &IssueDefaults::default(),
            Utc::now(),
        )
    }

    fn fixtures() -> Vec<Issue> {
        vec![
            issue(
                1,
                NewIssue::new("Login button broken", "Clicking does nothing")
                    .with_priority(Priority::High)
                    .with_assignee("Sarah Chen")
                    .with_labels(["frontend", "auth"]),
            ),
            issue(
                2,
                NewIssue::new("Dark mode", "Add a dark theme")
                    .with_status(IssueStatus::InProgress)
                    .with_type(IssueType::Feature)
                    .with_labels(["ui"]),
            ),
            issue(
                3,
                NewIssue::new("Update dependencies", "Bump crates")
                    .with_status(IssueStatus::Closed)
                    .with_priority(Priority::Low)
                    .with_type(IssueType::Task),
            ),
        ]
    }

    fn ids(issues: &[Issue]) -> Vec<u64> {
        issues.iter().map(|i| i.internal_id).collect()
    }

    #[test]
    fn test_search_blank_query_returns_all() {
        let issues = fixtures();
        assert_eq!(search(&issues, ""), issues);
        assert_eq!(search(&issues, "   \t"), issues);
    }

    #[test]
    fn test_search_each_field() {
        let issues = fixtures();

        assert_eq!(ids(&search(&issues, "login")), vec![1]);
        assert_eq!(ids(&search(&issues, "DARK THEME")), vec![2]);
        assert_eq!(ids(&search(&issues, "track-003")), vec![3]);
        assert_eq!(ids(&search(&issues, "chen")), vec![1]);
        assert_eq!(ids(&search(&issues, "UI")), vec![2]);
        assert!(search(&issues, "nonexistent").is_empty());
    }

    #[test]
    fn test_search_trims_query() {
        let issues = fixtures();
        assert_eq!(ids(&search(&issues, "  crates  ")), vec![3]);
    }

    #[test]
    fn test_search_result_is_subset() {
        let issues = fixtures();
        for query in ["a", "o", "track", "zzz", ""] {
            let found = search(&issues, query);
            assert!(found.iter().all(|f| issues.contains(f)));
        }
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let issues = fixtures();
        assert_eq!(filter(&issues, &FilterSet::default()), issues);
    }

    #[test]
    fn test_filter_status_scenario() {
        let issues = vec![
            issue(1, NewIssue::new("A", "a").with_priority(Priority::High)),
            issue(
                2,
                NewIssue::new("B", "b")
                    .with_status(IssueStatus::Closed)
                    .with_priority(Priority::Low),
            ),
        ];
        let filters = FilterSet::new().with_status(&IssueStatus::Open);

        let result = filter(&issues, &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0], issues[0]);
    }

    #[test]
    fn test_filter_or_within_and_across_categories() {
        let issues = fixtures();

        let filters = FilterSet::new()
            .with_status(&IssueStatus::Open)
            .with_status(&IssueStatus::InProgress);
        assert_eq!(ids(&filter(&issues, &filters)), vec![1, 2]);

        let filters = filters.with_type(IssueType::Feature);
        assert_eq!(ids(&filter(&issues, &filters)), vec![2]);
    }

    #[test]
    fn test_unknown_filter_value_fails_closed() {
        let issues = fixtures();
        let mut filters = FilterSet::new();
        filters.toggle(FilterCategory::Priority, "urgent");

        assert!(filter(&issues, &filters).is_empty());
    }

    #[test]
    fn test_unknown_category_keys_are_ignored() {
        let filters: FilterSet =
            serde_json::from_str(r#"{"status": ["open"], "milestone": ["v2"]}"#).unwrap();

        assert_eq!(filters.active_count(), 1);
        assert_eq!(ids(&filter(&fixtures(), &filters)), vec![1]);
    }

    #[test]
    fn test_no_issues_gives_empty_result() {
        let filters = FilterSet::new().with_priority(Priority::High);
        assert!(search_and_filter(&[], "login", &filters).is_empty());
    }

    #[test]
    fn test_search_and_filter_is_intersection() {
        let issues = fixtures();
        let filter_sets = vec![
            FilterSet::default(),
            FilterSet::new().with_status(&IssueStatus::Open),
            FilterSet::new().with_priority(Priority::Low),
            FilterSet::new()
                .with_type(IssueType::Bug)
                .with_type(IssueType::Feature),
        ];

        for query in ["", "o", "dark", "track-00", "nothing"] {
            for filters in &filter_sets {
                let combined = ids(&search_and_filter(&issues, query, filters));
                let searched = ids(&search(&issues, query));
                let filtered = ids(&filter(&issues, filters));
                let expected: Vec<u64> = searched
                    .into_iter()
                    .filter(|id| filtered.contains(id))
                    .collect();
                assert_eq!(combined, expected, "query {:?}", query);
            }
        }
    }

    #[test]
    fn test_toggle_and_clear() {
        let mut filters = FilterSet::new();
        filters.toggle(FilterCategory::Status, "open");
        filters.toggle(FilterCategory::Type, "bug");
        assert_eq!(filters.active_count(), 2);

        filters.toggle(FilterCategory::Status, "open");
        assert_eq!(filters.active_count(), 1);
        assert!(filters.status.is_empty());

        filters.clear();
        assert!(filters.is_empty());
    }

    #[test]
    fn test_filter_category_parsing() {
        assert_eq!(
            FilterCategory::from_str("Status").unwrap(),
            FilterCategory::Status
        );
        assert!(FilterCategory::from_str("milestone").is_err());
    }
}
