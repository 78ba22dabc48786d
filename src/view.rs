//! State shared by the board and list views.
//!
//! The parent owns one [`ViewState`] and hands it to whichever view is
//! active. Search text, filter changes and sort clicks are applied here and
//! both views read their issues through the same query path.

use crate::domain::{
    query, Board, ColumnIssues, FilterCategory, FilterSet, Issue, SortField, SortState,
};

/// What an empty view should tell the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// Nothing to show and no query or filter is active
    NoIssues,
    /// The active query or filters exclude every issue
    NoMatches,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    query: String,
    filters: FilterSet,
    sort: SortState,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_filters(&mut self, filters: FilterSet) {
        self.filters = filters;
    }

    pub fn toggle_filter(&mut self, category: FilterCategory, value: &str) {
        self.filters.toggle(category, value);
    }

    /// Column header click in the list view
    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort.toggle(field);
    }

    /// Resets query and filters, keeping the sort
    pub fn clear(&mut self) {
        self.query.clear();
        self.filters.clear();
    }

    pub fn is_narrowed(&self) -> bool {
        !self.query.trim().is_empty() || !self.filters.is_empty()
    }

    /// Issues matching the query and filters, in input order
    pub fn matching_issues(&self, issues: &[Issue]) -> Vec<Issue> {
        query::search_and_filter(issues, &self.query, &self.filters)
    }

    /// List view rows: matching issues in the active sort order
    pub fn visible_issues(&self, issues: &[Issue]) -> Vec<Issue> {
        self.sort.apply(&self.matching_issues(issues))
    }

    /// Board view: matching issues grouped into the board's columns
    pub fn board_columns<'a>(&self, board: &'a Board, matching: &'a [Issue]) -> Vec<ColumnIssues<'a>> {
        board.group(matching)
    }

    /// Which empty state applies, if the matching set is empty
    pub fn empty_state(&self, matching: &[Issue]) -> Option<EmptyState> {
        if !matching.is_empty() {
            None
        } else if self.is_narrowed() {
            Some(EmptyState::NoMatches)
        } else {
            Some(EmptyState::NoIssues)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IssueDefaults;
    use crate::domain::{DisplayId, IssueStatus, NewIssue, Priority, SortDirection};
    use chrono::{Duration, Utc};

    fn fixtures() -> Vec<Issue> {
        let now = Utc::now();
        let specs = [
            ("Login broken", IssueStatus::Open, Priority::High),
            ("Dark mode", IssueStatus::InProgress, Priority::Low),
            ("Login audit log", IssueStatus::Review, Priority::Critical),
        ];

        specs
            .into_iter()
            .enumerate()
            .map(|(i, (title, status, priority))| {
                let id = i as u64 + 1;
                Issue::from_new(
                    id,
                    DisplayId::new("TRACK", 3, id as usize),
                    NewIssue::new(title, "body")
                        .with_status(status)
                        .with_priority(priority),
                    &IssueDefaults::default(),
                    now + Duration::minutes(i as i64),
                )
            })
            .collect()
    }

    fn ids(issues: &[Issue]) -> Vec<u64> {
        issues.iter().map(|i| i.internal_id).collect()
    }

    #[test]
    fn test_default_view_shows_newest_first() {
        let view = ViewState::new();
        assert_eq!(ids(&view.visible_issues(&fixtures())), vec![3, 2, 1]);
    }

    #[test]
    fn test_query_and_sort_compose() {
        let mut view = ViewState::new();
        view.set_query("login");
        view.toggle_sort(SortField::Priority);
        assert_eq!(view.sort().direction, SortDirection::Ascending);

        assert_eq!(ids(&view.visible_issues(&fixtures())), vec![1, 3]);

        view.toggle_sort(SortField::Priority);
        assert_eq!(ids(&view.visible_issues(&fixtures())), vec![3, 1]);
    }

    #[test]
    fn test_board_uses_same_query_path() {
        let issues = fixtures();
        let board = Board::default();
        let mut view = ViewState::new();
        view.set_query("login");
        view.toggle_filter(FilterCategory::Status, "review");

        let matching = view.matching_issues(&issues);
        let columns = view.board_columns(&board, &matching);

        let on_board: Vec<u64> = columns
            .iter()
            .flat_map(|c| c.issues.iter().map(|i| i.internal_id))
            .collect();
        assert_eq!(on_board, vec![3]);

        let mut listed = ids(&view.visible_issues(&issues));
        listed.sort_unstable();
        assert_eq!(listed, on_board);
    }

    #[test]
    fn test_empty_states() {
        let mut view = ViewState::new();
        assert_eq!(view.empty_state(&[]), Some(EmptyState::NoIssues));

        view.set_query("nothing matches");
        let matching = view.matching_issues(&fixtures());
        assert_eq!(view.empty_state(&matching), Some(EmptyState::NoMatches));

        view.clear();
        assert!(!view.is_narrowed());
        let matching = view.matching_issues(&fixtures());
        assert_eq!(view.empty_state(&matching), None);
    }

    #[test]
    fn test_whitespace_query_is_not_narrowing() {
        let mut view = ViewState::new();
        view.set_query("   ");
        assert!(!view.is_narrowed());
        assert_eq!(view.matching_issues(&fixtures()).len(), 3);
    }
}
