use crate::domain::issue::{Issue, IssueStatus};
use serde::{Deserialize, Serialize};

/// Configuration for a kanban board column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub title: String,
    pub status: IssueStatus,
}

impl Column {
    pub fn new(title: impl Into<String>, status: IssueStatus) -> Self {
        Self {
            title: title.into(),
            status,
        }
    }
}

/// Board configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "Issues".to_string(),
            columns: vec![
                Column::new("Open", IssueStatus::Open),
                Column::new("In Progress", IssueStatus::InProgress),
                Column::new("Review", IssueStatus::Review),
                Column::new("Closed", IssueStatus::Closed),
            ],
        }
    }
}

/// A column together with the issues currently in it
#[derive(Debug, Clone)]
pub struct ColumnIssues<'a> {
    pub column: &'a Column,
    pub issues: Vec<&'a Issue>,
}

/// Kanban board layout
#[derive(Debug, Clone, Default)]
pub struct Board {
    pub config: BoardConfig,
}

impl Board {
    pub fn new(config: BoardConfig) -> Self {
        Self { config }
    }

    /// Gets the column configuration for a status
    pub fn column_for_status(&self, status: &IssueStatus) -> Option<&Column> {
        self.config.columns.iter().find(|col| &col.status == status)
    }

    /// Column title for a status, falling back to the raw status value
    pub fn column_title<'a>(&'a self, status: &'a IssueStatus) -> &'a str {
        self.column_for_status(status)
            .map(|col| col.title.as_str())
            .unwrap_or_else(|| status.as_str())
    }

    /// Groups issues into columns, keeping their relative order.
    ///
    /// Issues whose status has no column are left out.
    pub fn group<'a>(&'a self, issues: &'a [Issue]) -> Vec<ColumnIssues<'a>> {
        self.config
            .columns
            .iter()
            .map(|column| ColumnIssues {
                column,
                issues: issues
                    .iter()
                    .filter(|issue| issue.status == column.status)
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IssueDefaults;
    use crate::domain::issue::{DisplayId, NewIssue};
    use chrono::Utc;

    fn issue(id: u64, status: IssueStatus) -> Issue {
        Issue::from_new(
            id,
            DisplayId::new("TRACK", 3, id as usize),
            NewIssue::new(format!("Issue {}", id), "body").with_status(status),
            &IssueDefaults::default(),
            Utc::now(),
        )
    }

    #[test]
    fn test_default_columns() {
        let board = Board::default();
        let statuses: Vec<&IssueStatus> =
            board.config.columns.iter().map(|c| &c.status).collect();

        let workflow = IssueStatus::workflow();
        assert_eq!(statuses, workflow.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_group_by_status() {
        let board = Board::default();
        let issues = vec![
            issue(1, IssueStatus::Open),
            issue(2, IssueStatus::Review),
            issue(3, IssueStatus::Open),
            issue(4, IssueStatus::from("blocked")),
        ];

        let columns = board.group(&issues);

        assert_eq!(columns.len(), 4);
        let open: Vec<u64> = columns[0].issues.iter().map(|i| i.internal_id).collect();
        assert_eq!(open, vec![1, 3]);
        assert!(columns[1].issues.is_empty());
        assert_eq!(columns[2].issues.len(), 1);
        assert!(columns[3].issues.is_empty());

        let grouped: usize = columns.iter().map(|c| c.issues.len()).sum();
        assert_eq!(grouped, 3);
    }

    #[test]
    fn test_column_title() {
        let board = Board::default();
        assert_eq!(board.column_title(&IssueStatus::InProgress), "In Progress");

        let unknown = IssueStatus::from("blocked");
        assert_eq!(board.column_title(&unknown), "blocked");
    }
}
