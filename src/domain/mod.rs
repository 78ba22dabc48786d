pub mod board;
pub mod form;
pub mod issue;
pub mod query;
pub mod sorting;

pub use board::{Board, BoardConfig, Column, ColumnIssues};
pub use form::{IssueDraft, ValidationErrors};
pub use issue::{
    Activity, DisplayId, Issue, IssueStatus, IssueType, IssueUpdate, NewActivity, NewIssue,
    Priority,
};
pub use query::{filter, search, search_and_filter, FilterCategory, FilterSet};
pub use sorting::{sort_issues, SortDirection, SortField, SortState};
