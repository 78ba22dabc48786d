use crate::domain::issue::Issue;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::str::FromStr;

/// Fields available for sorting issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    InternalId,
    DisplayId,
    Title,
    Status,
    Priority,
    Type,
    Assignee,
    DueDate,
    Created,
    Updated,
}

/// Sort order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "internalid" | "internal-id" => Ok(SortField::InternalId),
            "id" | "displayid" => Ok(SortField::DisplayId),
            "title" => Ok(SortField::Title),
            "status" => Ok(SortField::Status),
            "priority" => Ok(SortField::Priority),
            "type" => Ok(SortField::Type),
            "assignee" => Ok(SortField::Assignee),
            "duedate" | "due" => Ok(SortField::DueDate),
            "createdat" | "created" => Ok(SortField::Created),
            "updatedat" | "updated" => Ok(SortField::Updated),
            _ => Err(format!(
                "Invalid sort field '{}'. Valid fields: id, title, status, priority, type, assignee, dueDate, createdAt, updatedAt",
                s
            )),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            _ => Err(format!(
                "Invalid sort direction '{}'. Valid directions: asc, desc",
                s
            )),
        }
    }
}

/// Active sort column of the list view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Selecting the active field flips direction; a new field starts ascending
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn apply(&self, issues: &[Issue]) -> Vec<Issue> {
        sort_issues(issues, self.field, self.direction)
    }
}

impl Default for SortState {
    /// Newest first
    fn default() -> Self {
        Self::new(SortField::Created, SortDirection::Descending)
    }
}

/// Returns a sorted copy of `issues`.
///
/// Equal keys are ordered by internal id, so the result is deterministic
/// and descending order is the exact reverse of ascending.
///
/// # Examples
/// ```
/// use trackboard_core::config::IssueDefaults;
/// use trackboard_core::domain::issue::{DisplayId, Issue, NewIssue, Priority};
/// use trackboard_core::domain::sorting::{sort_issues, SortDirection, SortField};
///
/// let defaults = IssueDefaults::default();
/// let now = chrono::Utc::now();
/// let issues = vec![
///     Issue::from_new(1, DisplayId::new("TRACK", 3, 1),
///         NewIssue::new("A", "a").with_priority(Priority::Critical), &defaults, now),
///     Issue::from_new(2, DisplayId::new("TRACK", 3, 2),
///         NewIssue::new("B", "b").with_priority(Priority::Low), &defaults, now),
/// ];
///
/// let sorted = sort_issues(&issues, SortField::Priority, SortDirection::Ascending);
/// assert_eq!(sorted[0].internal_id, 2);
/// ```
pub fn sort_issues(issues: &[Issue], field: SortField, direction: SortDirection) -> Vec<Issue> {
    let mut sorted = issues.to_vec();
    sorted.sort_by(|a, b| {
        let cmp = compare_field(a, b, field).then(a.internal_id.cmp(&b.internal_id));

        match direction {
            SortDirection::Ascending => cmp,
            SortDirection::Descending => cmp.reverse(),
        }
    });
    sorted
}

fn compare_field(a: &Issue, b: &Issue, field: SortField) -> Ordering {
    match field {
        SortField::InternalId => a.internal_id.cmp(&b.internal_id),
        SortField::DisplayId => compare_text(a.display_id.as_str(), b.display_id.as_str()),
        SortField::Title => compare_text(&a.title, &b.title),
        SortField::Status => compare_text(a.status.as_str(), b.status.as_str()),
        SortField::Priority => a.priority.rank().cmp(&b.priority.rank()),
        SortField::Type => compare_text(a.issue_type.as_str(), b.issue_type.as_str()),
        SortField::Assignee => compare_option_text(a.assignee.as_deref(), b.assignee.as_deref()),
        SortField::DueDate => compare_option_dates(a.due_date, b.due_date),
        SortField::Created => a.created_at.cmp(&b.created_at),
        SortField::Updated => a.updated_at.cmp(&b.updated_at),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Present values sort before missing ones
fn compare_option_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => compare_text(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Present dates sort before missing ones
fn compare_option_dates(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a_date), Some(b_date)) => a_date.cmp(&b_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
