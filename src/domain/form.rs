//! Input boundary for the create/edit form.
//!
//! The store trusts its input, so required fields and length limits are
//! checked here before a payload reaches it.

use crate::{
    domain::issue::{Issue, IssueStatus, IssueType, IssueUpdate, NewIssue, Priority},
    error::TrackError,
};
use chrono::{DateTime, NaiveDate, Utc};
use std::{collections::BTreeMap, fmt, str::FromStr};

pub const MAX_TITLE_LEN: usize = 100;

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl From<ValidationErrors> for TrackError {
    fn from(errors: ValidationErrors) -> Self {
        TrackError::Validation(errors.to_string())
    }
}

/// Raw form values as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDraft {
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub issue_type: String,
    pub assignee: String,
    /// `YYYY-MM-DD` or RFC 3339, empty for none
    pub due_date: String,
    /// Comma separated
    pub labels: String,
}

impl Default for IssueDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: IssueStatus::Open.as_str().to_string(),
            priority: Priority::Medium.as_str().to_string(),
            issue_type: IssueType::Bug.as_str().to_string(),
            assignee: String::new(),
            due_date: String::new(),
            labels: String::new(),
        }
    }
}

/// Form values after validation
struct ValidDraft {
    title: String,
    description: String,
    status: IssueStatus,
    priority: Priority,
    issue_type: IssueType,
    assignee: Option<String>,
    due_date: Option<DateTime<Utc>>,
    labels: Vec<String>,
}

impl IssueDraft {
    /// Prefills the form from an existing issue for editing
    pub fn from_issue(issue: &Issue) -> Self {
        Self {
            title: issue.title.clone(),
            description: issue.description.clone(),
            status: issue.status.as_str().to_string(),
            priority: issue.priority.as_str().to_string(),
            issue_type: issue.issue_type.as_str().to_string(),
            assignee: issue.assignee.clone().unwrap_or_default(),
            due_date: issue
                .due_date
                .map(|d| d.date_naive().format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            labels: issue.labels.join(", "),
        }
    }

    /// Validates the draft into a creation payload
    pub fn into_new_issue(self) -> Result<NewIssue, ValidationErrors> {
        let valid = self.validate()?;
        Ok(NewIssue {
            title: valid.title,
            description: valid.description,
            status: Some(valid.status),
            priority: Some(valid.priority),
            issue_type: Some(valid.issue_type),
            assignee: valid.assignee,
            due_date: valid.due_date,
            labels: valid.labels,
        })
    }

    /// Validates the draft into an update that overwrites every form field
    pub fn into_update(self) -> Result<IssueUpdate, ValidationErrors> {
        let valid = self.validate()?;
        Ok(IssueUpdate {
            title: Some(valid.title),
            description: Some(valid.description),
            status: Some(valid.status),
            priority: Some(valid.priority),
            issue_type: Some(valid.issue_type),
            assignee: Some(valid.assignee),
            due_date: Some(valid.due_date),
            labels: Some(valid.labels),
            new_activity: None,
        })
    }

    fn validate(self) -> Result<ValidDraft, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.title.trim().is_empty() {
            errors.add("title", "Title is required");
        } else if self.title.chars().count() > MAX_TITLE_LEN {
            errors.add(
                "title",
                format!("Title must be at most {} characters", MAX_TITLE_LEN),
            );
        }

        if self.description.trim().is_empty() {
            errors.add("description", "Description is required");
        }

        let status = IssueStatus::from(self.status.trim());
        if !status.is_workflow() {
            errors.add("status", format!("Unknown status '{}'", self.status));
        }

        let priority = Priority::from_str(self.priority.trim());
        if priority.is_err() {
            errors.add("priority", format!("Unknown priority '{}'", self.priority));
        }

        let issue_type = IssueType::from_str(self.issue_type.trim());
        if issue_type.is_err() {
            errors.add("type", format!("Unknown type '{}'", self.issue_type));
        }

        let due_date = parse_due_date(&self.due_date);
        if due_date.is_err() {
            errors.add("dueDate", format!("Invalid date '{}'", self.due_date));
        }

        match (priority, issue_type, due_date) {
            (Ok(priority), Ok(issue_type), Ok(due_date)) if errors.is_empty() => Ok(ValidDraft {
                title: self.title.trim().to_string(),
                description: self.description.trim().to_string(),
                status,
                priority,
                issue_type,
                assignee: non_empty(&self.assignee),
                due_date,
                labels: parse_labels(&self.labels),
            }),
            _ => Err(errors),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Splits a comma separated label list, trimming and dropping empties
pub fn parse_labels(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(String::from)
        .collect()
}

/// Parses `YYYY-MM-DD` (midnight UTC) or an RFC 3339 instant; blank is `None`
pub fn parse_due_date(input: &str) -> Result<Option<DateTime<Utc>>, TrackError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Some(midnight.and_utc()));
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|d| Some(d.with_timezone(&Utc)))
        .map_err(|_| TrackError::InvalidField {
            field: "dueDate".to_string(),
            value: input.to_string(),
        })
}
