use crate::config::IssueDefaults;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};

/// Human-facing identifier for an issue (e.g., TRACK-001, TRACK-042)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayId(String);

impl DisplayId {
    /// Creates a new DisplayId, zero-padding the counter to `width` digits
    pub fn new(prefix: &str, width: usize, counter: usize) -> Self {
        Self(format!("{}-{:0width$}", prefix, counter, width = width))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Workflow status of an issue.
///
/// Status changes are permissive, so values outside the four workflow
/// states are carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IssueStatus {
    Open,
    InProgress,
    Review,
    Closed,
    Other(String),
}

impl IssueStatus {
    /// The board workflow, in column order
    pub fn workflow() -> [IssueStatus; 4] {
        [
            IssueStatus::Open,
            IssueStatus::InProgress,
            IssueStatus::Review,
            IssueStatus::Closed,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Review => "review",
            Self::Closed => "closed",
            Self::Other(s) => s,
        }
    }

    /// Returns `true` for the four workflow states
    pub fn is_workflow(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for IssueStatus {
    fn default() -> Self {
        Self::Open
    }
}

impl From<&str> for IssueStatus {
    fn from(s: &str) -> Self {
        match s {
            "open" => Self::Open,
            "in-progress" => Self::InProgress,
            "review" => Self::Review,
            "closed" => Self::Closed,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for IssueStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<IssueStatus> for String {
    fn from(status: IssueStatus) -> Self {
        match status {
            IssueStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Priority of an issue, ordered low < medium < high < critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Ordinal used for sorting (low = 1 .. critical = 4)
    pub fn rank(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl FromStr for Priority {
    type Err = crate::error::TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(crate::error::TrackError::InvalidField {
                field: "priority".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of work an issue tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Bug,
    Feature,
    Task,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::Feature => "feature",
            Self::Task => "task",
        }
    }
}

impl Default for IssueType {
    fn default() -> Self {
        Self::Bug
    }
}

impl FromStr for IssueType {
    type Err = crate::error::TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bug" => Ok(Self::Bug),
            "feature" => Ok(Self::Feature),
            "task" => Ok(Self::Task),
            _ => Err(crate::error::TrackError::InvalidField {
                field: "type".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caller-supplied description of an activity, before the store stamps it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewActivity(pub Map<String, Value>);

impl NewActivity {
    /// A free-text note
    pub fn note(message: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("type".to_string(), Value::from("note"));
        fields.insert("message".to_string(), Value::from(message.into()));
        Self(fields)
    }

    /// A status change from one value to another
    pub fn status_change(from: &IssueStatus, to: &IssueStatus) -> Self {
        let mut fields = Map::new();
        fields.insert("type".to_string(), Value::from("status-change"));
        fields.insert("from".to_string(), Value::from(from.as_str()));
        fields.insert("to".to_string(), Value::from(to.as_str()));
        Self(fields)
    }
}

/// Append-only log entry owned by an issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "Id")]
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Activity {
    /// Looks up a caller-supplied field as a string
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).and_then(Value::as_str)
    }
}

/// Reads an absent or `null` sequence as empty
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// An issue on the tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(rename = "Id")]
    pub internal_id: u64,
    #[serde(rename = "id")]
    pub display_id: DisplayId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: IssueStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(rename = "type", default)]
    pub issue_type: IssueType,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub labels: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub activities: Vec<Activity>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// Builds a stored issue from a creation payload, filling omitted fields
    /// from `defaults`
    pub fn from_new(
        internal_id: u64,
        display_id: DisplayId,
        new_issue: NewIssue,
        defaults: &IssueDefaults,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            internal_id,
            display_id,
            title: new_issue.title,
            description: new_issue.description,
            status: new_issue.status.unwrap_or_else(|| defaults.status.clone()),
            priority: new_issue.priority.unwrap_or(defaults.priority),
            issue_type: new_issue.issue_type.unwrap_or(defaults.issue_type),
            assignee: new_issue.assignee,
            due_date: new_issue.due_date,
            labels: new_issue.labels,
            activities: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Next activity id: one past the highest existing id
    pub fn next_activity_id(&self) -> u64 {
        self.activities.iter().map(|a| a.id).max().unwrap_or(0) + 1
    }

    /// Appends an activity stamped with the next id and `now`. Any `Id` or
    /// `timestamp` supplied by the caller is replaced.
    pub fn append_activity(&mut self, activity: NewActivity, now: DateTime<Utc>) -> &Activity {
        let id = self.next_activity_id();
        let mut details = activity.0;
        details.remove("Id");
        details.remove("timestamp");

        self.activities.push(Activity {
            id,
            timestamp: now,
            details,
        });
        self.updated_at = now;
        &self.activities[self.activities.len() - 1]
    }

    /// Merges the `Some` fields of `update` into this issue and refreshes
    /// `updated_at`
    pub fn apply_update(&mut self, update: IssueUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(issue_type) = update.issue_type {
            self.issue_type = issue_type;
        }
        if let Some(assignee) = update.assignee {
            self.assignee = assignee;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        if let Some(labels) = update.labels {
            self.labels = labels;
        }
        if let Some(activity) = update.new_activity {
            self.append_activity(activity, now);
        }
        self.updated_at = now;
    }

    /// First `max` labels plus how many were left out
    pub fn label_preview(&self, max: usize) -> (&[String], usize) {
        let shown = self.labels.len().min(max);
        (&self.labels[..shown], self.labels.len() - shown)
    }
}

/// Payload for creating an issue; `None` fields take the configured defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIssue {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: Option<IssueStatus>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(rename = "type", default)]
    pub issue_type: Option<IssueType>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub labels: Vec<String>,
}

impl NewIssue {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: IssueStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_type(mut self, issue_type: IssueType) -> Self {
        self.issue_type = Some(issue_type);
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }
}

/// Partial update of an issue.
///
/// Only `Some` fields are applied. For nullable fields the inner `None`
/// clears the value. `new_activity` is appended to the activity log and is
/// never stored as a field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<IssueStatus>,
    pub priority: Option<Priority>,
    pub issue_type: Option<IssueType>,
    pub assignee: Option<Option<String>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub labels: Option<Vec<String>>,
    pub new_activity: Option<NewActivity>,
}

impl IssueUpdate {
    /// An update that only changes the status
    pub fn status(status: IssueStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// An update that only records an activity
    pub fn activity(activity: NewActivity) -> Self {
        Self {
            new_activity: Some(activity),
            ..Self::default()
        }
    }

    pub fn with_activity(mut self, activity: NewActivity) -> Self {
        self.new_activity = Some(activity);
        self
    }
}
