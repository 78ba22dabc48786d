//! User-facing outcome messages.
//!
//! The core never displays anything; it hands a [`Notice`] to whatever
//! surface shows toasts.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Mutating operations that report an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
    Duplicate,
    StatusChange,
}

impl Operation {
    fn success_message(&self) -> &'static str {
        match self {
            Operation::Create => "Issue created successfully",
            Operation::Update => "Issue updated successfully",
            Operation::Delete => "Issue deleted successfully",
            Operation::Duplicate => "Issue duplicated successfully",
            Operation::StatusChange => "Issue status updated",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            Operation::Create => "Failed to save issue",
            Operation::Update => "Failed to update issue",
            Operation::Delete => "Failed to delete issue",
            Operation::Duplicate => "Failed to duplicate issue",
            Operation::StatusChange => "Failed to update issue status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Standard message for the outcome of `operation`
    pub fn for_result<T, E>(operation: Operation, result: &Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::success(operation.success_message()),
            Err(_) => Self::error(operation.failure_message()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == NoticeLevel::Success
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
