//! # Trackboard Core
//!
//! Issue store, query, sort and status transition engine for the Trackboard
//! issue tracker.
//!
//! Views depend on the [`IssueRepository`] trait and the pure query and sort
//! functions, never on a concrete store, so the in-memory store can be
//! swapped for a real backend without touching them.

pub mod config;
pub mod domain;
pub mod error;
pub mod notice;
pub mod service;
pub mod storage;
pub mod view;

// Re-export commonly used types
pub use config::{IssueDefaults, LatencyConfig, StoreConfig};
pub use domain::{
    board::{Board, BoardConfig, Column},
    issue::{Activity, DisplayId, Issue, IssueStatus, IssueType, IssueUpdate, NewActivity, NewIssue, Priority},
    query::{FilterCategory, FilterSet},
    sorting::{SortDirection, SortField, SortState},
};
pub use error::{Result, TrackError};
pub use notice::{Notice, NoticeLevel, Operation};
pub use service::{IssueService, Transition};
pub use storage::{InMemoryStore, IssueRepository};
pub use view::{EmptyState, ViewState};
