//! Initial issue snapshot, read once at start-up.

use crate::{
    domain::Issue,
    error::{Result, TrackError},
};
use std::{collections::HashSet, path::Path};
use tokio::fs;
use tracing::info;

/// Parses a JSON array of issues
pub fn parse_seed(contents: &str) -> Result<Vec<Issue>> {
    let issues: Vec<Issue> = serde_json::from_str(contents)?;
    check_unique_ids(&issues)?;
    Ok(issues)
}

/// Reads a JSON seed file
pub async fn load_seed(path: impl AsRef<Path>) -> Result<Vec<Issue>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).await?;
    let issues = parse_seed(&contents)?;

    info!(path = %path.display(), count = issues.len(), "loaded issue seed");
    Ok(issues)
}

pub(crate) fn check_unique_ids(issues: &[Issue]) -> Result<()> {
    let mut seen = HashSet::new();
    for issue in issues {
        if !seen.insert(issue.internal_id) {
            return Err(TrackError::Validation(format!(
                "duplicate issue ID {} in seed",
                issue.internal_id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IssueStatus;
    use tempfile::TempDir;

    const SEED: &str = r#"[
        {
            "Id": 1,
            "id": "TRACK-001",
            "title": "Login fails",
            "description": "500 on submit",
            "status": "open",
            "priority": "high",
            "type": "bug",
            "assignee": "Sarah Chen",
            "dueDate": null,
            "labels": ["auth"],
            "activities": [],
            "createdAt": "2024-01-10T09:00:00Z",
            "updatedAt": "2024-01-10T09:00:00Z"
        },
        {
            "Id": 4,
            "id": "TRACK-002",
            "title": "Dark mode",
            "description": "Add a dark theme",
            "status": "review",
            "priority": "low",
            "type": "feature",
            "createdAt": "2024-01-11T09:00:00Z",
            "updatedAt": "2024-01-12T09:00:00Z"
        }
    ]"#;

    #[test]
    fn test_parse_seed() {
        let issues = parse_seed(SEED).unwrap();

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].labels, vec!["auth"]);
        assert_eq!(issues[1].internal_id, 4);
        assert_eq!(issues[1].status, IssueStatus::Review);
        assert!(issues[1].labels.is_empty());
        assert!(issues[1].activities.is_empty());
    }

    #[test]
    fn test_null_collections_read_as_empty() {
        let seed = r#"[{
            "Id": 3,
            "id": "TRACK-003",
            "title": "Null lists",
            "description": "Imported from an older export",
            "labels": null,
            "activities": null,
            "createdAt": "2024-01-10T09:00:00Z",
            "updatedAt": "2024-01-10T09:00:00Z"
        }]"#;

        let issues = parse_seed(seed).unwrap();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].labels.is_empty());
        assert!(issues[0].activities.is_empty());
        assert_eq!(issues[0].next_activity_id(), 1);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let seed = SEED.replace("\"Id\": 4", "\"Id\": 1");
        assert!(matches!(parse_seed(&seed), Err(TrackError::Validation(_))));
    }

    #[test]
    fn test_malformed_seed() {
        assert!(matches!(
            parse_seed("{\"not\": \"a list\"}"),
            Err(TrackError::SerializationError(_))
        ));
    }

    #[tokio::test]
    async fn test_load_seed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("issues.json");
        fs::write(&path, SEED).await.unwrap();

        let issues = load_seed(&path).await.unwrap();
        assert_eq!(issues.len(), 2);
    }

    #[tokio::test]
    async fn test_load_missing_seed_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_seed(temp_dir.path().join("missing.json")).await;
        assert!(matches!(result, Err(TrackError::IoError(_))));
    }
}
