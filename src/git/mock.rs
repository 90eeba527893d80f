use crate::domain::ChangeSet;
use crate::error::{ReleaseError, Result};
use crate::git::ChangeLogProvider;
use std::path::Path;
use std::sync::Mutex;

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    /// Newest first
    history: Vec<ChangeSet>,
    failure: Option<String>,
    requests: Mutex<Vec<usize>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            history: Vec::new(),
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock with a history given newest first
    pub fn with_history(history: Vec<ChangeSet>) -> Self {
        MockRepository {
            history,
            ..Self::new()
        }
    }

    /// Add a commit on top of the history (it becomes HEAD)
    pub fn add_commit(&mut self, change: ChangeSet) {
        self.history.insert(0, change);
    }

    /// Make every change-log request fail with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        MockRepository {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// Page limits requested so far, in order
    pub fn requested_limits(&self) -> Vec<usize> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeLogProvider for MockRepository {
    fn change_log(&self, _working_dir: &Path, limit: usize) -> Result<Vec<ChangeSet>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(limit);
        }
        if let Some(message) = &self.failure {
            return Err(ReleaseError::scm(message.clone()));
        }
        Ok(self.history.iter().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_pages() {
        let history: Vec<ChangeSet> = (0..25)
            .map(|i| ChangeSet::new(format!("commit {}", i)))
            .collect();
        let repo = MockRepository::with_history(history);

        assert_eq!(repo.change_log(Path::new("."), 10).unwrap().len(), 10);
        assert_eq!(repo.change_log(Path::new("."), 30).unwrap().len(), 25);
        assert_eq!(repo.requested_limits(), vec![10, 30]);
    }

    #[test]
    fn test_mock_repository_add_commit_becomes_head() {
        let mut repo = MockRepository::with_history(vec![ChangeSet::new("first")]);
        repo.add_commit(ChangeSet::new("second"));

        let page = repo.change_log(Path::new("."), 1).unwrap();
        assert_eq!(page[0].message, "second");
    }

    #[test]
    fn test_mock_repository_failure() {
        let repo = MockRepository::failing("connection reset");
        let err = repo.change_log(Path::new("."), 10).unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert!(repo.change_log(Path::new("."), 10).unwrap().is_empty());
    }
}
