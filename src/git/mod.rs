//! Source-control access layer
//!
//! Version policies only need one thing from the SCM: the recent change
//! history of a working directory, newest first, with the tags attached to
//! each commit. [ChangeLogProvider] captures that contract.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A scripted implementation for testing
//!
//! ```rust
//! # use release_versions::git::{ChangeLogProvider, MockRepository};
//! # use release_versions::domain::ChangeSet;
//! # use std::path::Path;
//! let repo = MockRepository::with_history(vec![
//!     ChangeSet::new("feat: add search"),
//!     ChangeSet::tagged("fix: typo", &["1.0.0"]),
//! ]);
//! let page = repo.change_log(Path::new("."), 10).unwrap();
//! assert_eq!(page.len(), 2);
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::ChangeSet;
use crate::error::Result;
use std::path::Path;

/// Read-only change history access
///
/// ## Error Handling
///
/// Implementations map their transport errors to
/// [crate::error::ReleaseError::Scm] or [crate::error::ReleaseError::Git].
pub trait ChangeLogProvider: Send + Sync {
    /// Get at most `limit` change sets affecting `working_dir`
    ///
    /// Entries are ordered newest first, starting at HEAD.
    ///
    /// # Arguments
    /// * `working_dir` - Directory whose history is requested
    /// * `limit` - Maximum number of entries to return
    ///
    /// # Returns
    /// * `Ok(Vec<ChangeSet>)` - Fewer than `limit` entries means history is exhausted
    /// * `Err` - If the history cannot be read
    fn change_log(&self, working_dir: &Path, limit: usize) -> Result<Vec<ChangeSet>>;
}
