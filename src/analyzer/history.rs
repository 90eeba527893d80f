use crate::analyzer::rules::VersionRules;
use crate::domain::BumpLevel;
use crate::error::{ReleaseError, Result};
use crate::git::ChangeLogProvider;
use crate::report::Reporter;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Paging of the change-log walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct MiningLimits {
    #[serde(default = "default_initial_page")]
    pub initial_page: usize,

    #[serde(default = "default_page_step")]
    pub page_step: usize,

    /// Stop after this many commits even when no tag was found
    #[serde(default)]
    pub max_commits: Option<usize>,
}

fn default_initial_page() -> usize {
    10
}

fn default_page_step() -> usize {
    10
}

impl Default for MiningLimits {
    fn default() -> Self {
        MiningLimits {
            initial_page: default_initial_page(),
            page_step: default_page_step(),
            max_commits: None,
        }
    }
}

/// Commits made since the latest release tag, and that tag's version
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitHistory {
    /// Messages newer than the tagged commit, newest first
    pub changes: Vec<String>,
    /// Version extracted from the most recent matching tag
    pub tag: Option<String>,
}

impl CommitHistory {
    pub fn new(changes: Vec<String>, tag: Option<String>) -> Self {
        CommitHistory { changes, tag }
    }

    /// Walk back from HEAD until the latest matching tag is found.
    ///
    /// Every round re-reads a larger page and replaces the collected messages.
    pub fn mine(
        provider: &dyn ChangeLogProvider,
        working_dir: &Path,
        rules: &VersionRules,
        limits: &MiningLimits,
        reporter: &dyn Reporter,
    ) -> Result<CommitHistory> {
        let step = limits.page_step.max(1);
        let mut limit = limits.initial_page.max(1);
        if let Some(cap) = limits.max_commits {
            limit = limit.min(cap.max(1));
        }
        let mut previous_len = None;

        loop {
            let page = provider.change_log(working_dir, limit).map_err(|e| {
                ReleaseError::scm_caused_by(
                    format!("Unable to read the change log of {}", working_dir.display()),
                    e,
                )
            })?;

            let mut history = CommitHistory::default();
            for change in &page {
                let versions: Vec<String> = change
                    .tags
                    .iter()
                    .filter_map(|label| rules.extract_tag(label))
                    .collect();

                match versions.len() {
                    0 => history.changes.push(change.message.clone()),
                    1 => {
                        history.tag = versions.into_iter().next();
                        break;
                    }
                    _ => return Err(ReleaseError::AmbiguousTag(versions)),
                }
            }

            let exhausted = page.len() < limit;
            let stalled = previous_len == Some(page.len());
            let capped = limits.max_commits.is_some_and(|cap| limit >= cap);

            if history.tag.is_some() || exhausted || stalled || capped {
                reporter.debug(&format!(
                    "Mined {} change(s) in a page of {}, tag: {}",
                    history.changes.len(),
                    limit,
                    history.tag.as_deref().unwrap_or("none")
                ));
                return Ok(history);
            }

            previous_len = Some(page.len());
            limit += step;
            if let Some(cap) = limits.max_commits {
                limit = limit.min(cap);
            }
        }
    }

    /// Bump level implied by the collected messages
    pub fn bump_level(&self, rules: &VersionRules) -> BumpLevel {
        rules.max_bump(&self.changes, self.tag.is_some())
    }
}
