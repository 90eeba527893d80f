use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of the release workflow a version is resolved for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Version to tag as the release
    Release,
    /// Version to continue development under
    Development,
    /// Version left on a created branch
    Branch,
    /// Version of the working copy after the branch was created
    WorkingCopy,
}

impl Phase {
    /// Whether the resolved version must carry the snapshot marker
    pub fn expects_snapshot(&self) -> bool {
        !matches!(self, Phase::Release)
    }

    /// Question shown to the operator in interactive mode
    pub fn prompt(&self, name: &str, id: &str) -> String {
        let subject = match self {
            Phase::Release => "release version",
            Phase::Development => "new development version",
            Phase::Branch => "branch version",
            Phase::WorkingCopy => "new working copy version",
        };
        format!("What is the {} for \"{}\"? ({})", subject, name, id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Release => "release",
            Phase::Development => "development",
            Phase::Branch => "branch",
            Phase::WorkingCopy => "working-copy",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
