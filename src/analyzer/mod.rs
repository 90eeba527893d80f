//! Commit history analysis: bump rules and release tag mining

pub mod history;
pub mod rules;

pub use history::{CommitHistory, MiningLimits};
pub use rules::{RulesConfig, VersionRules};
