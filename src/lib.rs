pub mod analyzer;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod git;
pub mod policy;
pub mod report;
pub mod ui;

pub use config::{load_config, ReleaseConfig};
pub use domain::{Module, ModuleId, Phase};
pub use engine::{ReleaseRun, VersionRegistry, VersionResolver};
pub use error::{ReleaseError, Result};
