use crate::domain::Phase;
use thiserror::Error;

/// Unified error type for version resolution
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Policy '{id}' is unknown, available: {}", available.join(", "))]
    PolicyNotFound { id: String, available: Vec<String> },

    #[error("Version parsing error: {0}")]
    VersionFormat(String),

    /// A resolved version carries (or lacks) the snapshot marker for its phase.
    #[error("{version} is invalid, expected a {expected}")]
    InvalidVersion {
        version: String,
        expected: &'static str,
    },

    #[error("{message}")]
    Policy {
        message: String,
        #[source]
        source: Box<ReleaseError>,
    },

    #[error("SCM operation failed: {message}")]
    Scm {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Most recent commit with tags has multiple version tags: {0:?}")]
    AmbiguousTag(Vec<String>),

    #[error("Error reading version from input handler: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("Cannot resolve {phase} version for '{module}': {source}")]
    Module {
        module: String,
        phase: Phase,
        #[source]
        source: Box<ReleaseError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-versions
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version format error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::VersionFormat(msg.into())
    }

    /// Create a registry error with context
    pub fn registry(msg: impl Into<String>) -> Self {
        ReleaseError::Registry(msg.into())
    }

    /// Create an SCM error without an underlying cause
    pub fn scm(msg: impl Into<String>) -> Self {
        ReleaseError::Scm {
            message: msg.into(),
            source: None,
        }
    }

    /// Wrap a provider failure as an SCM error, keeping the cause
    pub fn scm_caused_by(
        msg: impl Into<String>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ReleaseError::Scm {
            message: msg.into(),
            source: Some(Box::new(cause)),
        }
    }

    /// Marker violation: `expected_snapshot` tells which form the phase needed
    pub fn invalid_version(version: impl Into<String>, expected_snapshot: bool) -> Self {
        ReleaseError::InvalidVersion {
            version: version.into(),
            expected: if expected_snapshot {
                "snapshot"
            } else {
                "non-snapshot"
            },
        }
    }

    /// Attach module and phase context
    pub fn in_module(self, module: impl Into<String>, phase: Phase) -> Self {
        ReleaseError::Module {
            module: module.into(),
            phase,
            source: Box::new(self),
        }
    }

    /// Walk through context wrappers to the error that caused the failure
    pub fn root_cause(&self) -> &ReleaseError {
        match self {
            ReleaseError::Module { source, .. } | ReleaseError::Policy { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }

    pub fn is_policy_not_found(&self) -> bool {
        matches!(self.root_cause(), ReleaseError::PolicyNotFound { .. })
    }

    pub fn is_version_format(&self) -> bool {
        matches!(
            self.root_cause(),
            ReleaseError::VersionFormat(_) | ReleaseError::InvalidVersion { .. }
        )
    }
}
