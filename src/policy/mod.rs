//! Version suggestion policies
//!
//! A policy proposes the next release version and the next development
//! version for a module. Policies are looked up by identifier in a
//! [PolicyRegistry]:
//!
//! - [default::DefaultPolicy]: strips the snapshot marker, bumps the minor number
//! - [ccsemver::CcSemverPolicy]: Conventional Commits driven, anchored on the
//!   latest release tag

pub mod ccsemver;
pub mod default;

pub use ccsemver::CcSemverPolicy;
pub use default::DefaultPolicy;

use crate::analyzer::MiningLimits;
use crate::error::{ReleaseError, Result};
use crate::git::ChangeLogProvider;
use crate::report::Reporter;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything a policy may look at when suggesting a version
#[derive(Clone)]
pub struct PolicyRequest<'a> {
    /// Version the suggestion starts from
    pub version: String,
    pub working_dir: PathBuf,
    pub provider: Option<&'a dyn ChangeLogProvider>,
    /// Free-form configuration, only interpreted by the policy itself
    pub config: Option<&'a toml::Table>,
    pub limits: MiningLimits,
}

impl<'a> PolicyRequest<'a> {
    pub fn new(version: impl Into<String>) -> Self {
        PolicyRequest {
            version: version.into(),
            working_dir: PathBuf::from("."),
            provider: None,
            config: None,
            limits: MiningLimits::default(),
        }
    }

    pub fn with_working_dir(mut self, working_dir: impl AsRef<Path>) -> Self {
        self.working_dir = working_dir.as_ref().to_path_buf();
        self
    }

    pub fn with_provider(mut self, provider: &'a dyn ChangeLogProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_config(mut self, config: Option<&'a toml::Table>) -> Self {
        self.config = config;
        self
    }

    pub fn with_limits(mut self, limits: MiningLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Strategy proposing versions for a module
pub trait VersionPolicy: Send + Sync {
    /// Suggested version to release `request.version` as
    fn release_version(&self, request: &PolicyRequest<'_>) -> Result<String>;

    /// Suggested version to continue development under after a release of
    /// `request.version`
    fn development_version(&self, request: &PolicyRequest<'_>) -> Result<String>;
}

/// Policies by identifier
#[derive(Clone, Default)]
pub struct PolicyRegistry {
    policies: BTreeMap<String, Arc<dyn VersionPolicy>>,
}

impl PolicyRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in policies
    pub fn with_defaults(reporter: Arc<dyn Reporter>) -> Self {
        let mut registry = Self::new();
        registry.register(DefaultPolicy::ID, Arc::new(DefaultPolicy::new(reporter.clone())));

        let ccsemver: Arc<dyn VersionPolicy> = Arc::new(CcSemverPolicy::new(reporter));
        registry.register(CcSemverPolicy::ID, ccsemver.clone());
        registry.register(CcSemverPolicy::ALIAS, ccsemver);
        registry
    }

    /// Add or replace the policy known as `id`
    pub fn register(&mut self, id: impl Into<String>, policy: Arc<dyn VersionPolicy>) {
        self.policies.insert(id.into(), policy);
    }

    pub fn get(&self, id: &str) -> Result<Arc<dyn VersionPolicy>> {
        self.policies
            .get(id)
            .cloned()
            .ok_or_else(|| ReleaseError::PolicyNotFound {
                id: id.to_string(),
                available: self.ids(),
            })
    }

    /// Registered identifiers, sorted
    pub fn ids(&self) -> Vec<String> {
        self.policies.keys().cloned().collect()
    }
}
