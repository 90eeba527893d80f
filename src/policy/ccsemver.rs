use crate::analyzer::{CommitHistory, RulesConfig, VersionRules};
use crate::domain::{BumpLevel, Version, SNAPSHOT_MARKER};
use crate::error::{ReleaseError, Result};
use crate::policy::{PolicyRequest, VersionPolicy};
use crate::report::Reporter;
use std::sync::Arc;

/// Semantic versioning driven by Conventional Commits messages.
///
/// The release version is anchored on the latest release tag when history
/// has one and bumped by the highest level found in the commits made since.
pub struct CcSemverPolicy {
    reporter: Arc<dyn Reporter>,
}

impl CcSemverPolicy {
    pub const ID: &'static str = "ccsemver";
    pub const ALIAS: &'static str = "CCSemVerVersionPolicy";

    pub fn new(reporter: Arc<dyn Reporter>) -> Self {
        CcSemverPolicy { reporter }
    }

    /// Next release version for `current` given the mined `history`
    pub fn suggest_release(
        &self,
        current: &str,
        history: &CommitHistory,
        rules: &VersionRules,
    ) -> Result<String> {
        let level = history.bump_level(rules);
        let anchor = history.tag.as_deref().unwrap_or(current);

        self.reporter.debug(&format!("Version rules:\n{}", rules));
        self.reporter.debug(&format!("Pom version      : {}", current));
        self.reporter.debug(&format!(
            "Version from tags: {}",
            history.tag.as_deref().unwrap_or("NOT FOUND")
        ));
        self.reporter.debug(&format!(
            "Step from commits: {}",
            if level == BumpLevel::None {
                "none".to_string()
            } else {
                level.to_string()
            }
        ));

        let release = to_semver(&Version::parse(anchor)?.bump(level)).to_string();

        match (&history.tag, level) {
            (Some(tag), _) => self.reporter.info(&format!(
                "From SCM tag with version {} doing a {} version increase to version {}",
                tag, level, release
            )),
            (None, BumpLevel::None) => self.reporter.info(&format!(
                "From project version {} (no valid SCM tags, no minor/major commit messages) going to version {}",
                current, release
            )),
            (None, _) => self.reporter.info(&format!(
                "From project version {} (no valid SCM tags) doing a {} version increase to version {}",
                current, level, release
            )),
        }

        Ok(release)
    }

    /// Next development version: the minor number bumped, with the marker
    pub fn suggest_development(&self, current: &str) -> Result<String> {
        let next = to_semver(&Version::parse(current)?.bump(BumpLevel::Minor));
        let development = format!("{}-{}", next, SNAPSHOT_MARKER);
        self.reporter
            .info(&format!("Next development version after {} is {}", current, development));
        Ok(development)
    }

    fn history(&self, request: &PolicyRequest<'_>, rules: &VersionRules) -> Result<CommitHistory> {
        let Some(provider) = request.provider else {
            self.reporter
                .debug("No change-log provider available, assuming an empty history");
            return Ok(CommitHistory::default());
        };

        CommitHistory::mine(
            provider,
            &request.working_dir,
            rules,
            &request.limits,
            self.reporter.as_ref(),
        )
        .map_err(|e| ReleaseError::Policy {
            message: "Unable to obtain the information from the SCM history".to_string(),
            source: Box::new(e),
        })
    }
}

/// Strict `major.minor.patch` rendering
fn to_semver(version: &Version) -> semver::Version {
    semver::Version::new(version.major(), version.minor(), version.patch())
}

impl VersionPolicy for CcSemverPolicy {
    fn release_version(&self, request: &PolicyRequest<'_>) -> Result<String> {
        let rules = VersionRules::new(&RulesConfig::from_table(request.config)?)?;
        let history = self.history(request, &rules)?;
        self.suggest_release(&request.version, &history, &rules)
    }

    fn development_version(&self, request: &PolicyRequest<'_>) -> Result<String> {
        self.suggest_development(&request.version)
    }
}
