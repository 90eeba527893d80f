//! Version resolution
//!
//! [VersionResolver] decides, module by module, the version of one phase:
//! explicit overrides and run-wide defaults first, then the policy
//! suggestion, confirmed by the operator in interactive mode. [ReleaseRun]
//! executes a sequence of phases into one [VersionRegistry].

pub mod registry;

pub use registry::VersionRegistry;

use crate::config::ReleaseConfig;
use crate::domain::{is_snapshot, Module, Phase};
use crate::error::{ReleaseError, Result};
use crate::git::ChangeLogProvider;
use crate::policy::{PolicyRegistry, PolicyRequest};
use crate::report::{Reporter, TracingReporter};
use crate::ui::{Prompter, TerminalPrompter};
use std::path::Path;
use std::sync::Arc;

/// Base version used in interactive mode when the current one cannot be parsed
pub const FALLBACK_VERSION: &str = "1.0";

/// Resolves the versions of a reactor for one phase at a time
pub struct VersionResolver {
    config: ReleaseConfig,
    policies: PolicyRegistry,
    prompter: Arc<dyn Prompter>,
    provider: Option<Arc<dyn ChangeLogProvider>>,
    reporter: Arc<dyn Reporter>,
}

impl VersionResolver {
    /// Resolver with the built-in policies, prompting on the terminal
    pub fn new(config: ReleaseConfig) -> Self {
        VersionResolver {
            config,
            policies: PolicyRegistry::with_defaults(TracingReporter::shared("policy")),
            prompter: Arc::new(TerminalPrompter),
            provider: None,
            reporter: TracingReporter::shared("engine"),
        }
    }

    pub fn with_policies(mut self, policies: PolicyRegistry) -> Self {
        self.policies = policies;
        self
    }

    pub fn with_prompter(mut self, prompter: Arc<dyn Prompter>) -> Self {
        self.prompter = prompter;
        self
    }

    /// Change history source for history-aware policies
    pub fn with_provider(mut self, provider: Arc<dyn ChangeLogProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn config(&self) -> &ReleaseConfig {
        &self.config
    }

    /// Resolve `phase` for every module of `reactor`, in order.
    ///
    /// With submodule auto-versioning the first module is resolved and its
    /// version is recorded for every other module the phase would change;
    /// the others keep their current version. A failing module aborts
    /// the phase before anything is recorded for it.
    pub fn resolve(
        &self,
        phase: Phase,
        reactor: &[Module],
        registry: &mut VersionRegistry,
    ) -> Result<()> {
        let Some((first, rest)) = reactor.split_first() else {
            return Ok(());
        };

        if self.config.auto_version_submodules {
            let version = self.resolve_module(phase, first, true, registry)?;
            self.reporter.info(&format!(
                "Using {} version {} for all {} module(s)",
                phase,
                version,
                reactor.len()
            ));
            registry.record(&first.id, phase, version.clone())?;
            for module in rest {
                // Modules the phase leaves untouched keep their own version
                let propagated = if self.keeps_current(phase, &module.version) {
                    module.version.clone()
                } else {
                    version.clone()
                };
                registry.record(&module.id, phase, propagated)?;
            }
            return Ok(());
        }

        for (index, module) in reactor.iter().enumerate() {
            let version = self.resolve_module(phase, module, index == 0, registry)?;
            registry.record(&module.id, phase, version)?;
        }
        Ok(())
    }

    fn resolve_module(
        &self,
        phase: Phase,
        module: &Module,
        first: bool,
        registry: &VersionRegistry,
    ) -> Result<String> {
        self.next_version(phase, module, first, registry)
            .map_err(|e| e.in_module(module.id.to_string(), phase))
    }

    fn next_version(
        &self,
        phase: Phase,
        module: &Module,
        first: bool,
        registry: &VersionRegistry,
    ) -> Result<String> {
        if self.keeps_current(phase, &module.version) {
            self.reporter.debug(&format!(
                "{} keeps {} version {}",
                module.id, phase, module.version
            ));
            return Ok(module.version.clone());
        }

        let expect_snapshot = phase.expects_snapshot();
        let default = self
            .config
            .explicit_version(phase, &module.id)
            .or_else(|| first.then(|| self.config.default_version(phase)).flatten());

        if let Some(default) = default {
            if is_snapshot(default) != expect_snapshot {
                return Err(ReleaseError::invalid_version(default, expect_snapshot));
            }
            self.reporter
                .debug(&format!("{} {} version set to {}", module.id, phase, default));
            return Ok(default.to_string());
        }

        if !self.config.interactive {
            let suggestion = self.suggest(phase, module, first, registry)?;
            if is_snapshot(&suggestion) != expect_snapshot {
                return Err(ReleaseError::invalid_version(suggestion, expect_snapshot));
            }
            return Ok(suggestion);
        }

        let suggestion = self.suggest(phase, module, first, registry)?;
        let question = phase.prompt(&module.name, &module.id.to_string());
        loop {
            let answer = self
                .prompter
                .prompt(&question, &suggestion)
                .map_err(ReleaseError::Prompt)?;

            if is_snapshot(&answer) == expect_snapshot {
                return Ok(answer);
            }
            if !expect_snapshot {
                return Err(ReleaseError::invalid_version(answer, false));
            }
            self.reporter
                .warn(&format!("{} is not a snapshot version, asking again", answer));
        }
    }

    /// Whether the phase leaves `current` untouched
    fn keeps_current(&self, phase: Phase, current: &str) -> bool {
        let config = &self.config;
        match phase {
            Phase::Release => false,
            Phase::Development => !config.update_working_copy_versions,
            Phase::Branch => {
                !(config.update_branch_versions
                    && (is_snapshot(current) || config.update_versions_to_snapshot))
            }
            Phase::WorkingCopy => !(is_snapshot(current) && config.update_working_copy_versions),
        }
    }

    /// Version the policy suggestion starts from.
    ///
    /// Snapshot phases continue from the module's release version when one is
    /// known.
    fn base_version<'a>(
        &'a self,
        phase: Phase,
        module: &'a Module,
        first: bool,
        registry: &'a VersionRegistry,
    ) -> &'a str {
        if !phase.expects_snapshot() {
            return &module.version;
        }
        self.config
            .explicit_version(Phase::Release, &module.id)
            .or_else(|| registry.release_version(&module.id))
            .or_else(|| {
                first
                    .then(|| self.config.default_version(Phase::Release))
                    .flatten()
            })
            .unwrap_or(&module.version)
    }

    fn suggest(
        &self,
        phase: Phase,
        module: &Module,
        first: bool,
        registry: &VersionRegistry,
    ) -> Result<String> {
        let base = self.base_version(phase, module, first, registry);
        match self.ask_policy(phase, module, base) {
            Err(e) if e.is_version_format() => {
                if self.config.interactive {
                    self.reporter.warn(&format!(
                        "Unable to parse version {} of {}, suggesting from {}",
                        base, module.id, FALLBACK_VERSION
                    ));
                    self.ask_policy(phase, module, FALLBACK_VERSION)
                } else {
                    Err(ReleaseError::Policy {
                        message: format!(
                            "Error parsing version, cannot determine next version: {}",
                            e
                        ),
                        source: Box::new(e),
                    })
                }
            }
            other => other,
        }
    }

    fn ask_policy(&self, phase: Phase, module: &Module, base: &str) -> Result<String> {
        let policy = self.policies.get(&self.config.policy)?;
        let working_dir = module.path.as_deref().unwrap_or(Path::new("."));

        let mut request = PolicyRequest::new(base)
            .with_working_dir(working_dir)
            .with_config(self.config.policy_config.as_ref())
            .with_limits(self.config.mining);
        if let Some(provider) = &self.provider {
            request = request.with_provider(provider.as_ref());
        }

        let suggestion = if phase.expects_snapshot() {
            policy.development_version(&request)?
        } else {
            policy.release_version(&request)?
        };
        self.reporter.debug(&format!(
            "Policy '{}' suggests {} version {} for {}",
            self.config.policy, phase, suggestion, module.id
        ));
        Ok(suggestion)
    }
}

/// A sequence of phases resolved into one registry
pub struct ReleaseRun {
    resolver: VersionResolver,
    registry: VersionRegistry,
    simulate: bool,
}

impl ReleaseRun {
    pub fn new(resolver: VersionResolver) -> Self {
        ReleaseRun {
            resolver,
            registry: VersionRegistry::new(),
            simulate: false,
        }
    }

    /// Mark the run as a dry run; resolution is identical, callers skip persisting
    pub fn simulate(mut self, simulate: bool) -> Self {
        self.simulate = simulate;
        self
    }

    pub fn is_simulation(&self) -> bool {
        self.simulate
    }

    /// Resolve the phases selected by the configuration
    pub fn execute(&mut self, reactor: &[Module]) -> Result<&VersionRegistry> {
        let phases = self.resolver.config().phases();
        self.execute_phases(&phases, reactor)
    }

    /// Resolve `phases` in order; the first failure stops the run
    pub fn execute_phases(
        &mut self,
        phases: &[Phase],
        reactor: &[Module],
    ) -> Result<&VersionRegistry> {
        for phase in phases {
            self.resolver.resolve(*phase, reactor, &mut self.registry)?;
        }
        Ok(&self.registry)
    }

    pub fn registry(&self) -> &VersionRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> VersionRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModuleId;
    use crate::report::NullReporter;
    use crate::ui::ScriptedPrompter;

    fn module(artifact: &str, version: &str) -> Module {
        Module::new(ModuleId::new("groupId", artifact), version)
    }

    fn batch(config: ReleaseConfig) -> VersionResolver {
        VersionResolver::new(ReleaseConfig {
            interactive: false,
            ..config
        })
        .with_reporter(Arc::new(NullReporter))
        .with_prompter(Arc::new(ScriptedPrompter::failing("no prompt expected")))
    }

    #[test]
    fn test_keeps_current() {
        let resolver = batch(ReleaseConfig::default());
        assert!(!resolver.keeps_current(Phase::Release, "1.0-SNAPSHOT"));
        assert!(!resolver.keeps_current(Phase::Development, "1.0-SNAPSHOT"));
        assert!(resolver.keeps_current(Phase::Branch, "1.0-SNAPSHOT"));
        assert!(!resolver.keeps_current(Phase::WorkingCopy, "1.0-SNAPSHOT"));
        assert!(resolver.keeps_current(Phase::WorkingCopy, "1.0"));

        let updating = batch(ReleaseConfig {
            update_branch_versions: true,
            ..ReleaseConfig::default()
        });
        assert!(!updating.keeps_current(Phase::Branch, "1.0-SNAPSHOT"));
        assert!(updating.keeps_current(Phase::Branch, "1.0"));
    }

    #[test]
    fn test_base_version_prefers_release() {
        let resolver = batch(ReleaseConfig::default());
        let core = module("core", "1.2-SNAPSHOT");
        let mut registry = VersionRegistry::new();

        assert_eq!(
            resolver.base_version(Phase::Development, &core, true, &registry),
            "1.2-SNAPSHOT"
        );
        registry.record(&core.id, Phase::Release, "1.4").unwrap();
        assert_eq!(
            resolver.base_version(Phase::Development, &core, true, &registry),
            "1.4"
        );
        assert_eq!(
            resolver.base_version(Phase::Release, &core, true, &registry),
            "1.2-SNAPSHOT"
        );
    }

    #[test]
    fn test_empty_reactor() {
        let mut registry = VersionRegistry::new();
        batch(ReleaseConfig::default())
            .resolve(Phase::Release, &[], &mut registry)
            .unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_run_executes_configured_phases() {
        let mut run = ReleaseRun::new(batch(ReleaseConfig::default())).simulate(true);
        let reactor = vec![module("core", "1.2-SNAPSHOT")];
        run.execute(&reactor).unwrap();

        assert!(run.is_simulation());
        let registry = run.into_registry();
        assert_eq!(registry.release_version(&reactor[0].id), Some("1.2"));
        assert_eq!(
            registry.development_version(&reactor[0].id),
            Some("1.3-SNAPSHOT")
        );
    }
}
