use crate::analyzer::MiningLimits;
use crate::domain::{Module, ModuleId, Phase};
use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "release-versions.toml";

/// Represents the complete configuration of a release run.
///
/// Holds the mode switches, per-module version overrides, run-wide defaults,
/// the policy selection and the reactor.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_true")]
    pub interactive: bool,

    #[serde(default)]
    pub auto_version_submodules: bool,

    #[serde(default)]
    pub branch_creation: bool,

    #[serde(default)]
    pub update_branch_versions: bool,

    #[serde(default = "default_true")]
    pub update_working_copy_versions: bool,

    #[serde(default)]
    pub update_versions_to_snapshot: bool,

    #[serde(default = "default_policy")]
    pub policy: String,

    #[serde(default)]
    pub default_release_version: Option<String>,

    #[serde(default)]
    pub default_development_version: Option<String>,

    #[serde(default)]
    pub default_branch_version: Option<String>,

    /// Explicit versions keyed by `group:artifact`
    #[serde(default)]
    pub release_versions: BTreeMap<String, String>,

    #[serde(default)]
    pub development_versions: BTreeMap<String, String>,

    #[serde(default)]
    pub branch_versions: BTreeMap<String, String>,

    #[serde(default)]
    pub working_copy_versions: BTreeMap<String, String>,

    /// Free-form settings handed to the selected policy
    #[serde(default)]
    pub policy_config: Option<toml::Table>,

    #[serde(default)]
    pub mining: MiningLimits,

    #[serde(default)]
    pub modules: Vec<ModuleConfig>,
}

/// Returns true; used for switches that are on unless disabled.
fn default_true() -> bool {
    true
}

/// Returns the identifier of the policy used when none is configured.
fn default_policy() -> String {
    "default".to_string()
}

/// One `[[modules]]` entry of the reactor
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ModuleConfig {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    pub version: String,

    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl ModuleConfig {
    /// Build the module, rejecting ids that are not `group:artifact`
    pub fn to_module(&self) -> Result<Module> {
        let id = ModuleId::parse(&self.id).ok_or_else(|| {
            ReleaseError::config(format!(
                "Module id '{}' is not of the form group:artifact",
                self.id
            ))
        })?;

        let mut module = Module::new(id, self.version.clone());
        if let Some(name) = &self.name {
            module = module.with_name(name.clone());
        }
        if let Some(path) = &self.path {
            module = module.with_path(path.clone());
        }
        Ok(module)
    }
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            interactive: true,
            auto_version_submodules: false,
            branch_creation: false,
            update_branch_versions: false,
            update_working_copy_versions: true,
            update_versions_to_snapshot: false,
            policy: default_policy(),
            default_release_version: None,
            default_development_version: None,
            default_branch_version: None,
            release_versions: BTreeMap::new(),
            development_versions: BTreeMap::new(),
            branch_versions: BTreeMap::new(),
            working_copy_versions: BTreeMap::new(),
            policy_config: None,
            mining: MiningLimits::default(),
            modules: Vec::new(),
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

impl ReleaseConfig {
    /// Version explicitly configured for `id` in `phase`.
    ///
    /// The working copy falls back to the development map. Blank entries are
    /// treated as absent.
    pub fn explicit_version(&self, phase: Phase, id: &ModuleId) -> Option<&str> {
        let key = id.to_string();
        match phase {
            Phase::Release => non_empty(self.release_versions.get(&key)),
            Phase::Development => non_empty(self.development_versions.get(&key)),
            Phase::Branch => non_empty(self.branch_versions.get(&key)),
            Phase::WorkingCopy => non_empty(self.working_copy_versions.get(&key))
                .or_else(|| non_empty(self.development_versions.get(&key))),
        }
    }

    /// Run-wide default version for `phase`.
    ///
    /// The branch falls back to the default release version.
    pub fn default_version(&self, phase: Phase) -> Option<&str> {
        match phase {
            Phase::Release => non_empty(self.default_release_version.as_ref()),
            Phase::Development | Phase::WorkingCopy => {
                non_empty(self.default_development_version.as_ref())
            }
            Phase::Branch => non_empty(self.default_branch_version.as_ref())
                .or_else(|| non_empty(self.default_release_version.as_ref())),
        }
    }

    /// Phases a run executes, in order
    pub fn phases(&self) -> [Phase; 2] {
        if self.branch_creation {
            [Phase::Branch, Phase::WorkingCopy]
        } else {
            [Phase::Release, Phase::Development]
        }
    }

    /// The configured modules in declaration order
    pub fn reactor(&self) -> Result<Vec<Module>> {
        self.modules.iter().map(ModuleConfig::to_module).collect()
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release-versions.toml` in current directory
/// 3. `release-versions.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(ReleaseConfig)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<ReleaseConfig> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let path = if let Some(path) = config_path {
        PathBuf::from(path)
    } else if local.exists() {
        local
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            config_path
        } else {
            return Ok(ReleaseConfig::default());
        }
    } else {
        return Ok(ReleaseConfig::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        ReleaseError::config(format!("Unable to read {}: {}", path.display(), e))
    })?;
    parse_config(&config_str)
}

/// Parse a configuration document
pub fn parse_config(content: &str) -> Result<ReleaseConfig> {
    toml::from_str(content).map_err(|e| ReleaseError::config(e.to_string()))
}
