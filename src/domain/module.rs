use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Versionless module coordinate, rendered as `group:artifact`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleId {
    pub group: String,
    pub artifact: String,
}

impl ModuleId {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        ModuleId {
            group: group.into(),
            artifact: artifact.into(),
        }
    }

    /// Parse a `group:artifact` key
    pub fn parse(key: &str) -> Option<Self> {
        let (group, artifact) = key.split_once(':')?;
        if group.is_empty() || artifact.is_empty() || artifact.contains(':') {
            return None;
        }
        Some(ModuleId::new(group, artifact))
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

impl TryFrom<String> for ModuleId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ModuleId::parse(&value).ok_or_else(|| format!("expected 'group:artifact', got '{}'", value))
    }
}

impl From<ModuleId> for String {
    fn from(id: ModuleId) -> Self {
        id.to_string()
    }
}

/// A module taking part in a release, with the version found in its descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub id: ModuleId,
    pub name: String,
    pub version: String,
    /// Working directory handed to the change-log provider
    pub path: Option<PathBuf>,
}

impl Module {
    /// Create a module; the display name defaults to the artifact id
    pub fn new(id: ModuleId, version: impl Into<String>) -> Self {
        Module {
            name: id.artifact.clone(),
            id,
            version: version.into(),
            path: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}
