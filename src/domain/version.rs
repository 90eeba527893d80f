use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Suffix marking a development (unreleased) version
pub const SNAPSHOT_MARKER: &str = "SNAPSHOT";

/// Check whether a version string carries the development marker.
///
/// Matches both the plain `-SNAPSHOT` suffix (and a bare `SNAPSHOT`) and the
/// timestamped form deployed snapshots carry (`1.0-20240101.120000-3`).
pub fn is_snapshot(version: &str) -> bool {
    if version.ends_with(SNAPSHOT_MARKER) {
        return true;
    }
    static TIMESTAMPED: OnceLock<Option<Regex>> = OnceLock::new();
    TIMESTAMPED
        .get_or_init(|| Regex::new(r"^(.*)-(\d{8}\.\d{6})-(\d+)$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(version))
}

/// Numeric view of a version string: 1 to 3 components, an optional
/// qualifier and the snapshot marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    components: Vec<u64>,
    pub qualifier: Option<String>,
    pub snapshot: bool,
}

impl Version {
    /// Create a new release version with three components
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            components: vec![major, minor, patch],
            qualifier: None,
            snapshot: false,
        }
    }

    /// Parse a version string like `1.2`, `1.2.3-SNAPSHOT` or `1.0-beta-1`
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let (body, snapshot) = match trimmed.strip_suffix(SNAPSHOT_MARKER) {
            Some(rest) => (rest.strip_suffix('-').unwrap_or(rest), true),
            None => (trimmed, false),
        };

        let (numbers, qualifier) = match body.split_once('-') {
            Some((numbers, qualifier)) if !qualifier.is_empty() => {
                (numbers, Some(qualifier.to_string()))
            }
            Some((numbers, _)) => (numbers, None),
            None => (body, None),
        };

        let parts: Vec<&str> = numbers.split('.').collect();
        if numbers.is_empty() || parts.len() > 3 {
            return Err(ReleaseError::version(format!(
                "Invalid version format: '{}'",
                text
            )));
        }

        let components = parts
            .iter()
            .map(|part| {
                part.parse::<u64>().map_err(|_| {
                    ReleaseError::version(format!("Invalid version format: '{}'", text))
                })
            })
            .collect::<Result<Vec<u64>>>()?;

        Ok(Version {
            components,
            qualifier,
            snapshot,
        })
    }

    pub fn major(&self) -> u64 {
        self.component(0)
    }

    pub fn minor(&self) -> u64 {
        self.component(1)
    }

    pub fn patch(&self) -> u64 {
        self.component(2)
    }

    fn component(&self, index: usize) -> u64 {
        self.components.get(index).copied().unwrap_or(0)
    }

    /// Bump according to `level`, keeping the component count where possible.
    ///
    /// Lower components reset to zero and the qualifier is dropped; the
    /// snapshot flag is left untouched.
    pub fn bump(&self, level: BumpLevel) -> Self {
        let index = match level {
            BumpLevel::None => return self.clone(),
            BumpLevel::Major => 0,
            BumpLevel::Minor => 1,
            BumpLevel::Patch => 2,
        };

        let mut components = self.components.clone();
        while components.len() <= index {
            components.push(0);
        }
        components[index] += 1;
        for lower in components.iter_mut().skip(index + 1) {
            *lower = 0;
        }

        Version {
            components,
            qualifier: None,
            snapshot: self.snapshot,
        }
    }

    /// Same version without the development marker
    pub fn to_release(&self) -> Self {
        Version {
            snapshot: false,
            ..self.clone()
        }
    }

    /// Same version with the development marker
    pub fn to_snapshot(&self) -> Self {
        Version {
            snapshot: true,
            ..self.clone()
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numbers: Vec<String> = self.components.iter().map(u64::to_string).collect();
        write!(f, "{}", numbers.join("."))?;
        if let Some(qualifier) = &self.qualifier {
            write!(f, "-{}", qualifier)?;
        }
        if self.snapshot {
            write!(f, "-{}", SNAPSHOT_MARKER)?;
        }
        Ok(())
    }
}

/// Magnitude of a version increment, ordered `None < Patch < Minor < Major`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BumpLevel {
    None,
    Patch,
    Minor,
    Major,
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpLevel::None => "NONE",
            BumpLevel::Patch => "PATCH",
            BumpLevel::Minor => "MINOR",
            BumpLevel::Major => "MAJOR",
        };
        f.write_str(name)
    }
}
