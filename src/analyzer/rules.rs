use crate::domain::BumpLevel;
use crate::error::{ReleaseError, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default tag pattern: the whole label is a 1-3 component dotted number
pub const DEFAULT_TAG_PATTERN: &str = r"^([0-9]+(?:\.[0-9]+(?:\.[0-9]+)?)?)$";

/// Returns the built-in Conventional Commits rules that trigger major bumps.
fn default_major_rules() -> Vec<&'static str> {
    vec![
        r"^[a-zA-Z]+!(?:\([a-zA-Z0-9_-]+\))?: .*$",
        r"^BREAKING CHANGE:.*$",
    ]
}

/// Returns the built-in Conventional Commits rules that trigger minor bumps.
fn default_minor_rules() -> Vec<&'static str> {
    vec![r"^feat(?:\([a-zA-Z0-9_-]+\))?: .*$"]
}

/// User supplied rule overrides, read from the policy configuration table.
///
/// Major and minor rules are added to the built-ins; a non-blank
/// `version_tag` replaces the default tag pattern.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct RulesConfig {
    #[serde(default)]
    pub version_tag: Option<String>,

    #[serde(default)]
    pub major_rules: Vec<String>,

    #[serde(default)]
    pub minor_rules: Vec<String>,
}

impl RulesConfig {
    /// Read the overrides from a free-form policy configuration table
    pub fn from_table(table: Option<&toml::Table>) -> Result<Self> {
        match table {
            None => Ok(RulesConfig::default()),
            Some(table) => toml::Value::Table(table.clone())
                .try_into()
                .map_err(|e| ReleaseError::config(format!("Unable to load the rules config: {}", e))),
        }
    }
}

/// Classifies commit messages and extracts release versions from tags
#[derive(Debug, Clone)]
pub struct VersionRules {
    tag_pattern: Regex,
    major_rules: Vec<Regex>,
    minor_rules: Vec<Regex>,
}

impl VersionRules {
    /// Build the rule set from the built-ins plus `config`
    pub fn new(config: &RulesConfig) -> Result<Self> {
        let tag_source = config
            .version_tag
            .as_deref()
            .filter(|tag| !tag.trim().is_empty())
            .unwrap_or(DEFAULT_TAG_PATTERN);
        let tag_pattern = compile(tag_source, false)?;

        let major_rules = default_major_rules()
            .into_iter()
            .chain(config.major_rules.iter().map(String::as_str))
            .map(|rule| compile(rule, true))
            .collect::<Result<Vec<_>>>()?;

        let minor_rules = default_minor_rules()
            .into_iter()
            .chain(config.minor_rules.iter().map(String::as_str))
            .map(|rule| compile(rule, true))
            .collect::<Result<Vec<_>>>()?;

        Ok(VersionRules {
            tag_pattern,
            major_rules,
            minor_rules,
        })
    }

    pub fn is_major_update(&self, message: &str) -> bool {
        self.major_rules.iter().any(|re| re.is_match(message))
    }

    pub fn is_minor_update(&self, message: &str) -> bool {
        self.minor_rules.iter().any(|re| re.is_match(message))
    }

    /// Classify a single commit message
    pub fn classify(&self, message: &str) -> BumpLevel {
        if self.is_major_update(message) {
            BumpLevel::Major
        } else if self.is_minor_update(message) {
            BumpLevel::Minor
        } else {
            BumpLevel::None
        }
    }

    /// Extract the release version from a tag label.
    ///
    /// Returns capture group 1 when the pattern has one, else the whole match.
    pub fn extract_tag(&self, label: &str) -> Option<String> {
        let captures = self.tag_pattern.captures(label)?;
        captures
            .get(1)
            .or_else(|| captures.get(0))
            .map(|m| m.as_str().to_string())
    }

    /// Highest bump level across `messages`.
    ///
    /// A major commit wins outright. When nothing is classified the result is
    /// `Patch` if a previous release tag anchors the history, `None` otherwise.
    pub fn max_bump<'a, I>(&self, messages: I, has_tag: bool) -> BumpLevel
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut needs_minor = false;
        for message in messages {
            match self.classify(message) {
                BumpLevel::Major => return BumpLevel::Major,
                BumpLevel::Minor => needs_minor = true,
                _ => {}
            }
        }

        if needs_minor {
            BumpLevel::Minor
        } else if has_tag {
            BumpLevel::Patch
        } else {
            BumpLevel::None
        }
    }
}

impl Default for VersionRules {
    fn default() -> Self {
        // The built-in patterns are known to compile
        VersionRules::new(&RulesConfig::default()).unwrap_or_else(|_| unreachable!())
    }
}

fn compile(pattern: &str, whole_message: bool) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .multi_line(true)
        .dot_matches_new_line(whole_message)
        .build()
        .map_err(|e| ReleaseError::config(format!("Invalid pattern '{}': {}", pattern, e)))
}

impl fmt::Display for VersionRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "version tag : {}", self.tag_pattern)?;
        for rule in &self.major_rules {
            writeln!(f, "major rule  : {}", rule)?;
        }
        for rule in &self.minor_rules {
            writeln!(f, "minor rule  : {}", rule)?;
        }
        Ok(())
    }
}
