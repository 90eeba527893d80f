use crate::domain::{ModuleId, Phase};
use crate::error::{ReleaseError, Result};
use std::collections::BTreeMap;

/// Versions assigned during a run, per phase and module
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionRegistry {
    entries: BTreeMap<Phase, BTreeMap<ModuleId, String>>,
}

impl VersionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the version of `id` for `phase`; each pair is written once
    pub fn record(&mut self, id: &ModuleId, phase: Phase, version: impl Into<String>) -> Result<()> {
        let slot = self.entries.entry(phase).or_default();
        if let Some(existing) = slot.get(id) {
            return Err(ReleaseError::registry(format!(
                "{} version of '{}' is already set to {}",
                phase, id, existing
            )));
        }
        slot.insert(id.clone(), version.into());
        Ok(())
    }

    pub fn get(&self, id: &ModuleId, phase: Phase) -> Option<&str> {
        self.entries
            .get(&phase)
            .and_then(|slot| slot.get(id))
            .map(String::as_str)
    }

    pub fn release_version(&self, id: &ModuleId) -> Option<&str> {
        self.get(id, Phase::Release)
    }

    pub fn development_version(&self, id: &ModuleId) -> Option<&str> {
        self.get(id, Phase::Development)
    }

    pub fn branch_version(&self, id: &ModuleId) -> Option<&str> {
        self.get(id, Phase::Branch)
    }

    pub fn working_copy_version(&self, id: &ModuleId) -> Option<&str> {
        self.get(id, Phase::WorkingCopy)
    }

    /// Entries of one phase, ordered by module id
    pub fn phase_entries(&self, phase: Phase) -> impl Iterator<Item = (&ModuleId, &str)> {
        self.entries
            .get(&phase)
            .into_iter()
            .flat_map(|slot| slot.iter().map(|(id, v)| (id, v.as_str())))
    }

    /// Phases holding at least one entry
    pub fn phases(&self) -> Vec<Phase> {
        self.entries
            .iter()
            .filter(|(_, slot)| !slot.is_empty())
            .map(|(phase, _)| *phase)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BTreeMap::is_empty)
    }

    /// Render as a TOML document with one table per phase
    pub fn to_toml(&self) -> Result<String> {
        let document: BTreeMap<&str, BTreeMap<String, &str>> = self
            .entries
            .iter()
            .filter(|(_, slot)| !slot.is_empty())
            .map(|(phase, slot)| {
                let versions = slot
                    .iter()
                    .map(|(id, version)| (id.to_string(), version.as_str()))
                    .collect();
                (phase.name(), versions)
            })
            .collect();

        toml::to_string(&document)
            .map_err(|e| ReleaseError::registry(format!("Unable to serialize versions: {}", e)))
    }
}
