use crate::domain::{BumpLevel, Version};
use crate::error::Result;
use crate::policy::{PolicyRequest, VersionPolicy};
use crate::report::Reporter;
use std::sync::Arc;

/// Release drops the snapshot marker; development bumps the minor number.
///
/// The number of components is preserved (`1.2` becomes `1.3-SNAPSHOT`).
pub struct DefaultPolicy {
    reporter: Arc<dyn Reporter>,
}

impl DefaultPolicy {
    pub const ID: &'static str = "default";

    pub fn new(reporter: Arc<dyn Reporter>) -> Self {
        DefaultPolicy { reporter }
    }
}

impl VersionPolicy for DefaultPolicy {
    fn release_version(&self, request: &PolicyRequest<'_>) -> Result<String> {
        let release = Version::parse(&request.version)?.to_release().to_string();
        self.reporter
            .debug(&format!("Release of {} is {}", request.version, release));
        Ok(release)
    }

    fn development_version(&self, request: &PolicyRequest<'_>) -> Result<String> {
        let next = Version::parse(&request.version)?
            .bump(BumpLevel::Minor)
            .to_snapshot()
            .to_string();
        self.reporter
            .debug(&format!("Development after {} is {}", request.version, next));
        Ok(next)
    }
}
