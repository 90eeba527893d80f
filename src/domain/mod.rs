//! Domain logic - pure business rules independent of git operations

pub mod commit;
pub mod module;
pub mod phase;
pub mod version;

pub use commit::ChangeSet;
pub use module::{Module, ModuleId};
pub use phase::Phase;
pub use version::{is_snapshot, BumpLevel, Version, SNAPSHOT_MARKER};
