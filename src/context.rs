use std::path::PathBuf;

use crate::config::VersionConfiguration;
use crate::git::Repository;

/// Shared mutable state for one version calculation run.
///
/// The context is built fresh per calculation and handed through the processor
/// pipeline in a fixed order. Each processor reads fields written by earlier
/// stages and writes its own; nothing outside the currently executing processor
/// mutates it.
pub struct VersionContext<'r> {
    /// Read-only repository facts, borrowed for the lifetime of the run
    pub repository: &'r dyn Repository,

    /// Resolved configuration document. Populated by the configuration stage,
    /// read-only afterward.
    pub configuration: VersionConfiguration,

    /// Accumulating output record
    pub result: VersionResult,
}

impl<'r> VersionContext<'r> {
    /// Create a context over a repository with empty configuration and result
    pub fn new(repository: &'r dyn Repository) -> Self {
        VersionContext {
            repository,
            configuration: VersionConfiguration::default(),
            result: VersionResult::default(),
        }
    }
}

/// Output of a version calculation.
///
/// Fields are set once per pipeline stage: the build-server stage may write
/// `canonical_branch_name` and `build_number`, the configuration stage fills the
/// version components and repository facts, and each format stage writes exactly
/// one of the formatted strings. Later stages read but never overwrite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionResult {
    /// Working-tree root of the repository the calculation ran against
    pub repository_path: PathBuf,

    /// Major version component from configuration
    pub major: u64,
    /// Minor version component from configuration
    pub minor: u64,
    /// Patch version component from configuration
    pub patch: u64,

    /// Commit height (commits since the nearest tagged ancestor)
    pub height: u32,

    /// Full head commit id
    pub sha: String,

    /// Canonical branch ref (e.g. "refs/heads/main"), possibly overridden by a
    /// build server
    pub canonical_branch_name: String,

    /// Short branch name with the "refs/heads/" prefix removed
    pub branch_name: String,

    /// Build counter supplied by a build server, when one was detected
    pub build_number: Option<String>,

    /// Primary formatted version string
    pub version: String,

    /// SemVer 1.0 compatible rendering
    pub semver1: String,

    /// SemVer 2.0 compatible rendering
    pub semver2: String,
}
