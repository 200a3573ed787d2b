//! Git repository abstraction layer
//!
//! This module provides a trait-based abstraction over the read-only git
//! queries that version calculation needs. The concrete implementations
//! include:
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: a mock implementation for testing
//!
//! The calculator only ever issues read queries (branch, head, tags, height);
//! no write operation is exposed here.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::{Path, PathBuf};

use crate::error::{GitSemverError, Result};

/// Read-only git queries used during version calculation
///
/// All implementors must be `Send + Sync` so a shared registry of calculators
/// can run against different repositories concurrently.
pub trait Repository: Send + Sync {
    /// Canonical ref name of the checked-out branch (e.g. "refs/heads/main")
    fn current_branch(&self) -> Result<String>;

    /// Full object id of the HEAD commit
    fn head_sha(&self) -> Result<String>;

    /// All tag names in the repository
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Number of commits from HEAD (inclusive) back to the nearest tagged
    /// ancestor (exclusive).
    ///
    /// When no tagged ancestor is reachable, this is the total number of
    /// commits reachable from HEAD.
    fn commit_height(&self) -> Result<u32>;
}

/// Resolve a path to the repository working-tree root.
///
/// Searches `path` and its ancestors for a git repository, the same discovery
/// rule as `git rev-parse --show-toplevel`.
///
/// # Returns
/// * `Ok(PathBuf)` - Working-tree root of the discovered repository
/// * `Err(RepositoryNotFound)` - If no repository exists at or above `path`
pub fn discover(path: &Path) -> Result<PathBuf> {
    let repo = git2::Repository::discover(path)
        .map_err(|_| GitSemverError::RepositoryNotFound(path.display().to_string()))?;

    match repo.workdir() {
        Some(root) => Ok(root.to_path_buf()),
        // Bare repository: fall back to the git directory itself
        None => Ok(repo.path().to_path_buf()),
    }
}
