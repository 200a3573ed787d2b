use std::path::Path;

use crate::build_server::{process_environment, Environment};
use crate::config::{ConfigurationSource, TomlFileSource};
use crate::context::{VersionContext, VersionResult};
use crate::error::{GitSemverError, Result};
use crate::git::{self, Git2Repository, Repository};
use crate::pipeline::{
    run_all, BuildServerProcessor, ConfigurationProcessor, ContextProcessor,
    Semver1FormatProcessor, Semver2FormatProcessor, VersionFormatProcessor,
};
use crate::tokens::TokenRegistry;

/// Entry point for version calculation.
///
/// Owns the token registry (built once, read-only afterward) and the
/// configuration source, and runs the fixed processor sequence over a fresh
/// context per call. Calculations share no state between calls, so one
/// calculator can serve any number of runs.
pub struct VersionCalculator {
    registry: TokenRegistry,
    source: Box<dyn ConfigurationSource>,
    env: Environment,
}

impl VersionCalculator {
    /// Calculator with the built-in token set, `.gitsemver.toml` configuration
    /// loading, and the current process environment
    pub fn new() -> Self {
        VersionCalculator {
            registry: TokenRegistry::default_set(),
            source: Box::new(TomlFileSource),
            env: process_environment(),
        }
    }

    /// Replace the configuration source
    pub fn with_source(mut self, source: Box<dyn ConfigurationSource>) -> Self {
        self.source = source;
        self
    }

    /// Replace the environment snapshot used for build-server detection
    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    /// Calculate the version for the repository containing `path`.
    ///
    /// Resolves `path` to a repository root, opens a scoped repository handle
    /// (released on every exit path), and runs the pipeline to completion.
    /// Any stage failure aborts the run; no partial result is returned.
    ///
    /// # Returns
    /// * `Ok(VersionResult)` - Fully populated result
    /// * `Err(InvalidArgument)` - If `path` is empty or blank
    /// * `Err(RepositoryNotFound)` - If no repository exists at or above `path`
    pub fn get_result(&self, path: &str) -> Result<VersionResult> {
        if path.trim().is_empty() {
            return Err(GitSemverError::invalid_argument("path"));
        }

        let root = git::discover(Path::new(path))?;
        let repo = Git2Repository::open(&root)?;

        self.get_result_in(&repo, &root)
    }

    /// Run the pipeline against an already-opened repository.
    ///
    /// Public seam for callers (and tests) that hold their own
    /// [Repository] implementation.
    pub fn get_result_in(&self, repo: &dyn Repository, root: &Path) -> Result<VersionResult> {
        let mut ctx = VersionContext::new(repo);
        ctx.result.repository_path = root.to_path_buf();

        let processors: Vec<Box<dyn ContextProcessor + '_>> = vec![
            Box::new(BuildServerProcessor::with_env(self.env.clone())),
            Box::new(ConfigurationProcessor::new(self.source.as_ref())),
            Box::new(VersionFormatProcessor::new(&self.registry)),
            Box::new(Semver1FormatProcessor::new(&self.registry)),
            Box::new(Semver2FormatProcessor::new(&self.registry)),
        ];

        run_all(&processors, &mut ctx)?;

        Ok(ctx.result)
    }
}

impl Default for VersionCalculator {
    fn default() -> Self {
        Self::new()
    }
}
