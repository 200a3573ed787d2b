use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{GitSemverError, Result};

/// Configuration file looked up at the repository root
pub const CONFIG_FILE_NAME: &str = ".gitsemver.toml";

/// Returns the default primary format template.
fn default_format() -> String {
    "{major}.{minor}.{patch}".to_string()
}

/// Returns the default base version.
fn default_version() -> String {
    "0.1.0".to_string()
}

/// Returns the default release branch patterns.
fn default_release_patterns() -> Vec<String> {
    vec![
        "^refs/heads/main$".to_string(),
        "^refs/heads/master$".to_string(),
        "^refs/heads/release/.*$".to_string(),
    ]
}

/// Represents the complete version configuration for a repository.
///
/// Contains the base version, format templates, label/metadata fragments, and
/// branch-specific overrides. Loaded from `.gitsemver.toml` at the repository
/// root; the configuration stage merges branch overrides before assigning the
/// document to the context.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionConfiguration {
    /// Base version as a "major.minor.patch" string
    #[serde(default = "default_version")]
    pub version: String,

    /// Primary format template
    #[serde(default = "default_format")]
    pub format: String,

    /// Pre-release label fragments; fragments may embed token references
    #[serde(default)]
    pub label: Vec<String>,

    /// Build metadata fragments, used verbatim
    #[serde(default)]
    pub metadata: Vec<String>,

    /// Optional SemVer 1.0 compatibility template override
    #[serde(default)]
    pub semver1: Option<String>,

    /// Optional SemVer 2.0 compatibility template override
    #[serde(default)]
    pub semver2: Option<String>,

    #[serde(default)]
    pub branches: BranchesConfiguration,
}

impl Default for VersionConfiguration {
    fn default() -> Self {
        VersionConfiguration {
            version: default_version(),
            format: default_format(),
            label: Vec::new(),
            metadata: Vec::new(),
            semver1: None,
            semver2: None,
            branches: BranchesConfiguration::default(),
        }
    }
}

/// Branch-related configuration: which branches count as release branches, and
/// per-branch overrides of the version document.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchesConfiguration {
    /// Regex patterns matched against the canonical branch ref
    #[serde(default = "default_release_patterns")]
    pub release: Vec<String>,

    /// Overrides applied to the first pattern that matches the current branch
    #[serde(default)]
    pub overrides: Vec<BranchOverride>,
}

impl Default for BranchesConfiguration {
    fn default() -> Self {
        BranchesConfiguration {
            release: default_release_patterns(),
            overrides: Vec::new(),
        }
    }
}

/// Branch-specific replacement of configuration fields.
///
/// Absent fields leave the base document untouched.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchOverride {
    /// Regex matched against the canonical branch ref
    #[serde(rename = "match")]
    pub pattern: String,

    #[serde(default)]
    pub label: Option<Vec<String>>,

    #[serde(default)]
    pub metadata: Option<Vec<String>>,

    #[serde(default)]
    pub format: Option<String>,
}

impl VersionConfiguration {
    /// Parse the configured base version.
    ///
    /// # Returns
    /// * `Ok(semver::Version)` - Parsed version components
    /// * `Err(ConfigurationInvalid)` - If the version string is not a valid
    ///   semantic version
    pub fn base_version(&self) -> Result<semver::Version> {
        semver::Version::parse(&self.version).map_err(|e| {
            GitSemverError::configuration_invalid(format!(
                "version '{}' is not a valid semantic version: {}",
                self.version, e
            ))
        })
    }

    /// Whether the canonical branch ref matches any release pattern
    pub fn is_release_branch(&self, canonical_branch: &str) -> Result<bool> {
        for pattern in &self.branches.release {
            if compile_pattern(pattern)?.is_match(canonical_branch) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Merge the first branch override whose pattern matches the canonical
    /// branch ref into this document. First match wins; later overrides are
    /// ignored.
    pub fn apply_branch_overrides(&mut self, canonical_branch: &str) -> Result<()> {
        let matched = self
            .branches
            .overrides
            .iter()
            .map(|o| Ok((compile_pattern(&o.pattern)?.is_match(canonical_branch), o)))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .find(|(matches, _)| *matches)
            .map(|(_, o)| o.clone());

        if let Some(override_) = matched {
            if let Some(label) = override_.label {
                self.label = label;
            }
            if let Some(metadata) = override_.metadata {
                self.metadata = metadata;
            }
            if let Some(format) = override_.format {
                self.format = format;
            }
        }

        Ok(())
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| {
        GitSemverError::configuration_invalid(format!("branch pattern '{}': {}", pattern, e))
    })
}

/// Source of version configuration documents.
///
/// The pipeline depends on this trait rather than the filesystem so tests can
/// inject documents directly.
pub trait ConfigurationSource: Send + Sync {
    /// Load the configuration for a repository, with branch overrides already
    /// merged against `branch_name`.
    ///
    /// # Returns
    /// * `Ok(VersionConfiguration)` - Resolved document
    /// * `Err(ConfigurationNotFound)` - If no configuration can be located
    /// * `Err(ConfigurationInvalid)` - If found but structurally malformed
    fn load(&self, repo_root: &Path, branch_name: &str) -> Result<VersionConfiguration>;
}

/// Loads `.gitsemver.toml` from the repository root
pub struct TomlFileSource;

impl ConfigurationSource for TomlFileSource {
    fn load(&self, repo_root: &Path, branch_name: &str) -> Result<VersionConfiguration> {
        let path = repo_root.join(CONFIG_FILE_NAME);

        if !path.exists() {
            return Err(GitSemverError::ConfigurationNotFound(
                path.display().to_string(),
            ));
        }

        let text = fs::read_to_string(&path)?;

        let mut config: VersionConfiguration = toml::from_str(&text).map_err(|e| {
            GitSemverError::configuration_invalid(format!("{}: {}", path.display(), e))
        })?;

        // Reject structurally bad documents up front rather than at token time
        config.base_version()?;
        config.apply_branch_overrides(branch_name)?;

        Ok(config)
    }
}
