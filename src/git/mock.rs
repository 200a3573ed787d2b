use crate::error::{GitSemverError, Result};
use crate::git::Repository;

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    branch: String,
    sha: String,
    tags: Vec<String>,
    height: u32,
}

impl MockRepository {
    /// Create a mock repository with plausible defaults
    pub fn new() -> Self {
        MockRepository {
            branch: "refs/heads/main".to_string(),
            sha: "4f1f4c7b9d6f0b2a8c3e5d7f9b1a3c5e7d9f1b3a".to_string(),
            tags: Vec::new(),
            height: 0,
        }
    }

    /// Set the canonical branch ref
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Set the head commit id
    pub fn with_sha(mut self, sha: impl Into<String>) -> Self {
        self.sha = sha.into();
        self
    }

    /// Add a tag name
    pub fn with_tag(mut self, name: impl Into<String>) -> Self {
        self.tags.push(name.into());
        self
    }

    /// Set the commit height
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<String> {
        if self.branch.is_empty() {
            return Err(GitSemverError::Git(git2::Error::from_str(
                "unborn branch",
            )));
        }
        Ok(self.branch.clone())
    }

    fn head_sha(&self) -> Result<String> {
        Ok(self.sha.clone())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.clone())
    }

    fn commit_height(&self) -> Result<u32> {
        Ok(self.height)
    }
}
