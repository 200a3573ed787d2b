use crate::error::{GitSemverError, Result};
use git2::Repository as Git2Repo;
use std::collections::HashSet;
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open a git repository at a known root
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::open(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Object ids pointed at by tags, annotated tags peeled to their commits
    fn tagged_oids(&self) -> Result<HashSet<git2::Oid>> {
        let mut oids = HashSet::new();

        for name in self.repo.tag_names(None)?.iter().flatten() {
            let reference_name = format!("refs/tags/{}", name);
            if let Ok(reference) = self.repo.find_reference(&reference_name) {
                if let Ok(object) = reference.peel(git2::ObjectType::Commit) {
                    oids.insert(object.id());
                }
            }
        }

        Ok(oids)
    }
}

impl super::Repository for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;

        match head.name() {
            Some(name) => Ok(name.to_string()),
            None => Err(GitSemverError::Git(git2::Error::from_str(
                "HEAD is not a valid utf-8 reference",
            ))),
        }
    }

    fn head_sha(&self) -> Result<String> {
        let head = self.repo.head()?;
        let commit = head.peel_to_commit()?;

        Ok(commit.id().to_string())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn commit_height(&self) -> Result<u32> {
        let tagged = self.tagged_oids()?;
        let head = self.repo.head()?.peel_to_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(head.id())?;

        let mut height: u32 = 0;

        for oid_result in revwalk {
            let oid = oid_result?;

            if tagged.contains(&oid) {
                break;
            }

            height += 1;
        }

        Ok(height)
    }
}

// SAFETY: Git2Repository wraps git2::Repository which is Send.
// git2 is thread-safe for read operations via libgit2's thread-safe design,
// and this wrapper only exposes read queries.
unsafe impl Sync for Git2Repository {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_non_repository_fails() {
        let result = Git2Repository::open("/this/path/does/not/exist");
        assert!(result.is_err());
    }
}
