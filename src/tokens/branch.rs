use crate::context::VersionContext;
use crate::error::{GitSemverError, Result};
use crate::evaluator::TokenEvaluator;
use crate::tokens::{require_option, Token};

/// Name of the branch being versioned.
///
/// Reads the branch the pipeline resolved onto the result, so a build-server
/// override takes precedence over the checked-out branch. Options:
///
/// - `short` (default): canonical ref minus `refs/heads/`, cleaned for use in
///   version strings
/// - `suffix`: last `/`-separated segment, cleaned
/// - `canonical`: the raw ref name
pub struct BranchNameToken;

/// Replace characters that are illegal in version identifiers with dashes
fn clean(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

impl Token for BranchNameToken {
    fn key(&self) -> &'static str {
        "branchname"
    }

    fn default_option(&self) -> &'static str {
        "short"
    }

    fn evaluate(
        &self,
        option: Option<&str>,
        ctx: &VersionContext<'_>,
        _evaluator: &dyn TokenEvaluator,
    ) -> Result<String> {
        let option = require_option(option)?;
        let canonical = &ctx.result.canonical_branch_name;

        match option.to_lowercase().as_str() {
            "short" => Ok(clean(canonical.trim_start_matches("refs/heads/"))),
            "suffix" => {
                let suffix = canonical.rsplit('/').next().unwrap_or(canonical);
                Ok(clean(suffix))
            }
            "canonical" => Ok(canonical.clone()),
            other => Err(GitSemverError::invalid_argument(format!(
                "branchname option '{}' (expected short, suffix, or canonical)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use crate::tokens::test_support::PassthroughEvaluator;

    fn context_with_branch<'r>(repo: &'r MockRepository, canonical: &str) -> VersionContext<'r> {
        let mut ctx = VersionContext::new(repo);
        ctx.result.canonical_branch_name = canonical.to_string();
        ctx
    }

    #[test]
    fn test_short_option_strips_prefix_and_cleans() {
        let repo = MockRepository::new();
        let ctx = context_with_branch(&repo, "refs/heads/feature/new_tokens");

        let result = BranchNameToken
            .evaluate(Some("short"), &ctx, &PassthroughEvaluator)
            .unwrap();
        assert_eq!(result, "feature-new-tokens");
    }

    #[test]
    fn test_suffix_option() {
        let repo = MockRepository::new();
        let ctx = context_with_branch(&repo, "refs/heads/feature/new_tokens");

        let result = BranchNameToken
            .evaluate(Some("suffix"), &ctx, &PassthroughEvaluator)
            .unwrap();
        assert_eq!(result, "new-tokens");
    }

    #[test]
    fn test_canonical_option_is_raw() {
        let repo = MockRepository::new();
        let ctx = context_with_branch(&repo, "refs/heads/feature/new_tokens");

        let result = BranchNameToken
            .evaluate(Some("canonical"), &ctx, &PassthroughEvaluator)
            .unwrap();
        assert_eq!(result, "refs/heads/feature/new_tokens");
    }

    #[test]
    fn test_default_option_is_short() {
        let repo = MockRepository::new();
        let ctx = context_with_branch(&repo, "refs/heads/main");

        let result = BranchNameToken
            .evaluate(
                Some(BranchNameToken.default_option()),
                &ctx,
                &PassthroughEvaluator,
            )
            .unwrap();
        assert_eq!(result, "main");
    }

    #[test]
    fn test_option_is_case_insensitive() {
        let repo = MockRepository::new();
        let ctx = context_with_branch(&repo, "refs/heads/main");

        let result = BranchNameToken
            .evaluate(Some("Canonical"), &ctx, &PassthroughEvaluator)
            .unwrap();
        assert_eq!(result, "refs/heads/main");
    }

    #[test]
    fn test_unknown_option_fails() {
        let repo = MockRepository::new();
        let ctx = context_with_branch(&repo, "refs/heads/main");

        let err = BranchNameToken
            .evaluate(Some("upper"), &ctx, &PassthroughEvaluator)
            .unwrap_err();
        assert!(matches!(err, GitSemverError::InvalidArgument(_)));
    }
}
