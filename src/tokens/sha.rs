use crate::context::VersionContext;
use crate::error::{GitSemverError, Result};
use crate::evaluator::TokenEvaluator;
use crate::tokens::{require_option, Token};

/// Head commit id.
///
/// The option is either `full` or a prefix length; the default is the
/// conventional 7-character short form.
pub struct ShaToken;

impl Token for ShaToken {
    fn key(&self) -> &'static str {
        "sha"
    }

    fn default_option(&self) -> &'static str {
        "7"
    }

    fn evaluate(
        &self,
        option: Option<&str>,
        ctx: &VersionContext<'_>,
        _evaluator: &dyn TokenEvaluator,
    ) -> Result<String> {
        let option = require_option(option)?;
        let sha = &ctx.result.sha;

        if option.eq_ignore_ascii_case("full") {
            return Ok(sha.clone());
        }

        let length: usize = option.parse().map_err(|_| {
            GitSemverError::invalid_argument(format!(
                "sha length '{}' is neither a number nor 'full'",
                option
            ))
        })?;

        if length == 0 {
            return Err(GitSemverError::invalid_argument("sha length must be > 0"));
        }

        Ok(sha.chars().take(length).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GitSemverError;
    use crate::git::MockRepository;
    use crate::tokens::test_support::PassthroughEvaluator;

    const SHA: &str = "4f1f4c7b9d6f0b2a8c3e5d7f9b1a3c5e7d9f1b3a";

    fn context_with_sha(repo: &MockRepository) -> VersionContext<'_> {
        let mut ctx = VersionContext::new(repo);
        ctx.result.sha = SHA.to_string();
        ctx
    }

    #[test]
    fn test_default_option_is_short_form() {
        let repo = MockRepository::new();
        let ctx = context_with_sha(&repo);

        let result = ShaToken
            .evaluate(Some(ShaToken.default_option()), &ctx, &PassthroughEvaluator)
            .unwrap();
        assert_eq!(result, "4f1f4c7");
    }

    #[test]
    fn test_full_option() {
        let repo = MockRepository::new();
        let ctx = context_with_sha(&repo);

        for option in ["full", "FULL", "Full"] {
            let result = ShaToken
                .evaluate(Some(option), &ctx, &PassthroughEvaluator)
                .unwrap();
            assert_eq!(result, SHA);
        }
    }

    #[test]
    fn test_explicit_length() {
        let repo = MockRepository::new();
        let ctx = context_with_sha(&repo);

        let result = ShaToken
            .evaluate(Some("12"), &ctx, &PassthroughEvaluator)
            .unwrap();
        assert_eq!(result, &SHA[..12]);
    }

    #[test]
    fn test_length_beyond_sha_returns_whole_sha() {
        let repo = MockRepository::new();
        let ctx = context_with_sha(&repo);

        let result = ShaToken
            .evaluate(Some("500"), &ctx, &PassthroughEvaluator)
            .unwrap();
        assert_eq!(result, SHA);
    }

    #[test]
    fn test_invalid_options_fail() {
        let repo = MockRepository::new();
        let ctx = context_with_sha(&repo);

        for option in ["short", "0", "-3"] {
            let err = ShaToken
                .evaluate(Some(option), &ctx, &PassthroughEvaluator)
                .unwrap_err();
            assert!(
                matches!(err, GitSemverError::InvalidArgument(_)),
                "option '{}' should be rejected",
                option
            );
        }
    }
}
