use crate::context::VersionContext;
use crate::error::Result;
use crate::evaluator::TokenEvaluator;
use crate::tokens::{require_option, Token};

/// Joins the configured pre-release label fragments.
///
/// Unlike metadata, label fragments are themselves templates: each fragment is
/// run back through the supplied evaluator before joining, so a configuration
/// can write fragments like `{height}` or `{sha:7}`. The option is the
/// separator, used literally.
pub struct LabelToken;

impl Token for LabelToken {
    fn key(&self) -> &'static str {
        "label"
    }

    fn default_option(&self) -> &'static str {
        "."
    }

    fn evaluate(
        &self,
        option: Option<&str>,
        ctx: &VersionContext<'_>,
        evaluator: &dyn TokenEvaluator,
    ) -> Result<String> {
        let separator = require_option(option)?;

        let parts = ctx
            .configuration
            .label
            .iter()
            .map(|fragment| evaluator.process(fragment, ctx))
            .collect::<Result<Vec<_>>>()?;

        Ok(parts.join(separator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GitSemverError;
    use crate::evaluator::TemplateEvaluator;
    use crate::git::MockRepository;
    use crate::tokens::test_support::PassthroughEvaluator;
    use crate::tokens::TokenRegistry;

    fn context_with_labels<'r>(repo: &'r MockRepository, fragments: &[&str]) -> VersionContext<'r> {
        let mut ctx = VersionContext::new(repo);
        ctx.configuration.label = fragments.iter().map(|s| s.to_string()).collect();
        ctx
    }

    #[test]
    fn test_plain_fragments_joined() {
        let repo = MockRepository::new();
        let ctx = context_with_labels(&repo, &["alpha", "nightly"]);

        let result = LabelToken
            .evaluate(Some("."), &ctx, &PassthroughEvaluator)
            .unwrap();
        assert_eq!(result, "alpha.nightly");
    }

    #[test]
    fn test_absent_option_fails() {
        let repo = MockRepository::new();
        let ctx = context_with_labels(&repo, &["alpha"]);

        let err = LabelToken
            .evaluate(None, &ctx, &PassthroughEvaluator)
            .unwrap_err();
        assert!(matches!(err, GitSemverError::InvalidArgument(_)));
    }

    #[test]
    fn test_fragments_are_evaluated_as_templates() {
        let registry = TokenRegistry::default_set();
        let evaluator = TemplateEvaluator::new(&registry);

        let repo = MockRepository::new();
        let mut ctx = context_with_labels(&repo, &["alpha", "{height}"]);
        ctx.result.height = 9;

        let result = LabelToken.evaluate(Some("."), &ctx, &evaluator).unwrap();
        assert_eq!(result, "alpha.9");
    }

    #[test]
    fn test_no_fragments_yields_empty_string() {
        let repo = MockRepository::new();
        let ctx = context_with_labels(&repo, &[]);

        let result = LabelToken
            .evaluate(Some("-"), &ctx, &PassthroughEvaluator)
            .unwrap();
        assert_eq!(result, "");
    }
}
