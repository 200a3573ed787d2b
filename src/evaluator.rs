//! Token template evaluation engine
//!
//! A format template is an ordinary string containing token references of the
//! shape `{key}` or `{key:option}`. Option text may itself contain further
//! token references, which are resolved before the outer token runs. Token
//! output is substituted literally and never re-scanned, so expansion is
//! bounded by the template itself.

use crate::context::VersionContext;
use crate::error::{GitSemverError, Result};
use crate::tokens::TokenRegistry;

/// Expands token references in a template against a context.
///
/// Passed by reference into every token invocation so tokens can evaluate
/// template fragments they synthesize (see the label token).
pub trait TokenEvaluator {
    /// Expand all token references in `template`
    fn process(&self, template: &str, ctx: &VersionContext<'_>) -> Result<String>;
}

/// Recursive-descent evaluator over a shared token registry
pub struct TemplateEvaluator<'t> {
    registry: &'t TokenRegistry,
}

impl<'t> TemplateEvaluator<'t> {
    pub fn new(registry: &'t TokenRegistry) -> Self {
        TemplateEvaluator { registry }
    }

    /// Expand the first reference in `rest` and return the literal prefix, the
    /// produced value, and the remainder of the template after the reference.
    fn expand_next<'a>(
        &self,
        rest: &'a str,
        ctx: &VersionContext<'_>,
    ) -> Result<(&'a str, String, &'a str)> {
        // Find the opening brace; a bare '}' before it is unbalanced.
        let open = match rest.find(['{', '}']) {
            Some(i) if rest.as_bytes()[i] == b'}' => {
                return Err(GitSemverError::malformed_template(format!(
                    "unmatched '}}' in \"{}\"",
                    rest
                )))
            }
            Some(i) => i,
            None => unreachable!("expand_next called without a brace"),
        };

        let prefix = &rest[..open];
        let inner_start = open + 1;

        // Match the closing brace by depth counting; option text may nest
        // further references.
        let mut depth = 1usize;
        let mut close = None;
        for (i, c) in rest[inner_start..].char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(inner_start + i);
                        break;
                    }
                }
                _ => {}
            }
        }

        let close = close.ok_or_else(|| {
            GitSemverError::malformed_template(format!("unmatched '{{' in \"{}\"", rest))
        })?;

        let inner = &rest[inner_start..close];
        let (key, option_text) = split_reference(inner);

        let token = self
            .registry
            .get(key)
            .ok_or_else(|| GitSemverError::UnknownToken(key.to_string()))?;

        // Resolve the option before the token runs; a missing option means the
        // token's documented default, while an explicit empty string stays
        // empty.
        let option = match option_text {
            Some(text) => self.process(text, ctx)?,
            None => token.default_option().to_string(),
        };

        let value = token.evaluate(Some(&option), ctx, self)?;

        Ok((prefix, value, &rest[close + 1..]))
    }
}

impl TokenEvaluator for TemplateEvaluator<'_> {
    fn process(&self, template: &str, ctx: &VersionContext<'_>) -> Result<String> {
        let mut output = String::with_capacity(template.len());
        let mut rest = template;

        while rest.contains(['{', '}']) {
            let (prefix, value, remainder) = self.expand_next(rest, ctx)?;
            output.push_str(prefix);
            output.push_str(&value);
            rest = remainder;
        }

        output.push_str(rest);
        Ok(output)
    }
}

/// Split reference text into key and option at the first depth-zero ':'.
///
/// `None` option means the template wrote a bare `{key}`; `Some("")` means it
/// wrote `{key:}` explicitly.
fn split_reference(inner: &str) -> (&str, Option<&str>) {
    let mut depth = 0usize;

    for (i, c) in inner.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => return (&inner[..i], Some(&inner[i + 1..])),
            _ => {}
        }
    }

    (inner, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use crate::tokens::Token;

    fn context(repo: &MockRepository) -> VersionContext<'_> {
        let mut ctx = VersionContext::new(repo);
        ctx.result.major = 1;
        ctx.result.minor = 2;
        ctx.result.patch = 3;
        ctx.result.height = 4;
        ctx.configuration.metadata = vec!["a".to_string(), "b".to_string()];
        ctx
    }

    #[test]
    fn test_empty_template_passes_through() {
        let registry = TokenRegistry::default_set();
        let evaluator = TemplateEvaluator::new(&registry);
        let repo = MockRepository::new();
        let ctx = context(&repo);

        assert_eq!(evaluator.process("", &ctx).unwrap(), "");
    }

    #[test]
    fn test_template_without_references_passes_through() {
        let registry = TokenRegistry::default_set();
        let evaluator = TemplateEvaluator::new(&registry);
        let repo = MockRepository::new();
        let ctx = context(&repo);

        for template in ["1.2.3", "plain text", "  spaced  "] {
            assert_eq!(evaluator.process(template, &ctx).unwrap(), template);
        }
    }

    #[test]
    fn test_simple_expansion() {
        let registry = TokenRegistry::default_set();
        let evaluator = TemplateEvaluator::new(&registry);
        let repo = MockRepository::new();
        let ctx = context(&repo);

        let result = evaluator
            .process("{major}.{minor}.{patch}", &ctx)
            .unwrap();
        assert_eq!(result, "1.2.3");
    }

    #[test]
    fn test_literal_text_around_references() {
        let registry = TokenRegistry::default_set();
        let evaluator = TemplateEvaluator::new(&registry);
        let repo = MockRepository::new();
        let ctx = context(&repo);

        let result = evaluator.process("v{major}-build.{height}", &ctx).unwrap();
        assert_eq!(result, "v1-build.4");
    }

    #[test]
    fn test_explicit_option_passed_to_token() {
        let registry = TokenRegistry::default_set();
        let evaluator = TemplateEvaluator::new(&registry);
        let repo = MockRepository::new();
        let ctx = context(&repo);

        assert_eq!(evaluator.process("{metadata:-}", &ctx).unwrap(), "a-b");
        assert_eq!(evaluator.process("{metadata:}", &ctx).unwrap(), "ab");
        assert_eq!(evaluator.process("{height:4}", &ctx).unwrap(), "0004");
    }

    #[test]
    fn test_bare_reference_uses_default_option() {
        let registry = TokenRegistry::default_set();
        let evaluator = TemplateEvaluator::new(&registry);
        let repo = MockRepository::new();
        let ctx = context(&repo);

        assert_eq!(evaluator.process("{metadata}", &ctx).unwrap(), "a.b");
    }

    #[test]
    fn test_key_lookup_is_case_insensitive() {
        let registry = TokenRegistry::default_set();
        let evaluator = TemplateEvaluator::new(&registry);
        let repo = MockRepository::new();
        let ctx = context(&repo);

        assert_eq!(evaluator.process("{MAJOR}.{Minor}", &ctx).unwrap(), "1.2");
    }

    /// Separator token used to exercise nested option resolution
    struct SepToken;

    impl Token for SepToken {
        fn key(&self) -> &'static str {
            "sep"
        }

        fn default_option(&self) -> &'static str {
            ""
        }

        fn evaluate(
            &self,
            _option: Option<&str>,
            _ctx: &VersionContext<'_>,
            _evaluator: &dyn TokenEvaluator,
        ) -> Result<String> {
            Ok("-".to_string())
        }
    }

    #[test]
    fn test_nested_reference_in_option_resolves_first() {
        let mut registry = TokenRegistry::default_set();
        registry.register(Box::new(SepToken));
        let evaluator = TemplateEvaluator::new(&registry);
        let repo = MockRepository::new();
        let ctx = context(&repo);

        let result = evaluator.process("{metadata:{sep}}", &ctx).unwrap();
        assert_eq!(result, "a-b");
    }

    /// Token whose output contains braces, to prove output is never re-scanned
    struct BraceToken;

    impl Token for BraceToken {
        fn key(&self) -> &'static str {
            "brace"
        }

        fn default_option(&self) -> &'static str {
            ""
        }

        fn evaluate(
            &self,
            _option: Option<&str>,
            _ctx: &VersionContext<'_>,
            _evaluator: &dyn TokenEvaluator,
        ) -> Result<String> {
            Ok("{major}".to_string())
        }
    }

    #[test]
    fn test_token_output_is_substituted_literally() {
        let mut registry = TokenRegistry::default_set();
        registry.register(Box::new(BraceToken));
        let evaluator = TemplateEvaluator::new(&registry);
        let repo = MockRepository::new();
        let ctx = context(&repo);

        let result = evaluator.process("{brace}.{minor}", &ctx).unwrap();
        assert_eq!(result, "{major}.2");
    }

    #[test]
    fn test_unknown_token_fails_with_key() {
        let registry = TokenRegistry::default_set();
        let evaluator = TemplateEvaluator::new(&registry);
        let repo = MockRepository::new();
        let ctx = context(&repo);

        let err = evaluator.process("{bogus}", &ctx).unwrap_err();
        assert!(matches!(
            err,
            GitSemverError::UnknownToken(ref key) if key == "bogus"
        ));
    }

    #[test]
    fn test_unbalanced_braces_fail() {
        let registry = TokenRegistry::default_set();
        let evaluator = TemplateEvaluator::new(&registry);
        let repo = MockRepository::new();
        let ctx = context(&repo);

        for template in ["{major", "1.2.3}", "{metadata:{sep}", "}{major}"] {
            let err = evaluator.process(template, &ctx).unwrap_err();
            assert!(
                matches!(err, GitSemverError::MalformedTemplate(_)),
                "template '{}' should be malformed",
                template
            );
        }
    }

    #[test]
    fn test_split_reference() {
        assert_eq!(split_reference("major"), ("major", None));
        assert_eq!(split_reference("metadata:"), ("metadata", Some("")));
        assert_eq!(split_reference("metadata:-"), ("metadata", Some("-")));
        assert_eq!(
            split_reference("metadata:{sep}"),
            ("metadata", Some("{sep}"))
        );
        // Only the first depth-zero colon splits
        assert_eq!(split_reference("label:a:b"), ("label", Some("a:b")));
    }
}
