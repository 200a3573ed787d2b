use crate::context::VersionContext;
use crate::error::Result;
use crate::evaluator::TokenEvaluator;
use crate::tokens::{require_option, Token};

/// Joins the configured build metadata fragments.
///
/// The option is the separator, used literally: an empty option concatenates
/// the fragments, and whitespace separators are not trimmed. Fragments are
/// used verbatim (no nested evaluation).
pub struct MetadataToken;

impl Token for MetadataToken {
    fn key(&self) -> &'static str {
        "metadata"
    }

    fn default_option(&self) -> &'static str {
        "."
    }

    fn evaluate(
        &self,
        option: Option<&str>,
        ctx: &VersionContext<'_>,
        _evaluator: &dyn TokenEvaluator,
    ) -> Result<String> {
        let separator = require_option(option)?;

        Ok(ctx.configuration.metadata.join(separator))
    }
}
