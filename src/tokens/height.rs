use crate::context::VersionContext;
use crate::error::{GitSemverError, Result};
use crate::evaluator::TokenEvaluator;
use crate::tokens::{require_option, Token};

/// Commit height since the nearest tagged ancestor.
///
/// The option is the minimum width to zero-pad the number to; the default `1`
/// renders it unpadded.
pub struct HeightToken;

impl Token for HeightToken {
    fn key(&self) -> &'static str {
        "height"
    }

    fn default_option(&self) -> &'static str {
        "1"
    }

    fn evaluate(
        &self,
        option: Option<&str>,
        ctx: &VersionContext<'_>,
        _evaluator: &dyn TokenEvaluator,
    ) -> Result<String> {
        let option = require_option(option)?;

        let width: usize = option.parse().map_err(|_| {
            GitSemverError::invalid_argument(format!(
                "height padding '{}' is not a number",
                option
            ))
        })?;

        Ok(format!("{:0width$}", ctx.result.height, width = width))
    }
}
