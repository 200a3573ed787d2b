//! Numeric version component tokens
//!
//! These read the components the configuration stage parsed onto the result.
//! Option text is accepted (the contract requires one) but carries no meaning
//! for plain numbers.

use crate::context::VersionContext;
use crate::error::Result;
use crate::evaluator::TokenEvaluator;
use crate::tokens::{require_option, Token};

/// Major version component
pub struct MajorToken;

impl Token for MajorToken {
    fn key(&self) -> &'static str {
        "major"
    }

    fn default_option(&self) -> &'static str {
        ""
    }

    fn evaluate(
        &self,
        option: Option<&str>,
        ctx: &VersionContext<'_>,
        _evaluator: &dyn TokenEvaluator,
    ) -> Result<String> {
        require_option(option)?;
        Ok(ctx.result.major.to_string())
    }
}

/// Minor version component
pub struct MinorToken;

impl Token for MinorToken {
    fn key(&self) -> &'static str {
        "minor"
    }

    fn default_option(&self) -> &'static str {
        ""
    }

    fn evaluate(
        &self,
        option: Option<&str>,
        ctx: &VersionContext<'_>,
        _evaluator: &dyn TokenEvaluator,
    ) -> Result<String> {
        require_option(option)?;
        Ok(ctx.result.minor.to_string())
    }
}

/// Patch version component
pub struct PatchToken;

impl Token for PatchToken {
    fn key(&self) -> &'static str {
        "patch"
    }

    fn default_option(&self) -> &'static str {
        ""
    }

    fn evaluate(
        &self,
        option: Option<&str>,
        ctx: &VersionContext<'_>,
        _evaluator: &dyn TokenEvaluator,
    ) -> Result<String> {
        require_option(option)?;
        Ok(ctx.result.patch.to_string())
    }
}

/// The three components joined as `major.minor.patch`.
///
/// Composed from the components rather than `result.version` so compatibility
/// templates can use it regardless of stage ordering.
pub struct VersionToken;

impl Token for VersionToken {
    fn key(&self) -> &'static str {
        "version"
    }

    fn default_option(&self) -> &'static str {
        ""
    }

    fn evaluate(
        &self,
        option: Option<&str>,
        ctx: &VersionContext<'_>,
        _evaluator: &dyn TokenEvaluator,
    ) -> Result<String> {
        require_option(option)?;
        Ok(format!(
            "{}.{}.{}",
            ctx.result.major, ctx.result.minor, ctx.result.patch
        ))
    }
}
