//! Format pipeline stages
//!
//! The primary stage renders the configured format template. The two
//! compatibility stages render SemVer 1.0 and SemVer 2.0 dialects: each builds
//! its template (configured override, or a composed default), runs it through
//! the evaluator, and then validates the output against its dialect's
//! character rules, failing with `FormatViolation` rather than emitting
//! non-conformant text.

use crate::context::VersionContext;
use crate::error::{GitSemverError, Result};
use crate::evaluator::{TemplateEvaluator, TokenEvaluator};
use crate::pipeline::ContextProcessor;
use crate::tokens::TokenRegistry;

/// Third pipeline stage: render the primary format template
pub struct VersionFormatProcessor<'t> {
    registry: &'t TokenRegistry,
}

impl<'t> VersionFormatProcessor<'t> {
    pub fn new(registry: &'t TokenRegistry) -> Self {
        VersionFormatProcessor { registry }
    }
}

impl ContextProcessor for VersionFormatProcessor<'_> {
    fn apply(&self, ctx: &mut VersionContext<'_>) -> Result<()> {
        let evaluator = TemplateEvaluator::new(self.registry);
        let template = ctx.configuration.format.clone();

        ctx.result.version = evaluator.process(&template, ctx)?;
        Ok(())
    }
}

/// Fourth pipeline stage: SemVer 1.0 compatibility rendering.
///
/// Default shape: `1.2.3-alpha-0004` (dash-joined label, zero-padded height).
/// SemVer 1.0 has no build-metadata syntax, so `+` is illegal in the output.
pub struct Semver1FormatProcessor<'t> {
    registry: &'t TokenRegistry,
}

impl<'t> Semver1FormatProcessor<'t> {
    pub fn new(registry: &'t TokenRegistry) -> Self {
        Semver1FormatProcessor { registry }
    }
}

impl ContextProcessor for Semver1FormatProcessor<'_> {
    fn apply(&self, ctx: &mut VersionContext<'_>) -> Result<()> {
        let template = match &ctx.configuration.semver1 {
            Some(template) => template.clone(),
            None => {
                let mut template = String::from("{version}");
                if !ctx.configuration.label.is_empty() {
                    template.push_str("-{label:-}-{height:4}");
                }
                template
            }
        };

        let evaluator = TemplateEvaluator::new(self.registry);
        let formatted = evaluator.process(&template, ctx)?;
        validate_semver1(&formatted)?;

        ctx.result.semver1 = formatted;
        Ok(())
    }
}

/// Fifth pipeline stage: SemVer 2.0 compatibility rendering.
///
/// Default shape: `1.2.3-alpha.4+build.info` (dot-joined label plus height,
/// `+`-separated metadata).
pub struct Semver2FormatProcessor<'t> {
    registry: &'t TokenRegistry,
}

impl<'t> Semver2FormatProcessor<'t> {
    pub fn new(registry: &'t TokenRegistry) -> Self {
        Semver2FormatProcessor { registry }
    }
}

impl ContextProcessor for Semver2FormatProcessor<'_> {
    fn apply(&self, ctx: &mut VersionContext<'_>) -> Result<()> {
        let template = match &ctx.configuration.semver2 {
            Some(template) => template.clone(),
            None => {
                let mut template = String::from("{version}");
                if !ctx.configuration.label.is_empty() {
                    template.push_str("-{label:.}.{height}");
                }
                if !ctx.configuration.metadata.is_empty() {
                    template.push_str("+{metadata:.}");
                }
                template
            }
        };

        let evaluator = TemplateEvaluator::new(self.registry);
        let formatted = evaluator.process(&template, ctx)?;
        validate_semver2(&formatted)?;

        ctx.result.semver2 = formatted;
        Ok(())
    }
}

fn validate_semver1(formatted: &str) -> Result<()> {
    for c in formatted.chars() {
        let legal = c.is_ascii_alphanumeric() || c == '-' || c == '.';
        if !legal {
            return Err(GitSemverError::format_violation(format!(
                "'{}' is not legal in a SemVer 1.0 version: \"{}\"",
                c, formatted
            )));
        }
    }
    Ok(())
}

fn validate_semver2(formatted: &str) -> Result<()> {
    let mut plus_count = 0usize;

    for c in formatted.chars() {
        let legal = c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '+';
        if !legal {
            return Err(GitSemverError::format_violation(format!(
                "'{}' is not legal in a SemVer 2.0 version: \"{}\"",
                c, formatted
            )));
        }
        if c == '+' {
            plus_count += 1;
        }
    }

    if plus_count > 1 {
        return Err(GitSemverError::format_violation(format!(
            "more than one build-metadata separator in \"{}\"",
            formatted
        )));
    }

    Ok(())
}
