use crate::config::ConfigurationSource;
use crate::context::VersionContext;
use crate::error::Result;
use crate::pipeline::ContextProcessor;

/// Second pipeline stage: resolve configuration and repository facts.
///
/// Fills the branch (unless a build server already overrode it), loads the
/// configuration document with branch overrides merged, parses the base
/// version into components, and copies height and sha from the repository.
pub struct ConfigurationProcessor<'s> {
    source: &'s dyn ConfigurationSource,
}

impl<'s> ConfigurationProcessor<'s> {
    pub fn new(source: &'s dyn ConfigurationSource) -> Self {
        ConfigurationProcessor { source }
    }
}

impl ContextProcessor for ConfigurationProcessor<'_> {
    fn apply(&self, ctx: &mut VersionContext<'_>) -> Result<()> {
        // Set-once: a build-server override from the previous stage wins over
        // the repository's checked-out branch.
        if ctx.result.canonical_branch_name.is_empty() {
            ctx.result.canonical_branch_name = ctx.repository.current_branch()?;
        }
        ctx.result.branch_name = ctx
            .result
            .canonical_branch_name
            .trim_start_matches("refs/heads/")
            .to_string();

        let mut config = self.source.load(
            &ctx.result.repository_path,
            &ctx.result.canonical_branch_name,
        )?;

        let base = config.base_version()?;
        ctx.result.major = base.major;
        ctx.result.minor = base.minor;
        ctx.result.patch = base.patch;

        ctx.result.height = ctx.repository.commit_height()?;
        ctx.result.sha = ctx.repository.head_sha()?;

        // Builds from non-release branches get a sha fragment in the label so
        // their output can't collide with release output.
        if !config.is_release_branch(&ctx.result.canonical_branch_name)? {
            config.label.push("{sha:7}".to_string());
        }

        ctx.configuration = config;
        Ok(())
    }
}
