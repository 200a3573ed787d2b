use crate::build_server::{detect_overrides, Environment};
use crate::context::VersionContext;
use crate::error::Result;
use crate::pipeline::ContextProcessor;

/// First pipeline stage: apply build-server overrides.
///
/// Runs before configuration resolution so that later stages (branch override
/// merging, the branchname token) see the branch the server is actually
/// building rather than whatever ref the checkout left behind.
pub struct BuildServerProcessor {
    env: Environment,
}

impl BuildServerProcessor {
    /// Detect against the current process environment
    pub fn new() -> Self {
        Self::with_env(crate::build_server::process_environment())
    }

    /// Detect against an injected environment snapshot
    pub fn with_env(env: Environment) -> Self {
        BuildServerProcessor { env }
    }
}

impl Default for BuildServerProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextProcessor for BuildServerProcessor {
    fn apply(&self, ctx: &mut VersionContext<'_>) -> Result<()> {
        if let Some(overrides) = detect_overrides(&self.env) {
            if let Some(branch) = overrides.branch_name {
                ctx.result.canonical_branch_name = branch;
            }
            if let Some(number) = overrides.build_number {
                ctx.result.build_number = Some(number);
            }
        }

        Ok(())
    }
}
