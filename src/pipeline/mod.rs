//! Context-processor pipeline
//!
//! Version calculation runs as a fixed sequence of stages over one shared
//! [VersionContext](crate::context::VersionContext): build-server detection,
//! configuration resolution, then the three format stages. The calculator
//! constructs the stage list explicitly and runs each exactly once, in order;
//! a stage may rely only on stages strictly before it. Any failure aborts the
//! remainder of the sequence.

pub mod build_server;
pub mod configuration;
pub mod format;

pub use build_server::BuildServerProcessor;
pub use configuration::ConfigurationProcessor;
pub use format::{Semver1FormatProcessor, Semver2FormatProcessor, VersionFormatProcessor};

use crate::context::VersionContext;
use crate::error::Result;

/// One ordered pipeline stage
pub trait ContextProcessor {
    /// Read and/or mutate the context in place
    fn apply(&self, ctx: &mut VersionContext<'_>) -> Result<()>;
}

/// Run processors in order, stopping at the first failure
pub fn run_all(
    processors: &[Box<dyn ContextProcessor + '_>],
    ctx: &mut VersionContext<'_>,
) -> Result<()> {
    for processor in processors {
        processor.apply(ctx)?;
    }
    Ok(())
}
