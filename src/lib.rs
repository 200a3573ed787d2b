pub mod build_server;
pub mod calculator;
pub mod config;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod git;
pub mod pipeline;
pub mod tokens;
pub mod ui;

pub use calculator::VersionCalculator;
pub use context::{VersionContext, VersionResult};
pub use error::{GitSemverError, Result};
