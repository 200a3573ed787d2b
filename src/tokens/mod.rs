//! Token set and registry
//!
//! A token is a named, stateless function from an option string plus the
//! version context to a string fragment. Tokens never perform I/O; everything
//! they need is already on the context, which keeps them referentially
//! transparent and testable in isolation.

pub mod branch;
pub mod height;
pub mod label;
pub mod metadata;
pub mod semver;
pub mod sha;

pub use branch::BranchNameToken;
pub use height::HeightToken;
pub use label::LabelToken;
pub use metadata::MetadataToken;
pub use semver::{MajorToken, MinorToken, PatchToken, VersionToken};
pub use sha::ShaToken;

use std::collections::HashMap;

use crate::context::VersionContext;
use crate::error::{GitSemverError, Result};
use crate::evaluator::TokenEvaluator;

/// A template token: a registry key plus an evaluation function.
///
/// `evaluate` receives the fully resolved option text (`None` only when a
/// caller bypasses the evaluator and supplies no option at all - a contract
/// violation), the shared context, and the evaluator itself so a token can
/// expand template fragments it synthesizes.
pub trait Token: Send + Sync {
    /// Stable registry key, matched case-insensitively
    fn key(&self) -> &'static str;

    /// Option value used when a template writes bare `{key}`
    fn default_option(&self) -> &'static str;

    /// Produce this token's string value
    fn evaluate(
        &self,
        option: Option<&str>,
        ctx: &VersionContext<'_>,
        evaluator: &dyn TokenEvaluator,
    ) -> Result<String>;
}

/// Reject an absent option value.
///
/// The empty string is a valid, distinct input; only `None` is an error.
pub(crate) fn require_option(option: Option<&str>) -> Result<&str> {
    option.ok_or_else(|| GitSemverError::invalid_argument("option value"))
}

/// Process-wide token registry: built once, read-only afterward.
///
/// Lookup is case-insensitive. The registry is passed by reference into the
/// evaluator; since tokens are stateless, concurrent calculator runs can share
/// one registry safely.
pub struct TokenRegistry {
    tokens: HashMap<String, Box<dyn Token>>,
}

impl TokenRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        TokenRegistry {
            tokens: HashMap::new(),
        }
    }

    /// Registry holding the full built-in token set
    pub fn default_set() -> Self {
        let mut registry = TokenRegistry::new();
        registry.register(Box::new(MajorToken));
        registry.register(Box::new(MinorToken));
        registry.register(Box::new(PatchToken));
        registry.register(Box::new(VersionToken));
        registry.register(Box::new(HeightToken));
        registry.register(Box::new(ShaToken));
        registry.register(Box::new(BranchNameToken));
        registry.register(Box::new(LabelToken));
        registry.register(Box::new(MetadataToken));
        registry
    }

    /// Register a token under its (lowercased) key, replacing any previous
    /// registration with the same key
    pub fn register(&mut self, token: Box<dyn Token>) {
        self.tokens.insert(token.key().to_lowercase(), token);
    }

    /// Case-insensitive lookup
    pub fn get(&self, key: &str) -> Option<&dyn Token> {
        self.tokens.get(&key.to_lowercase()).map(|t| t.as_ref())
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::default_set()
    }
}
