use thiserror::Error;

/// Unified error type for version calculation
#[derive(Error, Debug)]
pub enum GitSemverError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No git repository found at '{0}' or any parent directory")]
    RepositoryNotFound(String),

    #[error("No configuration found: {0}")]
    ConfigurationNotFound(String),

    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),

    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error("Malformed template: {0}")]
    MalformedTemplate(String),

    #[error("Format violation: {0}")]
    FormatViolation(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-semver
pub type Result<T> = std::result::Result<T, GitSemverError>;

impl GitSemverError {
    /// Create an invalid-argument error naming the offending parameter
    pub fn invalid_argument(name: impl Into<String>) -> Self {
        GitSemverError::InvalidArgument(name.into())
    }

    /// Create a configuration-invalid error with context
    pub fn configuration_invalid(msg: impl Into<String>) -> Self {
        GitSemverError::ConfigurationInvalid(msg.into())
    }

    /// Create a malformed-template error with context
    pub fn malformed_template(msg: impl Into<String>) -> Self {
        GitSemverError::MalformedTemplate(msg.into())
    }

    /// Create a format-violation error with context
    pub fn format_violation(msg: impl Into<String>) -> Self {
        GitSemverError::FormatViolation(msg.into())
    }
}
