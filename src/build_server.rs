//! Build-server environment detection
//!
//! Build servers usually check out a detached commit, so the branch name has to
//! come from their environment instead of the repository. Detection operates on
//! an injected snapshot of the process environment, which keeps it testable
//! without mutating real environment variables.

use std::collections::HashMap;

/// Snapshot of the process environment
pub type Environment = HashMap<String, String>;

/// Capture the current process environment
pub fn process_environment() -> Environment {
    std::env::vars().collect()
}

/// Values a build server supplies that take precedence over repository facts.
///
/// Absent fields leave the corresponding context fields untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildServerOverrides {
    /// Canonical branch ref being built (e.g. "refs/heads/main")
    pub branch_name: Option<String>,

    /// Build counter assigned by the server
    pub build_number: Option<String>,
}

/// A recognizable build-server environment
pub trait BuildServer: Send + Sync {
    /// Provider name, for diagnostics
    fn name(&self) -> &'static str;

    /// Whether this server's signals are present in the environment
    fn is_active(&self, env: &Environment) -> bool;

    /// Overrides extracted from the environment
    fn overrides(&self, env: &Environment) -> BuildServerOverrides;
}

/// Azure DevOps Pipelines
pub struct AzureDevops;

impl BuildServer for AzureDevops {
    fn name(&self) -> &'static str {
        "Azure DevOps"
    }

    fn is_active(&self, env: &Environment) -> bool {
        env.get("TF_BUILD").map(|v| v == "True").unwrap_or(false)
    }

    fn overrides(&self, env: &Environment) -> BuildServerOverrides {
        BuildServerOverrides {
            branch_name: env.get("BUILD_SOURCEBRANCH").cloned(),
            build_number: env.get("BUILD_BUILDNUMBER").cloned(),
        }
    }
}

/// GitHub Actions
pub struct GitHubActions;

impl BuildServer for GitHubActions {
    fn name(&self) -> &'static str {
        "GitHub Actions"
    }

    fn is_active(&self, env: &Environment) -> bool {
        env.get("GITHUB_ACTIONS")
            .map(|v| v == "true")
            .unwrap_or(false)
    }

    fn overrides(&self, env: &Environment) -> BuildServerOverrides {
        BuildServerOverrides {
            branch_name: env.get("GITHUB_REF").cloned(),
            build_number: env.get("GITHUB_RUN_NUMBER").cloned(),
        }
    }
}

/// Overrides from the first build server active in the environment, or `None`
/// when no known server is detected.
pub fn detect_overrides(env: &Environment) -> Option<BuildServerOverrides> {
    let servers: [&dyn BuildServer; 2] = [&AzureDevops, &GitHubActions];

    servers
        .iter()
        .find(|server| server.is_active(env))
        .map(|server| server.overrides(env))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> Environment {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_no_server_detected_in_empty_environment() {
        assert_eq!(detect_overrides(&Environment::new()), None);
    }

    #[test]
    fn test_azure_devops_detected() {
        let env = env_of(&[
            ("TF_BUILD", "True"),
            ("BUILD_SOURCEBRANCH", "refs/heads/release/2.0"),
            ("BUILD_BUILDNUMBER", "20260829.3"),
        ]);

        let overrides = detect_overrides(&env).unwrap();
        assert_eq!(
            overrides.branch_name.as_deref(),
            Some("refs/heads/release/2.0")
        );
        assert_eq!(overrides.build_number.as_deref(), Some("20260829.3"));
    }

    #[test]
    fn test_azure_devops_requires_exact_flag_value() {
        let env = env_of(&[("TF_BUILD", "true")]);
        assert!(!AzureDevops.is_active(&env));
    }

    #[test]
    fn test_github_actions_detected() {
        let env = env_of(&[
            ("GITHUB_ACTIONS", "true"),
            ("GITHUB_REF", "refs/heads/main"),
            ("GITHUB_RUN_NUMBER", "42"),
        ]);

        let overrides = detect_overrides(&env).unwrap();
        assert_eq!(overrides.branch_name.as_deref(), Some("refs/heads/main"));
        assert_eq!(overrides.build_number.as_deref(), Some("42"));
    }

    #[test]
    fn test_partial_signals_leave_fields_absent() {
        let env = env_of(&[("TF_BUILD", "True")]);

        let overrides = detect_overrides(&env).unwrap();
        assert!(overrides.branch_name.is_none());
        assert!(overrides.build_number.is_none());
    }

    #[test]
    fn test_first_active_server_wins() {
        let env = env_of(&[
            ("TF_BUILD", "True"),
            ("BUILD_SOURCEBRANCH", "refs/heads/azure"),
            ("GITHUB_ACTIONS", "true"),
            ("GITHUB_REF", "refs/heads/github"),
        ]);

        let overrides = detect_overrides(&env).unwrap();
        assert_eq!(overrides.branch_name.as_deref(), Some("refs/heads/azure"));
    }
}
