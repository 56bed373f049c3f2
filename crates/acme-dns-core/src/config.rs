//! Configuration types for the ACME DNS solver
//!
//! This module defines all configuration structures used throughout the crate.

use serde::{Deserialize, Serialize};

/// Default Katapult API origin
pub const DEFAULT_KATAPULT_HOST: &str = "https://api.katapult.io";

/// Main solver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// DNS provider configuration
    pub provider: ProviderConfig,

    /// What cleanup reports when some deletions fail
    #[serde(default)]
    pub cleanup: CleanupPolicy,
}

impl SolverConfig {
    /// Create a configuration for the given provider with the default cleanup policy
    pub fn new(provider: ProviderConfig) -> Self {
        Self {
            provider,
            cleanup: CleanupPolicy::default(),
        }
    }

    /// Set the cleanup policy
    pub fn with_cleanup(mut self, cleanup: CleanupPolicy) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.provider.validate()
    }
}

/// DNS provider configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Katapult provider
    Katapult {
        /// Katapult API token
        api_token: String,
        /// API origin override (defaults to [`DEFAULT_KATAPULT_HOST`])
        #[serde(default)]
        host: Option<String>,
    },
}

impl ProviderConfig {
    /// Katapult configuration with the default host
    pub fn katapult(api_token: impl Into<String>) -> Self {
        ProviderConfig::Katapult {
            api_token: api_token.into(),
            host: None,
        }
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Katapult { api_token, host } => {
                if api_token.is_empty() {
                    return Err(crate::Error::config("Katapult API token cannot be empty"));
                }
                if let Some(host) = host
                    && !host.starts_with("https://")
                    && !host.starts_with("http://")
                {
                    return Err(crate::Error::config(format!(
                        "Katapult API host must use HTTP or HTTPS scheme. Got: {}",
                        host
                    )));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Katapult { .. } => "katapult",
        }
    }
}

// Hides the API token
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Katapult { host, .. } => f
                .debug_struct("Katapult")
                .field("api_token", &"<REDACTED>")
                .field("host", host)
                .finish(),
        }
    }
}

/// Outcome reported by cleanup when individual deletions fail
///
/// Either way every matching record is attempted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CleanupPolicy {
    /// Report success; failures are only logged and listed in the summary
    #[default]
    BestEffort,
    /// Return [`Error::PartialCleanup`](crate::Error::PartialCleanup) if any deletion failed
    Strict,
}

impl std::str::FromStr for CleanupPolicy {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "best-effort" | "best_effort" => Ok(CleanupPolicy::BestEffort),
            "strict" => Ok(CleanupPolicy::Strict),
            other => Err(crate::Error::config(format!(
                "Unknown cleanup policy '{}'. Valid: best-effort, strict",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_rejected() {
        let config = SolverConfig::new(ProviderConfig::katapult(""));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_host_scheme_checked() {
        let config = ProviderConfig::Katapult {
            api_token: "token".to_string(),
            host: Some("api.katapult.io".to_string()),
        };
        assert!(config.validate().is_err());

        let config = ProviderConfig::Katapult {
            api_token: "token".to_string(),
            host: Some("http://127.0.0.1:8080".to_string()),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_tagged_config() {
        let config: SolverConfig = serde_json::from_value(serde_json::json!({
            "provider": { "type": "katapult", "api_token": "secret" },
            "cleanup": "strict"
        }))
        .unwrap();

        assert_eq!(config.provider.type_name(), "katapult");
        assert_eq!(config.cleanup, CleanupPolicy::Strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cleanup_defaults_to_best_effort() {
        let config: SolverConfig = serde_json::from_value(serde_json::json!({
            "provider": { "type": "katapult", "api_token": "secret" }
        }))
        .unwrap();

        assert_eq!(config.cleanup, CleanupPolicy::BestEffort);
    }

    #[test]
    fn test_cleanup_policy_from_str() {
        assert_eq!("strict".parse::<CleanupPolicy>().unwrap(), CleanupPolicy::Strict);
        assert_eq!("Best-Effort".parse::<CleanupPolicy>().unwrap(), CleanupPolicy::BestEffort);
        assert!("sometimes".parse::<CleanupPolicy>().is_err());
    }

    #[test]
    fn test_token_not_exposed_in_debug() {
        let config = ProviderConfig::katapult("secret_token_12345");
        let debug_str = format!("{:?}", config);

        assert!(!debug_str.contains("secret_token_12345"));
        assert!(debug_str.contains("REDACTED"));
    }
}
