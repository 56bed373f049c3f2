// # Katapult DNS API client
//
// This crate provides the Katapult implementation of `DnsApi` for the
// ACME DNS-01 solver.
//
// ## Behaviour
//
// - One HTTP request per `DnsApi` call, always authenticated with a bearer token
// - Only `200 OK` responses with a JSON content type count as success
// - Error envelopes (`{"error": {"code", "description"}}`) become `Error::Api`
// - NO retry logic, NO backoff, NO caching: the caller decides what to repeat
//
// ## Security Requirements
//
// - API token NEVER appears in logs or `Debug` output
// - Empty tokens are rejected at construction
//
// ## API Reference
//
// - Zone lookup: GET `/core/v1/dns_zones/_?dns_zone[name]=...`
// - List records: GET `/core/v1/dns_zones/_/records?dns_zone[id]=...`
// - Create record: POST `/core/v1/dns_zones/_/records`
// - Delete record: DELETE `/core/v1/dns_records/_?dns_record[id]=...`

mod api;
pub mod client;
pub mod model;

use acme_dns_core::config::ProviderConfig;
use acme_dns_core::traits::{DnsApi, DnsApiFactory};
use acme_dns_core::Result;

pub use client::{DEFAULT_HTTP_TIMEOUT, KatapultClient, Params};

/// Factory for creating Katapult clients
pub struct KatapultFactory;

impl DnsApiFactory for KatapultFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn DnsApi>> {
        config.validate()?;

        match config {
            ProviderConfig::Katapult { api_token, host } => {
                let client = match host {
                    Some(host) => {
                        tracing::debug!("Using Katapult API host override: {}", host);
                        KatapultClient::with_host(api_token.clone(), host.clone())?
                    }
                    None => KatapultClient::new(api_token.clone())?,
                };

                Ok(Box::new(client))
            }
        }
    }
}

/// Register the Katapult provider with a registry
///
/// # Example
///
/// ```rust
/// use acme_dns_core::ProviderRegistry;
///
/// let registry = ProviderRegistry::new();
/// acme_dns_katapult::register(&registry);
/// assert!(registry.has("katapult"));
/// ```
pub fn register(registry: &acme_dns_core::ProviderRegistry) {
    registry.register("katapult", Box::new(KatapultFactory));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_creation() {
        let factory = KatapultFactory;
        let config = ProviderConfig::Katapult {
            api_token: "test_token".to_string(),
            host: Some("http://127.0.0.1:8080".to_string()),
        };

        let api = factory.create(&config).unwrap();
        assert_eq!(api.provider_name(), "katapult");
    }

    #[test]
    fn test_factory_missing_token() {
        let factory = KatapultFactory;
        let config = ProviderConfig::katapult("");

        assert!(factory.create(&config).is_err());
    }

    #[test]
    fn test_registered_provider_builds_from_config() {
        let registry = acme_dns_core::ProviderRegistry::new();
        register(&registry);

        let api = registry.create(&ProviderConfig::katapult("token")).unwrap();
        assert_eq!(api.provider_name(), "katapult");
    }
}
