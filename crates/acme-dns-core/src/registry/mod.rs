//! Plugin-based provider registry
//!
//! The registry allows DNS API clients to be registered by provider type
//! name and built from [`ProviderConfig`] at runtime.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use acme_dns_core::{ProviderConfig, ProviderRegistry};
//!
//! let registry = ProviderRegistry::new();
//! acme_dns_katapult::register(&registry);
//!
//! let api = registry.create(&ProviderConfig::katapult(token))?;
//! ```

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::traits::{DnsApi, DnsApiFactory};
use std::collections::HashMap;
use std::sync::RwLock;

/// Registry of DNS API factories keyed by provider type name
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: RwLock<HashMap<String, Box<dyn DnsApiFactory>>>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a DNS API factory
    ///
    /// # Parameters
    ///
    /// - `name`: Provider type name (e.g., "katapult")
    /// - `factory`: Factory object for creating client instances
    pub fn register(&self, name: impl Into<String>, factory: Box<dyn DnsApiFactory>) {
        let name = name.into();
        let mut providers = self
            .providers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        providers.insert(name, factory);
    }

    /// Create a DNS API client from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn DnsApi>)`: Created client
    /// - `Err(Error)`: If the provider type is not registered or creation fails
    pub fn create(&self, config: &ProviderConfig) -> Result<Box<dyn DnsApi>> {
        let provider_type = config.type_name();
        let providers = self
            .providers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let factory = providers
            .get(provider_type)
            .ok_or_else(|| Error::config(format!("Unknown provider type: {}", provider_type)))?;

        factory.create(config)
    }

    /// List all registered provider types
    pub fn list(&self) -> Vec<String> {
        let providers = self
            .providers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        providers.keys().cloned().collect()
    }

    /// Check if a provider type is registered
    pub fn has(&self, name: &str) -> bool {
        let providers = self
            .providers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        providers.contains_key(name)
    }
}
