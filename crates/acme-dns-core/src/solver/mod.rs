//! ACME DNS-01 solver
//!
//! The Solver turns the three requests an ACME client makes during DNS-01
//! validation into [`DnsApi`] calls:
//!
//! ```text
//! set(zone, name, value)      zone lookup ─► create TXT
//! cleanup(zone, name, value)  zone lookup ─► list + filter(name, value) ─► delete each
//! cleanup_all(zone, name)     zone lookup ─► list + filter(name)        ─► delete each
//! ```
//!
//! ## Failure Policy
//!
//! - Any failure before the delete loop aborts the operation and is returned
//! - Inside the delete loop a failed deletion is reported and the loop
//!   continues; [`CleanupPolicy`] decides whether the aggregate result is
//!   an error
//! - Nothing is retried and nothing created by a failed `set` is rolled back

pub mod names;

use crate::config::{CleanupPolicy, SolverConfig};
use crate::error::{Error, Result};
use crate::registry::ProviderRegistry;
use crate::traits::{DnsApi, Record, RecordFilter, SolverObserver, TracingObserver, Zone};

/// A record that cleanup matched but could not delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupFailure {
    /// ID of the record
    pub record_id: String,
    /// Fully-qualified record name
    pub full_name: String,
    /// Rendered error
    pub error: String,
}

/// Outcome of a cleanup operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupSummary {
    /// Records selected by the filter
    pub matched: usize,
    /// Records successfully deleted
    pub deleted: usize,
    /// Records whose deletion failed, in attempt order
    pub failures: Vec<CleanupFailure>,
}

impl CleanupSummary {
    /// `true` when every matched record was deleted
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// DNS-01 challenge solver
///
/// Holds no DNS state: every call resolves the zone afresh and threads the
/// resolved [`Zone`] through the calls that follow.
pub struct Solver {
    api: Box<dyn DnsApi>,
    observer: Box<dyn SolverObserver>,
    cleanup_policy: CleanupPolicy,
}

impl Solver {
    /// Create a solver over `api`, reporting to [`TracingObserver`]
    pub fn new(api: Box<dyn DnsApi>) -> Self {
        Self {
            api,
            observer: Box::new(TracingObserver),
            cleanup_policy: CleanupPolicy::default(),
        }
    }

    /// Build a solver from configuration using the registered providers
    pub fn from_config(registry: &ProviderRegistry, config: &SolverConfig) -> Result<Self> {
        config.validate()?;
        let api = registry.create(&config.provider)?;
        Ok(Self::new(api).with_cleanup_policy(config.cleanup))
    }

    /// Replace the observer
    pub fn with_observer(mut self, observer: impl SolverObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Set the cleanup policy
    pub fn with_cleanup_policy(mut self, policy: CleanupPolicy) -> Self {
        self.cleanup_policy = policy;
        self
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &'static str {
        self.api.provider_name()
    }

    /// Publish a challenge value as a TXT record
    ///
    /// `record_name` may be relative to the zone or fully qualified.
    ///
    /// # Returns
    ///
    /// The created record, including its provider ID and full name
    pub async fn set(&self, zone_name: &str, record_name: &str, value: &str) -> Result<Record> {
        require_name(record_name, "record name")?;
        let zone = self.resolve_zone(zone_name).await?;
        let name = names::relative_to(record_name, &zone.name);

        match self.api.create_txt_record(&zone, &name, value).await {
            Ok(record) => {
                self.note(format!("created new record {} ({})", record.full_name, record.id));
                Ok(record)
            }
            Err(e) => {
                self.note(format!("failed to create TXT record {} ({})", record_name, e));
                Err(e)
            }
        }
    }

    /// Remove the TXT records at `record_name` holding exactly `value`
    ///
    /// Other challenge values at the same name are left alone.
    pub async fn cleanup(
        &self,
        zone_name: &str,
        record_name: &str,
        value: &str,
    ) -> Result<CleanupSummary> {
        require_name(record_name, "record name")?;
        let zone = self.resolve_zone(zone_name).await?;
        let filter = RecordFilter::txt(names::qualify(record_name, &zone.name)).with_content(value);

        self.delete_matching(&zone, &filter).await
    }

    /// Remove every TXT record at `record_name`, whatever its content
    pub async fn cleanup_all(&self, zone_name: &str, record_name: &str) -> Result<CleanupSummary> {
        require_name(record_name, "record name")?;
        let zone = self.resolve_zone(zone_name).await?;
        let filter = RecordFilter::txt(names::qualify(record_name, &zone.name));

        self.delete_matching(&zone, &filter).await
    }

    async fn resolve_zone(&self, zone_name: &str) -> Result<Zone> {
        require_name(zone_name, "zone name")?;

        match self.api.zone(zone_name).await {
            Ok(zone) => {
                self.note(format!("got zone {} with id {}", zone.name, zone.id));
                Ok(zone)
            }
            Err(e) => {
                self.note(format!("failed to find DNS zone with name {} ({})", zone_name, e));
                Err(e)
            }
        }
    }

    async fn delete_matching(&self, zone: &Zone, filter: &RecordFilter) -> Result<CleanupSummary> {
        let records = match self.api.matching_records(zone, filter).await {
            Ok(records) => records,
            Err(e) => {
                self.note(format!(
                    "failed to list records matching {} in zone {} ({})",
                    filter.full_name(),
                    zone.name,
                    e
                ));
                return Err(e);
            }
        };

        let mut summary = CleanupSummary {
            matched: records.len(),
            ..CleanupSummary::default()
        };

        if records.is_empty() {
            self.note(format!(
                "no records found matching record {} in zone {} ({})",
                filter.full_name(),
                zone.name,
                zone.id
            ));
            return Ok(summary);
        }

        for record in &records {
            self.note(format!("deleting record {} ({})", record.full_name, record.id));

            match self.api.delete_record(record).await {
                Ok(()) => summary.deleted += 1,
                Err(e) => {
                    tracing::warn!(
                        target: "acme_dns::solver",
                        "Deletion of {} ({}) failed, continuing: {}",
                        record.full_name,
                        record.id,
                        e
                    );
                    self.note(format!("failed to delete record {} ({})", record.id, e));
                    summary.failures.push(CleanupFailure {
                        record_id: record.id.clone(),
                        full_name: record.full_name.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        if !summary.is_complete() && self.cleanup_policy == CleanupPolicy::Strict {
            return Err(Error::PartialCleanup {
                failed: summary.failures.len(),
                matched: summary.matched,
            });
        }

        Ok(summary)
    }

    fn note(&self, message: String) {
        self.observer.record(&message);
    }
}

fn require_name(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_input(format!("{} cannot be empty", what)));
    }
    Ok(())
}
