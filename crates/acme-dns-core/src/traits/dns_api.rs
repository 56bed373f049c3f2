// # DNS API Trait
//
// Defines the interface the solver uses to talk to a DNS provider.
//
// ## Implementations
//
// - Katapult: `acme-dns-katapult` crate
//
// ## Usage
//
// ```rust,ignore
// use acme_dns_core::{DnsApi, RecordFilter};
//
// let zone = api.zone("example.com").await?;
// let record = api.create_txt_record(&zone, "_acme-challenge", "token").await?;
//
// let filter = RecordFilter::txt("_acme-challenge.example.com");
// for record in api.matching_records(&zone, &filter).await? {
//     api.delete_record(&record).await?;
// }
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Record type used for every record the solver creates or removes
pub const TXT_RECORD_TYPE: &str = "TXT";

/// TTL (in seconds) given to challenge records
pub const CHALLENGE_TTL: u32 = 60;

/// A DNS zone managed by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Provider-assigned zone ID
    pub id: String,
    /// Zone name (e.g., "example.com")
    pub name: String,
}

impl Zone {
    /// Reference to this zone by its ID
    pub fn by_id(&self) -> ZoneRef {
        ZoneRef::Id(self.id.clone())
    }
}

/// Lookup of a zone by ID or by name
///
/// Serializes to `{"id": ...}` or `{"name": ...}`, so exactly one of the
/// two is ever populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneRef {
    /// Look the zone up by provider ID
    Id(String),
    /// Look the zone up by name
    Name(String),
}

impl ZoneRef {
    /// Name of the populated field ("id" or "name")
    pub fn field(&self) -> &'static str {
        match self {
            ZoneRef::Id(_) => "id",
            ZoneRef::Name(_) => "name",
        }
    }

    /// Value of the populated field
    pub fn value(&self) -> &str {
        match self {
            ZoneRef::Id(value) | ZoneRef::Name(value) => value,
        }
    }
}

/// A DNS resource record as reported by the provider
///
/// Every field accepts `null` or absence and falls back to its default, so
/// one malformed record does not fail a whole zone listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Provider-assigned record ID
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Record name relative to the zone
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Fully-qualified record name (name + zone suffix)
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    /// Time-to-live in seconds
    #[serde(default, deserialize_with = "null_as_default")]
    pub ttl: u32,
    /// Record type (always "TXT" for records this crate creates)
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub record_type: String,
    /// Record content
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Predicate selecting records by full name, type and optionally content
///
/// Names compare case-insensitively and ignore a trailing dot. Content
/// compares exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    full_name: String,
    record_type: String,
    content: Option<String>,
}

impl RecordFilter {
    /// Match TXT records with the given fully-qualified name, any content
    pub fn txt(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            record_type: TXT_RECORD_TYPE.to_string(),
            content: None,
        }
    }

    /// Additionally require the record content to equal `content`
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Fully-qualified name this filter matches
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Check whether `record` is selected by this filter
    pub fn matches(&self, record: &Record) -> bool {
        let wanted = self.full_name.trim_end_matches('.');
        let actual = record.full_name.trim_end_matches('.');

        if !actual.eq_ignore_ascii_case(wanted) {
            return false;
        }

        if !record.record_type.eq_ignore_ascii_case(&self.record_type) {
            return false;
        }

        match self.content {
            Some(ref content) => record.content == *content,
            None => true,
        }
    }
}

/// Trait for DNS provider API clients
///
/// Every method performs its provider calls sequentially and holds no
/// state between calls. Implementations must not retry: a failed request
/// is returned to the caller as is.
#[async_trait]
pub trait DnsApi: Send + Sync {
    /// Look up a zone by name
    ///
    /// # Returns
    ///
    /// - `Ok(Zone)`: The zone as reported by the provider
    /// - `Err(Error)`: Provider or transport error, including "zone not found"
    async fn zone(&self, name: &str) -> Result<Zone, crate::Error>;

    /// List every record in the zone, in the order the provider returns them
    async fn records(&self, zone: &Zone) -> Result<Vec<Record>, crate::Error>;

    /// List the records in the zone selected by `filter`
    ///
    /// An empty result is not an error.
    async fn matching_records(
        &self,
        zone: &Zone,
        filter: &RecordFilter,
    ) -> Result<Vec<Record>, crate::Error> {
        let records = self.records(zone).await?;
        Ok(records
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect())
    }

    /// Create a TXT record with [`CHALLENGE_TTL`]
    ///
    /// # Parameters
    ///
    /// - `zone`: Zone to create the record in
    /// - `name`: Record name relative to the zone (e.g., "_acme-challenge")
    /// - `content`: TXT content
    ///
    /// # Returns
    ///
    /// The created record, including the provider-assigned ID and full name
    async fn create_txt_record(
        &self,
        zone: &Zone,
        name: &str,
        content: &str,
    ) -> Result<Record, crate::Error>;

    /// Delete a record by its ID
    async fn delete_record(&self, record: &Record) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing DNS API clients from configuration
pub trait DnsApiFactory: Send + Sync {
    /// Create a DnsApi instance from configuration
    fn create(
        &self,
        config: &crate::config::ProviderConfig,
    ) -> Result<Box<dyn DnsApi>, crate::Error>;
}
