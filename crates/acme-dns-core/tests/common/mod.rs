//! Test doubles and common utilities for solver contract tests
//!
//! `MockDnsApi` keeps one zone's records in memory, counts calls and can be
//! told to fail specific operations.

#![allow(dead_code)]

use acme_dns_core::error::{Error, Result};
use acme_dns_core::traits::{CHALLENGE_TTL, DnsApi, Record, SolverObserver, TXT_RECORD_TYPE, Zone};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory DNS API for a single zone
///
/// Clones share state, so a test can keep one handle while the solver owns
/// another.
#[derive(Clone)]
pub struct MockDnsApi {
    zone: Zone,
    records: Arc<Mutex<Vec<Record>>>,
    /// Record IDs whose deletion fails
    failing_deletes: Arc<Mutex<HashSet<String>>>,
    /// Record IDs passed to delete_record(), in call order
    delete_attempts: Arc<Mutex<Vec<String>>>,
    zone_call_count: Arc<AtomicUsize>,
    list_call_count: Arc<AtomicUsize>,
    create_call_count: Arc<AtomicUsize>,
    next_id: Arc<AtomicUsize>,
    missing_zone: bool,
    fail_create: bool,
    fail_listing: bool,
}

impl MockDnsApi {
    pub fn new(zone_name: &str) -> Self {
        Self {
            zone: Zone {
                id: "dnszone_test".to_string(),
                name: zone_name.to_string(),
            },
            records: Arc::new(Mutex::new(Vec::new())),
            failing_deletes: Arc::new(Mutex::new(HashSet::new())),
            delete_attempts: Arc::new(Mutex::new(Vec::new())),
            zone_call_count: Arc::new(AtomicUsize::new(0)),
            list_call_count: Arc::new(AtomicUsize::new(0)),
            create_call_count: Arc::new(AtomicUsize::new(0)),
            next_id: Arc::new(AtomicUsize::new(1)),
            missing_zone: false,
            fail_create: false,
            fail_listing: false,
        }
    }

    /// Zone lookups answer with the provider's "zone not found" error
    pub fn with_missing_zone(mut self) -> Self {
        self.missing_zone = true;
        self
    }

    /// Record creation answers with a validation error
    pub fn with_failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Record listing answers with a transport error
    pub fn with_failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Seed a record and return its ID
    pub fn seed(&self, full_name: &str, record_type: &str, content: &str) -> String {
        let id = self.allocate_id();
        let name = full_name
            .strip_suffix(&format!(".{}", self.zone.name))
            .unwrap_or("@")
            .to_string();

        self.records.lock().unwrap().push(Record {
            id: id.clone(),
            name,
            full_name: full_name.to_string(),
            ttl: 300,
            record_type: record_type.to_string(),
            content: content.to_string(),
        });

        id
    }

    /// Make deletion of `record_id` fail
    pub fn fail_delete_of(&self, record_id: &str) {
        self.failing_deletes
            .lock()
            .unwrap()
            .insert(record_id.to_string());
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    pub fn record_ids(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.id).collect()
    }

    pub fn delete_attempts(&self) -> Vec<String> {
        self.delete_attempts.lock().unwrap().clone()
    }

    pub fn zone_call_count(&self) -> usize {
        self.zone_call_count.load(Ordering::SeqCst)
    }

    pub fn list_call_count(&self) -> usize {
        self.list_call_count.load(Ordering::SeqCst)
    }

    pub fn create_call_count(&self) -> usize {
        self.create_call_count.load(Ordering::SeqCst)
    }

    fn allocate_id(&self) -> String {
        format!("dnsrec_{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait::async_trait]
impl DnsApi for MockDnsApi {
    async fn zone(&self, name: &str) -> Result<Zone> {
        self.zone_call_count.fetch_add(1, Ordering::SeqCst);

        if self.missing_zone || name != self.zone.name {
            return Err(Error::api(
                404,
                "dns_zone_not_found",
                "No DNS zone was found matching any of the criteria provided in the arguments",
            ));
        }

        Ok(self.zone.clone())
    }

    async fn records(&self, zone: &Zone) -> Result<Vec<Record>> {
        self.list_call_count.fetch_add(1, Ordering::SeqCst);
        assert_eq!(zone.id, self.zone.id, "records listed for a different zone");

        if self.fail_listing {
            return Err(Error::transport("connection reset by peer"));
        }

        Ok(self.records())
    }

    async fn create_txt_record(&self, zone: &Zone, name: &str, content: &str) -> Result<Record> {
        self.create_call_count.fetch_add(1, Ordering::SeqCst);
        assert_eq!(zone.id, self.zone.id, "record created in a different zone");

        if self.fail_create {
            return Err(Error::api(
                422,
                "validation_error",
                "A validation error occurred with the object that was being created/updated/deleted",
            ));
        }

        let full_name = if name == "@" {
            zone.name.clone()
        } else {
            format!("{}.{}", name, zone.name)
        };

        let record = Record {
            id: self.allocate_id(),
            name: name.to_string(),
            full_name,
            ttl: CHALLENGE_TTL,
            record_type: TXT_RECORD_TYPE.to_string(),
            content: content.to_string(),
        };

        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn delete_record(&self, record: &Record) -> Result<()> {
        self.delete_attempts.lock().unwrap().push(record.id.clone());

        if self.failing_deletes.lock().unwrap().contains(&record.id) {
            return Err(Error::api(
                500,
                "internal_server_error",
                "An internal server error occurred",
            ));
        }

        self.records.lock().unwrap().retain(|r| r.id != record.id);
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Observer that keeps every message
#[derive(Clone, Default)]
pub struct RecordingObserver {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }
}

impl SolverObserver for RecordingObserver {
    fn record(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
