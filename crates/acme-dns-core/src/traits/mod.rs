//! Core traits for the ACME DNS solver
//!
//! This module defines the abstract interfaces that implementations must follow.
//!
//! - [`DnsApi`]: Zone and record operations against a DNS provider's API
//! - [`SolverObserver`]: Write-only sink for solver progress messages

pub mod dns_api;
pub mod observer;

pub use dns_api::{CHALLENGE_TTL, DnsApi, DnsApiFactory, Record, RecordFilter, TXT_RECORD_TYPE, Zone, ZoneRef};
pub use observer::{SolverObserver, TracingObserver};
