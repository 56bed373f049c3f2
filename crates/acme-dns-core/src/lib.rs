// # acme-dns-core
//
// Core library for the ACME DNS-01 challenge solver.
//
// ## Architecture Overview
//
// - **DnsApi**: Trait over a DNS provider's zone/record API (zone lookup,
//   record listing, TXT creation, deletion)
// - **SolverObserver**: Write-only sink for progress and error messages
// - **Solver**: Turns ACME "set token" / "remove token" requests into
//   `DnsApi` calls
// - **ProviderRegistry**: Plugin-based registry for provider factories
//
// ## Design Principles
//
// 1. **Stateless**: Every operation re-queries the provider, nothing is cached
// 2. **Sequential**: One HTTP call at a time, no background tasks
// 3. **No retries**: The ACME collaborator decides whether to retry
// 4. **Library-First**: The hook binary is a thin wrapper around `Solver`

pub mod traits;
pub mod solver;
pub mod registry;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{DnsApi, DnsApiFactory, Record, RecordFilter, SolverObserver, TracingObserver, Zone, ZoneRef};
pub use solver::{CleanupFailure, CleanupSummary, Solver};
pub use registry::ProviderRegistry;
pub use config::{CleanupPolicy, ProviderConfig, SolverConfig};
pub use error::{Error, Result};
