// # acme-dns-hook - ACME DNS-01 hook
//
// A thin wrapper around `acme_dns_core::Solver`: it reads its configuration
// from environment variables, performs exactly one solver action and exits.
// All DNS logic lives in acme-dns-core and acme-dns-katapult.
//
// ## Configuration
//
// ### Provider
// - `KATAPULT_API_TOKEN`: API token (required)
// - `KATAPULT_API_HOST`: API origin override (optional)
//
// ### Action
// - `ACME_DNS_ACTION`: set, cleanup or cleanup-all
// - `ACME_DNS_ZONE`: Zone name (e.g., example.com)
// - `ACME_DNS_RECORD`: Record name, relative or fully qualified
// - `ACME_DNS_VALUE`: Challenge value (required for set and cleanup)
//
// ### Behaviour
// - `ACME_DNS_CLEANUP_POLICY`: best-effort (default) or strict
// - `ACME_DNS_LOG_LEVEL`: trace, debug, info (default), warn, error
//
// ## Example
//
// ```bash
// export KATAPULT_API_TOKEN=your_token
// export ACME_DNS_ZONE=example.com
// export ACME_DNS_RECORD=_acme-challenge.example.com
// export ACME_DNS_VALUE=gfj9Xq...Rg85nM
//
// ACME_DNS_ACTION=set acme-dns-hook
// ACME_DNS_ACTION=cleanup acme-dns-hook
// ```

use acme_dns_core::{CleanupPolicy, ProviderConfig, ProviderRegistry, Solver, SolverConfig};
use anyhow::Result;
use std::env;
use std::process::ExitCode;
use std::str::FromStr;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for the hook
///
/// - 0: Action completed
/// - 1: Configuration error
/// - 2: Runtime error (provider or transport failure)
#[derive(Debug, Clone, Copy)]
enum HookExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<HookExitCode> for ExitCode {
    fn from(code: HookExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Solver action to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Set,
    Cleanup,
    CleanupAll,
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "set" => Ok(Action::Set),
            "cleanup" => Ok(Action::Cleanup),
            "cleanup-all" | "cleanup_all" => Ok(Action::CleanupAll),
            other => anyhow::bail!(
                "ACME_DNS_ACTION '{}' is not valid. Valid actions: set, cleanup, cleanup-all",
                other
            ),
        }
    }
}

/// Hook configuration
struct Config {
    action: Action,
    zone: String,
    record: String,
    value: Option<String>,
    api_token: String,
    api_host: Option<String>,
    cleanup_policy: CleanupPolicy,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let action = lookup("ACME_DNS_ACTION")
            .ok_or_else(|| anyhow::anyhow!("ACME_DNS_ACTION is required (set, cleanup, cleanup-all)"))?
            .parse()?;

        let cleanup_policy = match lookup("ACME_DNS_CLEANUP_POLICY") {
            Some(policy) => policy.parse()?,
            None => CleanupPolicy::default(),
        };

        Ok(Self {
            action,
            zone: lookup("ACME_DNS_ZONE").unwrap_or_default(),
            record: lookup("ACME_DNS_RECORD").unwrap_or_default(),
            value: lookup("ACME_DNS_VALUE"),
            api_token: lookup("KATAPULT_API_TOKEN").unwrap_or_default(),
            api_host: lookup("KATAPULT_API_HOST").filter(|host| !host.is_empty()),
            cleanup_policy,
            log_level: lookup("ACME_DNS_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.api_token.is_empty() {
            anyhow::bail!(
                "KATAPULT_API_TOKEN is required. \
                Set it via: export KATAPULT_API_TOKEN=your_token"
            );
        }

        validate_domain_name("ACME_DNS_ZONE", &self.zone)?;
        validate_domain_name("ACME_DNS_RECORD", &self.record)?;

        if matches!(self.action, Action::Set | Action::Cleanup)
            && self.value.as_ref().is_none_or(|v| v.is_empty())
        {
            anyhow::bail!("ACME_DNS_VALUE is required for ACME_DNS_ACTION=set and cleanup");
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "ACME_DNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        self.solver_config().validate()?;

        Ok(())
    }

    fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(ProviderConfig::Katapult {
            api_token: self.api_token.clone(),
            host: self.api_host.clone(),
        })
        .with_cleanup(self.cleanup_policy)
    }
}

/// Basic DNS name validation (RFC 1035 lengths, underscores allowed for
/// `_acme-challenge` labels, optional trailing dot)
fn validate_domain_name(var: &str, domain: &str) -> Result<()> {
    if domain.is_empty() {
        anyhow::bail!("{} is required", var);
    }

    let domain = domain.strip_suffix('.').unwrap_or(domain);

    if domain.len() > 253 {
        anyhow::bail!(
            "{} too long: {} chars (max 253). Got: {}",
            var,
            domain.len(),
            domain
        );
    }

    for label in domain.split('.') {
        if label.is_empty() {
            anyhow::bail!("{} has empty label: '{}'", var, domain);
        }

        if label.len() > 63 {
            anyhow::bail!(
                "{} label too long: {} chars (max 63). Label: '{}'",
                var,
                label.len(),
                label
            );
        }

        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            anyhow::bail!(
                "{} label contains invalid characters. Label: '{}'. \
                Valid: alphanumeric, hyphen and underscore only.",
                var,
                label
            );
        }

        if label.starts_with('-') || label.ends_with('-') {
            anyhow::bail!(
                "{} label cannot start or end with hyphen. Label: '{}'",
                var,
                label
            );
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return HookExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return HookExitCode::ConfigError.into();
    }

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return HookExitCode::ConfigError.into();
    }

    // Every call is sequential; a single-threaded runtime is enough
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return HookExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run(config).await {
            error!("ACME DNS hook failed: {}", e);
            HookExitCode::RuntimeError
        } else {
            HookExitCode::Success
        }
    });

    result.into()
}

/// Perform the configured action
async fn run(config: Config) -> Result<()> {
    let registry = ProviderRegistry::new();
    acme_dns_katapult::register(&registry);

    let solver = Solver::from_config(&registry, &config.solver_config())?;
    info!(
        "Running {:?} for {} in zone {} via {}",
        config.action,
        config.record,
        config.zone,
        solver.provider_name()
    );

    let value = config.value.as_deref().unwrap_or_default();

    match config.action {
        Action::Set => {
            let record = solver.set(&config.zone, &config.record, value).await?;
            info!("Challenge record published: {} ({})", record.full_name, record.id);
        }
        Action::Cleanup => {
            let summary = solver.cleanup(&config.zone, &config.record, value).await?;
            info!(
                "Cleanup finished: {} matched, {} deleted, {} failed",
                summary.matched,
                summary.deleted,
                summary.failures.len()
            );
        }
        Action::CleanupAll => {
            let summary = solver.cleanup_all(&config.zone, &config.record).await?;
            info!(
                "Cleanup finished: {} matched, {} deleted, {} failed",
                summary.matched,
                summary.deleted,
                summary.failures.len()
            );
        }
    }

    Ok(())
}
