//! Logging setup for consumers of this SDK (CLIs, example binaries).
//!
//! The core crates never log secrets (seeds, private keys); they log at
//! `debug`/`trace` for derivation indices and `warn` for recoverable
//! collaborator errors. This just wires a sensible default subscriber so a
//! binary embedding the SDK doesn't have to.
use tracing_subscriber::EnvFilter;

/// Installs a `tracing-subscriber` global subscriber driven by `RUST_LOG`,
/// defaulting to `info` when unset. Call once, near the start of `main`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
