//! Portway Probe
//!
//! Diagnostic tool for portway endpoint specifications: resolves each
//! endpoint argument, prints its address family and canonical URI, and can
//! remove a stale socket file left behind by a dead process.
//!
//! # Usage
//!
//! ```bash
//! # Probe explicit endpoints
//! portway-probe unix:/run/portway/portway.sock vsock:3:5000
//!
//! # Probe the configured endpoint (config file + environment)
//! portway-probe
//!
//! # Remove a stale socket file before re-binding
//! portway-probe --cleanup unix:/run/portway/portway.sock
//!
//! # With verbose logging
//! RUST_LOG=debug portway-probe
//! ```
//!
//! # Environment Variables
//!
//! - `PORTWAY_ENDPOINT`: endpoint probed when no arguments are given
//! - `PORTWAY_CLEANUP_STALE`: "1" or "true" to clean as if `--cleanup`
//! - `RUST_LOG`: log level (trace, debug, info, warn, error)

use anyhow::Context;
use tracing::info;

use portway_core::addr::{resolve_endpoint, unlink_stale_socket, AddressFamily};
use portway_core::config::load_config;

const USAGE: &str = "\
Usage: portway-probe [--cleanup] [ENDPOINT ...]

Resolves each endpoint specification and prints its address family and
canonical URI. With no endpoints, probes the configured endpoint
(config file + PORTWAY_ENDPOINT).

Options:
  --cleanup    Remove a stale socket file for path-based Unix endpoints
  -h, --help   Show this help
";

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("portway_probe=info".parse()?)
                .add_directive("portway_core=info".parse()?),
        )
        .with_target(true)
        .init();

    let mut cleanup = false;
    let mut endpoints: Vec<String> = Vec::new();

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--cleanup" => cleanup = true,
            "-h" | "--help" => {
                print!("{USAGE}");
                return Ok(());
            }
            other if other.starts_with('-') => {
                anyhow::bail!("unknown flag `{other}` (see --help)");
            }
            _ => endpoints.push(arg),
        }
    }

    if endpoints.is_empty() {
        let config = load_config().context("failed to load configuration")?;
        config
            .validate()
            .context("configured endpoint is invalid")?;
        cleanup = cleanup || config.cleanup_stale;
        endpoints.push(config.effective_endpoint());
    }

    for endpoint in &endpoints {
        let set = resolve_endpoint(endpoint)
            .with_context(|| format!("failed to resolve `{endpoint}`"))?;

        for addr in &set {
            if cleanup && addr.family() == AddressFamily::UnixPath {
                info!(endpoint = %endpoint, "Cleaning stale socket file");
                unlink_stale_socket(addr);
            }

            let uri = addr.to_uri().unwrap_or_else(|| "(not renderable)".into());
            println!("{endpoint}\tfamily={}\turi={uri}", addr.family());
        }
    }

    Ok(())
}
