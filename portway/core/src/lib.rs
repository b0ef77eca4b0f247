//! Portway Core - Local Endpoint Addressing for RPC Transports
//!
//! This crate is the address subsystem of portway: it turns textual endpoint
//! specifications for local-only transports into bindable/connectable socket
//! address values, and manages the filesystem lifecycle of path-based Unix
//! sockets. It is a leaf: the I/O event loop, the RPC call stack, and
//! DNS/IP resolution all live above it and only consume the value types
//! defined here.
//!
//! # Supported Families
//!
//! - **Unix domain, path-based**: `unix:/run/portway/portway.sock`
//! - **Unix domain, abstract**: `unix-abstract:portway-control`
//! - **VSOCK** (guest/host): `vsock:3:5000`
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                 Transport Binding Layer                 │
//! │        (listeners, connectors - not in this crate)      │
//! └───────────────┬───────────────────────┬────────────────┘
//!                 │                       │
//!          endpoint string          ResolvedAddress
//!                 │                       │
//! ┌───────────────▼───────────────────────▼────────────────┐
//! │                     PORTWAY CORE                        │
//! │  ┌──────────┐  ┌───────────┐  ┌─────────┐  ┌─────────┐ │
//! │  │ Resolver │  │ Classify/ │  │ Cleanup │  │Loopback │ │
//! │  │ (parse)  │  │ URI render│  │ (stale) │  │ (pair)  │ │
//! │  └──────────┘  └───────────┘  └─────────┘  └─────────┘ │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ResolvedAddress`]: fixed-capacity native socket address value
//! - [`LocalAddress`]: decoded per-family view of a resolved address
//! - [`AddressFamily`]: classification result (`UnixPath`, `UnixAbstract`,
//!   `Vsock`, `Other`)
//! - [`ResolvedAddressSet`]: ordered multi-result resolution contract
//! - [`EndpointResolver`]: the trait seam the binding layer consumes
//!
//! # Wire Compatibility
//!
//! The three URI prefixes (`unix:`, `unix-abstract:`, `vsock:`) and the
//! abstract-socket sentinel (first `sun_path` byte NUL, second non-NUL) are
//! shared with peer implementations and are reproduced exactly; see
//! [`addr::resolved`].
//!
//! # Platform
//!
//! Unix-like systems only. VSOCK addressing follows the Linux
//! `sockaddr_vm` layout.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod addr;
pub mod config;

// Re-exports for convenience
pub use addr::{
    resolve_endpoint, resolve_unix_abstract, resolve_unix_path, resolve_vsock,
    unlink_stale_socket, AddressError, AddressFamily, EndpointResolver, LocalAddress,
    LocalResolver, ResolvedAddress, ResolvedAddressSet,
};
pub use config::{
    default_config_path, default_socket_path, load_config, load_config_from_path, ConfigError,
    EndpointConfig,
};
