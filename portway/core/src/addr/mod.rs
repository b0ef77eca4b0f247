//! Endpoint Address Resolution
//!
//! Resolution, classification, URI rendering, and filesystem lifecycle for
//! the local-only address families portway binds to:
//!
//! - `UnixPath`: filesystem Unix domain sockets
//! - `UnixAbstract`: abstract-namespace Unix domain sockets (Linux)
//! - `Vsock`: hypervisor guest/host sockets
//!
//! Everything here operates on the same small value type,
//! [`ResolvedAddress`], and shares one family-discrimination rule (the
//! native family tag plus the abstract-socket sentinel), so construction,
//! classification, rendering, and cleanup live in a single module tree.
//!
//! # Concurrency
//!
//! The resolver is stateless. Every operation is a pure function over its
//! arguments (or, for [`unlink_stale_socket`], a side effect local to one
//! path), safe to call from any number of threads without synchronization.
//! The stale-socket removal is inherently racy against other processes
//! touching the same path and is documented as best-effort.

pub mod cleanup;
pub mod loopback;
pub mod resolved;
pub mod resolver;

// Re-exports for convenience
pub use cleanup::unlink_stale_socket;
pub use loopback::stream_pair;
pub use resolved::{
    AddressError, AddressFamily, LocalAddress, ResolvedAddress, MAX_SOCKADDR_LEN,
};
pub use resolver::{
    resolve_endpoint, resolve_unix_abstract, resolve_unix_path, resolve_vsock, EndpointResolver,
    LocalResolver, ResolvedAddressSet,
};
