//! Endpoint Resolution
//!
//! Turns textual endpoint specifications into [`ResolvedAddressSet`] values.
//! The local resolvers here are all single-result; the set form exists
//! because the consumer-facing contract must support multi-result resolution
//! in general (a DNS-backed resolver sits behind the same
//! [`EndpointResolver`] trait in the binding layer).
//!
//! # Endpoint Grammar
//!
//! The scheme prefix doubles as the family hint:
//!
//! - `unix:<path>` - path taken verbatim; also accepts the full-URI form
//!   `unix://` followed by an absolute path (empty authority).
//! - `unix-abstract:<name>` - abstract-namespace name, no path semantics.
//! - `vsock:<cid>:<port>` - both fields base-10 unsigned 32-bit.
//!
//! Construction performs no filesystem validation; a `unix:` endpoint
//! resolves whether or not anything is bound at the path.

use std::path::Path;

use async_trait::async_trait;

use super::resolved::{AddressError, LocalAddress, ResolvedAddress};

/// Ordered result of resolving one endpoint specification
///
/// Every local resolver produces exactly one element; resolvers behind the
/// same trait may produce more (or none).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedAddressSet {
    addrs: Vec<ResolvedAddress>,
}

impl ResolvedAddressSet {
    /// Create a single-address set
    #[must_use]
    pub fn single(addr: ResolvedAddress) -> Self {
        Self { addrs: vec![addr] }
    }

    /// Number of addresses in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    /// Whether resolution produced no addresses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    /// The first (preferred) address, if any
    #[must_use]
    pub fn first(&self) -> Option<&ResolvedAddress> {
        self.addrs.first()
    }

    /// Iterate over the addresses in resolution order
    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedAddress> {
        self.addrs.iter()
    }
}

impl From<Vec<ResolvedAddress>> for ResolvedAddressSet {
    fn from(addrs: Vec<ResolvedAddress>) -> Self {
        Self { addrs }
    }
}

impl IntoIterator for ResolvedAddressSet {
    type Item = ResolvedAddress;
    type IntoIter = std::vec::IntoIter<ResolvedAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.addrs.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResolvedAddressSet {
    type Item = &'a ResolvedAddress;
    type IntoIter = std::slice::Iter<'a, ResolvedAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.addrs.iter()
    }
}

/// Resolve a path-based Unix domain endpoint
///
/// The path is copied verbatim - including a path that happens to carry the
/// abstract-socket encoding, which classification detects downstream. No
/// filesystem existence check is performed.
///
/// # Errors
///
/// Returns [`AddressError::Construction`] when the path does not fit the
/// native `sun_path` field (107 bytes plus its NUL terminator).
pub fn resolve_unix_path<P: AsRef<Path>>(path: P) -> Result<ResolvedAddressSet, AddressError> {
    let addr = LocalAddress::UnixPath(path.as_ref().to_path_buf()).encode()?;
    Ok(ResolvedAddressSet::single(addr))
}

/// Resolve an abstract-namespace Unix domain endpoint
///
/// The name is distinct from a path: no leading-separator semantics, no
/// filesystem entry. The encoded representation carries the wire-level
/// sentinel (leading NUL) that classification keys on.
///
/// # Errors
///
/// Returns [`AddressError::Construction`] when the name does not fit the
/// native `sun_path` field behind the sentinel byte.
pub fn resolve_unix_abstract(name: &str) -> Result<ResolvedAddressSet, AddressError> {
    let addr = LocalAddress::UnixAbstract(name.as_bytes().to_vec()).encode()?;
    Ok(ResolvedAddressSet::single(addr))
}

/// Resolve a VSOCK endpoint from its `cid:port` specification
///
/// # Errors
///
/// Returns [`AddressError::Parse`] when the separator is missing or either
/// field is empty, non-numeric, or out of `u32` range.
pub fn resolve_vsock(spec: &str) -> Result<ResolvedAddressSet, AddressError> {
    let (cid_text, port_text) = spec.split_once(':').ok_or_else(|| {
        AddressError::Parse(format!("vsock address `{spec}` is missing the `cid:port` separator"))
    })?;
    let cid = cid_text.parse::<u32>().map_err(|_| {
        AddressError::Parse(format!("vsock context id `{cid_text}` is not an unsigned integer"))
    })?;
    let port = port_text.parse::<u32>().map_err(|_| {
        AddressError::Parse(format!("vsock port `{port_text}` is not an unsigned integer"))
    })?;
    let addr = LocalAddress::Vsock { cid, port }.encode()?;
    Ok(ResolvedAddressSet::single(addr))
}

/// Resolve a scheme-prefixed endpoint specification
///
/// The scheme selects the family (see the module docs for the grammar);
/// everything after the first `:` is the family-specific address text.
///
/// # Errors
///
/// Returns [`AddressError::Parse`] for a missing or unsupported scheme, or
/// when the family-specific text is malformed; construction failures from
/// the per-family resolvers pass through unchanged.
pub fn resolve_endpoint(target: &str) -> Result<ResolvedAddressSet, AddressError> {
    let (scheme, rest) = target.split_once(':').ok_or_else(|| {
        AddressError::Parse(format!("endpoint `{target}` is missing a scheme prefix"))
    })?;
    match scheme {
        "unix" => resolve_unix_path(strip_unix_authority(rest)?),
        "unix-abstract" => resolve_unix_abstract(rest),
        "vsock" => resolve_vsock(rest),
        other => Err(AddressError::Parse(format!(
            "unsupported endpoint scheme `{other}`"
        ))),
    }
}

/// Reduce the `unix://` full-URI form to a plain path
///
/// `unix:///tmp/foo` carries an empty authority and the absolute path
/// `/tmp/foo`; a non-empty authority has no meaning for this family and is
/// rejected. Text without the `//` marker is already a plain path.
fn strip_unix_authority(rest: &str) -> Result<&str, AddressError> {
    match rest.strip_prefix("//") {
        None => Ok(rest),
        Some(tail) if tail.starts_with('/') => Ok(tail),
        Some(tail) => Err(AddressError::Parse(format!(
            "unix endpoint authority must be empty, got `{}`",
            tail.split('/').next().unwrap_or(tail)
        ))),
    }
}

/// Trait seam consumed by the transport-binding layer
///
/// Async purely for contract compatibility with slower resolvers (DNS) that
/// live behind the same seam; the local implementation never awaits.
#[async_trait]
pub trait EndpointResolver: Send + Sync {
    /// Resolve one textual endpoint specification into zero or more
    /// addresses.
    ///
    /// # Errors
    ///
    /// Implementations report malformed input as [`AddressError::Parse`] and
    /// representation overflow as [`AddressError::Construction`]; they never
    /// panic on malformed input.
    async fn resolve(&self, target: &str) -> Result<ResolvedAddressSet, AddressError>;
}

/// Resolver for the local-only families (Unix path, Unix abstract, VSOCK)
///
/// Stateless; a single shared instance serves any number of threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalResolver;

#[async_trait]
impl EndpointResolver for LocalResolver {
    async fn resolve(&self, target: &str) -> Result<ResolvedAddressSet, AddressError> {
        resolve_endpoint(target)
    }
}
