//! Resolved Address Value Type
//!
//! [`ResolvedAddress`] is the fixed-capacity native socket address value that
//! flows between the resolver and the transport-binding layer. It carries the
//! raw bytes of the platform representation (`sockaddr_un` / `sockaddr_vm`)
//! so that peers reading those bytes - or parsing the URIs rendered from
//! them - see exactly the conventional encoding.
//!
//! [`LocalAddress`] is the decoded, per-family view. Production code never
//! reinterprets the raw buffer in place: encoding and decoding go through
//! explicit byte-slice arithmetic in this module, and the rest of the crate
//! works with the typed variants.
//!
//! # Family Discrimination
//!
//! The first two bytes of every resolved address hold the native
//! `sa_family_t` discriminant. For `AF_UNIX`, path-based and abstract
//! sockets are told apart by the wire-level sentinel shared with peer
//! implementations: the first `sun_path` byte is NUL and the second is
//! non-NUL for an abstract name. Unknown discriminants classify as
//! [`AddressFamily::Other`], which is not an error.
//!
//! # Canonical URIs
//!
//! | Family         | URI form                                     |
//! |----------------|----------------------------------------------|
//! | `UnixPath`     | `unix:<path>` (verbatim, no escaping)        |
//! | `UnixAbstract` | `unix-abstract:<name>`                       |
//! | `Vsock`        | `vsock:<cid>:<port>` (base-10 unsigned)      |
//! | `Other`        | not renderable (`None`)                      |

use std::ffi::OsStr;
use std::fmt;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

use thiserror::Error;

/// Capacity of a [`ResolvedAddress`] buffer, in bytes.
///
/// Large enough for the biggest native representation this subsystem (or a
/// generic resolver feeding it) produces; `sockaddr_un` at 110 bytes is the
/// largest of the local families.
pub const MAX_SOCKADDR_LEN: usize = 128;

/// Size of the native `sa_family_t` discriminant.
const FAMILY_LEN: usize = 2;

/// Size of the `sun_path` field of `sockaddr_un`.
const SUN_PATH_LEN: usize = 108;

/// Logical length of a path-based Unix address: the full `sockaddr_un`.
const UNIX_ADDR_LEN: usize = FAMILY_LEN + SUN_PATH_LEN;

/// Longest permitted socket path: `sun_path` minus its NUL terminator.
pub(crate) const MAX_UNIX_PATH_LEN: usize = SUN_PATH_LEN - 1;

/// Longest permitted abstract name: `sun_path` minus the leading NUL.
pub(crate) const MAX_ABSTRACT_NAME_LEN: usize = SUN_PATH_LEN - 1;

/// Logical length of a VSOCK address: the full `sockaddr_vm`.
const VSOCK_ADDR_LEN: usize = 16;

const AF_UNIX: u16 = libc::AF_UNIX as u16;
const AF_VSOCK: u16 = libc::AF_VSOCK as u16;

/// Errors produced while resolving or constructing addresses
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// Malformed textual input (bad scheme, bad VSOCK syntax, empty field)
    #[error("invalid endpoint address: {0}")]
    Parse(String),
    /// Well-formed input that does not fit the fixed native representation
    #[error("address does not fit the native socket representation: {0}")]
    Construction(String),
}

/// Address family of a resolved address
///
/// Classification is total: any discriminant this subsystem does not handle
/// maps to `Other`, which callers treat as "opaque to portway", never as an
/// error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    /// Path-based Unix domain socket
    UnixPath,
    /// Abstract-namespace Unix domain socket
    UnixAbstract,
    /// VSOCK (hypervisor guest/host) socket
    Vsock,
    /// Any family not handled by this subsystem
    Other,
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnixPath => write!(f, "unix-path"),
            Self::UnixAbstract => write!(f, "unix-abstract"),
            Self::Vsock => write!(f, "vsock"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A resolved socket address in its native byte representation
///
/// Value type: freely copyable, equality over the logical bytes, no identity
/// beyond them. The buffer past `len` is always zero, which makes reads of
/// the fixed-width fields equivalent to reads from the zero-initialized
/// native structs; a buffer shorter than any field it is inspected for
/// therefore yields zeros rather than garbage (defensive fallback, see
/// [`ResolvedAddress::family`]).
#[derive(Clone, Copy)]
pub struct ResolvedAddress {
    bytes: [u8; MAX_SOCKADDR_LEN],
    len: usize,
}

impl ResolvedAddress {
    /// Wrap raw native socket address bytes
    ///
    /// Accepts any byte string up to [`MAX_SOCKADDR_LEN`]; the value may
    /// come from a resolver outside this subsystem (a kernel `accept`, a
    /// DNS-backed resolver) and classify as [`AddressFamily::Other`].
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::Construction`] if `raw` exceeds the buffer
    /// capacity.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, AddressError> {
        if raw.len() > MAX_SOCKADDR_LEN {
            return Err(AddressError::Construction(format!(
                "resolved address is {} bytes; capacity is {MAX_SOCKADDR_LEN}",
                raw.len()
            )));
        }
        let mut bytes = [0u8; MAX_SOCKADDR_LEN];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Self {
            bytes,
            len: raw.len(),
        })
    }

    /// The logical bytes of the native representation
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Logical length of the native representation
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the address carries no bytes at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Classify the address family
    ///
    /// Determined purely from the family discriminant plus, for `AF_UNIX`,
    /// the abstract-socket sentinel. Never fails: a buffer too short to hold
    /// the discriminant, or an unrecognized discriminant, is `Other`.
    #[must_use]
    pub fn family(&self) -> AddressFamily {
        if self.len < FAMILY_LEN {
            return AddressFamily::Other;
        }
        match u16::from_ne_bytes([self.bytes[0], self.bytes[1]]) {
            AF_UNIX => {
                // Sentinel rule: sun_path[0] == NUL and sun_path[1] != NUL.
                // The zeroed tail makes these reads match the zero-filled
                // native struct even when len < 4.
                if self.bytes[FAMILY_LEN] == 0 && self.bytes[FAMILY_LEN + 1] != 0 {
                    AddressFamily::UnixAbstract
                } else {
                    AddressFamily::UnixPath
                }
            }
            AF_VSOCK => AddressFamily::Vsock,
            _ => AddressFamily::Other,
        }
    }

    /// Render the canonical URI for this address
    ///
    /// Returns `None` when the family is not one this subsystem renders;
    /// callers treat that as "not renderable", not as an error.
    #[must_use]
    pub fn to_uri(&self) -> Option<String> {
        LocalAddress::from_resolved(self).map(|addr| addr.to_string())
    }
}

impl PartialEq for ResolvedAddress {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for ResolvedAddress {}

impl fmt::Debug for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedAddress")
            .field("family", &self.family())
            .field("len", &self.len)
            .field("uri", &self.to_uri())
            .finish()
    }
}

/// Decoded view of a [`ResolvedAddress`] for the families portway owns
///
/// Constructed only by the resolver operations and by
/// [`LocalAddress::from_resolved`]; its [`fmt::Display`] output is the
/// canonical URI form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LocalAddress {
    /// Path-based Unix domain socket
    UnixPath(PathBuf),
    /// Abstract-namespace Unix domain socket; the name is raw bytes and is
    /// rendered lossily when it is not UTF-8
    UnixAbstract(Vec<u8>),
    /// VSOCK socket
    Vsock {
        /// Context identifier of the peer (host/guest)
        cid: u32,
        /// Port within the context
        port: u32,
    },
}

impl LocalAddress {
    /// Decode a resolved address into its per-family view
    ///
    /// Returns `None` for [`AddressFamily::Other`].
    #[must_use]
    pub fn from_resolved(addr: &ResolvedAddress) -> Option<Self> {
        match addr.family() {
            AddressFamily::UnixPath => {
                let raw = &addr.bytes[FAMILY_LEN..addr.len];
                // The native encoding NUL-terminates the path inside the
                // fixed-size field; stop at the terminator when present.
                let path = match raw.iter().position(|&b| b == 0) {
                    Some(end) => &raw[..end],
                    None => raw,
                };
                Some(Self::UnixPath(PathBuf::from(
                    OsStr::from_bytes(path).to_owned(),
                )))
            }
            AddressFamily::UnixAbstract => {
                // Name length is the logical length minus the family tag
                // minus the sentinel NUL.
                let name = addr.bytes[FAMILY_LEN + 1..addr.len].to_vec();
                Some(Self::UnixAbstract(name))
            }
            AddressFamily::Vsock => {
                let port = u32::from_ne_bytes([
                    addr.bytes[4],
                    addr.bytes[5],
                    addr.bytes[6],
                    addr.bytes[7],
                ]);
                let cid = u32::from_ne_bytes([
                    addr.bytes[8],
                    addr.bytes[9],
                    addr.bytes[10],
                    addr.bytes[11],
                ]);
                Some(Self::Vsock { cid, port })
            }
            AddressFamily::Other => None,
        }
    }

    /// Encode into the native byte representation
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::Construction`] when a path or abstract name
    /// does not fit the fixed-size `sun_path` field.
    pub fn encode(&self) -> Result<ResolvedAddress, AddressError> {
        let mut bytes = [0u8; MAX_SOCKADDR_LEN];
        match self {
            Self::UnixPath(path) => {
                let raw = path.as_os_str().as_bytes();
                if raw.len() > MAX_UNIX_PATH_LEN {
                    return Err(AddressError::Construction(format!(
                        "unix socket path is {} bytes; the native limit is {MAX_UNIX_PATH_LEN}",
                        raw.len()
                    )));
                }
                bytes[..FAMILY_LEN].copy_from_slice(&AF_UNIX.to_ne_bytes());
                bytes[FAMILY_LEN..FAMILY_LEN + raw.len()].copy_from_slice(raw);
                Ok(ResolvedAddress {
                    bytes,
                    len: UNIX_ADDR_LEN,
                })
            }
            Self::UnixAbstract(name) => {
                if name.len() > MAX_ABSTRACT_NAME_LEN {
                    return Err(AddressError::Construction(format!(
                        "abstract socket name is {} bytes; the native limit is {MAX_ABSTRACT_NAME_LEN}",
                        name.len()
                    )));
                }
                bytes[..FAMILY_LEN].copy_from_slice(&AF_UNIX.to_ne_bytes());
                // bytes[FAMILY_LEN] stays NUL: the abstract sentinel.
                bytes[FAMILY_LEN + 1..FAMILY_LEN + 1 + name.len()].copy_from_slice(name);
                Ok(ResolvedAddress {
                    bytes,
                    len: FAMILY_LEN + 1 + name.len(),
                })
            }
            Self::Vsock { cid, port } => {
                bytes[..FAMILY_LEN].copy_from_slice(&AF_VSOCK.to_ne_bytes());
                // svm_reserved1 stays zero; port and cid are host byte order
                // per the Linux vm_sockets layout.
                bytes[4..8].copy_from_slice(&port.to_ne_bytes());
                bytes[8..12].copy_from_slice(&cid.to_ne_bytes());
                Ok(ResolvedAddress {
                    bytes,
                    len: VSOCK_ADDR_LEN,
                })
            }
        }
    }

    /// The family this variant encodes to
    #[must_use]
    pub fn family(&self) -> AddressFamily {
        match self {
            Self::UnixPath(_) => AddressFamily::UnixPath,
            Self::UnixAbstract(name) => {
                // An empty or NUL-leading name fails the sentinel on the
                // wire and classifies as a path there; report what the
                // encoded bytes will say.
                if name.first().is_some_and(|&b| b != 0) {
                    AddressFamily::UnixAbstract
                } else {
                    AddressFamily::UnixPath
                }
            }
            Self::Vsock { .. } => AddressFamily::Vsock,
        }
    }
}

impl fmt::Display for LocalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnixPath(path) => write!(f, "unix:{}", path.display()),
            Self::UnixAbstract(name) => {
                write!(f, "unix-abstract:{}", String::from_utf8_lossy(name))
            }
            Self::Vsock { cid, port } => write!(f, "vsock:{cid}:{port}"),
        }
    }
}
