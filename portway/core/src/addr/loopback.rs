//! Local Loopback Pair
//!
//! In-process peers (an embedded server and its client half, test
//! harnesses) skip endpoint resolution entirely and talk over a connected
//! Unix stream pair created through the platform socketpair facility.

use std::io;

use tokio::net::UnixStream;

/// Create two connected, already-paired Unix stream endpoints
///
/// The pair is created atomically; no filesystem entry and no address are
/// involved, so nothing here needs resolution or cleanup.
///
/// Must be called from within a Tokio runtime.
///
/// # Errors
///
/// Ordinary callers are expected never to handle failure here as a
/// normal-flow condition: an environment that cannot create a local socket
/// pair cannot run portway at all, and the returned [`io::Error`] should be
/// treated as unrecoverable (typically by propagating it straight out of
/// startup).
pub fn stream_pair() -> io::Result<(UnixStream, UnixStream)> {
    UnixStream::pair()
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    use super::*;

    #[tokio::test]
    async fn test_pair_is_connected_both_ways() {
        let (mut left, mut right) = stream_pair().unwrap();

        left.write_all(b"ping").await.unwrap();
        let mut buf = [0u8; 4];
        right.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"ping");

        right.write_all(b"pong").await.unwrap();
        left.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"pong");
    }

    #[tokio::test]
    async fn test_each_call_creates_an_independent_pair() {
        let (a, _a2) = stream_pair().unwrap();
        let (b, _b2) = stream_pair().unwrap();

        // Distinct pairs get distinct descriptors.
        use std::os::unix::io::AsRawFd;
        assert_ne!(a.as_raw_fd(), b.as_raw_fd());
    }
}
