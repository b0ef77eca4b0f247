//! Integration tests for the endpoint address lifecycle
//!
//! These tests exercise the subsystem the way the binding layer uses it:
//! resolve a textual endpoint, classify it, render it back, and clean the
//! filesystem before a rebind. Filesystem cases run against real sockets in
//! a temporary directory.

use std::os::unix::net::UnixListener;

use tempfile::TempDir;

use portway_core::addr::{
    resolve_endpoint, unlink_stale_socket, AddressFamily, EndpointResolver, LocalResolver,
};
use portway_core::config::load_config_from_path;

#[test]
fn test_stale_socket_lifecycle() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("portway.sock");
    let endpoint = format!("unix:{}", path.display());

    // First bind, then the process "dies" leaving the entry behind.
    let listener = UnixListener::bind(&path).unwrap();
    drop(listener);
    assert!(path.exists());

    // A fresh bind at the same path fails until the entry is gone.
    assert!(UnixListener::bind(&path).is_err());

    let set = resolve_endpoint(&endpoint).unwrap();
    let addr = set.first().unwrap();
    assert_eq!(addr.family(), AddressFamily::UnixPath);

    unlink_stale_socket(addr);
    assert!(!path.exists());

    // Rebind now succeeds.
    let rebound = UnixListener::bind(&path).unwrap();
    drop(rebound);
}

#[test]
fn test_canonical_uri_round_trips() {
    for spec in ["unix:/tmp/foo", "unix-abstract:my-sock", "vsock:3:5000"] {
        let set = resolve_endpoint(spec).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.first().unwrap().to_uri().unwrap(), spec);
    }

    // The full-URI form canonicalizes to the plain-path form.
    let set = resolve_endpoint("unix:///tmp/foo").unwrap();
    assert_eq!(set.first().unwrap().to_uri().unwrap(), "unix:/tmp/foo");
}

#[test]
fn test_classification_is_total_and_exclusive() {
    let unix = resolve_endpoint("unix:/tmp/a").unwrap();
    let name = resolve_endpoint("unix-abstract:a").unwrap();
    let vsock = resolve_endpoint("vsock:1:1").unwrap();

    let families = [
        unix.first().unwrap().family(),
        name.first().unwrap().family(),
        vsock.first().unwrap().family(),
    ];
    assert_eq!(
        families,
        [
            AddressFamily::UnixPath,
            AddressFamily::UnixAbstract,
            AddressFamily::Vsock,
        ]
    );
}

#[tokio::test]
async fn test_config_file_drives_the_resolver() {
    let dir = TempDir::new().unwrap();
    let socket_path = dir.path().join("configured.sock");
    let config_path = dir.path().join("portway.toml");

    std::fs::write(
        &config_path,
        format!(
            "[transport]\nendpoint = \"unix:{}\"\ncleanup_stale = true\n",
            socket_path.display()
        ),
    )
    .unwrap();

    let config = load_config_from_path(&config_path).unwrap();
    assert!(config.cleanup_stale);
    config.validate().unwrap();

    let resolver: Box<dyn EndpointResolver> = Box::new(LocalResolver);
    let set = resolver.resolve(&config.effective_endpoint()).await.unwrap();
    let addr = set.first().unwrap();

    assert_eq!(addr.family(), AddressFamily::UnixPath);
    assert_eq!(
        addr.to_uri().unwrap(),
        format!("unix:{}", socket_path.display())
    );

    // Cleanup on a never-bound path is a silent no-op.
    unlink_stale_socket(addr);
    assert!(!socket_path.exists());
}
