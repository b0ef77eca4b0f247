//! Integration Test: Leaf Dependency Discipline
//!
//! **Policy**: portway-core is the leaf address subsystem of the transport
//! layer. It consumes nothing from the RPC stack above it, so its manifest
//! must never grow dependencies on RPC frameworks, protobuf machinery, or
//! HTTP clients. The event loop and call stack live in crates that depend
//! on portway-core, never the other way around.

use std::fs;
use std::path::Path;

const FORBIDDEN_DEPENDENCIES: [&str; 7] = [
    "prost",
    "protobuf",
    "tonic",
    "grpcio",
    "reqwest",
    "hyper",
    "trust-dns-resolver",
];

/// Test that the core manifest declares no upper-layer dependencies
#[test]
fn test_core_manifest_stays_a_leaf() {
    let manifest_path =
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../portway/core/Cargo.toml");
    let manifest = fs::read_to_string(&manifest_path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", manifest_path.display()));

    for dep in FORBIDDEN_DEPENDENCIES {
        let declared = manifest
            .lines()
            .any(|line| line.trim_start().starts_with(dep));
        assert!(
            !declared,
            "portway-core must stay a leaf; found forbidden dependency `{dep}` in {}",
            manifest_path.display()
        );
    }
}
