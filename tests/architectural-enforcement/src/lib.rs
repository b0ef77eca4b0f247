//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - No panicking calls (`unwrap`/`expect`) in production code
//! - portway-core stays a leaf (no RPC-stack or protobuf dependencies)
//!
//! These tests are designed to catch violations early in the development cycle.

#![allow(dead_code)]

pub fn placeholder() {
    // Placeholder to make this a valid library
}
