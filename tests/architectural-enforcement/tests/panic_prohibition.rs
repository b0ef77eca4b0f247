//! Integration Test: Panic Prohibition
//!
//! **Policy**: Production code in portway-core MUST NOT call `.unwrap()` or
//! `.expect(...)`. Malformed input is reported through `Result`; internal
//! invariant violations fall back defensively (`AddressFamily::Other`,
//! `None`) rather than aborting the process.
//!
//! Test code is exempt: `#[cfg(test)]` modules sit at the bottom of each
//! source file and scanning stops there.

use std::fs;
use std::path::{Path, PathBuf};

fn core_src_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../portway/core/src")
}

/// Test that production code does not contain panicking calls
#[test]
fn test_no_panicking_calls_in_production_code() {
    let mut violations = Vec::new();
    check_directory(&core_src_dir(), &mut violations);

    if !violations.is_empty() {
        eprintln!("\nPanicking calls found in production code:");
        for violation in &violations {
            eprintln!("  {violation}");
        }
        eprintln!("\nUse `?` / explicit error values instead; see the crate error policy.");

        panic!(
            "Found {} panicking call(s) in production code.",
            violations.len()
        );
    }
}

fn check_directory(dir: &Path, violations: &mut Vec<String>) {
    if !dir.exists() {
        panic!("source directory {} not found", dir.display());
    }

    for entry in walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.path().extension().and_then(|s| s.to_str()) == Some("rs") {
            check_file(entry.path(), violations);
        }
    }
}

fn check_file(path: &Path, violations: &mut Vec<String>) {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return,
    };

    for (idx, line) in content.lines().enumerate() {
        // Test modules are appended at the end of each file; everything
        // after the marker is exempt.
        if line.contains("#[cfg(test)]") {
            break;
        }

        // Skip comments.
        let code_part = line.split("//").next().unwrap_or(line);

        if code_part.contains(".unwrap()") || code_part.contains(".expect(") {
            violations.push(format!(
                "{}:{} - {}",
                path.display(),
                idx + 1,
                line.trim()
            ));
        }
    }
}
