//! Integration Test Harness
//!
//! Runs every integration test category and prints a summary.
//!
//! # Usage
//!
//! Run all categories:
//! ```text
//! cargo run -p faxobs-integration-tests
//! ```
//!
//! Run one category:
//! ```text
//! cargo test -p faxobs-integration-tests --test connection_tests
//! cargo test -p faxobs-integration-tests --test queue_tests
//! ```
//!
//! Run with increased logging:
//! ```text
//! RUST_LOG=debug cargo test -p faxobs-integration-tests
//! ```

mod common;

use std::process::Command;
use std::time::Instant;

use common::{TestResult, TestSuiteResults};

/// Test category
#[derive(Debug, Clone)]
struct TestCategory {
    name: &'static str,
    description: &'static str,
    test_name: &'static str,
}

const TEST_CATEGORIES: &[TestCategory] = &[
    TestCategory {
        name: "Connection Tests",
        description: "Context handle lifecycle through ConnectionRefCount",
        test_name: "connection_tests",
    },
    TestCategory {
        name: "Queue Tests",
        description: "Queue file names, job submission and abort",
        test_name: "queue_tests",
    },
    TestCategory {
        name: "Buffer Tests",
        description: "Caller-sized buffers, null versus empty",
        test_name: "buffer_tests",
    },
    TestCategory {
        name: "Settings Tests",
        description: "Configuration and routing structures",
        test_name: "settings_tests",
    },
    TestCategory {
        name: "Dispatch Tests",
        description: "Faults, reserved opnum and malformed frames",
        test_name: "dispatch_tests",
    },
];

fn run_test_category(category: &TestCategory) -> TestResult {
    println!("\n{}", "=".repeat(60));
    println!("Running: {} - {}", category.name, category.description);
    println!("{}", "=".repeat(60));

    let start = Instant::now();
    let output = Command::new("cargo")
        .args(["test", "-p", "faxobs-integration-tests", "--test", category.test_name])
        .output();
    let duration = start.elapsed();

    match output {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            if !stdout.is_empty() {
                println!("{}", stdout);
            }
            let passed = output.status.success();
            TestResult {
                name: category.name.to_string(),
                passed,
                duration,
                message: (!passed).then(|| format!("exit code: {:?}", output.status.code())),
            }
        }
        Err(e) => TestResult {
            name: category.name.to_string(),
            passed: false,
            duration,
            message: Some(format!("Failed to execute: {}", e)),
        },
    }
}

fn main() {
    let mut results = TestSuiteResults::new();
    for category in TEST_CATEGORIES {
        results.add(run_test_category(category));
    }

    results.print_summary();
    if results.failed() > 0 {
        std::process::exit(1);
    }
}
