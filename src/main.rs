//! Tokstore stress test runner
//!
//! This binary provides a command-line interface for running stress tests
//! and invariant checks for the tokstore crate family.

use stress_test::{stress_concurrency, stress_lifecycle};

fn main() {
    // Parse command line args for test selection
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "quick" => run_quick(),
            "lifecycle" => run_lifecycle(),
            "concurrency" => run_concurrency(),
            "full" => run_full(),
            "help" | "--help" | "-h" => print_usage(),
            _ => {
                println!("Unknown test suite: {}", args[1]);
                print_usage();
            }
        }
    } else {
        // Default: run quick tests
        run_quick();
    }
}

fn print_usage() {
    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║            TOKSTORE STRESS TEST SUITE                      ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();
    println!("Usage: cargo run [test_suite]");
    println!();
    println!("Available test suites:");
    println!("  quick        - Quick smoke tests (default)");
    println!("  lifecycle    - Randomized seed/stage/commit/discard cycles");
    println!("  concurrency  - Concurrent writers and readers on one handle");
    println!("  full         - Complete suite (takes longer)");
    println!("  help         - Show this help message");
    println!();
}

fn run_quick() {
    println!("\n╔════════════════════════════════════════════════════════════╗");
    println!("║            QUICK SMOKE TESTS                               ║");
    println!("╚════════════════════════════════════════════════════════════╝");

    println!("\n── Lifecycle ───────────────────────────────────────────────");
    stress_lifecycle(50, 100).print();

    println!("\n── Concurrency ─────────────────────────────────────────────");
    stress_concurrency(4, 200).print();
}

fn run_lifecycle() {
    println!("\n── Lifecycle ───────────────────────────────────────────────");
    stress_lifecycle(200, 1_000).print();
}

fn run_concurrency() {
    println!("\n── Concurrency ─────────────────────────────────────────────");
    stress_concurrency(8, 2_000).print();
}

fn run_full() {
    println!("\n╔════════════════════════════════════════════════════════════╗");
    println!("║            FULL STRESS SUITE                               ║");
    println!("╚════════════════════════════════════════════════════════════╝");

    println!("\n── Lifecycle ───────────────────────────────────────────────");
    stress_lifecycle(100, 500).print();
    stress_lifecycle(500, 2_000).print();

    println!("\n── Concurrency ─────────────────────────────────────────────");
    stress_concurrency(4, 1_000).print();
    stress_concurrency(16, 2_000).print();
}
