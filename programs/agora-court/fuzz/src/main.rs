//! Fuzz test runner for Agora Court
//!
//! Run with: cargo run --release -p agora-court-fuzz
//! Or: cargo test (for property-based tests)

use agora_court_fuzz::*;
use proptest::prelude::*;
use proptest::test_runner::TestRunner;
use std::time::Instant;

fn main() {
    println!("=== Agora Court Fuzz Testing ===\n");

    let start = Instant::now();
    let mut passed = 0;
    let mut failed = 0;

    println!("Running dispute lifecycle fuzz tests...");
    let (p, f) = run_lifecycle_fuzz(200);
    passed += p;
    failed += f;

    println!("Running random operation fuzz tests...");
    let (p, f) = run_operations_fuzz(500);
    passed += p;
    failed += f;

    let duration = start.elapsed();

    println!("\n=== Fuzz Testing Complete ===");
    println!("Total tests: {}", passed + failed);
    println!("Passed: {}", passed);
    println!("Failed: {}", failed);
    println!("Duration: {:?}", duration);

    if failed > 0 {
        std::process::exit(1);
    }
}

fn run_lifecycle_fuzz(iterations: usize) -> (usize, usize) {
    let mut passed = 0;
    let mut failed = 0;
    let mut runner = TestRunner::default();

    for i in 0..iterations {
        let input = match any::<LifecycleInput>().new_tree(&mut runner) {
            Ok(tree) => tree.current(),
            Err(reason) => {
                println!("  [SKIP] Iteration {}: {}", i, reason);
                continue;
            }
        };

        let result = match SimulatedCourt::open(input.config, input.parties as u16, &input.balances()) {
            Ok(mut court) => court.run(&scripted_lifecycle(
                &input.config,
                input.parties,
                &input.ballots,
                &input.claim_order,
            )),
            Err(error) => SimulationResult::Error(error),
        };

        if result.is_success() {
            passed += 1;
        } else {
            println!("  [FAIL] Iteration {}: {:?}", i, result);
            failed += 1;
        }
    }

    println!("  lifecycle: {} passed, {} failed", passed, failed);
    (passed, failed)
}

fn run_operations_fuzz(iterations: usize) -> (usize, usize) {
    let mut passed = 0;
    let mut failed = 0;
    let mut runner = TestRunner::default();

    for i in 0..iterations {
        let input = match any::<OperationsInput>().new_tree(&mut runner) {
            Ok(tree) => tree.current(),
            Err(reason) => {
                println!("  [SKIP] Iteration {}: {}", i, reason);
                continue;
            }
        };

        let result = match SimulatedCourt::open(input.config, input.max_parties, &input.balances) {
            Ok(mut court) => court.run(&input.operations),
            Err(error) => SimulationResult::Error(error),
        };

        if result.is_invariant_violation() {
            println!("  [FAIL] Iteration {}: {:?}", i, result);
            failed += 1;
        } else {
            passed += 1;
        }
    }

    println!("  random operations: {} passed, {} failed", passed, failed);
    (passed, failed)
}
