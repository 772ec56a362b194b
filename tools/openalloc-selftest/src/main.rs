//! Self-test runner: drives the randomized invariant checks and the
//! double-free probe, printing a `[PASS]`/`[FAIL]` line per check.
//!
//! ```text
//! openalloc-selftest [--seed N]
//! ```

mod checks;
mod security;

use std::env;
use std::process::ExitCode;

use log::LevelFilter;

fn parse_seed() -> Result<u32, String> {
    let mut seed = 0xC0FF_EE42;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--seed requires a value".to_string())?;
                seed = value
                    .parse()
                    .map_err(|_| format!("invalid --seed value: {value}"))?;
            }
            other => return Err(format!("unrecognized argument: {other}")),
        }
    }
    Ok(seed)
}

fn main() -> ExitCode {
    openalloc_harness::logger::init(LevelFilter::Info);

    let seed = match parse_seed() {
        Ok(seed) => seed,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    let mut passed = 0;
    let mut failed = 0;

    println!("running invariant checks (seed={seed:#x})");
    for check in checks::COMMON.iter().chain(checks::VARIANT.iter()) {
        println!("  [RUN] {}", check.name);
        match (check.run)(seed) {
            Ok(()) => {
                println!("  [PASS] {}", check.name);
                passed += 1;
            }
            Err(message) => {
                println!("  [FAIL] {}: {message}", check.name);
                failed += 1;
            }
        }
    }

    println!("security: double-free probe (aspirational, not a pass/fail gate)");
    println!("  [INFO] {}", security::probe_double_free());

    println!("{passed} passed, {failed} failed");
    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
