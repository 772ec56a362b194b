//! Drives [`openalloc_harness::AllocatorInterface`] implementations through
//! a randomized malloc/free/realloc mix and reports [`Metrics`] for each,
//! so the arena's cost can be weighed against the system allocator's.
//!
//! ```text
//! openalloc-bench [--seed N] [--iterations N] [--arena-bytes N]
//! ```

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use log::LevelFilter;
use openalloc_core::Arena;
use openalloc_harness::{AllocatorInterface, ArenaInterface, Lcg, Metrics, SystemInterface};
use openalloc_sync::LockedArena;

struct Options {
    seed: u32,
    iterations: usize,
    arena_bytes: usize,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        seed: 0x2463_9e35,
        iterations: 100_000,
        arena_bytes: 16 << 20,
    };
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value_of = |flag: &str| -> Result<String, String> {
            args.next().ok_or_else(|| format!("{flag} requires a value"))
        };
        match arg.as_str() {
            "--seed" => {
                options.seed = value_of("--seed")?
                    .parse()
                    .map_err(|_| "invalid --seed value".to_string())?;
            }
            "--iterations" => {
                options.iterations = value_of("--iterations")?
                    .parse()
                    .map_err(|_| "invalid --iterations value".to_string())?;
            }
            "--arena-bytes" => {
                options.arena_bytes = value_of("--arena-bytes")?
                    .parse()
                    .map_err(|_| "invalid --arena-bytes value".to_string())?;
            }
            other => return Err(format!("unrecognized argument: {other}")),
        }
    }
    Ok(options)
}

/// Allocates and frees `iterations` times with sizes in `[8, 4096]`,
/// occasionally reallocating, against `iface`.
fn run(iface: &dyn AllocatorInterface, seed: u32, iterations: usize, arena_bytes: usize) -> Metrics {
    let mut metrics = Metrics::new(iface.name());
    let mut rng = Lcg::new(seed);
    let mut live: Vec<(*mut u8, usize)> = Vec::new();
    let mut live_bytes: u64 = 0;

    for _ in 0..iterations {
        let op = rng.next_u32() % 10;
        if op < 6 || live.is_empty() {
            let size = rng.next_range(8, 4096);
            let start = Instant::now();
            let ptr = iface.malloc(size);
            let elapsed = start.elapsed();
            if !ptr.is_null() {
                live_bytes += size as u64;
                metrics.record_malloc(size, elapsed, live_bytes);
                live.push((ptr, size));
            }
        } else if op < 9 {
            let idx = rng.next_range(0, live.len() - 1);
            let (ptr, size) = live.swap_remove(idx);
            let start = Instant::now();
            unsafe {
                iface.free(ptr);
            }
            metrics.record_free(start.elapsed());
            live_bytes -= size as u64;
        } else {
            let idx = rng.next_range(0, live.len() - 1);
            let (ptr, _old_size) = live[idx];
            let new_size = rng.next_range(8, 4096);
            let start = Instant::now();
            let new_ptr = unsafe { iface.realloc(ptr, new_size) };
            metrics.record_realloc(start.elapsed());
            if !new_ptr.is_null() {
                live[idx] = (new_ptr, new_size);
            }
        }
    }

    for (ptr, _) in live {
        unsafe {
            iface.free(ptr);
        }
    }

    metrics.finalize(arena_bytes);
    metrics
}

fn report(metrics: &Metrics) {
    println!(
        "{:<10} allocations={:<8} frees={:<8} reallocs={:<8} malloc_time={:?} free_time={:?} realloc_time={:?} peak_usage={} fragmentation_ratio={:.4}",
        metrics.name,
        metrics.allocations,
        metrics.frees,
        metrics.reallocs,
        metrics.malloc_time,
        metrics.free_time,
        metrics.realloc_time,
        metrics.peak_usage,
        metrics.fragmentation_ratio,
    );
}

fn main() -> ExitCode {
    openalloc_harness::logger::init(LevelFilter::Warn);

    let options = match parse_args() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    let mut region = vec![0u8; options.arena_bytes];
    let mut arena = Arena::new();
    if let Err(err) = unsafe { arena.init(region.as_mut_ptr(), region.len()) } {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    let locked = LockedArena::new(arena);
    let arena_iface = ArenaInterface::new("openalloc", &locked);
    let system_iface = SystemInterface;

    let arena_metrics = run(&arena_iface, options.seed, options.iterations, options.arena_bytes);
    let system_metrics = run(&system_iface, options.seed, options.iterations, options.arena_bytes);

    report(&arena_metrics);
    report(&system_metrics);

    ExitCode::SUCCESS
}
