//! Interactive-ish demo: initializes an arena of a given size, then applies
//! a small scripted sequence of `malloc`/`free`/`stats` commands to it and
//! prints the result after each one.
//!
//! ```text
//! openalloc-cli [--arena-bytes N] [--no-seg]
//! ```

use std::env;
use std::process::ExitCode;

use log::LevelFilter;
use openalloc_core::Arena;

struct Options {
    arena_bytes: usize,
}

fn parse_args() -> Result<Options, String> {
    let mut arena_bytes = 1 << 16;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--arena-bytes" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--arena-bytes requires a value".to_string())?;
                arena_bytes = value
                    .parse()
                    .map_err(|_| format!("invalid --arena-bytes value: {value}"))?;
            }
            "-h" | "--help" => {
                println!("usage: openalloc-cli [--arena-bytes N]");
                std::process::exit(0);
            }
            other => return Err(format!("unrecognized argument: {other}")),
        }
    }
    Ok(Options { arena_bytes })
}

fn main() -> ExitCode {
    openalloc_harness::logger::init(LevelFilter::Info);

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
    log::info!("initialized {}-byte arena", options.arena_bytes);

    let p1 = arena.malloc(100);
    log::info!("malloc(100) -> {p1:p}");
    let p2 = arena.malloc(200);
    log::info!("malloc(200) -> {p2:p}");
    print_stats(&arena);

    unsafe {
        arena.free(p1);
    }
    log::info!("free(p1)");
    print_stats(&arena);

    unsafe {
        arena.free(p2);
    }
    log::info!("free(p2)");
    print_stats(&arena);

    ExitCode::SUCCESS
}

fn print_stats(arena: &Arena) {
    let stats = arena.get_stats();
    println!(
        "stats: free_blocks={} allocated_blocks={} free_bytes={} allocated_bytes={}",
        stats.free_blocks, stats.allocated_blocks, stats.free_bytes, stats.allocated_bytes
    );
}
