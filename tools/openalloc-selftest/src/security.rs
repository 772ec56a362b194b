//! A double-free probe.
//!
//! The allocator does not detect double-free — this is a documented
//! non-goal, not an oversight — so this is not a pass/fail assertion. It
//! exists to surface *what actually happens* on this platform: a second
//! `free` of the same pointer may panic, corrupt the free list silently, or
//! appear to succeed, depending on what the first free's neighbors look
//! like. We run it inside `catch_unwind` only so one bad outcome doesn't
//! take the whole test binary down before the rest of the report prints.

use std::panic;

/// Frees the same pointer twice and reports whether doing so unwound.
/// Returns a human-readable description of the observed outcome.
pub fn probe_double_free() -> String {
    let mut region = vec![0u8; 4096];
    let mut arena = openalloc_core::Arena::new();
    unsafe {
        arena.init(region.as_mut_ptr(), region.len()).unwrap();
    }
    let p = arena.malloc(64);
    if p.is_null() {
        return "could not allocate a block to double-free".to_string();
    }

    let result = panic::catch_unwind(panic::AssertUnwindSafe(|| unsafe {
        arena.free(p);
        arena.free(p);
    }));

    match result {
        Ok(()) => {
            "double-free completed without panicking (no detection, as documented)".to_string()
        }
        Err(_) => "double-free triggered a panic (not a guaranteed property)".to_string(),
    }
}
