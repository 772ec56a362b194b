//! Performance counters accumulated while driving an
//! [`crate::interface::AllocatorInterface`] under benchmark or stress load.

use std::time::Duration;

/// Running totals for one allocator under test.
///
/// Durations are summed, not averaged; divide by `allocations`/`frees`/
/// `reallocs` to get a mean at report time.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    /// Name of the allocator these totals belong to.
    pub name: String,
    /// Cumulative time spent inside `malloc`.
    pub malloc_time: Duration,
    /// Cumulative time spent inside `free`.
    pub free_time: Duration,
    /// Cumulative time spent inside `realloc`.
    pub realloc_time: Duration,
    /// Sum of every successful allocation's requested size.
    pub total_allocated: u64,
    /// Largest `total_allocated − total_freed` observed at any point.
    pub peak_usage: u64,
    /// `peak_usage` divided by the arena length, when known.
    pub fragmentation_ratio: f64,
    /// Count of successful `malloc`/`calloc` calls.
    pub allocations: u64,
    /// Count of `free` calls on a non-null pointer.
    pub frees: u64,
    /// Count of `realloc` calls.
    pub reallocs: u64,
}

impl Metrics {
    /// Starts a fresh, zeroed counter set labeled `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Records a successful allocation of `size` bytes, updating running
    /// totals and recomputing peak usage.
    pub fn record_malloc(&mut self, size: usize, elapsed: Duration, live_bytes: u64) {
        self.malloc_time += elapsed;
        self.total_allocated += size as u64;
        self.allocations += 1;
        self.peak_usage = self.peak_usage.max(live_bytes);
    }

    /// Records a `free` call.
    pub fn record_free(&mut self, elapsed: Duration) {
        self.free_time += elapsed;
        self.frees += 1;
    }

    /// Records a `realloc` call.
    pub fn record_realloc(&mut self, elapsed: Duration) {
        self.realloc_time += elapsed;
        self.reallocs += 1;
    }

    /// Sets [`Self::fragmentation_ratio`] from the peak usage observed so
    /// far against `arena_len`.
    pub fn finalize(&mut self, arena_len: usize) {
        if arena_len > 0 {
            self.fragmentation_ratio = self.peak_usage as f64 / arena_len as f64;
        }
    }
}
