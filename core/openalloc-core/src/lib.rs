//! Fixed-arena general-purpose heap allocator.
//!
//! # Architecture
//!
//! A caller supplies a single contiguous region of memory up front; every
//! allocation this crate ever hands out is carved from that one region, and
//! nothing is ever requested from (or returned to) the operating system. A
//! block header precedes every block, free or allocated, so the arena can be
//! walked end to end without any side ledger — [`Arena::get_stats`] does
//! exactly this.
//!
//! Two free-list organizations are available as concrete, non-generic
//! types:
//!
//! - [`segregated::SegregatedArena`] (the default [`Arena`]): ten
//!   size-class free lists, O(1) `free`, no coalescing.
//! - [`coalescing::CoalescingArena`] (`Arena` under the `no-seg` feature): a
//!   single doubly-linked free list, coalesced on every `free`.
//!
//! Neither type is thread-safe on its own; see the `openalloc-sync` crate
//! for a spinlock-guarded wrapper.
//!
//! This crate is `no_std` and performs no dynamic allocation of its own —
//! the region a caller passes to `init` is the only memory it ever touches.

#![cfg_attr(not(any(test, doctest)), no_std)]

mod align;
mod error;
pub mod coalescing;
mod raw;
pub mod segregated;
mod stats;

pub use align::{ALIGNMENT, MIN_PAYLOAD};
pub use error::InitError;
pub use stats::Stats;

/// The free-list organization selected at compile time.
///
/// Defaults to [`segregated::SegregatedArena`]. Build with the `no-seg`
/// feature to select [`coalescing::CoalescingArena`] instead.
#[cfg(not(feature = "no-seg"))]
pub type Arena = segregated::SegregatedArena;

/// The free-list organization selected at compile time.
///
/// The `no-seg` feature is enabled, so this is
/// [`coalescing::CoalescingArena`].
#[cfg(feature = "no-seg")]
pub type Arena = coalescing::CoalescingArena;
