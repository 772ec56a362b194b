//! Failure modes for arena setup.
//!
//! Every other operation in this crate reports failure by returning a null
//! pointer or a zero count; `init` is the one entry point a caller can
//! usefully branch on, so it alone gets a typed error.

use thiserror::Error;

/// Why [`crate::segregated::SegregatedArena::init`] or
/// [`crate::coalescing::CoalescingArena::init`] refused a region.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// The caller passed a null region pointer.
    #[error("heap region pointer was null")]
    NullRegion,
    /// The region is too small to hold even one minimum-sized block.
    #[error("region of {len} bytes is smaller than the minimum viable arena ({min} bytes)")]
    TooSmall {
        /// Size of the region the caller supplied.
        len: usize,
        /// Smallest region `init` will accept.
        min: usize,
    },
}
