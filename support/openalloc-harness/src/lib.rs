//! Shared scaffolding for the openalloc tools: a uniform allocator
//! interface so `openalloc-cli`, `openalloc-bench`, and `openalloc-selftest`
//! can drive an arena, a system allocator, or (in principle) any other
//! implementation through the same code; plus the metrics, RNG, and logging
//! these tools need.
//!
//! Kept separate from `openalloc-core` because none of it is part of the
//! allocation engine itself — it is the external collaborator the core
//! design explicitly treats as out of scope.

pub mod interface;
pub mod logger;
pub mod metrics;
pub mod rng;

pub use interface::{AllocatorInterface, ArenaInterface, SystemInterface};
pub use metrics::Metrics;
pub use rng::Lcg;
