//! A uniform function-table over an allocator, so the same test and
//! benchmark code can drive `openalloc-core`, a [`LockedArena`], or the
//! system allocator interchangeably.

use std::alloc::{self, Layout};

use openalloc_core::Arena;
use openalloc_sync::LockedArena;

/// Function table an allocator plugs into the test and benchmark drivers.
///
/// Mirrors the four operations every allocator under comparison must
/// support; `calloc` is expressed in terms of `malloc` plus a zeroing write
/// rather than given its own slot, since none of the arenas here have a
/// zeroing fast path worth modeling separately.
pub trait AllocatorInterface {
    /// Human-readable name, used in benchmark and test output.
    fn name(&self) -> &'static str;
    /// Allocates `size` bytes, or returns null.
    fn malloc(&self, size: usize) -> *mut u8;
    /// Frees a pointer previously returned by `malloc`/`realloc`/`calloc`.
    ///
    /// # Safety
    /// See the wrapped allocator's own `free` contract.
    unsafe fn free(&self, ptr: *mut u8);
    /// Reallocates a pointer previously returned by this interface.
    ///
    /// # Safety
    /// See the wrapped allocator's own `realloc` contract.
    unsafe fn realloc(&self, ptr: *mut u8, size: usize) -> *mut u8;
    /// Allocates `nmemb * size` bytes, zeroed.
    fn calloc(&self, nmemb: usize, size: usize) -> *mut u8 {
        let total = nmemb.saturating_mul(size);
        let ptr = self.malloc(total);
        if !ptr.is_null() {
            unsafe { ptr.write_bytes(0, total) };
        }
        ptr
    }
}

/// Adapts a [`LockedArena`] to [`AllocatorInterface`].
pub struct ArenaInterface<'a> {
    name: &'static str,
    arena: &'a LockedArena,
}

impl<'a> ArenaInterface<'a> {
    /// Wraps `arena` for use by the test and benchmark drivers, labeling it
    /// `name` in their output.
    #[must_use]
    pub const fn new(name: &'static str, arena: &'a LockedArena) -> Self {
        Self { name, arena }
    }
}

impl AllocatorInterface for ArenaInterface<'_> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn malloc(&self, size: usize) -> *mut u8 {
        self.arena.with_lock(|a: &mut Arena| a.malloc(size))
    }

    unsafe fn free(&self, ptr: *mut u8) {
        self.arena.with_lock(|a: &mut Arena| unsafe { a.free(ptr) });
    }

    unsafe fn realloc(&self, ptr: *mut u8, size: usize) -> *mut u8 {
        self.arena
            .with_lock(|a: &mut Arena| unsafe { a.realloc(ptr, size) })
    }
}

/// Adapts the process's system allocator to [`AllocatorInterface`], for
/// baseline comparison in benchmarks. Stores each live allocation's
/// [`Layout`] just before its payload, mimicking the in-band header every
/// arena variant already pays for.
pub struct SystemInterface;

#[repr(C)]
struct SystemHeader {
    size: usize,
}

const SYSTEM_HEADER_BYTES: usize = size_of::<SystemHeader>();

impl AllocatorInterface for SystemInterface {
    fn name(&self) -> &'static str {
        "system"
    }

    fn malloc(&self, size: usize) -> *mut u8 {
        if size == 0 {
            return std::ptr::null_mut();
        }
        let Ok(layout) = Layout::from_size_align(SYSTEM_HEADER_BYTES + size, align_of::<usize>())
        else {
            return std::ptr::null_mut();
        };
        let base = unsafe { alloc::alloc(layout) };
        if base.is_null() {
            return std::ptr::null_mut();
        }
        unsafe {
            base.cast::<SystemHeader>().write(SystemHeader { size });
            base.add(SYSTEM_HEADER_BYTES)
        }
    }

    unsafe fn free(&self, ptr: *mut u8) {
        if ptr.is_null() {
            return;
        }
        unsafe {
            let base = ptr.sub(SYSTEM_HEADER_BYTES);
            let size = (*base.cast::<SystemHeader>()).size;
            let layout =
                Layout::from_size_align_unchecked(SYSTEM_HEADER_BYTES + size, align_of::<usize>());
            alloc::dealloc(base, layout);
        }
    }

    unsafe fn realloc(&self, ptr: *mut u8, size: usize) -> *mut u8 {
        if ptr.is_null() {
            return self.malloc(size);
        }
        if size == 0 {
            unsafe { self.free(ptr) };
            return std::ptr::null_mut();
        }
        let new_ptr = self.malloc(size);
        if new_ptr.is_null() {
            return std::ptr::null_mut();
        }
        unsafe {
            let base = ptr.sub(SYSTEM_HEADER_BYTES);
            let old_size = (*base.cast::<SystemHeader>()).size;
            std::ptr::copy_nonoverlapping(ptr, new_ptr, old_size.min(size));
            self.free(ptr);
        }
        new_ptr
    }
}
