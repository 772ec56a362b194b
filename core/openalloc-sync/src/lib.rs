//! A minimal spinlock, and an arena wrapped in one.
//!
//! [`openalloc_core`] is deliberately single-threaded — its own design
//! explicitly leaves synchronization to the caller. This crate is that
//! external collaborator: a small busy-wait lock plus a type alias that
//! pairs it with [`openalloc_core::Arena`] for callers who need one arena
//! shared across threads.

#![cfg_attr(not(any(test, doctest)), no_std)]

use core::cell::UnsafeCell;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicBool, Ordering};

use openalloc_core::Arena;

/// A tiny spinlock for short critical sections.
///
/// Busy-waits with [`core::hint::spin_loop`]; keep the time spent behind the
/// guard small. Does not disable interrupts and is not reentrant.
pub struct SpinLock<T> {
    locked: AtomicBool,
    inner: UnsafeCell<T>,
}

// Safety: the lock provides mutual exclusion over `inner`, so sharing a
// `&SpinLock<T>` across threads is sound whenever `T` itself is `Send`.
unsafe impl<T: Send> Sync for SpinLock<T> {}

impl<T> SpinLock<T> {
    /// Creates a new, unlocked spinlock wrapping `inner`.
    pub const fn new(inner: T) -> Self {
        Self {
            locked: AtomicBool::new(false),
            inner: UnsafeCell::new(inner),
        }
    }

    /// Spins until the lock is acquired, then returns a guard.
    pub fn lock(&self) -> SpinLockGuard<'_, T> {
        while self
            .locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            core::hint::spin_loop();
        }
        SpinLockGuard { lock: self }
    }

    /// Attempts to acquire the lock without spinning, returning `None` if it
    /// is already held.
    pub fn try_lock(&self) -> Option<SpinLockGuard<'_, T>> {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| SpinLockGuard { lock: self })
    }

    /// Acquires the lock, runs `f` with exclusive access, releases, and
    /// returns `f`'s result.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.lock();
        f(&mut guard)
    }

    /// Bypasses locking entirely via a `&mut self` borrow, which already
    /// statically rules out contention.
    pub fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut()
    }
}

/// RAII guard returned by [`SpinLock::lock`] and [`SpinLock::try_lock`].
/// Releases the lock when dropped.
pub struct SpinLockGuard<'a, T> {
    lock: &'a SpinLock<T>,
}

impl<T> Deref for SpinLockGuard<'_, T> {
    type Target = T;
    fn deref(&self) -> &T {
        // Safety: holding the guard proves we hold the lock.
        unsafe { &*self.lock.inner.get() }
    }
}

impl<T> DerefMut for SpinLockGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // Safety: holding the guard proves we hold the lock.
        unsafe { &mut *self.lock.inner.get() }
    }
}

impl<T> Drop for SpinLockGuard<'_, T> {
    fn drop(&mut self) {
        self.lock.locked.store(false, Ordering::Release);
    }
}

/// An [`Arena`] guarded by a [`SpinLock`], for callers who need to share one
/// arena across threads instead of running one arena per thread.
pub type LockedArena = SpinLock<Arena>;
