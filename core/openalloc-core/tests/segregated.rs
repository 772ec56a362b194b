use openalloc_core::segregated::SegregatedArena;

fn new_arena(len: usize) -> (Vec<u8>, SegregatedArena) {
    let mut region = vec![0u8; len];
    let mut arena = SegregatedArena::new();
    unsafe {
        arena.init(region.as_mut_ptr(), len).unwrap();
    }
    (region, arena)
}

#[test]
fn init_reports_one_free_block() {
    let (_region, arena) = new_arena(1_048_576);
    let stats = arena.get_stats();
    assert_eq!(stats.free_blocks, 1);
    assert_eq!(stats.allocated_blocks, 0);
    assert_eq!(stats.len, 1_048_576);
}

#[test]
fn init_rejects_null_and_undersized_regions() {
    let mut arena = SegregatedArena::new();
    unsafe {
        assert!(arena.init(std::ptr::null_mut(), 4096).is_err());
        let mut tiny = [0u8; 4];
        assert!(arena.init(tiny.as_mut_ptr(), tiny.len()).is_err());
    }
}

#[test]
fn split_produces_two_distinct_pointers_and_recombines_on_drain() {
    let (_region, mut arena) = new_arena(4096);
    let p1 = arena.malloc(100);
    let p2 = arena.malloc(200);
    assert!(!p1.is_null());
    assert!(!p2.is_null());
    assert_ne!(p1, p2);
    unsafe {
        arena.free(p1);
        arena.free(p2);
    }
    let stats = arena.get_stats();
    assert_eq!(stats.allocated_blocks, 0);
}

#[test]
fn alignment_sweep() {
    let (_region, mut arena) = new_arena(1 << 16);
    for n in 1..=100usize {
        let p = arena.malloc(n);
        assert!(!p.is_null(), "malloc({n}) failed");
        assert_eq!((p as usize) % 8, 0, "malloc({n}) misaligned");
        unsafe {
            arena.free(p);
        }
    }
}

#[test]
fn fragmentation_then_large_alloc_succeeds() {
    let (_region, mut arena) = new_arena(1 << 16);
    let blocks: Vec<_> = (0..10).map(|_| arena.malloc(100)).collect();
    assert!(blocks.iter().all(|p| !p.is_null()));
    for (i, p) in blocks.iter().enumerate() {
        if i % 2 == 0 {
            unsafe {
                arena.free(*p);
            }
        }
    }
    let big = arena.malloc(500);
    assert!(!big.is_null());
}

#[test]
fn oom_on_full_arena_request() {
    let (_region, mut arena) = new_arena(1_048_576);
    assert!(arena.malloc(1_048_576).is_null());
}

#[test]
fn malloc_zero_is_null() {
    let (_region, mut arena) = new_arena(4096);
    assert!(arena.malloc(0).is_null());
}

#[test]
fn realloc_copies_prior_contents() {
    let (_region, mut arena) = new_arena(4096);
    let p = arena.malloc(100);
    assert!(!p.is_null());
    unsafe {
        std::ptr::write_bytes(p, 0xAB, 100);
    }
    let q = unsafe { arena.realloc(p, 200) };
    assert!(!q.is_null());
    let bytes = unsafe { std::slice::from_raw_parts(q, 100) };
    assert!(bytes.iter().all(|&b| b == 0xAB));
}

#[test]
fn realloc_shrink_returns_same_pointer() {
    let (_region, mut arena) = new_arena(4096);
    let p = arena.malloc(200);
    let usable = unsafe { arena.usable_size(p) };
    let q = unsafe { arena.realloc(p, usable) };
    assert_eq!(p, q);
}

#[test]
fn realloc_null_behaves_as_malloc() {
    let (_region, mut arena) = new_arena(4096);
    let p = unsafe { arena.realloc(std::ptr::null_mut(), 64) };
    assert!(!p.is_null());
}

#[test]
fn realloc_zero_frees_and_returns_null() {
    let (_region, mut arena) = new_arena(4096);
    let p = arena.malloc(64);
    let q = unsafe { arena.realloc(p, 0) };
    assert!(q.is_null());
    assert_eq!(arena.get_stats().allocated_blocks, 0);
}

#[test]
fn reinit_over_populated_arena_is_clean() {
    let (mut region, mut arena) = new_arena(4096);
    let _ = arena.malloc(100);
    let _ = arena.malloc(200);
    unsafe {
        arena.init(region.as_mut_ptr(), region.len()).unwrap();
    }
    let stats = arena.get_stats();
    assert_eq!(stats.free_blocks, 1);
    assert_eq!(stats.allocated_blocks, 0);
}

#[test]
fn freed_block_is_reused_from_its_own_size_class() {
    // One representative payload size per size class, in class order.
    let representative_sizes = [8, 24, 48, 96, 192, 384, 768, 1536, 3072, 8192];
    assert_eq!(
        representative_sizes.len(),
        openalloc_core::segregated::NUM_CLASSES
    );

    for size in representative_sizes {
        let (_region, mut arena) = new_arena(1 << 16);
        // A decoy keeps the freed block from being the only thing in the
        // arena, so a same-size malloc can only be served from its own bin.
        let decoy = arena.malloc(32);
        let p = arena.malloc(size);
        assert!(!p.is_null(), "malloc({size}) failed");
        unsafe {
            arena.free(p);
        }
        let reused = arena.malloc(size);
        assert_eq!(
            reused, p,
            "malloc({size}) after free did not reuse the block just freed into its size class"
        );
        unsafe {
            arena.free(reused);
            arena.free(decoy);
        }
    }
}

#[test]
fn stats_walk_accounts_for_every_block() {
    let (_region, mut arena) = new_arena(8192);
    let p1 = arena.malloc(100);
    let p2 = arena.malloc(50);
    assert!(!p1.is_null() && !p2.is_null());
    unsafe {
        arena.free(p1);
    }
    let stats = arena.get_stats();
    assert_eq!(stats.allocated_blocks, 1);
    assert!(stats.free_blocks >= 1);
    assert!(stats.allocated_bytes >= 50);
    assert!(stats.free_bytes + stats.allocated_bytes < stats.len);
}
