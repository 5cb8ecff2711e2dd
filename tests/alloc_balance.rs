// Allocation-balance test for owned keys and payloads.
//
// A counting global allocator tracks net outstanding bytes. Every owned
// string key the table duplicates at insert must be released by the
// matching delete, clear, or drop; a leak (or double free) shows up as a
// nonzero net delta across a create..drop region.
//
// This file holds a single test so no concurrent test can perturb the
// counter between snapshots.
use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicIsize, Ordering};

use tagged_table::{TaggedTable, Value};

struct CountingAlloc;

static OUTSTANDING: AtomicIsize = AtomicIsize::new(0);

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let p = System.alloc(layout);
        if !p.is_null() {
            OUTSTANDING.fetch_add(layout.size() as isize, Ordering::SeqCst);
        }
        p
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        OUTSTANDING.fetch_sub(layout.size() as isize, Ordering::SeqCst);
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let p = System.realloc(ptr, layout, new_size);
        if !p.is_null() {
            OUTSTANDING.fetch_add(new_size as isize - layout.size() as isize, Ordering::SeqCst);
        }
        p
    }
}

#[global_allocator]
static ALLOC: CountingAlloc = CountingAlloc;

fn outstanding() -> isize {
    OUTSTANDING.load(Ordering::SeqCst)
}

#[test]
fn owned_memory_is_balanced_across_table_lifetimes() {
    let baseline = outstanding();

    // Alternating insert/delete of one string key, five rounds: every
    // duplicated key buffer must be freed by its delete.
    {
        let mut t = TaggedTable::new();
        for round in 0..5 {
            t.insert("cycled-key", Value::from(round)).unwrap();
            assert_eq!(t.remove("cycled-key"), Some(Value::from(round)));
        }
        assert_eq!(t.len(), 0);
    }
    assert_eq!(
        outstanding(),
        baseline,
        "insert/delete cycles leaked owned key bytes"
    );

    // Growth and shrink move owned keys and values between arrays; the old
    // array and nothing else must be freed each time.
    {
        let mut t = TaggedTable::new();
        let keys: Vec<String> = (0..64).map(|i| format!("grow-key-{i:03}")).collect();
        for k in &keys {
            t.insert(k, Value::str_copied(k)).unwrap();
        }
        assert!(t.capacity() > 16);
        for k in &keys {
            assert!(t.remove(k).is_some());
        }
        assert_eq!(t.capacity(), 16);
    }
    assert_eq!(
        outstanding(),
        baseline,
        "grow/shrink churn leaked owned entry bytes"
    );

    // Clear releases every owned entry; drop releases the array.
    {
        let mut t = TaggedTable::new();
        for i in 0..40 {
            let k = format!("clear-key-{i}");
            t.insert(&k, Value::blob_copied(&[7u8; 33])).unwrap();
        }
        t.clear();
        t.clear();
        for i in 0..8 {
            let k = format!("tail-key-{i}");
            t.insert(&k, Value::str_copied("tail")).unwrap();
        }
    }
    assert_eq!(
        outstanding(),
        baseline,
        "clear or drop leaked owned entry bytes"
    );
}
