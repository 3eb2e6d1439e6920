//! Allocation accounting for the queue: no leaks, and clean rollback when an
//! allocation fails during insertion.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use linkq::{Error, Queue};

/// Counts live allocations per thread and can fail the n-th next one.
struct CountingAlloc;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
    static FAIL_IN: Cell<usize> = const { Cell::new(0) };
}

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let fail = FAIL_IN
            .try_with(|f| match f.get() {
                0 => false,
                1 => {
                    f.set(0);
                    true
                }
                n => {
                    f.set(n - 1);
                    false
                }
            })
            .unwrap_or(false);
        if fail {
            return std::ptr::null_mut();
        }

        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            let _ = LIVE.try_with(|c| c.set(c.get() + 1));
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        let _ = LIVE.try_with(|c| c.set(c.get() - 1));
        System.dealloc(ptr, layout)
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

fn live() -> isize {
    LIVE.with(Cell::get)
}

/// Fail the `n`-th allocation made from now on by this thread.
fn fail_nth_alloc(n: usize) {
    FAIL_IN.with(|f| f.set(n));
}

/// Run one full queue lifecycle so lazily initialized statics are in place
/// before measuring.
fn warm_up() {
    let mut q = Queue::new();
    q.insert_head("warm").unwrap();
    q.insert_tail("up").unwrap();
    q.reverse();
    q.sort();
    q.remove_head().unwrap();
}

#[test]
fn test_create_insert_drop_does_not_leak() {
    warm_up();
    let before = live();

    for round in 0..20 {
        let mut q = Queue::new();
        for i in 0..(round * 15) {
            let s = format!("value-{}", i);
            if i % 2 == 0 {
                q.insert_tail(&s).unwrap();
            } else {
                q.insert_head(&s).unwrap();
            }
        }
        q.reverse();
        q.sort();
        for _ in 0..round {
            let _ = q.remove_head();
        }
        drop(q);
    }

    assert_eq!(live(), before);
}

#[test]
fn test_sort_and_reverse_do_not_allocate() {
    warm_up();
    let mut q = Queue::new();
    for i in (0..300).rev() {
        q.insert_tail(&format!("{:04}", i)).unwrap();
    }

    let before = live();
    q.sort();
    q.reverse();
    q.sort();
    assert_eq!(live(), before);

    assert_eq!(q.peek_head(), Some("0000"));
    assert_eq!(q.peek_tail(), Some("0299"));
}

#[test]
fn test_remove_head_releases_value() {
    warm_up();
    let mut q = Queue::new();
    q.insert_tail("first").unwrap();
    q.insert_tail("second").unwrap();

    let before = live();
    let mut buf = [0u8; 3];
    q.remove_head_into(Some(&mut buf)).unwrap();

    assert_eq!(live(), before - 1);
    assert_eq!(&buf, b"fi\0");
}

#[test]
fn test_string_copy_failure_rolls_back() {
    warm_up();
    let mut q = Queue::new();
    q.insert_tail("keep").unwrap();
    let before = live();

    fail_nth_alloc(1);
    let result = q.insert_head("lost");

    assert!(matches!(result, Err(Error::Alloc(_))));
    assert_eq!(live(), before);
    assert_eq!(q.len(), 1);
    assert_eq!(q.peek_head(), Some("keep"));
    assert_eq!(q.peek_tail(), Some("keep"));
}

#[test]
fn test_node_failure_releases_string() {
    warm_up();
    let mut q = Queue::new();
    let before = live();

    // First allocation is the string copy, second is the arena growth.
    fail_nth_alloc(2);
    let result = q.insert_tail("lost");

    assert!(matches!(result, Err(Error::Alloc(_))));
    assert_eq!(live(), before);
    assert!(q.is_empty());
    assert_eq!(q.peek_head(), None);

    q.insert_tail("found").unwrap();
    assert_eq!(q.iter().collect::<Vec<_>>(), vec!["found"]);
}
