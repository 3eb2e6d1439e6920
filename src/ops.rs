//! Handle-level queue operations.
//!
//! Each function accepts an optional queue so that callers holding no queue
//! get a harmless result (`false`, `0` or a no-op) instead of an error.
//! Failures are logged and reported as `false`.

use crate::config::QueueConfig;
use crate::core::Queue;

/// Create an empty queue.
pub fn create() -> Option<Queue> {
    Some(Queue::new())
}

/// Create an empty queue using `config`.
pub fn create_with(config: &QueueConfig) -> Option<Queue> {
    Some(Queue::with_config(config))
}

/// Release a queue and every element it holds.
pub fn destroy(q: Option<Queue>) {
    if let Some(q) = q {
        tracing::debug!(len = q.len(), "destroying queue");
        drop(q);
    }
}

pub fn insert_head(q: Option<&mut Queue>, s: &str) -> bool {
    let Some(q) = q else {
        return false;
    };
    match q.insert_head(s) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("insert_head failed: {}", e);
            false
        }
    }
}

pub fn insert_tail(q: Option<&mut Queue>, s: &str) -> bool {
    let Some(q) = q else {
        return false;
    };
    match q.insert_tail(s) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("insert_tail failed: {}", e);
            false
        }
    }
}

/// Remove the head element, copying it into `out` (truncated to fit, NUL
/// terminated) when a buffer is supplied.
pub fn remove_head(q: Option<&mut Queue>, out: Option<&mut [u8]>) -> bool {
    let Some(q) = q else {
        return false;
    };
    match q.remove_head_into(out) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("remove_head failed: {}", e);
            false
        }
    }
}

pub fn size(q: Option<&Queue>) -> usize {
    q.map_or(0, Queue::len)
}

pub fn reverse(q: Option<&mut Queue>) {
    if let Some(q) = q {
        q.reverse();
    }
}

pub fn sort(q: Option<&mut Queue>) {
    if let Some(q) = q {
        q.sort();
    }
}
