//! Singly linked string queue.
//!
//! Nodes live in an arena and are linked by slot index. The queue owns every
//! node through the arena; `head` and `tail` are plain indices into it, so
//! there is exactly one owner per node. Removed slots are threaded onto a
//! free-list through their `next` link and reused by later insertions.

use std::fmt;
use std::mem;

use super::sort;
use crate::config::QueueConfig;
use crate::error::{Error, Result};

/// Slot index of the next node, or `None` at the end of a chain.
pub(crate) type Link = Option<usize>;

/// A queue element: one owned string and a link to its successor.
#[derive(Debug, Default)]
pub(crate) struct Node {
    pub(crate) value: String,
    pub(crate) next: Link,
}

/// Queue of strings with O(1) head/tail insertion and head removal.
pub struct Queue {
    nodes: Vec<Node>,
    free: Link,
    head: Link,
    tail: Link,
    len: usize,
    sort_threshold: usize,
}

impl Queue {
    /// Create an empty queue with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&QueueConfig::default())
    }

    /// Create an empty queue with the given configuration.
    pub fn with_config(config: &QueueConfig) -> Self {
        Self {
            nodes: Vec::new(),
            free: None,
            head: None,
            tail: None,
            len: 0,
            sort_threshold: config.sort_threshold,
        }
    }

    /// Number of elements, tracked incrementally.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size at which `sort` switches to merge sort.
    pub fn sort_threshold(&self) -> usize {
        self.sort_threshold
    }

    pub fn peek_head(&self) -> Option<&str> {
        self.head.map(|slot| self.nodes[slot].value.as_str())
    }

    pub fn peek_tail(&self) -> Option<&str> {
        self.tail.map(|slot| self.nodes[slot].value.as_str())
    }

    /// Iterate over the values from head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            next: self.head,
            remaining: self.len,
        }
    }

    /// Insert a copy of `s` before the current head.
    ///
    /// On allocation failure the queue is left unchanged.
    pub fn insert_head(&mut self, s: &str) -> Result<()> {
        let value = copy_value(s)?;
        let slot = self.alloc_slot(value)?;

        self.nodes[slot].next = self.head;
        if self.head.is_none() {
            self.tail = Some(slot);
        }
        self.head = Some(slot);
        self.len += 1;

        tracing::trace!(slot, len = self.len, "inserted at head");
        Ok(())
    }

    /// Insert a copy of `s` after the current tail.
    ///
    /// On allocation failure the queue is left unchanged.
    pub fn insert_tail(&mut self, s: &str) -> Result<()> {
        let value = copy_value(s)?;
        let slot = self.alloc_slot(value)?;

        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.len += 1;

        tracing::trace!(slot, len = self.len, "inserted at tail");
        Ok(())
    }

    /// Detach the head element and return its value.
    pub fn remove_head(&mut self) -> Result<String> {
        let head = self.head.ok_or(Error::Empty)?;

        let node = &mut self.nodes[head];
        let value = mem::take(&mut node.value);
        self.head = mem::replace(&mut node.next, self.free);
        self.free = Some(head);

        if self.tail == Some(head) {
            self.tail = None;
        }
        self.len -= 1;

        tracing::trace!(slot = head, len = self.len, "removed head");
        Ok(value)
    }

    /// Detach the head element, copying its value into `out` if given.
    ///
    /// At most `out.len() - 1` bytes are copied, followed by a NUL; the rest
    /// of the buffer is zero filled. An empty buffer is treated like `None`.
    pub fn remove_head_into(&mut self, out: Option<&mut [u8]>) -> Result<()> {
        let value = self.remove_head()?;
        if let Some(buf) = out {
            copy_truncated(&value, buf);
        }
        Ok(())
    }

    /// Release every element, leaving an empty queue.
    pub fn clear(&mut self) {
        tracing::debug!(len = self.len, "clearing queue");
        self.nodes.clear();
        self.free = None;
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Reverse the element order in place by flipping every link.
    pub fn reverse(&mut self) {
        if self.len < 2 {
            return;
        }

        let mut prev: Link = None;
        let mut curr = self.head;
        while let Some(slot) = curr {
            curr = mem::replace(&mut self.nodes[slot].next, prev);
            prev = Some(slot);
        }

        mem::swap(&mut self.head, &mut self.tail);
        tracing::trace!(len = self.len, "reversed queue");
    }

    /// Sort the elements into ascending order by value.
    ///
    /// Small queues use exchange sort, larger ones merge sort. Both keep
    /// equal values in their original relative order.
    pub fn sort(&mut self) {
        if self.len < 2 {
            return;
        }

        if self.len < self.sort_threshold {
            tracing::trace!(len = self.len, "exchange sort");
            sort::exchange_sort(&mut self.nodes, &mut self.head, &mut self.tail, self.len);
        } else {
            tracing::trace!(len = self.len, "merge sort");
            self.head = sort::merge_sort(&mut self.nodes, self.head, self.len);
            self.tail = self.head.map(|head| sort::last(&self.nodes, head));
        }
    }

    /// Take a slot from the free-list or grow the arena by one.
    fn alloc_slot(&mut self, value: String) -> Result<usize> {
        if let Some(slot) = self.free {
            let node = &mut self.nodes[slot];
            self.free = node.next.take();
            node.value = value;
            return Ok(slot);
        }

        self.nodes.try_reserve(1)?;
        self.nodes.push(Node { value, next: None });
        Ok(self.nodes.len() - 1)
    }
}

fn copy_value(s: &str) -> Result<String> {
    let mut value = String::new();
    value.try_reserve_exact(s.len())?;
    value.push_str(s);
    Ok(value)
}

fn copy_truncated(value: &str, buf: &mut [u8]) {
    if buf.is_empty() {
        return;
    }
    let n = value.len().min(buf.len() - 1);
    buf[..n].copy_from_slice(&value.as_bytes()[..n]);
    buf[n..].fill(0);
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over queue values, head to tail.
pub struct Iter<'a> {
    nodes: &'a [Node],
    next: Link,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.next?;
        let node = &self.nodes[slot];
        self.next = node.next;
        self.remaining -= 1;
        Some(node.value.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
