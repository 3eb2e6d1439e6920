//! Sorting routines that relink queue nodes in place.
//!
//! Neither routine allocates or moves a string; only `next` links change.

use super::queue::{Link, Node};

/// Bubble the largest remaining value to the end of the chain on each pass,
/// relinking adjacent nodes instead of swapping values.
///
/// `head` and `tail` are updated as nodes move. Only a strictly greater
/// value is moved past its successor, so equal values keep their order.
pub(crate) fn exchange_sort(nodes: &mut [Node], head: &mut Link, tail: &mut Link, len: usize) {
    for window in (2..=len).rev() {
        let mut prev: Link = None;
        let mut curr = *head;
        let mut swapped = false;

        for _ in 1..window {
            let Some(c) = curr else { break };
            let Some(n) = nodes[c].next else { break };

            if nodes[c].value > nodes[n].value {
                // prev -> c -> n -> rest  ==>  prev -> n -> c -> rest
                nodes[c].next = nodes[n].next;
                nodes[n].next = Some(c);
                match prev {
                    Some(p) => nodes[p].next = Some(n),
                    None => *head = Some(n),
                }
                if *tail == Some(n) {
                    *tail = Some(c);
                }
                // c moved forward one position and is compared again
                prev = Some(n);
                swapped = true;
            } else {
                prev = Some(c);
                curr = Some(n);
            }
        }

        if !swapped {
            break;
        }
    }
}

/// Top-down merge sort over a chain of `len` nodes starting at `head`.
/// Returns the new head; the caller is responsible for locating the tail.
pub(crate) fn merge_sort(nodes: &mut [Node], head: Link, len: usize) -> Link {
    if len < 2 {
        return head;
    }

    let first_len = len / 2;
    let second = split_after(nodes, head, first_len);

    let first = merge_sort(nodes, head, first_len);
    let second = merge_sort(nodes, second, len - first_len);
    merge(nodes, first, second)
}

/// Cut the chain after `count` nodes and return the head of the remainder.
fn split_after(nodes: &mut [Node], head: Link, count: usize) -> Link {
    let mut curr = head;
    for _ in 1..count {
        curr = curr.and_then(|slot| nodes[slot].next);
    }
    curr.and_then(|slot| nodes[slot].next.take())
}

/// Merge two sorted chains. Ties take from `first`.
fn merge(nodes: &mut [Node], mut first: Link, mut second: Link) -> Link {
    let mut head: Link = None;
    let mut last: Link = None;

    while let (Some(a), Some(b)) = (first, second) {
        let slot = if nodes[a].value <= nodes[b].value {
            first = nodes[a].next;
            a
        } else {
            second = nodes[b].next;
            b
        };

        match last {
            Some(l) => nodes[l].next = Some(slot),
            None => head = Some(slot),
        }
        last = Some(slot);
    }

    let rest = first.or(second);
    match last {
        Some(l) => nodes[l].next = rest,
        None => head = rest,
    }

    head
}

/// Walk to the last node of a chain.
pub(crate) fn last(nodes: &[Node], head: usize) -> usize {
    let mut curr = head;
    while let Some(next) = nodes[curr].next {
        curr = next;
    }
    curr
}
