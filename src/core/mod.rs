//! Core module - the linked queue and its sorting routines.
//!
//! - Arena-backed singly linked queue of strings
//! - Exchange sort and merge sort over the node chain

pub mod queue;
mod sort;

pub use queue::{Iter, Queue};
