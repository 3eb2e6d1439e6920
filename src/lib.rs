//! linkq library root.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod ops;

pub use crate::config::{load_config, load_config_or_default, QueueConfig};
pub use crate::core::{Iter, Queue};
pub use crate::error::{Error, Result};
