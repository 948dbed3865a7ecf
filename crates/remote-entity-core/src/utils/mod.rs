//! Utility functions for string formatting.

pub mod format;

pub use format::{completion_mark, truncate_string};
