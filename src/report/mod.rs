//! Reporting utilities: classification listings and summaries.

pub mod format;

pub use format::*;
