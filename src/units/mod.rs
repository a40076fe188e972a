//! Unit registry used to normalise distribution parameters.

pub mod registry;

pub use registry::*;
