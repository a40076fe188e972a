//! Building configuration rulesets.
//!
//! - CECB configuration rules (`cecb`)
//! - parallel classification of a whole inventory (`inventory`)

pub mod cecb;
pub mod inventory;

pub use cecb::*;
pub use inventory::*;
