//! Domain types used by the rules and the CLI.
//!
//! This module defines:
//!
//! - the building inventory record (`BuildingInfo`)
//! - the CECB classifier outputs (`RoofCover`, `WindDebrisClass`, `CecbConfig`, ...)

pub mod types;

pub use types::*;
