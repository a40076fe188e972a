//! `dl-rules` library crate.
//!
//! Two independent pieces of a damage-and-loss workflow:
//!
//! - HAZUS CECB configuration rules that label buildings from inventory data
//! - conversion of marginal distribution parameters into SI base units
//!
//! The binary (`dl`) is a thin wrapper around this library so that the rules
//! and the conversion stay testable without spawning processes.

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod params;
pub mod report;
pub mod rules;
pub mod units;
