//! Input/output helpers.
//!
//! - building inventory JSON read/write (`inventory`)
//! - marginal parameter CSV read/write (`params`)
//! - unit table overrides (`units`)

pub mod inventory;
pub mod params;
pub mod units;

pub use inventory::*;
pub use params::*;
pub use units::*;
