//! Marginal distribution parameters and their unit conversion.
//!
//! - distribution families (`family`)
//! - `Theta_0` values and tabulated functions (`theta`)
//! - `(cmp, loc, dir)`-keyed tables (`table`)
//! - conversion into SI base units (`convert`)

pub mod convert;
pub mod family;
pub mod table;
pub mod theta;

pub use convert::*;
pub use family::*;
pub use table::*;
pub use theta::*;
