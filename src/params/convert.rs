//! Convert marginal parameters into the SI base unit system.
//!
//! Each row has a unit (the unit of the random variable) and, optionally, an
//! argument unit (the unit of the x-axis of a tabulated `Theta_0`). Plain
//! numbers only see the row unit. Tabulated functions have their arguments
//! scaled by the argument unit and their values by `unit / arg_unit`, so
//! every `value * argument` product is scaled by exactly the row unit.

use tracing::debug;

use crate::error::AppError;
use crate::params::table::{MarginalRow, MarginalTable};
use crate::params::theta::Theta;
use crate::units::UnitRegistry;

/// Convert every row of `table`.
///
/// `units[i]` (and `arg_units[i]`, if given) belong to row `i`. A blank
/// argument unit means the row has none. The result keeps row order and keys.
pub fn convert_marginal_params<S: AsRef<str>>(
    table: &MarginalTable,
    units: &[S],
    arg_units: Option<&[S]>,
    registry: &UnitRegistry,
) -> Result<MarginalTable, AppError> {
    if units.len() != table.len() {
        return Err(AppError::LengthMismatch {
            what: "unit series",
            expected: table.len(),
            found: units.len(),
        });
    }
    if let Some(arg_units) = arg_units {
        if arg_units.len() != table.len() {
            return Err(AppError::LengthMismatch {
                what: "argument unit series",
                expected: table.len(),
                found: arg_units.len(),
            });
        }
    }

    table
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let arg_unit = arg_units
                .map(|a| a[i].as_ref().trim())
                .filter(|a| !a.is_empty());
            convert_row(row, units[i].as_ref(), arg_unit, registry)
        })
        .collect()
}

/// Convert a single row.
pub fn convert_row(
    row: &MarginalRow,
    unit: &str,
    arg_unit: Option<&str>,
    registry: &UnitRegistry,
) -> Result<MarginalRow, AppError> {
    let factor = registry.factor(unit)?;
    let arg_factor = match arg_unit {
        Some(label) => registry.factor(label)?,
        None => 1.0,
    };
    debug!(key = %row.key, unit, factor, arg_factor, "converting marginal");

    let theta_0 = match &row.theta_0 {
        None => None,
        Some(Theta::Value(v)) => Some(Theta::Value(v * factor)),
        Some(Theta::Tabulated(func)) => {
            let scaled = func
                .rescaled(factor / arg_factor, arg_factor)
                .map_err(|reason| {
                    AppError::invalid_parameter(format!("{} Theta_0", row.key), reason)
                })?;
            Some(Theta::Tabulated(scaled))
        }
    };

    let Some(family) = row.family else {
        // Without a family only Theta_0 has a meaning.
        return Ok(MarginalRow {
            theta_0,
            ..row.clone()
        });
    };

    let [_, scale_1, scale_2] = family.dimensional_thetas();
    let scale_if = |value: Option<f64>, dimensional: bool| {
        value.map(|v| if dimensional { v * factor } else { v })
    };

    Ok(MarginalRow {
        key: row.key.clone(),
        family: Some(family),
        theta_0,
        theta_1: scale_if(row.theta_1, scale_1),
        theta_2: scale_if(row.theta_2, scale_2),
        truncate_lower: row.truncate_lower.map(|v| v * factor),
        truncate_upper: row.truncate_upper.map(|v| v * factor),
    })
}
