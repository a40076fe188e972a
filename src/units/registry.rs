//! Unit labels and their scale factors into the SI base (m, sec, kg, N).
//!
//! A label may carry a numeric multiplier, e.g. `"10 ft2"` resolves to ten
//! times the factor of `ft2`. Unknown labels are always an error; there is no
//! silent fallback to `1.0`.

use std::collections::HashMap;

use crate::error::AppError;

const INCH: f64 = 0.0254;
const FOOT: f64 = 12.0 * INCH;
const MILE: f64 = 5280.0 * FOOT;
const G: f64 = 9.80665;
const LBF: f64 = 4.448_221_615_260_5;
const KIP: f64 = 1000.0 * LBF;

/// Built-in unit table.
pub const STANDARD_UNITS: &[(&str, f64)] = &[
    // dimensionless
    ("ea", 1.0),
    ("unitless", 1.0),
    ("rad", 1.0),
    ("deg", std::f64::consts::PI / 180.0),
    // monetary and labour quantities are carried as-is
    ("USD", 1.0),
    ("USD_2011", 1.0),
    ("worker_day", 1.0),
    // time
    ("sec", 1.0),
    ("s", 1.0),
    ("minute", 60.0),
    ("hour", 3600.0),
    ("day", 86_400.0),
    // length
    ("m", 1.0),
    ("mm", 0.001),
    ("cm", 0.01),
    ("km", 1000.0),
    ("in", INCH),
    ("inch", INCH),
    ("ft", FOOT),
    ("mile", MILE),
    // area
    ("m2", 1.0),
    ("mm2", 1e-6),
    ("cm2", 1e-4),
    ("km2", 1e6),
    ("in2", INCH * INCH),
    ("inch2", INCH * INCH),
    ("ft2", FOOT * FOOT),
    ("mile2", MILE * MILE),
    ("acre", 43_560.0 * FOOT * FOOT),
    // volume
    ("m3", 1.0),
    ("in3", INCH * INCH * INCH),
    ("ft3", FOOT * FOOT * FOOT),
    // speed
    ("mps", 1.0),
    ("kph", 1000.0 / 3600.0),
    ("mph", MILE / 3600.0),
    ("inps", INCH),
    ("ftps", FOOT),
    // acceleration
    ("mps2", 1.0),
    ("inps2", INCH),
    ("ftps2", FOOT),
    ("g", G),
    // mass
    ("kg", 1.0),
    ("ton", 1000.0),
    // force
    ("N", 1.0),
    ("kN", 1000.0),
    ("lb", LBF),
    ("lbf", LBF),
    ("kip", KIP),
    ("kips", KIP),
    // pressure
    ("Pa", 1.0),
    ("kPa", 1e3),
    ("MPa", 1e6),
    ("GPa", 1e9),
    ("psi", LBF / (INCH * INCH)),
    ("ksi", KIP / (INCH * INCH)),
    ("psf", LBF / (FOOT * FOOT)),
];

/// Lookup table from unit label to SI scale factor.
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    factors: HashMap<String, f64>,
}

impl UnitRegistry {
    /// An empty registry. Every lookup fails until units are inserted.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry preloaded with [`STANDARD_UNITS`].
    pub fn standard() -> Self {
        Self {
            factors: STANDARD_UNITS
                .iter()
                .map(|(label, factor)| (label.to_string(), *factor))
                .collect(),
        }
    }

    /// Add or replace a unit. Factors must be finite and strictly positive.
    pub fn insert(&mut self, label: impl Into<String>, factor: f64) -> Result<(), AppError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(AppError::Config("unit label must not be empty".to_string()));
        }
        if !(factor.is_finite() && factor > 0.0) {
            return Err(AppError::Config(format!(
                "unit `{label}` has invalid scale factor {factor}"
            )));
        }
        self.factors.insert(label, factor);
        Ok(())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.factors.contains_key(label.trim())
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Scale factor for `label`, honouring an optional leading multiplier.
    pub fn factor(&self, label: &str) -> Result<f64, AppError> {
        let label = label.trim();
        if let Some(factor) = self.factors.get(label) {
            return Ok(*factor);
        }

        let undefined = || AppError::UndefinedUnit(label.to_string());
        let (count, unit) = label.split_once(char::is_whitespace).ok_or_else(undefined)?;
        let count: f64 = count.parse().map_err(|_| undefined())?;
        if !(count.is_finite() && count > 0.0) {
            return Err(undefined());
        }
        let base = self.factors.get(unit.trim()).ok_or_else(undefined)?;
        Ok(count * base)
    }
}
