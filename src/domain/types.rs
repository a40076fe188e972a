//! Shared domain types.
//!
//! `BuildingInfo` is deliberately loose (a JSON object) because inventories
//! carry many attributes that no single ruleset cares about. Rules read the
//! fields they need through typed accessors and fail with `MissingField` /
//! `InvalidField` instead of guessing.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;

/// Building inventory attributes keyed by attribute name (`YearBuilt`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingInfo(Map<String, Value>);

impl BuildingInfo {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    fn require(&self, key: &str) -> Result<&Value, AppError> {
        self.0
            .get(key)
            .filter(|v| !v.is_null())
            .ok_or_else(|| AppError::MissingField(key.to_string()))
    }

    /// Integer attribute. Integral floats (`3.0`) are accepted.
    pub fn require_i64(&self, key: &str) -> Result<i64, AppError> {
        let value = self.require(key)?;
        if let Some(v) = value.as_i64() {
            return Ok(v);
        }
        match value.as_f64() {
            Some(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i64),
            _ => Err(AppError::invalid_field(key, format!("expected an integer, got {value}"))),
        }
    }

    pub fn require_f64(&self, key: &str) -> Result<f64, AppError> {
        let value = self.require(key)?;
        value
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| AppError::invalid_field(key, format!("expected a number, got {value}")))
    }

    /// Boolean attribute. Inventories exported from spreadsheets often store
    /// flags as `0`/`1`, so those are accepted too.
    pub fn require_bool(&self, key: &str) -> Result<bool, AppError> {
        let value = self.require(key)?;
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) if n.as_f64() == Some(0.0) => Ok(false),
            Value::Number(n) if n.as_f64() == Some(1.0) => Ok(true),
            other => Err(AppError::invalid_field(key, format!("expected a boolean, got {other}"))),
        }
    }

    pub fn require_str(&self, key: &str) -> Result<&str, AppError> {
        let value = self.require(key)?;
        value
            .as_str()
            .ok_or_else(|| AppError::invalid_field(key, format!("expected a string, got {value}")))
    }
}

impl From<Map<String, Value>> for BuildingInfo {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Roof covering assigned by the CECB rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoofCover {
    /// Built-up roof.
    Bur,
    /// Single-ply membrane.
    Spm,
}

impl RoofCover {
    pub fn code(self) -> &'static str {
        match self {
            RoofCover::Bur => "bur",
            RoofCover::Spm => "spm",
        }
    }
}

/// HAZUS wind-borne debris environment (`widd`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindDebrisClass {
    /// Residential/commercial.
    A,
    /// Residential.
    C,
    /// None.
    D,
}

impl WindDebrisClass {
    pub fn code(self) -> &'static str {
        match self {
            WindDebrisClass::A => "A",
            WindDebrisClass::C => "C",
            WindDebrisClass::D => "D",
        }
    }
}

/// Window-to-wall area ratio bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowAreaRatio {
    Low,
    Med,
    Hig,
}

impl WindowAreaRatio {
    pub fn code(self) -> &'static str {
        match self {
            WindowAreaRatio::Low => "low",
            WindowAreaRatio::Med => "med",
            WindowAreaRatio::Hig => "hig",
        }
    }
}

/// Height class of an engineered commercial building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiseClass {
    LowRise,
    MidRise,
    HighRise,
}

impl RiseClass {
    pub fn tag(self) -> &'static str {
        match self {
            RiseClass::LowRise => "C.ECB.L",
            RiseClass::MidRise => "C.ECB.M",
            RiseClass::HighRise => "C.ECB.H",
        }
    }
}

/// Resolved CECB configuration for a single building.
///
/// `Display` renders the HAZUS configuration tag, e.g. `C.ECB.M.bur.1.C.low.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CecbConfig {
    pub rise: RiseClass,
    pub roof_cover: RoofCover,
    pub shutters: bool,
    pub wind_debris: WindDebrisClass,
    pub window_area: WindowAreaRatio,
    pub terrain_roughness: i64,
}

impl fmt::Display for CecbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}.{}.{}",
            self.rise.tag(),
            self.roof_cover.code(),
            u8::from(self.shutters),
            self.wind_debris.code(),
            self.window_area.code(),
            self.terrain_roughness
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bim(value: Value) -> BuildingInfo {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn integer_accessor_accepts_integral_floats() {
        let b = bim(json!({"NumberOfStories": 3.0, "YearBuilt": 1990.5}));
        assert_eq!(b.require_i64("NumberOfStories").unwrap(), 3);
        assert!(matches!(
            b.require_i64("YearBuilt"),
            Err(AppError::InvalidField { .. })
        ));
    }

    #[test]
    fn null_counts_as_missing() {
        let b = bim(json!({"RoofShape": null}));
        assert!(matches!(
            b.require_str("RoofShape"),
            Err(AppError::MissingField(k)) if k == "RoofShape"
        ));
    }

    #[test]
    fn bool_accessor_accepts_zero_one() {
        let b = bim(json!({"a": 1, "b": 0, "c": true, "d": "yes"}));
        assert!(b.require_bool("a").unwrap());
        assert!(!b.require_bool("b").unwrap());
        assert!(b.require_bool("c").unwrap());
        assert!(b.require_bool("d").is_err());
    }

    #[test]
    fn config_renders_tag() {
        let cfg = CecbConfig {
            rise: RiseClass::HighRise,
            roof_cover: RoofCover::Spm,
            shutters: false,
            wind_debris: WindDebrisClass::A,
            window_area: WindowAreaRatio::Hig,
            terrain_roughness: 35,
        };
        assert_eq!(cfg.to_string(), "C.ECB.H.spm.0.A.hig.35");
    }
}
