//! `Theta_0` values: plain numbers or tabulated functions.
//!
//! A tabulated function is written as `"v1,v2,...|a1,a2,..."`: function values
//! before the bar, the arguments they apply at after it. The two axes carry
//! independent units, which is why unit conversion treats them separately.
//! The string form only exists at the I/O edges; in memory it is a
//! `TabulatedFunction`.

use std::fmt;
use std::str::FromStr;

/// A piecewise-linear function given as `(value, argument)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct TabulatedFunction {
    values: Vec<f64>,
    args: Vec<f64>,
}

impl TabulatedFunction {
    pub fn new(values: Vec<f64>, args: Vec<f64>) -> Result<Self, String> {
        if values.is_empty() {
            return Err("tabulated function needs at least one point".to_string());
        }
        if values.len() != args.len() {
            return Err(format!(
                "tabulated function has {} values but {} arguments",
                values.len(),
                args.len()
            ));
        }
        if values.iter().chain(&args).any(|v| !v.is_finite()) {
            return Err("tabulated function contains a non-finite number".to_string());
        }
        Ok(Self { values, args })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn args(&self) -> &[f64] {
        &self.args
    }

    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().copied().zip(self.args.iter().copied())
    }

    /// Rescale values and arguments independently. Fails if a product
    /// overflows to a non-finite number.
    pub fn rescaled(&self, value_factor: f64, arg_factor: f64) -> Result<Self, String> {
        Self::new(
            self.values.iter().map(|v| v * value_factor).collect(),
            self.args.iter().map(|a| a * arg_factor).collect(),
        )
    }
}

impl FromStr for TabulatedFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (values, args) = s
            .split_once('|')
            .ok_or_else(|| format!("'{s}' is not a tabulated function (missing '|')"))?;
        Self::new(parse_list(values)?, parse_list(args)?)
    }
}

impl fmt::Display for TabulatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, &self.values)?;
        f.write_str("|")?;
        write_list(f, &self.args)
    }
}

fn parse_list(s: &str) -> Result<Vec<f64>, String> {
    s.split(',')
        .map(|item| {
            let item = item.trim();
            item.parse::<f64>()
                .map_err(|_| format!("'{item}' is not a number"))
        })
        .collect()
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[f64]) -> fmt::Result {
    for (i, v) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{v}")?;
    }
    Ok(())
}

/// The first distribution parameter of a marginal.
#[derive(Debug, Clone, PartialEq)]
pub enum Theta {
    Value(f64),
    Tabulated(TabulatedFunction),
}

impl Theta {
    /// Parse a cell. Blank cells and `NaN` mean "not set".
    pub fn parse_cell(s: &str) -> Result<Option<Theta>, String> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        if s.contains('|') {
            return s.parse().map(|f| Some(Theta::Tabulated(f)));
        }
        let v: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
        if v.is_nan() {
            return Ok(None);
        }
        if !v.is_finite() {
            return Err(format!("'{s}' is not finite"));
        }
        Ok(Some(Theta::Value(v)))
    }

    pub fn as_value(&self) -> Option<f64> {
        match self {
            Theta::Value(v) => Some(*v),
            Theta::Tabulated(_) => None,
        }
    }
}

impl fmt::Display for Theta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theta::Value(v) => write!(f, "{v}"),
            Theta::Tabulated(func) => write!(f, "{func}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reference_string() {
        let func: TabulatedFunction = "500.0,400.00|20,10".parse().unwrap();
        assert_eq!(func.values(), &[500.0, 400.0]);
        assert_eq!(func.args(), &[20.0, 10.0]);
        assert_eq!(func.to_string(), "500,400|20,10");
    }

    #[test]
    fn rejects_malformed_tables() {
        for bad in ["1,2|3", "|", "1,,2|3,4,5", "a|b", "1|inf"] {
            assert!(bad.parse::<TabulatedFunction>().is_err(), "{bad:?} should fail");
        }
    }

    #[test]
    fn cells() {
        assert_eq!(Theta::parse_cell("").unwrap(), None);
        assert_eq!(Theta::parse_cell("NaN").unwrap(), None);
        assert_eq!(Theta::parse_cell(" 1.0 ").unwrap(), Some(Theta::Value(1.0)));
        assert!(matches!(
            Theta::parse_cell("1|2").unwrap(),
            Some(Theta::Tabulated(_))
        ));
        assert!(Theta::parse_cell("one").is_err());
    }

    #[test]
    fn rescale_overflow_is_rejected() {
        let func: TabulatedFunction = "1e300,2|10,20".parse().unwrap();

        let scaled = func.rescaled(2.0, 0.5).unwrap();
        assert_eq!(scaled.values(), [2e300, 4.0]);
        assert_eq!(scaled.args(), [5.0, 10.0]);
        assert!(func.rescaled(1e10, 1.0).is_err());
        assert!(func.rescaled(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn display_keeps_fractions() {
        assert_eq!(Theta::Value(0.0064516).to_string(), "0.0064516");
        assert_eq!(Theta::Value(1.0).to_string(), "1");
    }
}
