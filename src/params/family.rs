//! Distribution families and how their parameters react to a unit change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Distribution family of a marginal random variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Normal parameterised by mean and coefficient of variation.
    Normal,
    /// Explicit alias of `Normal`.
    NormalCov,
    /// Normal parameterised by mean and standard deviation.
    NormalStd,
    /// Lognormal parameterised by median and log standard deviation.
    Lognormal,
    /// Uniform on `[Theta_0, Theta_1]`.
    Uniform,
    /// Weibull with scale `Theta_0` and shape `Theta_1`.
    Weibull,
    Deterministic,
}

impl Family {
    pub const ALL: [Family; 7] = [
        Family::Normal,
        Family::NormalCov,
        Family::NormalStd,
        Family::Lognormal,
        Family::Uniform,
        Family::Weibull,
        Family::Deterministic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Family::Normal => "normal",
            Family::NormalCov => "normal_cov",
            Family::NormalStd => "normal_std",
            Family::Lognormal => "lognormal",
            Family::Uniform => "uniform",
            Family::Weibull => "weibull",
            Family::Deterministic => "deterministic",
        }
    }

    /// Which of `Theta_0..Theta_2` carry the variable's unit and therefore
    /// scale linearly. The rest are dimensionless (COV, log std, shape).
    pub fn dimensional_thetas(self) -> [bool; 3] {
        match self {
            Family::Normal | Family::NormalCov => [true, false, false],
            Family::NormalStd => [true, true, false],
            Family::Lognormal => [true, false, false],
            Family::Uniform => [true, true, false],
            Family::Weibull => [true, false, false],
            Family::Deterministic => [true, false, false],
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Family {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Family::ALL
            .into_iter()
            .find(|family| family.label() == s)
            .ok_or_else(|| AppError::UnsupportedDistribution(s.to_string()))
    }
}
