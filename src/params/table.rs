//! Marginal parameter tables keyed by `(cmp, loc, dir)`.

use std::fmt;

use crate::params::family::Family;
use crate::params::theta::Theta;

/// Identity of a random variable: component, location, direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RvKey {
    pub cmp: String,
    pub loc: String,
    pub dir: String,
}

impl RvKey {
    pub fn new(cmp: impl Into<String>, loc: impl Into<String>, dir: impl Into<String>) -> Self {
        Self {
            cmp: cmp.into(),
            loc: loc.into(),
            dir: dir.into(),
        }
    }
}

impl fmt::Display for RvKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.cmp, self.loc, self.dir)
    }
}

/// Distribution parameters of one random variable. `None` marks an unset cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarginalRow {
    pub key: RvKey,
    pub family: Option<Family>,
    pub theta_0: Option<Theta>,
    pub theta_1: Option<f64>,
    pub theta_2: Option<f64>,
    pub truncate_lower: Option<f64>,
    pub truncate_upper: Option<f64>,
}

impl MarginalRow {
    pub fn new(key: RvKey) -> Self {
        Self {
            key,
            ..Self::default()
        }
    }
}

/// Ordered collection of marginal rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarginalTable {
    rows: Vec<MarginalRow>,
}

impl MarginalTable {
    pub fn new(rows: Vec<MarginalRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[MarginalRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, key: &RvKey) -> Option<&MarginalRow> {
        self.rows.iter().find(|row| &row.key == key)
    }
}

impl FromIterator<MarginalRow> for MarginalTable {
    fn from_iter<I: IntoIterator<Item = MarginalRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
