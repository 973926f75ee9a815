use super::table::{InterpolationMethod, Table, TableError};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoefficientError {
    #[error("Unknown coefficient key: '{0}'")]
    UnknownKey(String),
    #[error("Unknown coefficient law: '{0}'. Expected 'constant', 'linear' or 'logarithmic'")]
    UnknownLaw(String),
    #[error(transparent)]
    Table(#[from] TableError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoefficientLaw {
    Constant,
    Linear,
    Logarithmic,
}

impl FromStr for CoefficientLaw {
    type Err = CoefficientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "constant" => Ok(CoefficientLaw::Constant),
            "linear" => Ok(CoefficientLaw::Linear),
            "logarithmic" => Ok(CoefficientLaw::Logarithmic),
            other => Err(CoefficientError::UnknownLaw(other.to_string())),
        }
    }
}

/// Scalar function of one parameter, typically an admissible stress as a
/// function of temperature.
#[derive(Debug, Clone, PartialEq)]
pub enum Coefficient {
    Constant(f64),
    Linear(Table),
    Logarithmic(Table),
}

impl Coefficient {
    pub fn constant(value: f64) -> Self {
        Coefficient::Constant(value)
    }

    /// A constant law built from a table keeps the table's largest ordinate.
    pub fn from_table(law: CoefficientLaw, table: Table) -> Self {
        match law {
            CoefficientLaw::Constant => Coefficient::Constant(table.ymax()),
            CoefficientLaw::Linear => Coefficient::Linear(table),
            CoefficientLaw::Logarithmic => Coefficient::Logarithmic(table),
        }
    }

    pub fn law(&self) -> CoefficientLaw {
        match self {
            Coefficient::Constant(_) => CoefficientLaw::Constant,
            Coefficient::Linear(_) => CoefficientLaw::Linear,
            Coefficient::Logarithmic(_) => CoefficientLaw::Logarithmic,
        }
    }

    pub fn get(&self) -> Option<f64> {
        match self {
            Coefficient::Constant(value) => Some(*value),
            _ => None,
        }
    }

    pub fn table(&self) -> Option<&Table> {
        match self {
            Coefficient::Constant(_) => None,
            Coefficient::Linear(table) | Coefficient::Logarithmic(table) => Some(table),
        }
    }

    pub fn get_yvalue(&self, x: f64) -> Result<f64, TableError> {
        match self {
            Coefficient::Constant(value) => Ok(*value),
            Coefficient::Linear(table) => table.get_yvalue(x, InterpolationMethod::Linear),
            Coefficient::Logarithmic(table) => {
                table.get_yvalue(x, InterpolationMethod::Logarithmic)
            }
        }
    }

    pub fn get_xvalue(&self, y: f64) -> Result<f64, TableError> {
        match self {
            Coefficient::Constant(value) if y == *value => {
                Err(TableError::DegenerateSegment { index: 0 })
            }
            Coefficient::Constant(value) => Err(TableError::OutOfRange {
                value: y,
                min: *value,
                max: *value,
            }),
            Coefficient::Linear(table) => table.get_xvalue(y, InterpolationMethod::Linear),
            Coefficient::Logarithmic(table) => {
                table.get_xvalue(y, InterpolationMethod::Logarithmic)
            }
        }
    }
}

impl Default for Coefficient {
    fn default() -> Self {
        Coefficient::Constant(1.0)
    }
}

/// Named coefficients, looked up by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoefficientSet {
    coefficients: HashMap<String, Coefficient>,
}

impl CoefficientSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, coefficient: Coefficient) {
        self.coefficients.insert(key.into(), coefficient);
    }

    pub fn get(&self, key: &str) -> Result<&Coefficient, CoefficientError> {
        self.coefficients
            .get(key)
            .ok_or_else(|| CoefficientError::UnknownKey(key.to_string()))
    }

    pub fn get_yvalue(&self, key: &str, x: f64) -> Result<f64, CoefficientError> {
        Ok(self.get(key)?.get_yvalue(x)?)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.coefficients.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }
}
