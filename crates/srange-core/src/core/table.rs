use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Table is empty")]
    Empty,
    #[error("Abscissa and ordinate sequences differ in length ({x} vs {y})")]
    LengthMismatch { x: usize, y: usize },
    #[error("Value {value} lies outside the table domain [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },
    #[error("Degenerate interpolation segment starting at point {index}")]
    DegenerateSegment { index: usize },
    #[error("Logarithmic interpolation requires strictly positive values, found {value}")]
    NonPositiveLogValue { value: f64 },
    #[error("Unknown interpolation method: '{0}'. Expected 'linear' or 'logarithmic'")]
    UnknownMethod(String),
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterpolationMethod {
    Linear,
    Logarithmic,
}

impl InterpolationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterpolationMethod::Linear => "linear",
            InterpolationMethod::Logarithmic => "logarithmic",
        }
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterpolationMethod {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(InterpolationMethod::Linear),
            "logarithmic" => Ok(InterpolationMethod::Logarithmic),
            other => Err(TableError::UnknownMethod(other.to_string())),
        }
    }
}

/// Piecewise interpolation table over two parallel coordinate sequences.
///
/// Abscissae need not be sorted. A query scans consecutive pairs of points
/// in storage order and the first segment bracketing the value is used, so
/// on a non-monotonic table the answer depends on point order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    xvalues: Vec<f64>,
    yvalues: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct TableRow {
    x: f64,
    y: f64,
}

impl Table {
    pub fn new(xvalues: Vec<f64>, yvalues: Vec<f64>) -> Result<Self, TableError> {
        let table = Self { xvalues, yvalues };
        table.check()?;
        Ok(table)
    }

    /// Reads a two-column `x,y` CSV file (with header) into a table.
    pub fn load_csv(path: &Path) -> Result<Self, TableError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| TableError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut xvalues = Vec::new();
        let mut yvalues = Vec::new();
        for result in reader.deserialize::<TableRow>() {
            let row = result.map_err(|e| TableError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
            xvalues.push(row.x);
            yvalues.push(row.y);
        }

        Self::new(xvalues, yvalues)
    }

    /// Merges additional points into the table.
    ///
    /// The resulting abscissae are sorted and unique. For an abscissa already
    /// present in the table the existing ordinate is kept.
    pub fn expand(&mut self, abscissae: &[f64], ordinates: &[f64]) -> Result<(), TableError> {
        if abscissae.len() != ordinates.len() {
            return Err(TableError::LengthMismatch {
                x: abscissae.len(),
                y: ordinates.len(),
            });
        }

        let merged = merge_and_sort_unique(&self.xvalues, abscissae);
        let yvalues = merged
            .iter()
            .map(|&x| {
                self.xvalues
                    .iter()
                    .position(|&v| v == x)
                    .map(|i| self.yvalues[i])
                    .or_else(|| {
                        abscissae
                            .iter()
                            .position(|&v| v == x)
                            .map(|j| ordinates[j])
                    })
                    .unwrap_or(0.0)
            })
            .collect();

        self.xvalues = merged;
        self.yvalues = yvalues;
        self.check()
    }

    pub fn size(&self) -> usize {
        self.xvalues.len()
    }

    pub fn xvalues(&self) -> &[f64] {
        &self.xvalues
    }

    pub fn yvalues(&self) -> &[f64] {
        &self.yvalues
    }

    pub fn xmin(&self) -> f64 {
        min_value(&self.xvalues)
    }

    pub fn xmax(&self) -> f64 {
        max_value(&self.xvalues)
    }

    pub fn ymin(&self) -> f64 {
        min_value(&self.yvalues)
    }

    pub fn ymax(&self) -> f64 {
        max_value(&self.yvalues)
    }

    pub fn xrange(&self) -> [f64; 2] {
        [self.xmin(), self.xmax()]
    }

    pub fn yrange(&self) -> [f64; 2] {
        [self.ymin(), self.ymax()]
    }

    pub fn get_yvalue(&self, x: f64, method: InterpolationMethod) -> Result<f64, TableError> {
        self.check()?;
        interpolate(&self.xvalues, &self.yvalues, x, method)
    }

    pub fn get_xvalue(&self, y: f64, method: InterpolationMethod) -> Result<f64, TableError> {
        self.check()?;
        interpolate(&self.yvalues, &self.xvalues, y, method)
    }

    fn check(&self) -> Result<(), TableError> {
        if self.xvalues.is_empty() || self.yvalues.is_empty() {
            return Err(TableError::Empty);
        }
        if self.xvalues.len() != self.yvalues.len() {
            return Err(TableError::LengthMismatch {
                x: self.xvalues.len(),
                y: self.yvalues.len(),
            });
        }
        Ok(())
    }
}

pub fn merge_and_sort_unique(first: &[f64], second: &[f64]) -> Vec<f64> {
    let mut merged: Vec<f64> = first.iter().chain(second.iter()).copied().collect();
    merged.sort_by(|a, b| a.total_cmp(b));
    merged.dedup();
    merged
}

fn min_value(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max_value(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn interpolate(
    from: &[f64],
    to: &[f64],
    value: f64,
    method: InterpolationMethod,
) -> Result<f64, TableError> {
    let max = max_value(from);
    let min = match method {
        InterpolationMethod::Linear => min_value(from),
        InterpolationMethod::Logarithmic => min_value(from).max(0.0),
    };
    if value < min || value > max {
        return Err(TableError::OutOfRange { value, min, max });
    }
    if method == InterpolationMethod::Logarithmic && value <= 0.0 {
        return Err(TableError::NonPositiveLogValue { value });
    }

    for (index, (segment, image)) in from.windows(2).zip(to.windows(2)).enumerate() {
        let (f0, f1) = (segment[0], segment[1]);
        if value < f0.min(f1) || value > f0.max(f1) {
            continue;
        }
        if f0 == f1 {
            return Err(TableError::DegenerateSegment { index });
        }

        let (t0, t1) = (image[0], image[1]);
        return match method {
            InterpolationMethod::Linear => {
                let slope = (t1 - t0) / (f1 - f0);
                Ok(t0 + slope * (value - f0))
            }
            InterpolationMethod::Logarithmic => {
                if let Some(&bad) = [f0, f1, t0, t1].iter().find(|v| **v <= 0.0) {
                    return Err(TableError::NonPositiveLogValue { value: bad });
                }
                let slope = (t1.ln() - t0.ln()) / (f1.ln() - f0.ln());
                Ok((t0.ln() + slope * (value.ln() - f0.ln())).exp())
            }
        };
    }

    Err(TableError::OutOfRange { value, min, max })
}
