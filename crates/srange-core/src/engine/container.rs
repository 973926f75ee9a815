use super::error::EngineError;
use crate::core::combination::CombiRanks;
use serde::Serialize;
use std::cmp::Ordering;

/// Worst single-state equivalent stress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StressIntensity {
    pub intensity: f64,
    pub load: usize,
    pub torsor: usize,
}

/// Worst equivalent stress range between two states.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StressRange {
    pub range: f64,
    pub mean: f64,
    pub ratio: f64,
    pub loads: CombiRanks,
    pub torsors: CombiRanks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperatures: Option<[f64; 2]>,
}

/// Running maximum of a search, ordered by `ratio` alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct StressContainer {
    intensity: f64,
    mean: f64,
    ratio: f64,
    loads: CombiRanks,
    torsors: CombiRanks,
    temperatures: Option<[f64; 2]>,
}

impl StressContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills the values from `[intensity]`, `[intensity, ratio]` or
    /// `[intensity, ratio, mean]`. A lone intensity is also its ratio.
    fn set_values(&mut self, values: &[f64]) -> Result<(), EngineError> {
        let (intensity, ratio, mean) = match *values {
            [intensity] => (intensity, intensity, 0.0),
            [intensity, ratio] => (intensity, ratio, 0.0),
            [intensity, ratio, mean] => (intensity, ratio, mean),
            _ => {
                return Err(EngineError::InvalidArgument(format!(
                    "a stress container takes 1 to 3 values, got {}",
                    values.len()
                )));
            }
        };
        self.intensity = intensity;
        self.ratio = ratio;
        self.mean = mean;
        Ok(())
    }

    pub fn set_intensity(
        &mut self,
        values: &[f64],
        load: usize,
        torsor: usize,
    ) -> Result<(), EngineError> {
        self.set_values(values)?;
        self.loads = (load, load);
        self.torsors = (torsor, torsor);
        Ok(())
    }

    pub fn set_range(
        &mut self,
        values: &[f64],
        loads: CombiRanks,
        torsors: CombiRanks,
    ) -> Result<(), EngineError> {
        self.set_values(values)?;
        self.loads = loads;
        self.torsors = torsors;
        Ok(())
    }

    pub fn set_temperatures(&mut self, temperatures: [f64; 2]) {
        self.temperatures = Some(temperatures);
    }

    /// Replaces `self` with `other` when `self < other`. Returns whether it
    /// did.
    pub fn store_max(&mut self, other: &StressContainer) -> bool {
        if *self < *other {
            *self = *other;
            true
        } else {
            false
        }
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn loads(&self) -> CombiRanks {
        self.loads
    }

    pub fn torsors(&self) -> CombiRanks {
        self.torsors
    }

    pub fn get_range(&self) -> StressRange {
        StressRange {
            range: self.intensity,
            mean: self.mean,
            ratio: self.ratio,
            loads: self.loads,
            torsors: self.torsors,
            temperatures: self.temperatures,
        }
    }

    pub fn get_intensity(&self) -> StressIntensity {
        StressIntensity {
            intensity: self.intensity,
            load: self.loads.0,
            torsor: self.torsors.0,
        }
    }
}

impl PartialEq for StressContainer {
    fn eq(&self, other: &Self) -> bool {
        self.ratio == other.ratio
    }
}

impl PartialOrd for StressContainer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.ratio.partial_cmp(&other.ratio)
    }
}
