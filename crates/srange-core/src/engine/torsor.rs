use crate::core::combination::CombiRanks;
use thiserror::Error;

/// Threshold below which a channel's envelope is considered identical for
/// both states of a pair.
pub const CONSTANT_CHANNEL_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TorsorError {
    #[error("Coefficient row {row} has {found} entries, expected {expected} (one per torsor)")]
    CoefficientShape {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Maximum and minimum coefficient matrices differ in state count ({max} vs {min})")]
    StateCountMismatch { max: usize, min: usize },
    #[error("Coefficient matrices must be linked before activating torsors")]
    NotLinked,
    #[error("Cannot activate torsors: no torsor is defined")]
    NoTorsors,
    #[error("Coefficient output has {found} entries, expected {expected}")]
    OutputLength { expected: usize, found: usize },
    #[error("State {state} is out of range ({size} states)")]
    StateOutOfRange { state: usize, size: usize },
    #[error("{count} varying channels exceed the enumerable combination count")]
    TooManyChannels { count: usize },
}

/// Worst-case coefficient enumerator over the load channels ("torsors").
///
/// Borrows the per-state coefficient envelopes, shaped `[state][torsor]`,
/// for the lifetime of a search. The matrices must not change while a
/// `TorsorCombination` refers to them, which the borrow enforces.
///
/// For a pair of states, every active channel picks either its maximum or
/// its minimum envelope. A channel whose absolute envelope sums agree
/// between the two states is constant: it always takes the maximum and does
/// not consume a bit of the combination number. The remaining channels are
/// encoded one bit each, bit 0 going to the highest-indexed channel.
#[derive(Debug, Clone, Default)]
pub struct TorsorCombination<'a> {
    coefficients: Option<(&'a [Vec<f64>], &'a [Vec<f64>])>,
    active_torsors: Vec<bool>,
}

impl<'a> TorsorCombination<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coefficients(max: &'a [Vec<f64>], min: &'a [Vec<f64>]) -> Self {
        let mut manager = Self::new();
        manager.set_coefficients(max, min);
        manager
    }

    /// Links the envelopes. Any previous activation is dropped.
    pub fn set_coefficients(&mut self, max: &'a [Vec<f64>], min: &'a [Vec<f64>]) {
        self.coefficients = Some((max, min));
        self.active_torsors.clear();
    }

    /// Activates the channels flagged `true`. The flag count defines the
    /// number of torsors and must match every coefficient row.
    pub fn set_active_torsors(&mut self, flags: &[bool]) -> Result<(), TorsorError> {
        let (max, min) = self.coefficients.ok_or(TorsorError::NotLinked)?;
        if flags.is_empty() {
            return Err(TorsorError::NoTorsors);
        }
        if max.len() != min.len() {
            return Err(TorsorError::StateCountMismatch {
                max: max.len(),
                min: min.len(),
            });
        }
        for (row, (row_max, row_min)) in max.iter().zip(min).enumerate() {
            for found in [row_max.len(), row_min.len()] {
                if found != flags.len() {
                    return Err(TorsorError::CoefficientShape {
                        row,
                        expected: flags.len(),
                        found,
                    });
                }
            }
        }

        self.active_torsors = flags.to_vec();
        Ok(())
    }

    pub fn is_activated(&self) -> bool {
        !self.active_torsors.is_empty()
    }

    pub fn nb_torsors(&self) -> usize {
        self.active_torsors.len()
    }

    pub fn active_torsors(&self) -> &[bool] {
        &self.active_torsors
    }

    /// Precomputes the varying channels of a state pair.
    pub fn pair(&self, states: CombiRanks) -> Result<TorsorPair<'a>, TorsorError> {
        let Some((max, min)) = self.coefficients.filter(|_| self.is_activated()) else {
            return Ok(TorsorPair {
                rows: None,
                active: Vec::new(),
                varying: Vec::new(),
            });
        };

        for state in [states.0, states.1] {
            if state >= max.len() {
                return Err(TorsorError::StateOutOfRange {
                    state,
                    size: max.len(),
                });
            }
        }

        let rows = PairRows {
            max1: &max[states.0],
            max2: &max[states.1],
            min1: &min[states.0],
            min2: &min[states.1],
        };
        let varying: Vec<usize> = (0..self.active_torsors.len())
            .rev()
            .filter(|&rk| self.active_torsors[rk] && !rows.is_constant(rk))
            .collect();
        if varying.len() >= usize::BITS as usize {
            return Err(TorsorError::TooManyChannels {
                count: varying.len(),
            });
        }

        Ok(TorsorPair {
            rows: Some(rows),
            active: self.active_torsors.clone(),
            varying,
        })
    }

    /// `2^k` where `k` counts the active, non-constant channels of the pair;
    /// 1 when nothing is activated.
    pub fn nb_combinations(&self, states: CombiRanks) -> Result<usize, TorsorError> {
        Ok(self.pair(states)?.nb_combinations())
    }

    /// Envelope choice of a single state: `max` on a cleared bit, `min` on a
    /// set one.
    pub fn get_coef(&self, state: usize, tcomb: usize, out: &mut [f64]) -> Result<(), TorsorError> {
        self.pair((state, state))?.coef(tcomb, out)
    }

    pub fn get_combi_coef(
        &self,
        states: CombiRanks,
        tcomb: usize,
        multipliers: (f64, f64),
        out: &mut [f64],
    ) -> Result<(), TorsorError> {
        self.pair(states)?.combi_coef(tcomb, multipliers, out)
    }

    pub fn get_diff_coef(
        &self,
        states: CombiRanks,
        tcomb: usize,
        out: &mut [f64],
    ) -> Result<(), TorsorError> {
        self.pair(states)?.diff_coef(tcomb, out)
    }

    pub fn get_sum_coef(
        &self,
        states: CombiRanks,
        tcomb: usize,
        out: &mut [f64],
    ) -> Result<(), TorsorError> {
        self.pair(states)?.sum_coef(tcomb, out)
    }
}

#[derive(Debug, Clone, Copy)]
struct PairRows<'a> {
    max1: &'a [f64],
    max2: &'a [f64],
    min1: &'a [f64],
    min2: &'a [f64],
}

impl PairRows<'_> {
    fn is_constant(&self, rk: usize) -> bool {
        let spread = self.max1[rk].abs() + self.max2[rk].abs()
            - (self.min1[rk].abs() + self.min2[rk].abs());
        spread.abs() < CONSTANT_CHANNEL_TOLERANCE
    }
}

/// Channel selection of one state pair, built once and reused for every
/// combination number of that pair.
#[derive(Debug, Clone)]
pub struct TorsorPair<'a> {
    rows: Option<PairRows<'a>>,
    active: Vec<bool>,
    // Torsor indices of the varying channels; bit i selects for varying[i].
    varying: Vec<usize>,
}

impl TorsorPair<'_> {
    pub fn nb_combinations(&self) -> usize {
        1 << self.varying.len()
    }

    pub fn nb_varying(&self) -> usize {
        self.varying.len()
    }

    pub fn nb_torsors(&self) -> usize {
        self.active.len()
    }

    pub fn coef(&self, tcomb: usize, out: &mut [f64]) -> Result<(), TorsorError> {
        self.combi_coef(tcomb, (1.0, 0.0), out)
    }

    pub fn diff_coef(&self, tcomb: usize, out: &mut [f64]) -> Result<(), TorsorError> {
        self.combi_coef(tcomb, (1.0, -1.0), out)
    }

    pub fn sum_coef(&self, tcomb: usize, out: &mut [f64]) -> Result<(), TorsorError> {
        self.combi_coef(tcomb, (1.0, 1.0), out)
    }

    /// Writes `c1·a1 + c2·a2` per channel, where a varying channel takes
    /// `(max1, min2)` on a cleared bit and `(min1, max2)` on a set one, a
    /// constant channel takes `(max1, max2)`, and an inactive one 0.
    pub fn combi_coef(
        &self,
        tcomb: usize,
        (c1, c2): (f64, f64),
        out: &mut [f64],
    ) -> Result<(), TorsorError> {
        if out.len() != self.active.len() {
            return Err(TorsorError::OutputLength {
                expected: self.active.len(),
                found: out.len(),
            });
        }
        let Some(rows) = &self.rows else {
            return Ok(());
        };

        for (rk, value) in out.iter_mut().enumerate() {
            *value = if self.active[rk] {
                c1 * rows.max1[rk] + c2 * rows.max2[rk]
            } else {
                0.0
            };
        }
        for (bit, &rk) in self.varying.iter().enumerate() {
            out[rk] = if (tcomb >> bit) & 1 == 0 {
                c1 * rows.max1[rk] + c2 * rows.min2[rk]
            } else {
                c1 * rows.min1[rk] + c2 * rows.max2[rk]
            };
        }
        Ok(())
    }
}
