use thiserror::Error;

/// Positional pair `(first, second)` recovered from a combination number.
pub type CombiRanks = (usize, usize);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CombinationError {
    #[error("Combination space over {n} states does not fit in a machine index")]
    Overflow { n: usize },
    #[error("Combination number {combination} is outside [0, {size})")]
    OutOfRange { combination: usize, size: usize },
    #[error("Pair ({row}, {column}) is not part of this combination space")]
    InvalidPair { row: usize, column: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombinationKind {
    /// Every ordered pair, self-pairs included.
    Square,
    /// Every pair of one row rank with one column rank.
    Rectangular,
    /// Unordered pairs `p <= q`, or `p < q` without the diagonal.
    Triangular { on_diagonal: bool },
}

/// Bijection between a linear combination number and a pair of state ranks.
///
/// The explored ranks are stored sorted and without duplicates. Pairs are
/// positional: `get_ranks` returns indices into [`Combination::ranks`], and
/// [`Combination::states`] maps them back to the explored state ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    kind: CombinationKind,
    ranks: Vec<usize>,
    column_ranks: Vec<usize>,
    cached_size: usize,
}

impl Combination {
    pub fn square(ranks: &[usize]) -> Result<Self, CombinationError> {
        Self::build(CombinationKind::Square, sorted_unique(ranks), Vec::new())
    }

    pub fn rectangular(rows: &[usize], columns: &[usize]) -> Result<Self, CombinationError> {
        Self::build(
            CombinationKind::Rectangular,
            sorted_unique(rows),
            sorted_unique(columns),
        )
    }

    /// Upper triangle including the diagonal.
    pub fn triangular(ranks: &[usize]) -> Result<Self, CombinationError> {
        Self::build(
            CombinationKind::Triangular { on_diagonal: true },
            sorted_unique(ranks),
            Vec::new(),
        )
    }

    /// Strict upper triangle.
    pub fn superior_triangular(ranks: &[usize]) -> Result<Self, CombinationError> {
        Self::build(
            CombinationKind::Triangular { on_diagonal: false },
            sorted_unique(ranks),
            Vec::new(),
        )
    }

    fn build(
        kind: CombinationKind,
        ranks: Vec<usize>,
        column_ranks: Vec<usize>,
    ) -> Result<Self, CombinationError> {
        let mut combination = Self {
            kind,
            ranks,
            column_ranks,
            cached_size: 0,
        };
        combination.cached_size = combination.compute_size()?;
        Ok(combination)
    }

    fn compute_size(&self) -> Result<usize, CombinationError> {
        let n = self.ranks.len();
        let overflow = CombinationError::Overflow { n };
        match self.kind {
            CombinationKind::Square => n.checked_mul(n).ok_or(overflow),
            CombinationKind::Rectangular => n.checked_mul(self.column_ranks.len()).ok_or(overflow),
            CombinationKind::Triangular { on_diagonal } => {
                // Twice the size must fit for the line formula.
                let d = diagonal_shift(n, on_diagonal);
                d.checked_mul(d + 1)
                    .map(|double| double / 2)
                    .ok_or(overflow)
            }
        }
    }

    /// Includes or excludes the diagonal of a triangular space. Other kinds
    /// are left unchanged.
    pub fn set_on_diagonal(&mut self, on_diagonal: bool) -> Result<(), CombinationError> {
        if let CombinationKind::Triangular { .. } = self.kind {
            self.kind = CombinationKind::Triangular { on_diagonal };
            self.cached_size = self.compute_size()?;
        }
        Ok(())
    }

    pub fn kind(&self) -> CombinationKind {
        self.kind
    }

    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    /// Column ranks of a rectangular space; the row ranks otherwise.
    pub fn column_ranks(&self) -> &[usize] {
        match self.kind {
            CombinationKind::Rectangular => &self.column_ranks,
            _ => &self.ranks,
        }
    }

    pub fn size(&self) -> usize {
        self.cached_size
    }

    pub fn is_empty(&self) -> bool {
        self.cached_size == 0
    }

    /// Combination number of the positional pair `(row, column)`.
    ///
    /// Triangular spaces are symmetric: the pair is reordered to
    /// `(min, max)` first.
    pub fn index(&self, row: usize, column: usize) -> Result<usize, CombinationError> {
        let invalid = CombinationError::InvalidPair { row, column };
        let n = self.ranks.len();
        if row >= n || column >= self.column_ranks().len() {
            return Err(invalid);
        }

        match self.kind {
            CombinationKind::Square => Ok(row * n + column),
            CombinationKind::Rectangular => Ok(row * self.column_ranks.len() + column),
            CombinationKind::Triangular { on_diagonal } => {
                let (p, q) = (row.min(column), row.max(column));
                if !on_diagonal && p == q {
                    return Err(invalid);
                }
                let d = diagonal_shift(n, on_diagonal);
                Ok(line_end(p, d) + q - n)
            }
        }
    }

    /// Positional pair of the combination number `c`.
    pub fn get_ranks(&self, c: usize) -> Result<CombiRanks, CombinationError> {
        if c >= self.cached_size {
            return Err(CombinationError::OutOfRange {
                combination: c,
                size: self.cached_size,
            });
        }

        let n = self.ranks.len();
        match self.kind {
            CombinationKind::Square => Ok((c / n, c % n)),
            CombinationKind::Rectangular => {
                let m = self.column_ranks.len();
                Ok((c / m, c % m))
            }
            CombinationKind::Triangular { on_diagonal } => {
                let d = diagonal_shift(n, on_diagonal);
                let p = line_of(c, d);
                Ok((p, n + c - line_end(p, d)))
            }
        }
    }

    /// State ids of the combination number `c`.
    pub fn states(&self, c: usize) -> Result<CombiRanks, CombinationError> {
        let (p, q) = self.get_ranks(c)?;
        Ok((self.ranks[p], self.column_ranks()[q]))
    }
}

fn sorted_unique(ranks: &[usize]) -> Vec<usize> {
    let mut ranks = ranks.to_vec();
    ranks.sort_unstable();
    ranks.dedup();
    ranks
}

fn diagonal_shift(n: usize, on_diagonal: bool) -> usize {
    if on_diagonal { n } else { n.saturating_sub(1) }
}

/// Number of combinations in lines `0..=p`.
fn line_end(p: usize, d: usize) -> usize {
    (p + 1) * (2 * d - p) / 2
}

/// Line holding combination number `c`: the smallest `p` with
/// `line_end(p) > c`, taken from the quadratic formula and then corrected
/// for rounding.
fn line_of(c: usize, d: usize) -> usize {
    let b = 1.0 + 2.0 * d as f64;
    let delta = (b * b - 8.0 * (c as f64 + 1.0)).max(0.0);
    let mut p = (((b - delta.sqrt()) / 2.0).ceil() as usize).saturating_sub(1);

    let last = d.saturating_sub(1);
    p = p.min(last);
    while p > 0 && line_end(p - 1, d) > c {
        p -= 1;
    }
    while p < last && line_end(p, d) <= c {
        p += 1;
    }
    p
}
