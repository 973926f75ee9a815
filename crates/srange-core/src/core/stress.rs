use nalgebra::{Vector3, Vector6};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, AddAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

pub const STRESS_SIZE: usize = 6;
pub const STRESS_TOLERANCE: f64 = 1e-10;

// 2 / sqrt(3)
const VM_FACTOR: f64 = 1.1547005383792517;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StressError {
    #[error("A stress tensor has 6 components, found {0}")]
    ComponentCount(usize),
    #[error(
        "Unknown equivalent stress method: '{0}'. Expected 'tresca', 'mises', 'reduced_mises' or 'reduced_mises_strict'"
    )]
    UnknownMethod(String),
}

/// Symmetric 3-D stress tensor stored as its six independent components in
/// the order (σ11, σ22, σ33, σ12, σ13, σ23).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 6]", into = "[f64; 6]")]
pub struct Stress(Vector6<f64>);

impl Stress {
    pub fn new(components: [f64; 6]) -> Self {
        Self(Vector6::from_row_slice(&components))
    }

    pub fn zero() -> Self {
        Self(Vector6::zeros())
    }

    pub fn from_slice(components: &[f64]) -> Result<Self, StressError> {
        if components.len() != STRESS_SIZE {
            return Err(StressError::ComponentCount(components.len()));
        }
        Ok(Self(Vector6::from_row_slice(components)))
    }

    pub fn size(&self) -> usize {
        STRESS_SIZE
    }

    pub fn components(&self) -> [f64; 6] {
        let mut components = [0.0; STRESS_SIZE];
        components.copy_from_slice(self.0.as_slice());
        components
    }

    pub fn is_diag(&self) -> bool {
        self.0[3].abs() < STRESS_TOLERANCE
            && self.0[4].abs() < STRESS_TOLERANCE
            && self.0[5].abs() < STRESS_TOLERANCE
    }

    pub fn hydrostatic(&self) -> f64 {
        (self.0[0] + self.0[1] + self.0[2]) / 3.0
    }

    /// Eigenvalues of the tensor, sorted in descending order.
    ///
    /// Solved in closed form from the invariants: the characteristic
    /// polynomial is shifted by `I1 / 3` into the depressed cubic
    /// `x³ + p·x + q = 0` and solved with Cardan's formula. A positive
    /// discriminant only arises from rounding around a double root, so that
    /// branch reports the two remaining roots as equal. A deviator that is
    /// negligible against the largest component gives a triple root.
    pub fn principal_stresses(&self) -> Vector3<f64> {
        let s = &self.0;
        let (s12, s13, s23) = (s[3], s[4], s[5]);

        let i1 = s[0] + s[1] + s[2];
        let i2 = s[0] * s[1] + s[1] * s[2] + s[2] * s[0] - (s12 * s12 + s13 * s13 + s23 * s23);
        let i3 = s[0] * s[1] * s[2] + 2.0 * s12 * s13 * s23
            - (s[0] * s23 * s23 + s[1] * s13 * s13 + s[2] * s12 * s12);

        let shift = i1 / 3.0;
        let p = i2 - i1 * i1 / 3.0;
        let q = -2.0 * i1.powi(3) / 27.0 + i1 * i2 / 3.0 - i3;

        // `p` scales with stress squared.
        let scale = s.amax();
        let mut roots = if p.abs() <= STRESS_TOLERANCE * scale * scale {
            [0.0; 3]
        } else {
            let discriminant = q * q / 4.0 + p.powi(3) / 27.0;
            if discriminant > 0.0 {
                let root = discriminant.sqrt();
                let x = (-q / 2.0 + root).cbrt() + (-q / 2.0 - root).cbrt();
                [x, -x / 2.0, -x / 2.0]
            } else {
                let m = 2.0 * (-p / 3.0).sqrt();
                let theta = (3.0 * q / (p * m)).clamp(-1.0, 1.0).acos() / 3.0;
                [
                    m * theta.cos(),
                    m * (theta - 2.0 * PI / 3.0).cos(),
                    m * (theta - 4.0 * PI / 3.0).cos(),
                ]
            }
        };

        roots.iter_mut().for_each(|x| *x += shift);
        roots.sort_by(|a, b| b.total_cmp(a));
        Vector3::new(roots[0], roots[1], roots[2])
    }

    pub fn tresca(&self) -> f64 {
        let principal = self.principal_stresses();
        (principal[0] - principal[2]).abs()
    }

    pub fn mises(&self) -> f64 {
        let s = &self.0;
        let normal = (s[0] - s[1]).powi(2) + (s[1] - s[2]).powi(2) + (s[2] - s[0]).powi(2);
        let shear = 6.0 * (s[3].powi(2) + s[4].powi(2) + s[5].powi(2));
        (0.5 * (normal + shear)).sqrt()
    }

    /// Von Mises stress scaled by `2/√3`, which makes it coincide with
    /// Tresca under pure shear.
    pub fn reduced_mises(&self) -> f64 {
        self.mises() * VM_FACTOR
    }
}

impl Default for Stress {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<[f64; 6]> for Stress {
    fn from(components: [f64; 6]) -> Self {
        Self::new(components)
    }
}

impl From<Stress> for [f64; 6] {
    fn from(stress: Stress) -> Self {
        stress.components()
    }
}

impl Index<usize> for Stress {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl Add for Stress {
    type Output = Stress;

    fn add(self, rhs: Stress) -> Stress {
        Stress(self.0 + rhs.0)
    }
}

impl Sub for Stress {
    type Output = Stress;

    fn sub(self, rhs: Stress) -> Stress {
        Stress(self.0 - rhs.0)
    }
}

impl Neg for Stress {
    type Output = Stress;

    fn neg(self) -> Stress {
        Stress(-self.0)
    }
}

impl Mul<f64> for Stress {
    type Output = Stress;

    fn mul(self, rhs: f64) -> Stress {
        Stress(self.0 * rhs)
    }
}

impl Mul<Stress> for f64 {
    type Output = Stress;

    fn mul(self, rhs: Stress) -> Stress {
        Stress(rhs.0 * self)
    }
}

impl AddAssign for Stress {
    fn add_assign(&mut self, rhs: Stress) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Stress {
    fn sub_assign(&mut self, rhs: Stress) {
        self.0 -= rhs.0;
    }
}

impl MulAssign<f64> for Stress {
    fn mul_assign(&mut self, rhs: f64) {
        self.0 *= rhs;
    }
}

/// Scalar reduction used to rank candidate stresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquivalentStress {
    #[default]
    Tresca,
    Mises,
    /// Ranks candidates by reduced von Mises but stores the Tresca ratio of
    /// an improving candidate, and only when that ratio improves too.
    ReducedMises,
    /// Ranks and stores the reduced von Mises ratio.
    ReducedMisesStrict,
}

impl EquivalentStress {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquivalentStress::Tresca => "tresca",
            EquivalentStress::Mises => "mises",
            EquivalentStress::ReducedMises => "reduced_mises",
            EquivalentStress::ReducedMisesStrict => "reduced_mises_strict",
        }
    }

    pub fn evaluate(&self, stress: &Stress) -> f64 {
        match self {
            EquivalentStress::Tresca => stress.tresca(),
            EquivalentStress::Mises => stress.mises(),
            EquivalentStress::ReducedMises | EquivalentStress::ReducedMisesStrict => {
                stress.reduced_mises()
            }
        }
    }
}

impl fmt::Display for EquivalentStress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquivalentStress {
    type Err = StressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tresca" => Ok(EquivalentStress::Tresca),
            "mises" => Ok(EquivalentStress::Mises),
            "reduced_mises" => Ok(EquivalentStress::ReducedMises),
            "reduced_mises_strict" => Ok(EquivalentStress::ReducedMisesStrict),
            other => Err(StressError::UnknownMethod(other.to_string())),
        }
    }
}
