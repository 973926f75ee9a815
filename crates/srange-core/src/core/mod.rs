//! # Core Module
//!
//! Stateless numerics shared by the search engine: interpolation tables,
//! scalar coefficients, stress tensors and the combination bijections used
//! to enumerate pairs of states.
//!
//! ## Architecture
//!
//! - **Interpolation** ([`table`]) - Piecewise linear and logarithmic 1-D tables
//! - **Coefficients** ([`coefficient`]) - Constant or table-backed scalar laws, and keyed sets of them
//! - **Stress Tensors** ([`stress`]) - Six-component symmetric tensors, principal stresses and equivalent stresses
//! - **Combination Spaces** ([`combination`]) - Index bijections between a combination number and a pair of state ranks
//!
//! ## Key Capabilities
//!
//! - **Closed-form principal stresses** through the tensor invariants and Cardan's formula
//! - **Tresca, von Mises and reduced von Mises** reductions selectable at run time
//! - **Square, rectangular and triangular pair enumeration** without materializing the pair list
//! - **First-bracketing-segment interpolation** over tables with unsorted abscissae

pub mod coefficient;
pub mod combination;
pub mod stress;
pub mod table;
