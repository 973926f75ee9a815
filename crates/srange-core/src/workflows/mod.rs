//! # Workflows Module
//!
//! High-level entry points tying the [`crate::engine`] and [`crate::core`]
//! layers together.
//!
//! - **Search Workflow** ([`search`]) - Validates a populated set of states,
//!   builds the combination space requested by a [`crate::engine::config::SearchConfig`],
//!   runs the stress intensity, range or range ratio search and returns a
//!   serializable report.

pub mod search;
