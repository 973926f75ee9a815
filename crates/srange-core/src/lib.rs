//! # srange Core Library
//!
//! A combinatorial search engine for the worst equivalent stress range of a
//! structural component, as used in fatigue qualification of pressure
//! retaining equipment.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless numerics: interpolation tables,
//!   coefficient laws, the stress tensor with its invariants, and the index
//!   bijections enumerating pairs of states.
//!
//! - **[`engine`]: The Logic Core.** The stateful layer. It stores the
//!   mechanical states and their load channel envelopes, enumerates the worst
//!   torsor coefficient combinations of every state pair and keeps the
//!   running maximum.
//!
//! - **[`workflows`]: The Public API.** Runs one configured analysis end to
//!   end with validation, progress reporting and cancellation.

pub mod core;
pub mod engine;
pub mod workflows;
