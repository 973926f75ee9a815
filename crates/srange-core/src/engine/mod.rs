//! # Engine Module
//!
//! The stateful search for worst-case stress ranges and intensities.
//!
//! ## Overview
//!
//! A [`states::StressStates`] holds the per-state stresses, temperatures and
//! torsor coefficient envelopes of a component. Its searches walk a
//! combination space of states (see [`crate::core::combination`]) and, for
//! every state pair, the binary tree of worst-case torsor coefficient choices
//! produced by [`torsor::TorsorCombination`], folding each candidate into a
//! running maximum ([`container::StressContainer`]).
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Analysis type, equivalent stress method and state selection
//! - **Torsor Combinations** ([`torsor`]) - Bit-encoded enumeration of per-channel envelope choices
//! - **Results** ([`container`]) - Running maximum and the snapshots returned to callers
//! - **State Storage** ([`states`]) - Population, integrity checks and the searches themselves
//! - **Search Context** ([`context`]) - Progress reporting and cancellation threaded through a search
//! - **Progress Monitoring** ([`progress`]) - Progress events and the reporter callback
//! - **Error Handling** ([`error`]) - Engine error type aggregating the core errors
//!
//! ## Key Capabilities
//!
//! - **No materialized search space**: pairs and torsor combinations are recovered from indices
//! - **Constant channel pruning** so only envelope choices that can change the outcome are explored
//! - **Parallel pair exploration** behind the `parallel` feature, with serial tie-breaking preserved
//! - **Cooperative cancellation** checked once per state or state pair
//! - **Fail-fast errors**: a failed search never returns a partial maximum

pub mod config;
pub mod container;
pub mod context;
pub mod error;
pub mod progress;
pub mod states;
pub mod torsor;
