//! # Optiscope Core Library
//!
//! An attribute-indexed data model for large sets of evaluated candidate solutions,
//! and the Pareto-dominance engine that extracts their non-dominated subset.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Column`, `ColumnSet`, `Point`,
//!   `PointList`, `PointSet`) and the construction entry points that build them from
//!   already-parsed tabular data.
//!
//! - **[`engine`]: The Logic Core.** Algorithms over the model, most notably the
//!   two-dimensional sweep and three-dimensional pairwise Pareto-front extraction,
//!   plus their configuration and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Complete procedures that validate a
//!   configuration, run the engine and package the result for callers.

pub mod core;
pub mod engine;
pub mod workflows;
