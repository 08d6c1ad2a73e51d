//! # Engine Module
//!
//! Stateless algorithms that run over the data model, together with their
//! configuration, progress reporting and error types.
//!
//! ## Architecture
//!
//! - **Dominance** ([`pareto`]) - Pareto-front extraction over two or three objectives
//! - **Configuration** ([`config`]) - Validated front parameters built through [`config::FrontConfigBuilder`]
//! - **Progress Monitoring** ([`progress`]) - Optional callback sink for task and failure events
//! - **Error Handling** ([`error`]) - Engine-level errors wrapping model and configuration failures
//!
//! ## Key Capabilities
//!
//! - **Sort-and-sweep front** in two dimensions, O(n log n)
//! - **Pairwise front** in three dimensions with early exit on the first dominator
//! - **Heterogeneous input** where every member list is read through its own column positions
//! - **Inverted objectives** that maximize a column by flipping its property range

pub mod config;
pub mod error;
pub mod pareto;
pub mod progress;
