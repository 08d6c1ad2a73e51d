//! # Workflows Module
//!
//! High-level entry points that tie the [`crate::core`] data model and the
//! [`crate::engine`] algorithms together into complete procedures.
//!
//! - **Front Workflow** ([`front`]) - Validated Pareto-front extraction with phase reporting

pub mod front;
