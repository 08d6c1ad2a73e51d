//! # Core Module
//!
//! The foundation of the library: stateless data models for attribute-indexed
//! point data and the entry points that build them.
//!
//! ## Architecture
//!
//! - **Data Model** ([`models`]) - Columns, column sets, ranges, points and their containers
//! - **Import** ([`io`]) - Construction of the model from parsed tabular data
//!
//! ## Key Capabilities
//!
//! - **Sorted column sets** with union, intersection, subtraction and subset tests
//! - **Precomputed index maps** for comparing points across different column sets
//! - **Heterogeneous point sets** with stable point ids and undoable deletion
//! - **Per-dimension statistics** over homogeneous and heterogeneous containers

pub mod io;
pub mod models;
