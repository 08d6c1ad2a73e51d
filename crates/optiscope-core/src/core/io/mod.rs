//! # Core I/O Module
//!
//! Construction entry points that turn already-parsed tabular data into the
//! data model. File formats themselves are handled by callers.

pub mod table;
