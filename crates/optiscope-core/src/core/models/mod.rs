//! # Core Models Module
//!
//! The attribute-indexed data model: columns and column sets describe coordinate
//! spaces, points live in those spaces, and point lists and point sets group them.
//!
//! ## Key Components
//!
//! - [`column`] - Globally indexed, relabelable scalar dimensions
//! - [`column_set`] - Sorted, immutable column collections with set algebra and
//!   sub-to-super index maps
//! - [`column_property`] - Display and normalization ranges bound to one column
//! - [`point`] - Fixed-length value tuples with trimming and distance operations
//! - [`point_list`] - Homogeneous point containers
//! - [`point_set`] - Named, lockable, heterogeneous containers with undoable deletion
//! - [`selection`] - Named collections of point references
//! - [`stats`] - Per-dimension minimum, maximum and mean
//! - [`ids`] - Stable point identifiers
//! - [`error`] - Structural and mapping errors
//!
//! ## Usage
//!
//! ```ignore
//! use optiscope::core::models::{column::Column, column_set::ColumnSet, point::Point};
//! use std::sync::Arc;
//!
//! let cost = Column::new("cost");
//! let mass = Column::new("mass");
//! let space = Arc::new(ColumnSet::new([cost.clone(), mass.clone()]));
//!
//! let point = Point::new(space.clone(), vec![12.5, 3.0])?;
//! assert_eq!(point.value_of(&mass), Some(3.0));
//! ```

pub mod column;
pub mod column_property;
pub mod column_set;
pub mod error;
pub mod ids;
pub mod point;
pub mod point_list;
pub mod point_set;
pub mod selection;
pub mod stats;
