use super::column::Column;
use super::column_property::ColumnProperty;
use super::column_set::ColumnSet;
use super::error::ModelError;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

/// Traceability information attached to a point, such as its source row.
///
/// The payload is opaque to this crate; callers downcast it back with
/// [`PointTag::payload`].
#[derive(Clone)]
pub struct PointTag {
    pub index: usize,
    payload: Option<Arc<dyn Any + Send + Sync>>,
}

impl PointTag {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            payload: None,
        }
    }

    pub fn with_payload<T: Any + Send + Sync>(index: usize, payload: T) -> Self {
        Self {
            index,
            payload: Some(Arc::new(payload)),
        }
    }

    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.as_deref()?.downcast_ref::<T>()
    }
}

impl fmt::Debug for PointTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointTag")
            .field("index", &self.index)
            .field("has_payload", &self.payload.is_some())
            .finish()
    }
}

/// A fixed-length numeric tuple positioned in one column set's coordinate space.
///
/// The value at position `i` belongs to the `i`-th column of the bound set. The
/// binding is fixed at construction and the number of values always equals the
/// set's dimension.
#[derive(Debug, Clone)]
pub struct Point {
    column_set: Arc<ColumnSet>,
    values: Vec<f64>,
    tag: Option<PointTag>,
}

impl Point {
    /// Creates a point bound to `column_set`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DimensionMismatch`] if `values` does not have exactly
    /// one entry per column.
    pub fn new(column_set: Arc<ColumnSet>, values: Vec<f64>) -> Result<Self, ModelError> {
        if values.len() != column_set.dimension() {
            return Err(ModelError::DimensionMismatch {
                expected: column_set.dimension(),
                actual: values.len(),
            });
        }
        Ok(Self {
            column_set,
            values,
            tag: None,
        })
    }

    /// Crate-internal constructor for callers that already guarantee the length.
    pub(crate) fn from_parts(column_set: Arc<ColumnSet>, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), column_set.dimension());
        Self {
            column_set,
            values,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: PointTag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn column_set(&self) -> &Arc<ColumnSet> {
        &self.column_set
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mutable access to the values; the length itself cannot change.
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub fn get(&self, position: usize) -> Option<f64> {
        self.values.get(position).copied()
    }

    /// Value of `column`, located by binary search over the bound set.
    ///
    /// When iterating over many points prefer positional access with a
    /// precomputed map from [`ColumnSet::super_set_map`].
    pub fn value_of(&self, column: &Column) -> Option<f64> {
        self.column_set
            .index_of(column)
            .map(|position| self.values[position])
    }

    pub fn tag(&self) -> Option<&PointTag> {
        self.tag.as_ref()
    }

    pub fn set_tag(&mut self, tag: Option<PointTag>) {
        self.tag = tag;
    }

    /// Value at `position` scaled into `property`'s range.
    #[inline]
    pub fn scaled(&self, position: usize, property: &ColumnProperty) -> f64 {
        property.scale(self.values[position])
    }

    /// Projects this point onto `target`, a subset of its own column set.
    ///
    /// Returns the point itself when `target` is the very set it is bound to.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ColumnNotFound`] if `target` holds a column this point
    /// has no value for.
    pub fn trim(&self, target: &Arc<ColumnSet>) -> Result<Cow<'_, Point>, ModelError> {
        if Arc::ptr_eq(target, &self.column_set) {
            return Ok(Cow::Borrowed(self));
        }
        let map = target.super_set_map(&self.column_set)?;
        Ok(Cow::Owned(self.trim_with_map(target, &map)))
    }

    /// Projects this point onto `target` using a precomputed target-to-self map.
    ///
    /// The map must come from `target.super_set_map(self.column_set())`.
    pub fn trim_with_map(&self, target: &Arc<ColumnSet>, map: &[usize]) -> Point {
        debug_assert_eq!(map.len(), target.dimension());
        Point {
            column_set: Arc::clone(target),
            values: map.iter().map(|&position| self.values[position]).collect(),
            tag: self.tag.clone(),
        }
    }

    /// Squared Euclidean distance to a point bound to the same column set.
    pub fn distance_squared(&self, other: &Point) -> f64 {
        debug_assert_eq!(self.values.len(), other.values.len());
        self.values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }

    /// Squared distance to a point over a superset of this point's columns.
    ///
    /// `map` is `self.column_set().super_set_map(super_point.column_set())`.
    pub fn distance_squared_to_super(&self, super_point: &Point, map: &[usize]) -> f64 {
        debug_assert_eq!(map.len(), self.values.len());
        self.values
            .iter()
            .zip(map)
            .map(|(a, &position)| {
                let d = a - super_point.values[position];
                d * d
            })
            .sum()
    }

    /// Squared distance over a column set shared by both points.
    ///
    /// `self_map` and `other_map` map the shared set into each point's own set and
    /// must have equal length.
    pub fn distance_squared_common(
        &self,
        other: &Point,
        self_map: &[usize],
        other_map: &[usize],
    ) -> f64 {
        debug_assert_eq!(self_map.len(), other_map.len());
        self_map
            .iter()
            .zip(other_map)
            .map(|(&i, &j)| {
                let d = self.values[i] - other.values[j];
                d * d
            })
            .sum()
    }

    /// Squared distance over a shared column set after scaling every dimension.
    ///
    /// `properties[k]` scales shared dimension `k` on both sides. When `mask` is
    /// given, dimensions with `mask[k] == false` are skipped.
    pub fn scaled_distance_squared(
        &self,
        other: &Point,
        self_map: &[usize],
        other_map: &[usize],
        properties: &[ColumnProperty],
        mask: Option<&[bool]>,
    ) -> f64 {
        debug_assert_eq!(self_map.len(), other_map.len());
        debug_assert_eq!(self_map.len(), properties.len());
        let mut sum = 0.0;
        for (k, ((&i, &j), property)) in self_map.iter().zip(other_map).zip(properties).enumerate()
        {
            if mask.is_some_and(|mask| !mask[k]) {
                continue;
            }
            let d = property.scale(self.values[i]) - property.scale(other.values[j]);
            sum += d * d;
        }
        sum
    }
}

impl Index<usize> for Point {
    type Output = f64;

    fn index(&self, position: usize) -> &f64 {
        &self.values[position]
    }
}

/// Points are equal when bound to equal column sets with equal values; tags are ignored.
impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        super::column_set::same_column_set(&self.column_set, &other.column_set)
            && self.values == other.values
    }
}
