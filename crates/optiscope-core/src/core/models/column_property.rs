use super::column::Column;

/// Widens a degenerate `[v, v]` range so that it spans a non-zero width.
///
/// A non-zero `v` becomes `[v - |v|, v + |v|]`, keeping `v` at the center;
/// zero becomes `[-1, 1]`. Non-degenerate ranges are returned unchanged.
pub(crate) fn widen_degenerate(min: f64, max: f64) -> (f64, f64) {
    if min != max {
        return (min, max);
    }
    if min == 0.0 {
        (-1.0, 1.0)
    } else {
        let half_width = min.abs();
        (min - half_width, min + half_width)
    }
}

/// Maps `value` from `[min, max]` onto `[0, 1]`.
///
/// Returns exactly `0.5` for a zero-width range instead of dividing by zero.
#[inline]
pub fn scale(value: f64, min: f64, max: f64) -> f64 {
    if min == max {
        0.5
    } else {
        (value - min) / (max - min)
    }
}

/// The display and normalization range `[min, max]` bound to one column.
///
/// `min > max` is a valid state and denotes an inverted (descending) axis; when
/// such a property is used as an optimization objective, larger raw values
/// scale to smaller numbers and are therefore preferred.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProperty {
    column: Column,
    min: f64,
    max: f64,
}

impl ColumnProperty {
    /// Creates a property, widening a degenerate range to a non-zero width.
    pub fn new(column: Column, min: f64, max: f64) -> Self {
        let (min, max) = widen_degenerate(min, max);
        Self { column, min, max }
    }

    /// Creates a property with the bounds taken verbatim, degenerate or not.
    pub fn raw(column: Column, min: f64, max: f64) -> Self {
        Self { column, min, max }
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn set_range(&mut self, min: f64, max: f64) {
        (self.min, self.max) = widen_degenerate(min, max);
    }

    /// Signed width of the range; negative for inverted properties.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    /// Swaps the bounds in place, flipping the axis direction.
    pub fn invert(&mut self) {
        std::mem::swap(&mut self.min, &mut self.max);
    }

    pub fn inverted(mut self) -> Self {
        self.invert();
        self
    }

    /// Whether `value` lies between the two bounds, regardless of orientation.
    pub fn contains(&self, value: f64) -> bool {
        let (lo, hi) = if self.is_inverted() {
            (self.max, self.min)
        } else {
            (self.min, self.max)
        };
        value >= lo && value <= hi
    }

    #[inline]
    pub fn scale(&self, value: f64) -> f64 {
        scale(value, self.min, self.max)
    }

    /// Inverse of [`scale`](Self::scale). A zero-width range maps everything back to `min`.
    #[inline]
    pub fn unscale(&self, scaled: f64) -> f64 {
        self.min + scaled * (self.max - self.min)
    }
}
