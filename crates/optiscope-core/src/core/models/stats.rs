use super::column_set::ColumnSet;
use super::point::Point;
use std::sync::Arc;

/// Per-dimension minimum, maximum and arithmetic mean of a group of points.
///
/// All three points share the column set of the container they were computed
/// from. For an empty container every dimension reads `+inf`, `-inf` and `NaN`
/// respectively.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxMean {
    pub min: Point,
    pub max: Point,
    pub mean: Point,
}

/// Single-pass accumulator behind the container `min_max_mean` operations.
#[derive(Debug, Clone)]
pub(crate) struct MinMaxMeanAccumulator {
    min: Vec<f64>,
    max: Vec<f64>,
    sum: Vec<f64>,
    count: usize,
}

impl MinMaxMeanAccumulator {
    pub(crate) fn new(dimension: usize) -> Self {
        Self {
            min: vec![f64::INFINITY; dimension],
            max: vec![f64::NEG_INFINITY; dimension],
            sum: vec![0.0; dimension],
            count: 0,
        }
    }

    /// Adds one point, reading dimension `k` from `values[map[k]]`.
    pub(crate) fn add_mapped(&mut self, values: &[f64], map: &[usize]) {
        for (k, &position) in map.iter().enumerate() {
            self.add_value(k, values[position]);
        }
        self.count += 1;
    }

    /// Adds one point whose values are already aligned with the accumulator.
    pub(crate) fn add(&mut self, values: &[f64]) {
        for (k, &value) in values.iter().enumerate() {
            self.add_value(k, value);
        }
        self.count += 1;
    }

    #[inline]
    fn add_value(&mut self, k: usize, value: f64) {
        if value < self.min[k] {
            self.min[k] = value;
        }
        if value > self.max[k] {
            self.max[k] = value;
        }
        self.sum[k] += value;
    }

    pub(crate) fn finish(self, column_set: &Arc<ColumnSet>) -> MinMaxMean {
        let count = self.count as f64;
        let mean = self.sum.iter().map(|sum| sum / count).collect();
        MinMaxMean {
            min: Point::from_parts(Arc::clone(column_set), self.min),
            max: Point::from_parts(Arc::clone(column_set), self.max),
            mean: Point::from_parts(Arc::clone(column_set), mean),
        }
    }
}
