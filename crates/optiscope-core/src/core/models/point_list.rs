use super::column_set::{ColumnSet, mismatch, same_column_set};
use super::error::ModelError;
use super::point::Point;
use super::stats::{MinMaxMean, MinMaxMeanAccumulator};
use std::sync::Arc;

/// An ordered, homogeneous sequence of points sharing one exact column set.
///
/// Every insertion checks the incoming point's column set against the list's;
/// a point over a different set is rejected rather than coerced.
#[derive(Debug, Clone)]
pub struct PointList {
    column_set: Arc<ColumnSet>,
    points: Vec<Point>,
}

impl PointList {
    pub fn new(column_set: Arc<ColumnSet>) -> Self {
        Self {
            column_set,
            points: Vec::new(),
        }
    }

    /// Creates a list pre-filled with `points`, all of which must match `column_set`.
    pub fn with_points(column_set: Arc<ColumnSet>, points: Vec<Point>) -> Result<Self, ModelError> {
        let mut list = Self::new(column_set);
        list.extend(points)?;
        Ok(list)
    }

    pub fn column_set(&self) -> &Arc<ColumnSet> {
        &self.column_set
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Point> {
        self.points.get_mut(index)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    fn check(&self, point: &Point) -> Result<(), ModelError> {
        if same_column_set(&self.column_set, point.column_set()) {
            Ok(())
        } else {
            Err(mismatch(&self.column_set, point.column_set()))
        }
    }

    pub fn push(&mut self, point: Point) -> Result<(), ModelError> {
        self.check(&point)?;
        self.points.push(point);
        Ok(())
    }

    pub fn insert(&mut self, index: usize, point: Point) -> Result<(), ModelError> {
        if index > self.points.len() {
            return Err(ModelError::IndexOutOfBounds {
                index,
                len: self.points.len(),
            });
        }
        self.check(&point)?;
        self.points.insert(index, point);
        Ok(())
    }

    /// Appends all `points`, or none of them if any fails the column-set check.
    pub fn extend(&mut self, points: Vec<Point>) -> Result<(), ModelError> {
        for point in &points {
            self.check(point)?;
        }
        self.points.extend(points);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Point, ModelError> {
        if index >= self.points.len() {
            return Err(ModelError::IndexOutOfBounds {
                index,
                len: self.points.len(),
            });
        }
        Ok(self.points.remove(index))
    }

    /// Removes the points at `indices` and returns them in ascending index order.
    ///
    /// Indices are validated up front, deduplicated, and removed from the highest
    /// down so earlier removals never shift later ones.
    pub fn remove_indices(&mut self, indices: &[usize]) -> Result<Vec<Point>, ModelError> {
        let len = self.points.len();
        if let Some(&index) = indices.iter().find(|&&index| index >= len) {
            return Err(ModelError::IndexOutOfBounds { index, len });
        }
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut removed: Vec<Point> = sorted
            .iter()
            .rev()
            .map(|&index| self.points.remove(index))
            .collect();
        removed.reverse();
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn min_max_mean(&self) -> MinMaxMean {
        let mut accumulator = MinMaxMeanAccumulator::new(self.column_set.dimension());
        for point in &self.points {
            accumulator.add(point.values());
        }
        accumulator.finish(&self.column_set)
    }
}

impl<'a> IntoIterator for &'a PointList {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::column::Column;

    fn xy_set() -> Arc<ColumnSet> {
        Arc::new(ColumnSet::new([Column::new("x"), Column::new("y")]))
    }

    fn point(set: &Arc<ColumnSet>, values: &[f64]) -> Point {
        Point::new(set.clone(), values.to_vec()).unwrap()
    }

    #[test]
    fn push_rejects_points_over_other_sets_even_with_same_dimension() {
        let set = xy_set();
        let other = xy_set();
        let mut list = PointList::new(set.clone());
        list.push(point(&set, &[1.0, 2.0])).unwrap();
        let err = list.push(point(&other, &[1.0, 2.0])).unwrap_err();
        assert!(matches!(err, ModelError::ColumnSetMismatch { .. }));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn push_accepts_equal_set_behind_another_arc() {
        let set = xy_set();
        let twin = Arc::new(ColumnSet::new(set.columns().iter().cloned()));
        let mut list = PointList::new(set);
        assert!(list.push(point(&twin, &[0.0, 0.0])).is_ok());
    }

    #[test]
    fn extend_is_all_or_nothing() {
        let set = xy_set();
        let other = xy_set();
        let mut list = PointList::new(set.clone());
        let batch = vec![
            point(&set, &[1.0, 1.0]),
            point(&set, &[2.0, 2.0]),
            point(&other, &[3.0, 3.0]),
        ];
        assert!(list.extend(batch).is_err());
        assert!(list.is_empty());

        list.extend(vec![point(&set, &[1.0, 1.0]), point(&set, &[2.0, 2.0])])
            .unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn remove_indices_handles_unsorted_and_duplicate_input() {
        let set = xy_set();
        let points = (0..6).map(|i| point(&set, &[i as f64, 0.0])).collect();
        let mut list = PointList::with_points(set, points).unwrap();

        let removed = list.remove_indices(&[4, 1, 4, 2]).unwrap();
        let removed_x: Vec<f64> = removed.iter().map(|p| p[0]).collect();
        let kept_x: Vec<f64> = list.iter().map(|p| p[0]).collect();
        assert_eq!(removed_x, vec![1.0, 2.0, 4.0]);
        assert_eq!(kept_x, vec![0.0, 3.0, 5.0]);
    }

    #[test]
    fn remove_indices_validates_before_mutating() {
        let set = xy_set();
        let points = (0..3).map(|i| point(&set, &[i as f64, 0.0])).collect();
        let mut list = PointList::with_points(set, points).unwrap();
        let err = list.remove_indices(&[0, 3]).unwrap_err();
        assert_eq!(err, ModelError::IndexOutOfBounds { index: 3, len: 3 });
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn insert_and_remove_respect_bounds() {
        let set = xy_set();
        let mut list = PointList::new(set.clone());
        assert!(list.insert(1, point(&set, &[0.0, 0.0])).is_err());
        list.insert(0, point(&set, &[2.0, 0.0])).unwrap();
        list.insert(0, point(&set, &[1.0, 0.0])).unwrap();
        assert_eq!(list.get(0).map(|p| p[0]), Some(1.0));
        assert!(list.remove(2).is_err());
        assert_eq!(list.remove(1).unwrap()[0], 2.0);
    }

    #[test]
    fn min_max_mean_of_three_points() {
        let set = xy_set();
        let points = vec![
            point(&set, &[1.0, 10.0]),
            point(&set, &[3.0, -20.0]),
            point(&set, &[5.0, 4.0]),
        ];
        let list = PointList::with_points(set.clone(), points).unwrap();
        let stats = list.min_max_mean();
        assert_eq!(stats.min.values(), &[1.0, -20.0]);
        assert_eq!(stats.max.values(), &[5.0, 10.0]);
        assert_eq!(stats.mean.values(), &[3.0, -2.0]);
        assert!(Arc::ptr_eq(stats.mean.column_set(), &set));
    }

    #[test]
    fn min_max_mean_of_empty_list() {
        let stats = PointList::new(xy_set()).min_max_mean();
        assert_eq!(stats.min.values(), &[f64::INFINITY, f64::INFINITY]);
        assert_eq!(stats.max.values(), &[f64::NEG_INFINITY, f64::NEG_INFINITY]);
        assert!(stats.mean.values().iter().all(|v| v.is_nan()));
    }
}
