use super::column::Column;
use super::error::ModelError;
use std::cmp::Ordering;
use std::sync::Arc;

/// An immutable, sorted and deduplicated collection of columns.
///
/// A `ColumnSet` defines the coordinate space of every [`Point`](super::point::Point)
/// bound to it. Columns are kept sorted by their global index, so membership and
/// position lookups are binary searches and all set operations are linear merges.
/// Sets are shared between points as `Arc<ColumnSet>` and never mutated; every
/// operation that looks like a mutation returns a new set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ColumnSet {
    columns: Vec<Column>,
}

impl ColumnSet {
    /// Builds a set from arbitrary columns, sorting them and dropping duplicates.
    pub fn new(columns: impl IntoIterator<Item = Column>) -> Self {
        let mut columns: Vec<Column> = columns.into_iter().collect();
        columns.sort();
        columns.dedup();
        Self { columns }
    }

    /// The zero-dimension set.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn dimension(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    pub fn get(&self, position: usize) -> Option<&Column> {
        self.columns.get(position)
    }

    /// Global indices of the member columns, in set order.
    pub fn indices(&self) -> Vec<u64> {
        self.columns.iter().map(Column::index).collect()
    }

    /// Position of `column` within this set, found by binary search.
    pub fn index_of(&self, column: &Column) -> Option<usize> {
        self.columns
            .binary_search_by_key(&column.index(), Column::index)
            .ok()
    }

    pub fn contains(&self, column: &Column) -> bool {
        self.index_of(column).is_some()
    }

    /// First column carrying `label`. Labels are not unique, so this is a linear scan.
    pub fn find_by_label(&self, label: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.label() == label)
    }

    pub fn union(&self, other: &ColumnSet) -> ColumnSet {
        let (a, b) = (&self.columns, &other.columns);
        let mut merged = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                Ordering::Less => {
                    merged.push(a[i].clone());
                    i += 1;
                }
                Ordering::Greater => {
                    merged.push(b[j].clone());
                    j += 1;
                }
                Ordering::Equal => {
                    merged.push(a[i].clone());
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&a[i..]);
        merged.extend_from_slice(&b[j..]);
        ColumnSet { columns: merged }
    }

    /// Columns present in both sets, or `None` when the sets share nothing.
    ///
    /// `None` is deliberately distinct from `Some(ColumnSet::empty())`, which this
    /// method never returns.
    pub fn intersect(&self, other: &ColumnSet) -> Option<ColumnSet> {
        let (a, b) = (&self.columns, &other.columns);
        let mut shared = Vec::with_capacity(a.len().min(b.len()));
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    shared.push(a[i].clone());
                    i += 1;
                    j += 1;
                }
            }
        }
        if shared.is_empty() {
            None
        } else {
            Some(ColumnSet { columns: shared })
        }
    }

    /// Columns of `self` that are absent from `other`.
    pub fn subtract(&self, other: &ColumnSet) -> ColumnSet {
        let columns = self
            .columns
            .iter()
            .filter(|column| !other.contains(column))
            .cloned()
            .collect();
        ColumnSet { columns }
    }

    /// Whether every column of `self` also occurs in `other`.
    ///
    /// The empty set is a subset of everything; a non-empty set is never a subset
    /// of the empty set.
    pub fn is_subset_of(&self, other: &ColumnSet) -> bool {
        let mut j = 0;
        for column in &self.columns {
            while j < other.columns.len() && other.columns[j] < *column {
                j += 1;
            }
            if j == other.columns.len() || other.columns[j] != *column {
                return false;
            }
            j += 1;
        }
        true
    }

    /// Computes the sub-to-super position map.
    ///
    /// `map[i]` is the position in `superset` of the `i`-th column of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ColumnNotFound`] for the first column of `self` that
    /// `superset` does not contain.
    pub fn super_set_map(&self, superset: &ColumnSet) -> Result<Vec<usize>, ModelError> {
        let mut map = Vec::with_capacity(self.columns.len());
        let mut j = 0;
        for column in &self.columns {
            while j < superset.columns.len() && superset.columns[j] < *column {
                j += 1;
            }
            if j == superset.columns.len() || superset.columns[j] != *column {
                return Err(ModelError::ColumnNotFound {
                    index: column.index(),
                    label: column.label(),
                });
            }
            map.push(j);
            j += 1;
        }
        Ok(map)
    }
}

/// Column-set equality with a pointer fast path for shared sets.
pub(crate) fn same_column_set(a: &Arc<ColumnSet>, b: &Arc<ColumnSet>) -> bool {
    Arc::ptr_eq(a, b) || a == b
}

pub(crate) fn mismatch(expected: &ColumnSet, actual: &ColumnSet) -> ModelError {
    ModelError::ColumnSetMismatch {
        expected: expected.indices(),
        actual: actual.indices(),
    }
}
