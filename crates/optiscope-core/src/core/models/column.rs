use super::column_property::{ColumnProperty, widen_degenerate};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, PoisonError, RwLock};

static NEXT_COLUMN_INDEX: AtomicU64 = AtomicU64::new(0);

#[derive(Debug)]
struct ColumnInner {
    index: u64,                         // Global creation index, never reused
    label: RwLock<String>,              // Display label, may be renamed at any time
    default_range: RwLock<(f64, f64)>, // Range used when no explicit property is given
}

/// A single named scalar dimension of the dataset.
///
/// `Column` is a cheap, shareable handle: clones refer to the same column, so a
/// label change made through one handle is visible through all of them. Identity,
/// equality and ordering are defined solely by the global creation index.
#[derive(Clone)]
pub struct Column {
    inner: Arc<ColumnInner>,
}

impl Column {
    /// Creates a new column with a default range of `[0, 1]`.
    pub fn new(label: &str) -> Self {
        Self::with_default_range(label, 0.0, 1.0)
    }

    /// Creates a new column with the given default display range.
    ///
    /// A degenerate range (`min == max`) is widened the same way
    /// [`ColumnProperty::new`] widens it.
    pub fn with_default_range(label: &str, min: f64, max: f64) -> Self {
        let index = NEXT_COLUMN_INDEX.fetch_add(1, AtomicOrdering::Relaxed);
        Self {
            inner: Arc::new(ColumnInner {
                index,
                label: RwLock::new(label.to_string()),
                default_range: RwLock::new(widen_degenerate(min, max)),
            }),
        }
    }

    pub fn index(&self) -> u64 {
        self.inner.index
    }

    pub fn label(&self) -> String {
        self.inner
            .label
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_label(&self, label: &str) {
        *self
            .inner
            .label
            .write()
            .unwrap_or_else(PoisonError::into_inner) = label.to_string();
    }

    pub fn default_range(&self) -> (f64, f64) {
        *self
            .inner
            .default_range
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_default_range(&self, min: f64, max: f64) {
        *self
            .inner
            .default_range
            .write()
            .unwrap_or_else(PoisonError::into_inner) = widen_degenerate(min, max);
    }

    /// Builds a [`ColumnProperty`] for this column from its default range.
    pub fn default_property(&self) -> ColumnProperty {
        let (min, max) = self.default_range();
        ColumnProperty::new(self.clone(), min, max)
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.index() == other.index()
    }
}

impl Eq for Column {}

impl PartialOrd for Column {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Column {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl Hash for Column {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index().hash(state);
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("index", &self.index())
            .field("label", &self.label())
            .finish()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn indices_increase_monotonically() {
        let a = Column::new("a");
        let b = Column::new("b");
        let c = Column::new("c");
        assert!(a.index() < b.index());
        assert!(b.index() < c.index());
    }

    #[test]
    fn equality_and_ordering_ignore_labels() {
        let a = Column::new("same");
        let b = Column::new("same");
        assert_ne!(a, b);
        assert!(a < b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn relabeling_is_visible_through_every_handle() {
        let column = Column::new("cost");
        let alias = column.clone();
        alias.set_label("total cost");
        assert_eq!(column.label(), "total cost");
        assert_eq!(column.to_string(), "total cost");
        assert_eq!(column.index(), alias.index());
    }

    #[test]
    fn hashing_matches_index_identity() {
        let a = Column::new("a");
        let b = Column::new("b");
        let set: HashSet<Column> = [a.clone(), b.clone(), a.clone()].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&b));
    }

    #[test]
    fn default_property_uses_default_range() {
        let column = Column::with_default_range("mass", 2.0, 8.0);
        let property = column.default_property();
        assert_eq!(property.min(), 2.0);
        assert_eq!(property.max(), 8.0);
        assert_eq!(property.column(), &column);
    }

    #[test]
    fn degenerate_default_range_is_widened() {
        let column = Column::with_default_range("flat", 3.0, 3.0);
        assert_eq!(column.default_range(), (0.0, 6.0));
        column.set_default_range(0.0, 0.0);
        assert_eq!(column.default_range(), (-1.0, 1.0));
    }
}
