use crate::core::models::column::Column;
use crate::core::models::column_set::ColumnSet;
use crate::core::models::error::ModelError;
use crate::core::models::point::{Point, PointTag};
use crate::core::models::point_list::PointList;
use std::sync::Arc;

/// The model objects built from one already-parsed table.
#[derive(Debug, Clone)]
pub struct ImportedTable {
    /// Columns in the table's original column order.
    pub columns: Vec<Column>,
    pub column_set: Arc<ColumnSet>,
    /// One point per row, tagged with its zero-based row index.
    pub list: PointList,
}

/// Creates fresh columns for `labels` and one point per row.
///
/// # Errors
///
/// Returns [`ModelError::RowLength`] for the first row whose length differs
/// from the number of labels.
pub fn import_table<S: AsRef<str>>(
    labels: &[S],
    rows: impl IntoIterator<Item = Vec<f64>>,
) -> Result<ImportedTable, ModelError> {
    let columns: Vec<Column> = labels
        .iter()
        .map(|label| Column::new(label.as_ref()))
        .collect();
    let (column_set, list) = import_rows(&columns, rows)?;
    Ok(ImportedTable {
        columns,
        column_set,
        list,
    })
}

/// Builds points over existing `columns`, given in the same order as each row.
///
/// The columns may be listed in any order; values are permuted into the sorted
/// order of the resulting column set.
///
/// # Errors
///
/// [`ModelError::DimensionMismatch`] if `columns` contains duplicates, or
/// [`ModelError::RowLength`] for a row of the wrong length.
pub fn import_rows(
    columns: &[Column],
    rows: impl IntoIterator<Item = Vec<f64>>,
) -> Result<(Arc<ColumnSet>, PointList), ModelError> {
    let column_set = Arc::new(ColumnSet::new(columns.iter().cloned()));
    if column_set.dimension() != columns.len() {
        return Err(ModelError::DimensionMismatch {
            expected: columns.len(),
            actual: column_set.dimension(),
        });
    }
    let positions: Vec<usize> = columns
        .iter()
        .filter_map(|column| column_set.index_of(column))
        .collect();
    let in_order = positions.iter().enumerate().all(|(i, &p)| i == p);

    let mut points = Vec::new();
    for (row_index, row) in rows.into_iter().enumerate() {
        if row.len() != columns.len() {
            return Err(ModelError::RowLength {
                row: row_index,
                expected: columns.len(),
                actual: row.len(),
            });
        }
        let values = if in_order {
            row
        } else {
            let mut sorted = vec![0.0; row.len()];
            for (value, &position) in row.into_iter().zip(&positions) {
                sorted[position] = value;
            }
            sorted
        };
        points.push(Point::new(Arc::clone(&column_set), values)?.with_tag(PointTag::new(row_index)));
    }

    let list = PointList::with_points(Arc::clone(&column_set), points)?;
    Ok((column_set, list))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_table_creates_columns_in_label_order() {
        let table = import_table(
            &["cost", "mass"],
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
        )
        .unwrap();
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.columns[0].label(), "cost");
        assert_eq!(table.column_set.columns(), table.columns.as_slice());
        assert_eq!(table.list.len(), 2);

        let second = table.list.get(1).unwrap();
        assert_eq!(second.value_of(&table.columns[1]), Some(4.0));
        assert_eq!(second.tag().map(|t| t.index), Some(1));
    }

    #[test]
    fn import_rows_permutes_values_into_set_order() {
        let a = Column::new("a");
        let b = Column::new("b");
        let c = Column::new("c");
        let (set, list) = import_rows(
            &[c.clone(), a.clone(), b.clone()],
            vec![vec![30.0, 10.0, 20.0]],
        )
        .unwrap();
        assert_eq!(set.columns(), &[a.clone(), b.clone(), c.clone()]);
        let point = list.get(0).unwrap();
        assert_eq!(point.values(), &[10.0, 20.0, 30.0]);
        assert_eq!(point.value_of(&c), Some(30.0));
    }

    #[test]
    fn rows_of_wrong_length_are_rejected() {
        let err = import_table(&["x", "y"], vec![vec![1.0, 2.0], vec![1.0]]).unwrap_err();
        assert_eq!(
            err,
            ModelError::RowLength {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn duplicate_columns_are_rejected() {
        let a = Column::new("a");
        let err = import_rows(&[a.clone(), a], vec![vec![1.0, 2.0]]).unwrap_err();
        assert!(matches!(err, ModelError::DimensionMismatch { .. }));
    }

    #[test]
    fn empty_tables_produce_empty_lists() {
        let table = import_table(&["x"], Vec::<Vec<f64>>::new()).unwrap();
        assert!(table.list.is_empty());
        assert_eq!(table.column_set.dimension(), 1);
    }
}
