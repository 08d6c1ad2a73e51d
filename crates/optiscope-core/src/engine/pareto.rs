use crate::core::models::column_property::ColumnProperty;
use crate::core::models::error::ModelError;
use crate::core::models::ids::PointId;
use crate::core::models::point_set::PointSet;
use crate::core::models::selection::Selection;
use crate::engine::config::DEFAULT_SELECTION_NAME;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{debug, error, info, instrument};

/// Whether `q` dominates `p` when every coordinate is minimized.
///
/// `q` must be no larger than `p` in every coordinate and strictly smaller in
/// at least one. Equal coordinate tuples never dominate each other.
pub fn dominates(q: &[f64], p: &[f64]) -> bool {
    let mut strictly_better = false;
    for (&a, &b) in q.iter().zip(p) {
        if a > b {
            return false;
        }
        if a < b {
            strictly_better = true;
        }
    }
    strictly_better
}

#[derive(Debug, Clone, Copy)]
struct Candidate<const N: usize> {
    id: PointId,
    coords: [f64; N],
}

/// Extracts the non-dominated points of `set` over two or three objectives.
///
/// Every objective is scaled into its property's range and minimized. Points with
/// an undefined (NaN) scaled coordinate take no part in the comparison.
///
/// Returns `Ok(None)` when `properties` does not hold exactly two or three
/// entries; the failure is reported through `reporter` instead of being raised.
///
/// # Errors
///
/// Returns [`EngineError::Model`] if a property's column is missing from the
/// column set of any member list of `set`.
#[instrument(skip_all, name = "pareto_front", fields(points = set.len(), objectives = properties.len()))]
pub fn evaluate_pareto_front(
    set: &PointSet,
    properties: &[ColumnProperty],
    reporter: &ProgressReporter,
) -> Result<Option<Selection>, EngineError> {
    let ids = match properties.len() {
        2 => sweep_2d(collect_candidates::<2>(set, properties)?),
        3 => pairwise_3d(&collect_candidates::<3>(set, properties)?, reporter),
        n => {
            error!(
                objectives = n,
                "Pareto front evaluation needs 2 or 3 objectives."
            );
            reporter.report(Progress::Error(format!(
                "Pareto front evaluation needs 2 or 3 objectives, got {n}."
            )));
            return Ok(None);
        }
    };

    let mut selection = Selection::new(DEFAULT_SELECTION_NAME);
    selection.extend(ids);
    selection.set_active(true);
    info!(
        front_size = selection.len(),
        total = set.len(),
        "Pareto front extracted."
    );
    Ok(Some(selection))
}

fn collect_candidates<const N: usize>(
    set: &PointSet,
    properties: &[ColumnProperty],
) -> Result<Vec<Candidate<N>>, ModelError> {
    let mut candidates = Vec::with_capacity(set.len());
    let mut excluded = 0usize;

    for member in set.members() {
        let mut positions = [0usize; N];
        for (position, property) in positions.iter_mut().zip(properties) {
            let column = property.column();
            *position = member
                .column_set()
                .index_of(column)
                .ok_or_else(|| ModelError::ColumnNotFound {
                    index: column.index(),
                    label: column.label(),
                })?;
        }

        for &id in member.ids() {
            let Some(point) = set.get(id) else {
                continue;
            };
            let coords: [f64; N] =
                std::array::from_fn(|k| point.scaled(positions[k], &properties[k]));
            if coords.iter().any(|c| c.is_nan()) {
                excluded += 1;
                continue;
            }
            candidates.push(Candidate { id, coords });
        }
    }

    if excluded > 0 {
        debug!(excluded, "Skipped points with undefined objective values.");
    }
    Ok(candidates)
}

/// Single sweep over the points sorted by `(x, y)`.
///
/// A point joins the front when its `y` undercuts the last accepted point, or
/// when it exactly duplicates that point. Output is in sweep order.
fn sweep_2d(mut candidates: Vec<Candidate<2>>) -> Vec<PointId> {
    candidates.sort_by(|a, b| {
        a.coords[0]
            .total_cmp(&b.coords[0])
            .then(a.coords[1].total_cmp(&b.coords[1]))
    });

    let mut front = Vec::new();
    let mut last_kept: Option<[f64; 2]> = None;
    for candidate in candidates {
        let keep = match last_kept {
            None => true,
            Some(best) => candidate.coords[1] < best[1] || candidate.coords == best,
        };
        if keep {
            front.push(candidate.id);
            last_kept = Some(candidate.coords);
        }
    }
    front
}

/// Tests every candidate against all others and stops at its first dominator.
fn pairwise_3d(candidates: &[Candidate<3>], reporter: &ProgressReporter) -> Vec<PointId> {
    reporter.report(Progress::TaskStart {
        total_steps: candidates.len() as u64,
    });

    let front = candidates
        .iter()
        .filter(|p| {
            let dominated = candidates
                .iter()
                .any(|q| q.id != p.id && dominates(&q.coords, &p.coords));
            reporter.report(Progress::TaskIncrement);
            !dominated
        })
        .map(|p| p.id)
        .collect();

    reporter.report(Progress::TaskFinish);
    front
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::table::import_table;
    use crate::core::models::column::Column;
    use crate::core::models::column_set::ColumnSet;
    use crate::core::models::point::Point;
    use crate::core::models::point_list::PointList;
    use std::sync::{Arc, Mutex};

    fn build_set(labels: &[&str], rows: &[&[f64]]) -> (PointSet, Vec<Column>) {
        let table = import_table(labels, rows.iter().map(|r| r.to_vec())).unwrap();
        (PointSet::from_list("test", table.list), table.columns)
    }

    fn identity(columns: &[Column]) -> Vec<ColumnProperty> {
        columns
            .iter()
            .map(|c| ColumnProperty::new(c.clone(), 0.0, 1.0))
            .collect()
    }

    fn front_values(set: &PointSet, selection: &Selection) -> Vec<Vec<f64>> {
        selection
            .points(set)
            .map(|(_, point)| point.values().to_vec())
            .collect()
    }

    #[test]
    fn dominance_requires_a_strict_improvement() {
        assert!(dominates(&[1.0, 2.0, 3.0], &[1.0, 2.0, 4.0]));
        assert!(!dominates(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]));
        assert!(!dominates(&[0.0, 5.0, 0.0], &[1.0, 4.0, 1.0]));
        assert!(dominates(&[0.0, 0.0], &[1.0, 1.0]));
    }

    #[test]
    fn sweep_drops_equal_y_tie_with_larger_x() {
        let (set, columns) = build_set(
            &["x", "y"],
            &[&[3.0, 3.0], &[1.0, 5.0], &[4.0, 1.0], &[2.0, 3.0]],
        );
        let selection = evaluate_pareto_front(&set, &identity(&columns), &ProgressReporter::new())
            .unwrap()
            .unwrap();
        assert_eq!(selection.name(), "Pareto-Front");
        assert!(selection.is_active());
        assert_eq!(
            front_values(&set, &selection),
            vec![vec![1.0, 5.0], vec![2.0, 3.0], vec![4.0, 1.0]]
        );
    }

    #[test]
    fn sweep_keeps_exact_duplicates_on_the_front() {
        let (set, columns) = build_set(
            &["x", "y"],
            &[&[1.0, 2.0], &[1.0, 2.0], &[2.0, 2.0], &[0.5, 4.0]],
        );
        let selection = evaluate_pareto_front(&set, &identity(&columns), &ProgressReporter::new())
            .unwrap()
            .unwrap();
        assert_eq!(
            front_values(&set, &selection),
            vec![vec![0.5, 4.0], vec![1.0, 2.0], vec![1.0, 2.0]]
        );
    }

    #[test]
    fn sweep_matches_pairwise_dominance() {
        let rows: Vec<Vec<f64>> = (0..40)
            .map(|i| {
                let x = ((i * 7) % 13) as f64;
                let y = ((i * 11) % 17) as f64;
                vec![x, y]
            })
            .collect();
        let row_refs: Vec<&[f64]> = rows.iter().map(Vec::as_slice).collect();
        let (set, columns) = build_set(&["x", "y"], &row_refs);
        let selection = evaluate_pareto_front(&set, &identity(&columns), &ProgressReporter::new())
            .unwrap()
            .unwrap();

        for (id, point) in set.iter() {
            let dominated = set
                .iter()
                .any(|(other, q)| other != id && dominates(q.values(), point.values()));
            assert_eq!(selection.contains(id), !dominated, "point {:?}", point.values());
        }
    }

    #[test]
    fn pairwise_front_in_three_dimensions() {
        let (set, columns) = build_set(
            &["a", "b", "c"],
            &[
                &[1.0, 1.0, 1.0],
                &[1.0, 1.0, 1.0],
                &[2.0, 2.0, 2.0],
                &[0.0, 3.0, 3.0],
                &[1.0, 1.0, 2.0],
            ],
        );
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));
        let selection = evaluate_pareto_front(&set, &identity(&columns), &reporter)
            .unwrap()
            .unwrap();
        drop(reporter);

        assert_eq!(
            front_values(&set, &selection),
            vec![vec![1.0, 1.0, 1.0], vec![1.0, 1.0, 1.0], vec![0.0, 3.0, 3.0]]
        );

        let events = events.into_inner().unwrap();
        assert!(matches!(events.first(), Some(Progress::TaskStart { total_steps: 5 })));
        assert!(matches!(events.last(), Some(Progress::TaskFinish)));
        let increments = events
            .iter()
            .filter(|e| matches!(e, Progress::TaskIncrement))
            .count();
        assert_eq!(increments, 5);
    }

    #[test]
    fn single_point_is_its_own_front() {
        let (set, columns) = build_set(&["a", "b", "c"], &[&[4.0, 5.0, 6.0]]);
        let selection = evaluate_pareto_front(&set, &identity(&columns), &ProgressReporter::new())
            .unwrap()
            .unwrap();
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn inverted_property_maximizes_its_column() {
        let (set, columns) = build_set(&["cost", "gain"], &[&[1.0, 1.0], &[2.0, 5.0], &[3.0, 4.0]]);
        let properties = vec![
            ColumnProperty::new(columns[0].clone(), 0.0, 10.0),
            ColumnProperty::new(columns[1].clone(), 10.0, 0.0),
        ];
        let selection = evaluate_pareto_front(&set, &properties, &ProgressReporter::new())
            .unwrap()
            .unwrap();
        assert_eq!(
            front_values(&set, &selection),
            vec![vec![1.0, 1.0], vec![2.0, 5.0]]
        );
    }

    #[test]
    fn unsupported_arity_reports_and_returns_none() {
        let (set, columns) = build_set(&["a", "b", "c", "d"], &[&[1.0, 2.0, 3.0, 4.0]]);
        let errors = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::Error(message) = event {
                errors.lock().unwrap().push(message);
            }
        }));

        assert!(evaluate_pareto_front(&set, &identity(&columns), &reporter).unwrap().is_none());
        assert!(evaluate_pareto_front(&set, &identity(&columns[..1]), &reporter).unwrap().is_none());
        drop(reporter);
        assert_eq!(errors.into_inner().unwrap().len(), 2);

        assert!(evaluate_pareto_front(&set, &[], &ProgressReporter::new())
            .unwrap()
            .is_none());
    }

    #[test]
    fn missing_objective_column_is_a_hard_error() {
        let (set, _) = build_set(&["x", "y"], &[&[1.0, 2.0]]);
        let stranger = Column::new("z");
        let properties = vec![
            ColumnProperty::new(set.column_set().columns()[0].clone(), 0.0, 1.0),
            ColumnProperty::new(stranger, 0.0, 1.0),
        ];
        let err = evaluate_pareto_front(&set, &properties, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Model {
                source: ModelError::ColumnNotFound { .. }
            }
        ));
    }

    #[test]
    fn points_with_nan_objectives_are_excluded() {
        let (set, columns) = build_set(&["x", "y"], &[&[f64::NAN, 0.0], &[1.0, 1.0]]);
        let selection = evaluate_pareto_front(&set, &identity(&columns), &ProgressReporter::new())
            .unwrap()
            .unwrap();
        assert_eq!(front_values(&set, &selection), vec![vec![1.0, 1.0]]);
    }

    #[test]
    fn heterogeneous_members_are_compared_through_their_own_positions() {
        let x = Column::new("x");
        let y = Column::new("y");
        let extra = Column::new("extra");
        let common = Arc::new(ColumnSet::new([x.clone(), y.clone()]));
        let wide = Arc::new(ColumnSet::new([x.clone(), extra.clone(), y.clone()]));

        let mut set = PointSet::new("mixed", Arc::clone(&common));
        let narrow_list = PointList::with_points(
            Arc::clone(&common),
            vec![Point::new(Arc::clone(&common), vec![2.0, 2.0]).unwrap()],
        )
        .unwrap();
        set.add_list(narrow_list).unwrap();
        // Wide points are stored in (x, y, extra) order.
        let wide_list = PointList::with_points(
            Arc::clone(&wide),
            vec![
                Point::new(Arc::clone(&wide), vec![1.0, 1.0, 100.0]).unwrap(),
                Point::new(Arc::clone(&wide), vec![0.0, 3.0, -5.0]).unwrap(),
            ],
        )
        .unwrap();
        set.add_list(wide_list).unwrap();

        let properties = identity(&[x, y]);
        let selection = evaluate_pareto_front(&set, &properties, &ProgressReporter::new())
            .unwrap()
            .unwrap();
        assert_eq!(
            front_values(&set, &selection),
            vec![vec![0.0, 3.0, -5.0], vec![1.0, 1.0, 100.0]]
        );
    }
}
