use crate::core::models::column_property::ColumnProperty;
use crate::core::models::point_set::PointSet;
use crate::core::models::selection::Selection;
use crate::engine::config::{ConfigError, FrontConfig};
use crate::engine::error::EngineError;
use crate::engine::pareto::evaluate_pareto_front;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct FrontResult {
    pub selection: Selection,
    pub total_points: usize,
    pub objectives: Vec<ColumnProperty>,
}

/// Extracts the Pareto front of `set` as configured by `config`.
///
/// Unlike [`evaluate_pareto_front`], an unsupported objective count is a hard
/// [`EngineError::Config`] here, since `config` has already been validated once.
#[instrument(skip_all, name = "front_workflow")]
pub fn run(
    set: &PointSet,
    config: &FrontConfig,
    reporter: &ProgressReporter,
) -> Result<FrontResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Pareto Front",
    });
    info!(
        set = set.name(),
        points = set.len(),
        objectives = config.objectives.len(),
        "Starting Pareto front extraction."
    );
    reporter.report(Progress::Message(format!(
        "Comparing {} points over {} objectives",
        set.len(),
        config.objectives.len()
    )));

    let mut selection = evaluate_pareto_front(set, &config.objectives, reporter)?.ok_or(
        ConfigError::UnsupportedObjectiveCount(config.objectives.len()),
    )?;
    selection.set_name(&config.selection_name);

    reporter.report(Progress::PhaseFinish);
    info!(
        front_size = selection.len(),
        "Pareto front extraction finished."
    );

    Ok(FrontResult {
        selection,
        total_points: set.len(),
        objectives: config.objectives.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::table::import_table;
    use crate::core::models::column::Column;
    use crate::engine::config::FrontConfigBuilder;
    use std::sync::Mutex;

    fn sample_set() -> (PointSet, Vec<Column>) {
        let table = import_table(
            &["cost", "mass", "risk"],
            vec![
                vec![1.0, 9.0, 0.0],
                vec![5.0, 5.0, 0.0],
                vec![6.0, 6.0, 0.0],
                vec![9.0, 1.0, 0.0],
            ],
        )
        .unwrap();
        (PointSet::from_list("designs", table.list), table.columns)
    }

    #[test]
    fn run_names_the_selection_and_reports_phases() {
        let (set, columns) = sample_set();
        let config = FrontConfigBuilder::new()
            .objective(ColumnProperty::new(columns[0].clone(), 0.0, 10.0))
            .objective(ColumnProperty::new(columns[1].clone(), 0.0, 10.0))
            .selection_name("cheap and light")
            .build()
            .unwrap();

        let phases = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::PhaseStart { name } => phases.lock().unwrap().push(name.to_string()),
            Progress::PhaseFinish => phases.lock().unwrap().push("finish".to_string()),
            _ => {}
        }));
        let result = run(&set, &config, &reporter).unwrap();
        drop(reporter);

        assert_eq!(result.selection.name(), "cheap and light");
        assert!(result.selection.is_active());
        assert_eq!(result.selection.len(), 3);
        assert_eq!(result.total_points, 4);
        assert_eq!(result.objectives, config.objectives);
        assert_eq!(phases.into_inner().unwrap(), vec!["Pareto Front", "finish"]);
    }

    #[test]
    fn run_rejects_configs_with_unsupported_arity() {
        let (set, columns) = sample_set();
        let config = FrontConfig {
            objectives: vec![columns[0].default_property()],
            selection_name: "front".to_string(),
        };
        let err = run(&set, &config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Config {
                source: ConfigError::UnsupportedObjectiveCount(1)
            }
        ));
    }
}
