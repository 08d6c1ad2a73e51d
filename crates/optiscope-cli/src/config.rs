pub mod defaults;

use crate::cli::FrontArgs;
use crate::error::{CliError, Result};
use crate::utils::parser::ObjectiveSpec;
use defaults::DefaultsConfig;
use optiscope::core::models::column_property::ColumnProperty;
use optiscope::core::models::point_set::PointSet;
use optiscope::engine::config::{FrontConfig, FrontConfigBuilder};
use optiscope::engine::error::EngineError;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialObjective {
    column: String,
    min: Option<f64>,
    max: Option<f64>,
    maximize: Option<bool>,
}

impl From<ObjectiveSpec> for PartialObjective {
    fn from(spec: ObjectiveSpec) -> Self {
        Self {
            column: spec.label,
            min: spec.range.map(|(min, _)| min),
            max: spec.range.map(|(_, max)| max),
            maximize: None,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialFrontConfig {
    #[serde(rename = "selection-name")]
    selection_name: Option<String>,
    objectives: Option<Vec<PartialObjective>>,
}

impl PartialFrontConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Resolves objectives against the columns of `set` and applies CLI overrides.
    ///
    /// Command-line objectives replace the file's list as a whole. Objectives
    /// without explicit bounds take the range fitted to the data.
    pub fn merge_with_cli(self, args: &FrontArgs, set: &PointSet) -> Result<FrontConfig> {
        let defaults = DefaultsConfig::default();

        let objectives: Vec<PartialObjective> = if args.objectives.is_empty() {
            self.objectives.unwrap_or_default()
        } else {
            args.objectives.iter().cloned().map(Into::into).collect()
        };
        if objectives.is_empty() {
            return Err(CliError::Config(
                "At least two objectives are required either in the config file or via --objective."
                    .to_string(),
            ));
        }

        let fitted = set.fitted_properties();
        let properties = objectives
            .into_iter()
            .map(|objective| resolve_objective(objective, set, &fitted, &defaults))
            .collect::<Result<Vec<_>>>()?;

        let selection_name = args
            .name
            .clone()
            .or(self.selection_name)
            .unwrap_or(defaults.selection_name);

        FrontConfigBuilder::new()
            .objectives(properties)
            .selection_name(&selection_name)
            .build()
            .map_err(|e| CliError::from(EngineError::from(e)))
    }
}

fn resolve_objective(
    objective: PartialObjective,
    set: &PointSet,
    fitted: &[ColumnProperty],
    defaults: &DefaultsConfig,
) -> Result<ColumnProperty> {
    let column = set
        .column_set()
        .find_by_label(&objective.column)
        .ok_or_else(|| {
            CliError::Config(format!(
                "Objective column '{}' does not exist in the input table.",
                objective.column
            ))
        })?;

    let property = match (objective.min, objective.max) {
        (Some(min), Some(max)) => ColumnProperty::new(column.clone(), min, max),
        (None, None) => fitted
            .iter()
            .find(|property| property.column() == column)
            .cloned()
            .unwrap_or_else(|| column.default_property()),
        _ => {
            return Err(CliError::Config(format!(
                "Objective '{}' must set both 'min' and 'max', or neither.",
                objective.column
            )));
        }
    };

    debug!(
        column = %column,
        min = property.min(),
        max = property.max(),
        "Resolved objective."
    );
    // An explicit `min > max` range is already maximized.
    if objective.maximize.unwrap_or(defaults.maximize) && !property.is_inverted() {
        Ok(property.inverted())
    } else {
        Ok(property)
    }
}
