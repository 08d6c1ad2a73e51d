use crate::core::models::column_property::ColumnProperty;
use thiserror::Error;

/// Name given to the selection produced by a front evaluation.
pub const DEFAULT_SELECTION_NAME: &str = "Pareto-Front";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("A Pareto front needs 2 or 3 objectives, got {0}")]
    UnsupportedObjectiveCount(usize),
}

/// Parameters of one Pareto-front extraction.
///
/// Each objective is minimized after scaling into its property's range; an
/// inverted property (`min > max`) therefore maximizes its column.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontConfig {
    pub objectives: Vec<ColumnProperty>,
    pub selection_name: String,
}

#[derive(Default)]
pub struct FrontConfigBuilder {
    objectives: Vec<ColumnProperty>,
    selection_name: Option<String>,
}

impl FrontConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objective(mut self, property: ColumnProperty) -> Self {
        self.objectives.push(property);
        self
    }
    pub fn objectives(mut self, properties: impl IntoIterator<Item = ColumnProperty>) -> Self {
        self.objectives.extend(properties);
        self
    }
    pub fn selection_name(mut self, name: &str) -> Self {
        self.selection_name = Some(name.to_string());
        self
    }

    pub fn build(self) -> Result<FrontConfig, ConfigError> {
        match self.objectives.len() {
            0 => return Err(ConfigError::MissingParameter("objectives")),
            2 | 3 => {}
            n => return Err(ConfigError::UnsupportedObjectiveCount(n)),
        }
        Ok(FrontConfig {
            objectives: self.objectives,
            selection_name: self
                .selection_name
                .unwrap_or_else(|| DEFAULT_SELECTION_NAME.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::column::Column;

    fn property(label: &str) -> ColumnProperty {
        ColumnProperty::new(Column::new(label), 0.0, 1.0)
    }

    #[test]
    fn build_succeeds_with_two_objectives_and_default_name() {
        let config = FrontConfigBuilder::new()
            .objective(property("cost"))
            .objective(property("mass"))
            .build()
            .unwrap();
        assert_eq!(config.objectives.len(), 2);
        assert_eq!(config.selection_name, DEFAULT_SELECTION_NAME);
    }

    #[test]
    fn build_keeps_custom_selection_name() {
        let config = FrontConfigBuilder::new()
            .objectives([property("a"), property("b"), property("c")])
            .selection_name("best designs")
            .build()
            .unwrap();
        assert_eq!(config.selection_name, "best designs");
    }

    #[test]
    fn build_fails_without_objectives() {
        let result = FrontConfigBuilder::new().build();
        assert_eq!(result, Err(ConfigError::MissingParameter("objectives")));
    }

    #[test]
    fn build_fails_for_unsupported_objective_counts() {
        let one = FrontConfigBuilder::new().objective(property("a")).build();
        assert_eq!(one, Err(ConfigError::UnsupportedObjectiveCount(1)));

        let four = FrontConfigBuilder::new()
            .objectives((0..4).map(|i| property(&format!("c{i}"))))
            .build();
        assert_eq!(four, Err(ConfigError::UnsupportedObjectiveCount(4)));
    }
}
