use optiscope::engine::config::DEFAULT_SELECTION_NAME;

/// Values used when neither the config file nor the command line sets them.
pub struct DefaultsConfig {
    pub selection_name: String,
    pub delimiter: u8,
    pub maximize: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            selection_name: DEFAULT_SELECTION_NAME.to_string(),
            delimiter: b',',
            maximize: false,
        }
    }
}
