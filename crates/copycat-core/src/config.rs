use crate::error::Error;
use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;

pub const DEFAULT_ROOT_PATH: &str = "submissions";
pub const DEFAULT_THRESHOLD: f64 = 42.0;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory holding one extracted folder per submission.
    pub root_path: String,
    /// Minimum similarity percentage for two files to be linked.
    pub threshold: f64,
    pub ignore_patterns: Vec<String>,
    /// Decimal places for percentages in the text report.
    pub report_precision: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root_path: DEFAULT_ROOT_PATH.to_string(),
            threshold: DEFAULT_THRESHOLD,
            ignore_patterns: Vec::new(),
            report_precision: 0,
        }
    }
}

impl AppConfig {
    pub fn with_root_path(mut self, root_path: &str) -> Self {
        self.root_path = root_path.to_string();
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(Error::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

/// Layered configuration: built-in defaults, then an optional `Config.*` file in the
/// working directory, then `COPYCAT_*` environment variables.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();
    let builder = Config::builder()
        .set_default("root_path", defaults.root_path)?
        .set_default("threshold", defaults.threshold)?
        .set_default("ignore_patterns", Vec::<String>::new())?
        .set_default("report_precision", defaults.report_precision as u64)?
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(
            Environment::with_prefix("COPYCAT")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("ignore_patterns"),
        )
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.root_path, "submissions");
        assert_eq!(config.threshold, 42.0);
        assert!(config.ignore_patterns.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_bounds_are_inclusive() {
        assert!(AppConfig::default().with_threshold(0.0).validate().is_ok());
        assert!(AppConfig::default().with_threshold(100.0).validate().is_ok());
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        for bad in [-1.0, 100.5, f64::NAN] {
            let result = AppConfig::default().with_threshold(bad).validate();
            assert!(
                matches!(result, Err(Error::InvalidThreshold(_))),
                "threshold {} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_builder_overrides() {
        let config = AppConfig::default()
            .with_root_path("/tmp/hw3")
            .with_threshold(75.0);
        assert_eq!(config.root_path, "/tmp/hw3");
        assert_eq!(config.threshold, 75.0);
    }
}
