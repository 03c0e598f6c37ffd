//! Configuration for summarizing a strategy table.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, ValidationError};

/// What to do with a row whose holding key cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// Abort the whole aggregation on the first bad row.
    #[default]
    FailFast,
    /// Leave the row out, log it, and list it in the summary.
    Skip,
}

/// Settings for [`aggregate_with`](super::aggregate_with) and the CLI.
///
/// # Example
/// ```
/// use flop_summary::summary::{RowPolicy, SummaryConfig};
///
/// let config = SummaryConfig::default();
/// assert_eq!(config.row_policy, RowPolicy::FailFast);
/// assert!(!config.parallel);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Handling of malformed holding keys.
    #[serde(default)]
    pub row_policy: RowPolicy,

    /// Classify rows on the rayon thread pool.
    ///
    /// Results are identical to the sequential pass; accumulation always
    /// runs in table order.
    #[serde(default)]
    pub parallel: bool,

    /// Worker threads for parallel work. `None` uses all cores.
    #[serde(default)]
    pub num_threads: Option<usize>,

    /// Include the coarse group rollup in reports.
    #[serde(default = "default_true")]
    pub include_groups: bool,

    /// Action path from the export's root to the node to summarize.
    #[serde(default)]
    pub action_path: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            row_policy: RowPolicy::FailFast,
            parallel: false,
            num_threads: None,
            include_groups: true,
            action_path: Vec::new(),
        }
    }
}

impl SummaryConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Io(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_json_str(&content)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Builder method: set the row policy.
    pub fn with_row_policy(mut self, policy: RowPolicy) -> Self {
        self.row_policy = policy;
        self
    }

    /// Builder method: enable or disable parallel classification.
    pub fn with_parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }

    /// Builder method: set number of threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Builder method: include or leave out the group rollup.
    pub fn with_groups(mut self, enable: bool) -> Self {
        self.include_groups = enable;
        self
    }

    /// Builder method: set the action path into the tree.
    pub fn with_action_path<S: Into<String>>(mut self, path: impl IntoIterator<Item = S>) -> Self {
        self.action_path = path.into_iter().map(Into::into).collect();
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.num_threads == Some(0) {
            return Err(ValidationError::InvalidConfig(
                "num_threads must be at least 1".to_string(),
            ));
        }
        if self.action_path.iter().any(|step| step.is_empty()) {
            return Err(ValidationError::InvalidConfig(
                "action_path contains an empty step".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SummaryConfig::new();
        assert_eq!(config.row_policy, RowPolicy::FailFast);
        assert!(config.include_groups);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "row_policy": "skip",
            "parallel": true,
            "num_threads": 4,
            "action_path": ["CHECK"]
        }"#;
        let config = SummaryConfig::from_json_str(json).unwrap();
        assert_eq!(config.row_policy, RowPolicy::Skip);
        assert!(config.parallel);
        assert_eq!(config.num_threads, Some(4));
        assert!(config.include_groups);
        assert_eq!(config.action_path, vec!["CHECK".to_string()]);
    }

    #[test]
    fn test_minimal_config() {
        let config = SummaryConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SummaryConfig::default());
    }

    #[test]
    fn test_validation_fails() {
        assert!(matches!(
            SummaryConfig::from_json_str(r#"{ "num_threads": 0 }"#),
            Err(Error::Validation(ValidationError::InvalidConfig(_)))
        ));
        assert!(SummaryConfig::new()
            .with_action_path(["CHECK", ""])
            .validate()
            .is_err());
        assert!(matches!(
            SummaryConfig::from_json_str(r#"{ "row_policy": "ignore" }"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_builder() {
        let config = SummaryConfig::new()
            .with_row_policy(RowPolicy::Skip)
            .with_parallel(true)
            .with_threads(2)
            .with_groups(false)
            .with_action_path(vec!["CHECK".to_string(), "BET 6.0".to_string()]);
        assert_eq!(config.row_policy, RowPolicy::Skip);
        assert_eq!(config.num_threads, Some(2));
        assert!(!config.include_groups);
        assert_eq!(config.action_path.len(), 2);
    }
}
