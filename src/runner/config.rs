//! Runner configuration.

/// Options for executing a validated table.
///
/// The defaults run every case in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Stop after the first failing case
    pub stop_on_fail: bool,
    /// Only run cases whose name contains this keyword
    pub filter: Option<String>,
}

impl RunnerConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop executing after the first failing case
    pub fn with_stop_on_fail(mut self, stop: bool) -> Self {
        self.stop_on_fail = stop;
        self
    }

    /// Only execute cases whose name contains `keyword`
    pub fn with_filter(mut self, keyword: impl Into<String>) -> Self {
        self.filter = Some(keyword.into());
        self
    }

    /// Whether a case with this name is selected by the filter.
    pub fn selects(&self, case_name: &str) -> bool {
        self.filter.as_deref().is_none_or(|keyword| case_name.contains(keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_runs_everything() {
        let config = RunnerConfig::default();
        assert!(!config.stop_on_fail);
        assert!(config.filter.is_none());
        assert!(config.selects("anything"));
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(RunnerConfig::new(), RunnerConfig::default());
    }

    #[test]
    fn test_with_filter() {
        let config = RunnerConfig::new().with_filter("edge");
        assert!(config.selects("edge: empty list"));
        assert!(!config.selects("normal case"));
        // Other fields unchanged
        assert!(!config.stop_on_fail);
    }

    #[test]
    fn test_builder_override() {
        let config = RunnerConfig::new().with_filter("a").with_filter("b");
        assert_eq!(config.filter.as_deref(), Some("b")); // Last value wins
    }

    #[test]
    fn test_with_stop_on_fail() {
        let config = RunnerConfig::new().with_stop_on_fail(true);
        assert!(config.stop_on_fail);
    }
}
