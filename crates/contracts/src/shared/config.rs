use crate::shared::analytics::error::AnalyticsError;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AnalyticsConfig {
    pub search: SearchConfig,
    pub compare: CompareConfig,
    pub report: ReportConfig,
    pub trend: TrendConfig,
    pub overview: OverviewConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub suggestion_limit: usize,
    pub min_query_len: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CompareConfig {
    pub max_movies: usize,
    pub debounce_ms: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ReportConfig {
    pub page_size: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TrendConfig {
    pub default_year_count: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OverviewConfig {
    /// Rows per page of the home movie list
    pub page_size: usize,
}

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r#"
[search]
debounce_ms = 400
suggestion_limit = 6
min_query_len = 1

[compare]
max_movies = 5
debounce_ms = 300

[report]
page_size = 30

[trend]
default_year_count = 3

[overview]
page_size = 15
"#;

const DEBOUNCE_RANGE_MS: std::ops::RangeInclusive<u64> = 1..=5000;

impl AnalyticsConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, AnalyticsError> {
        let config: AnalyticsConfig =
            toml::from_str(contents).map_err(|e| AnalyticsError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalyticsError> {
        for (name, ms) in [
            ("search.debounce_ms", self.search.debounce_ms),
            ("compare.debounce_ms", self.compare.debounce_ms),
        ] {
            if !DEBOUNCE_RANGE_MS.contains(&ms) {
                return Err(AnalyticsError::Config(format!(
                    "{} must be within 1..=5000, got {}",
                    name, ms
                )));
            }
        }
        for (name, value) in [
            ("search.suggestion_limit", self.search.suggestion_limit),
            ("compare.max_movies", self.compare.max_movies),
            ("report.page_size", self.report.page_size),
            ("overview.page_size", self.overview.page_size),
        ] {
            if value == 0 {
                return Err(AnalyticsError::Config(format!("{} must be > 0", name)));
            }
        }
        Ok(())
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig {
                debounce_ms: 400,
                suggestion_limit: 6,
                min_query_len: 1,
            },
            compare: CompareConfig {
                max_movies: 5,
                debounce_ms: 300,
            },
            report: ReportConfig { page_size: 30 },
            trend: TrendConfig {
                default_year_count: 3,
            },
            overview: OverviewConfig { page_size: 15 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = AnalyticsConfig::from_toml_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        assert_eq!(config.unwrap(), AnalyticsConfig::default());
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let broken = DEFAULT_CONFIG.replace("page_size = 30", "page_size = 0");
        let err = AnalyticsConfig::from_toml_str(&broken).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::Config("report.page_size must be > 0".to_string())
        );
    }

    #[test]
    fn test_rejects_zero_overview_page_size() {
        let broken = DEFAULT_CONFIG.replace("page_size = 15", "page_size = 0");
        assert_eq!(
            AnalyticsConfig::from_toml_str(&broken),
            Err(AnalyticsError::Config("overview.page_size must be > 0".to_string()))
        );
    }

    #[test]
    fn test_rejects_out_of_range_debounce() {
        let broken = DEFAULT_CONFIG.replace("debounce_ms = 300", "debounce_ms = 0");
        assert!(AnalyticsConfig::from_toml_str(&broken).is_err());
    }

    #[test]
    fn test_rejects_missing_section() {
        assert!(matches!(
            AnalyticsConfig::from_toml_str("[search]\ndebounce_ms = 300"),
            Err(AnalyticsError::Config(_))
        ));
    }
}
