use thiserror::Error;

/// Errors of the analytics layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    #[error("Week {0} is outside 0..=53")]
    InvalidWeek(i64),

    #[error("Month {0} is outside 1..=12")]
    InvalidMonth(i64),

    #[error("Period number is required for '{0}' reports")]
    MissingPeriodNumber(&'static str),

    #[error("Page {page} is outside 1..={total_pages}")]
    InvalidPage { page: usize, total_pages: usize },

    #[error("Page size must be greater than zero")]
    InvalidPageSize,

    #[error("At most {0} movies can be compared")]
    SelectionFull(usize),

    #[error("Movie {0} is already selected")]
    AlreadySelected(i64),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
