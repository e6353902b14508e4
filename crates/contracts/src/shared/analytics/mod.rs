//! Chart/table data preparation for the box-office dashboards.
//!
//! Every view goes through these functions instead of reshaping service
//! responses on its own. Nothing here holds state between calls except the
//! explicit cursor/debouncer/selection objects the caller owns.

pub mod chart;
pub mod cumulative;
pub mod debounce;
pub mod error;
pub mod growth;
pub mod load_state;
pub mod market;
pub mod overview;
pub mod pagination;
pub mod selection;
pub mod trajectory;
pub mod week_date;

pub use chart::{chart_records, series_labels, week_axis_labels, SeriesLabel};
pub use cumulative::{accumulate, run_summary, AccumulatedSeries, CumulativePoint, MovieRunSummary};
pub use debounce::{InputOutcome, RequestSequence, SearchDebouncer, SearchQuery, Ticket};
pub use error::AnalyticsError;
pub use growth::{format_growth, growth_rate, with_growth};
pub use load_state::LoadState;
pub use pagination::{paginate, PageCursor};
pub use selection::ComparisonSelection;
pub use trajectory::{
    align, align_cumulative, align_view, calendar_run, relative_weeks, AlignMode, AlignedPoint,
    RelativeWeekRow, SeriesView, WeekCell,
};
pub use week_date::{WeekDateResolver, WeekRange, WeekResolution};
