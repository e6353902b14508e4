pub mod d400_period_report;
pub mod d401_market_trend;
pub mod d402_trajectory_compare;
pub mod d403_market_overview;

pub use d400_period_report::ui::PeriodReportDashboard;
pub use d401_market_trend::ui::MarketTrendDashboard;
pub use d402_trajectory_compare::ui::TrajectoryCompareDashboard;
pub use d403_market_overview::ui::MarketOverviewDashboard;
