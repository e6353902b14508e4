pub mod d400_period_report;
pub mod d401_market_trend;
pub mod d402_trajectory_compare;
pub mod d403_market_overview;
