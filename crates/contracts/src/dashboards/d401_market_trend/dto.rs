use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Weekly whole-market aggregate (`GET /market-stats`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStat {
    pub year: i32,
    pub week: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_revenue: f64,
    #[serde(default)]
    pub movie_count: u32,
    #[serde(default)]
    pub top_movie: String,
    /// Week-over-week growth; recomputed on the client, see `with_market_growth`
    #[serde(default)]
    pub growth_rate: Option<f64>,
}

/// Compact market snapshot for the status bar (`GET /stats`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterStats {
    #[serde(default)]
    pub active_movie_count: u32,
    #[serde(default)]
    pub weekly_total_revenue: f64,
    #[serde(default)]
    pub monthly_new_releases: u32,
}
