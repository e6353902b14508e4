use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Country filter value meaning "no filter"
pub const ALL_COUNTRIES: &str = "所有國家";

/// Revenue of one country in the latest reported week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRevenue {
    pub country: String,
    #[serde(default)]
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRevenue {
    pub name: String,
    #[serde(default)]
    pub value: f64,
}

/// Whole-market total of one of the most recent weeks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendWeek {
    pub year: i32,
    pub week: u32,
    #[serde(default)]
    pub week_label: String,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardKpis {
    #[serde(default)]
    pub current_week_total: f64,
    #[serde(default)]
    pub current_month_total: f64,
    #[serde(default)]
    pub active_movie_count: u32,
    #[serde(default)]
    pub weekly_new_releases: u32,
    #[serde(default)]
    pub monthly_new_releases: u32,
}

/// Response of `GET /dashboard-stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStatsResponse {
    #[serde(default)]
    pub market_share: Vec<CountryRevenue>,
    #[serde(default)]
    pub four_week_trend: Vec<TrendWeek>,
    #[serde(default)]
    pub kpis: DashboardKpis,
    /// Not every deployment reports cities
    #[serde(default)]
    pub city_distribution: Vec<CityRevenue>,
}

/// Column the movie list is ordered by (descending)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieSort {
    #[default]
    WeeklyRevenue,
    CumulativeRevenue,
}

impl MovieSort {
    pub fn label(&self) -> &'static str {
        match self {
            MovieSort::WeeklyRevenue => "週票房",
            MovieSort::CumulativeRevenue => "累積票房",
        }
    }
}

/// Query of `GET /movies?search=..&sort_by=..`.
///
/// `country` is a market-share group ("東南亞", "其他", ...) and is applied on
/// the client, the service only knows single countries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovieListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub sort_by: MovieSort,
    #[serde(skip)]
    pub country: Option<String>,
}

impl MovieListQuery {
    /// Blank search and the "all countries" choice are left out of the query
    pub fn new(search: &str, sort_by: MovieSort, country: &str) -> Self {
        let search = search.trim();
        let country = country.trim();
        Self {
            search: (!search.is_empty()).then(|| search.to_string()),
            sort_by,
            country: (!country.is_empty() && country != ALL_COUNTRIES).then(|| country.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stats_response_tolerates_missing_sections() {
        let raw = json!({
            "market_share": [{"country": "美國", "revenue": 1200.0}],
            "kpis": {"current_week_total": 5000.0, "active_movie_count": 12}
        });
        let parsed: DashboardStatsResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.market_share.len(), 1);
        assert!(parsed.four_week_trend.is_empty());
        assert!(parsed.city_distribution.is_empty());
        assert_eq!(parsed.kpis.active_movie_count, 12);
        assert_eq!(parsed.kpis.monthly_new_releases, 0);
    }

    #[test]
    fn test_list_query_drops_empty_filters() {
        let query = MovieListQuery::new("  ", MovieSort::CumulativeRevenue, ALL_COUNTRIES);
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"sort_by": "cumulative_revenue"})
        );
        let query = MovieListQuery::new(" 沙丘 ", MovieSort::WeeklyRevenue, "美國");
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"search": "沙丘", "sort_by": "weekly_revenue"})
        );
        assert_eq!(query.country.as_deref(), Some("美國"));
    }
}
