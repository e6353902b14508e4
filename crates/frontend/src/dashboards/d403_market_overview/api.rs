use crate::shared::api_utils::{api_url, api_url_with_query, fetch_json};
use contracts::dashboards::d403_market_overview::{DashboardStatsResponse, MovieListQuery};
use contracts::domain::a001_movie::{Movie, MovieListResponse};
use contracts::shared::analytics::overview::movie_list;

/// KPIs, market share, city breakdown and recent weekly totals
pub async fn get_dashboard_stats() -> Result<DashboardStatsResponse, String> {
    fetch_json(&api_url("/dashboard-stats")).await
}

/// Movie list for the query, filtered by country group and ordered locally
pub async fn get_movie_list(query: &MovieListQuery) -> Result<Vec<Movie>, String> {
    let url = api_url_with_query("/movies", query)?;
    let response: MovieListResponse = fetch_json(&url).await?;
    Ok(movie_list(&response.movies, query))
}
