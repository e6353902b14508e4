//! Home dashboard figures: market share, city breakdown, recent trend and the
//! sortable movie list.

use super::growth::with_growth;
use super::week_date::WeekDateResolver;
use crate::dashboards::d403_market_overview::{
    CityRevenue, CountryRevenue, MovieListQuery, MovieSort, TrendWeek, ALL_COUNTRIES,
};
use crate::domain::a001_movie::Movie;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Countries shown as their own slice
const MAIN_MARKETS: [&str; 5] = ["台灣", "美國", "日本", "韓國", "香港"];
const SOUTHEAST_ASIA: [&str; 6] = ["泰國", "越南", "馬來西亞", "新加坡", "印尼", "菲律賓"];
pub const SOUTHEAST_ASIA_GROUP: &str = "東南亞";
pub const OTHER_GROUP: &str = "其他";

/// Weeks in the home trend chart
pub const RECENT_TREND_WEEKS: usize = 4;

/// Market-share group of a country name
pub fn country_group(country: &str) -> &'static str {
    let country = match country.trim() {
        "中華民國" => "台灣",
        c => c,
    };
    if let Some(main) = MAIN_MARKETS.iter().copied().find(|m| *m == country) {
        main
    } else if SOUTHEAST_ASIA.iter().any(|c| *c == country) {
        SOUTHEAST_ASIA_GROUP
    } else {
        OTHER_GROUP
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareSlice {
    pub name: String,
    pub revenue: f64,
    /// Fraction of the total; `None` when the total is zero
    pub share: Option<f64>,
}

fn slices(mut totals: Vec<(String, f64)>) -> Vec<ShareSlice> {
    totals.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    let total: f64 = totals.iter().map(|(_, v)| v).sum();
    totals
        .into_iter()
        .map(|(name, revenue)| ShareSlice {
            name,
            revenue,
            share: (total > 0.0).then(|| revenue / total),
        })
        .collect()
}

fn merge(totals: &mut Vec<(String, f64)>, name: &str, value: f64) {
    let value = if value.is_finite() && value > 0.0 { value } else { 0.0 };
    match totals.iter_mut().find(|(n, _)| n == name) {
        Some((_, v)) => *v += value,
        None => totals.push((name.to_string(), value)),
    }
}

/// Country revenue folded into market-share groups, largest first
pub fn market_share(rows: &[CountryRevenue]) -> Vec<ShareSlice> {
    let mut totals = Vec::new();
    for row in rows {
        merge(&mut totals, country_group(&row.country), row.revenue);
    }
    slices(totals)
}

/// City revenue with repeated names merged, largest first
pub fn city_breakdown(rows: &[CityRevenue]) -> Vec<ShareSlice> {
    let mut totals = Vec::new();
    for row in rows.iter().filter(|r| !r.name.trim().is_empty()) {
        merge(&mut totals, row.name.trim(), row.value);
    }
    slices(totals)
}

/// Options of the country filter: "all" first, then the share groups
pub fn country_options(share: &[ShareSlice]) -> Vec<String> {
    std::iter::once(ALL_COUNTRIES.to_string())
        .chain(share.iter().map(|s| s.name.clone()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendBar {
    pub year: i32,
    pub week: u32,
    pub short_label: String,
    pub full_label: String,
    pub revenue: f64,
    pub growth_rate: Option<f64>,
}

/// The last `count` weeks in chronological order, each with growth against
/// the week before it in the list
pub fn recent_trend(weeks: &[TrendWeek], count: usize) -> Vec<TrendBar> {
    let mut ordered: Vec<&TrendWeek> = weeks.iter().collect();
    ordered.sort_by_key(|w| (w.year, w.week));
    ordered.dedup_by_key(|w| (w.year, w.week));
    let recent = &ordered[ordered.len().saturating_sub(count)..];

    let totals: Vec<f64> = recent.iter().map(|w| w.revenue).collect();
    recent
        .iter()
        .zip(with_growth(&totals))
        .map(|(w, growth_rate)| {
            let resolved = WeekDateResolver::resolve(w.year, i64::from(w.week));
            TrendBar {
                year: w.year,
                week: w.week,
                short_label: resolved.short_label().to_string(),
                full_label: resolved.full_label().to_string(),
                revenue: w.revenue,
                growth_rate,
            }
        })
        .collect()
}

/// Figure the list is ordered by; zero means "not reported"
pub fn sort_value(movie: &Movie, sort: MovieSort) -> Option<f64> {
    let value = match sort {
        MovieSort::WeeklyRevenue => movie.weekly_revenue,
        MovieSort::CumulativeRevenue => movie.cumulative_revenue,
    };
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Movies matching the query's country group, ordered by the chosen column
/// (descending, unreported last, ties keep the service order)
pub fn movie_list(movies: &[Movie], query: &MovieListQuery) -> Vec<Movie> {
    let mut rows: Vec<Movie> = movies
        .iter()
        .filter(|m| match query.country.as_deref() {
            None => true,
            Some(group) => m
                .country
                .as_deref()
                .map(|c| country_group(c) == group)
                .unwrap_or(group == OTHER_GROUP),
        })
        .cloned()
        .collect();

    rows.sort_by(|a, b| {
        match (sort_value(a, query.sort_by), sort_value(b, query.sort_by)) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::analytics::pagination::PageCursor;
    use serde_json::json;

    fn movie(id: i64, country: Option<&str>, weekly: f64, cumulative: f64) -> Movie {
        serde_json::from_value(json!({
            "id": id,
            "name": format!("m{}", id),
            "country": country,
            "weekly_revenue": weekly,
            "cumulative_revenue": cumulative
        }))
        .unwrap()
    }

    fn country(name: &str, revenue: f64) -> CountryRevenue {
        CountryRevenue {
            country: name.to_string(),
            revenue,
        }
    }

    #[test]
    fn test_country_group() {
        assert_eq!(country_group("中華民國"), "台灣");
        assert_eq!(country_group("美國"), "美國");
        assert_eq!(country_group("泰國"), SOUTHEAST_ASIA_GROUP);
        assert_eq!(country_group("挪威"), OTHER_GROUP);
    }

    #[test]
    fn test_market_share_groups_and_shares() {
        let share = market_share(&[
            country("美國", 600.0),
            country("泰國", 100.0),
            country("越南", 100.0),
            country("中華民國", 150.0),
            country("台灣", 50.0),
            country("法國", 0.0),
        ]);
        let names: Vec<&str> = share.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["美國", "台灣", "東南亞", "其他"]);
        assert_eq!(share[0].share, Some(0.6));
        assert_eq!(share[1].revenue, 200.0);
        assert_eq!(share[3].share, Some(0.0));
    }

    #[test]
    fn test_zero_market_has_no_share() {
        let share = market_share(&[country("美國", 0.0)]);
        assert_eq!(share[0].share, None);
        assert!(market_share(&[]).is_empty());
    }

    #[test]
    fn test_city_breakdown_merges_names() {
        let rows = vec![
            CityRevenue { name: "台北".into(), value: 30.0 },
            CityRevenue { name: "台中".into(), value: 50.0 },
            CityRevenue { name: "台北 ".into(), value: 30.0 },
            CityRevenue { name: "".into(), value: 99.0 },
        ];
        let cities = city_breakdown(&rows);
        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].name, "台北");
        assert_eq!(cities[0].revenue, 60.0);
    }

    #[test]
    fn test_country_options() {
        let options = country_options(&market_share(&[country("日本", 1.0)]));
        assert_eq!(options, vec![ALL_COUNTRIES.to_string(), "日本".to_string()]);
    }

    #[test]
    fn test_recent_trend_orders_and_computes_growth() {
        let weeks: Vec<TrendWeek> = serde_json::from_value(json!([
            {"year": 2025, "week": 2, "revenue": 150.0},
            {"year": 2024, "week": 51, "revenue": 80.0},
            {"year": 2025, "week": 1, "revenue": 100.0},
            {"year": 2024, "week": 52, "revenue": 0.0},
            {"year": 2024, "week": 50, "revenue": 90.0}
        ]))
        .unwrap();
        let bars = recent_trend(&weeks, RECENT_TREND_WEEKS);
        let keys: Vec<(i32, u32)> = bars.iter().map(|b| (b.year, b.week)).collect();
        assert_eq!(keys, vec![(2024, 51), (2024, 52), (2025, 1), (2025, 2)]);
        assert_eq!(bars[0].growth_rate, None);
        assert_eq!(bars[1].growth_rate, Some(-1.0));
        // No base after a zero week
        assert_eq!(bars[2].growth_rate, None);
        assert_eq!(bars[3].growth_rate, Some(0.5));
        assert_eq!(bars[3].short_label, "1/12");
    }

    #[test]
    fn test_movie_list_filter_and_sort() {
        let movies = vec![
            movie(1, Some("美國"), 100.0, 900.0),
            movie(2, Some("泰國"), 300.0, 300.0),
            movie(3, Some("中華民國"), 0.0, 1000.0),
            movie(4, None, 200.0, 0.0),
            movie(5, Some("越南"), 300.0, 50.0),
        ];

        let weekly = movie_list(&movies, &MovieListQuery::new("", MovieSort::WeeklyRevenue, ALL_COUNTRIES));
        let ids: Vec<i64> = weekly.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 5, 4, 1, 3]);

        let cumulative = movie_list(&movies, &MovieListQuery::new("", MovieSort::CumulativeRevenue, ""));
        let ids: Vec<i64> = cumulative.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 1, 2, 5, 4]);

        let sea = movie_list(&movies, &MovieListQuery::new("", MovieSort::WeeklyRevenue, "東南亞"));
        assert_eq!(sea.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2, 5]);

        let taiwan = movie_list(&movies, &MovieListQuery::new("", MovieSort::WeeklyRevenue, "台灣"));
        assert_eq!(taiwan.len(), 1);

        let other = movie_list(&movies, &MovieListQuery::new("", MovieSort::WeeklyRevenue, "其他"));
        assert_eq!(other.iter().map(|m| m.id).collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn test_movie_list_pages_reset_on_new_query() {
        let movies: Vec<Movie> = (1..=40).map(|i| movie(i, Some("美國"), i as f64, 0.0)).collect();
        let weekly = MovieListQuery::new("", MovieSort::WeeklyRevenue, ALL_COUNTRIES);
        let rows = movie_list(&movies, &weekly);

        let mut cursor = PageCursor::new(15).unwrap();
        cursor.sync(&weekly, rows.len());
        cursor.go_to(3).unwrap();
        let page = cursor.slice(&rows);
        assert_eq!(page.len(), 10);
        assert_eq!(page[0].id, 10);

        let japan = MovieListQuery::new("", MovieSort::WeeklyRevenue, "日本");
        let rows = movie_list(&movies, &japan);
        cursor.sync(&japan, rows.len());
        assert_eq!(cursor.page(), 1);
        assert!(cursor.slice(&rows).is_empty());
    }
}
