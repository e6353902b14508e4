//! Whole-market weekly totals reshaped into per-year series.

use super::growth::with_growth;
use crate::dashboards::d401_market_trend::MarketStat;
use crate::domain::a001_movie::{MovieSeries, WeeklyRecord};

/// Distinct years, newest first
pub fn available_years(stats: &[MarketStat]) -> Vec<i32> {
    let mut years: Vec<i32> = stats.iter().map(|s| s.year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// The `count` most recent years
pub fn default_years(stats: &[MarketStat], count: usize) -> Vec<i32> {
    available_years(stats).into_iter().take(count).collect()
}

/// One series per requested year (series id = year), in the order given
pub fn series_by_year(stats: &[MarketStat], years: &[i32]) -> Vec<MovieSeries> {
    years
        .iter()
        .map(|&year| {
            let mut rows: Vec<&MarketStat> = stats.iter().filter(|s| s.year == year).collect();
            rows.sort_by_key(|s| s.week);

            let mut running = 0.0;
            let records = rows
                .into_iter()
                .map(|s| {
                    running += s.total_revenue;
                    WeeklyRecord {
                        cumulative_revenue: running,
                        ..WeeklyRecord::new(s.year, s.week, s.total_revenue)
                    }
                })
                .collect();
            MovieSeries::new(i64::from(year), year.to_string(), records)
        })
        .collect()
}

/// Chronological order with week-over-week growth recomputed locally
pub fn with_market_growth(mut stats: Vec<MarketStat>) -> Vec<MarketStat> {
    stats.sort_by_key(|s| s.end_date);
    let totals: Vec<f64> = stats.iter().map(|s| s.total_revenue).collect();
    for (stat, growth) in stats.iter_mut().zip(with_growth(&totals)) {
        stat.growth_rate = growth;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::analytics::week_date::WeekDateResolver;

    fn stat(year: i32, week: u32, total: f64) -> MarketStat {
        let range = WeekDateResolver::try_resolve(year, i64::from(week)).unwrap();
        MarketStat {
            year,
            week,
            start_date: range.monday,
            end_date: range.sunday,
            total_revenue: total,
            movie_count: 1,
            top_movie: "N/A".to_string(),
            growth_rate: Some(123.0),
        }
    }

    fn stats() -> Vec<MarketStat> {
        vec![
            stat(2024, 2, 20.0),
            stat(2023, 1, 5.0),
            stat(2024, 1, 10.0),
            stat(2022, 1, 1.0),
            stat(2025, 1, 0.0),
        ]
    }

    #[test]
    fn test_default_years_newest_first() {
        assert_eq!(available_years(&stats()), vec![2025, 2024, 2023, 2022]);
        assert_eq!(default_years(&stats(), 3), vec![2025, 2024, 2023]);
        assert!(default_years(&[], 3).is_empty());
    }

    #[test]
    fn test_series_by_year_sorted_with_running_total() {
        let series = series_by_year(&stats(), &[2024, 1999]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].id, 2024);
        assert_eq!(series[0].name, "2024");
        let weeks: Vec<u32> = series[0].records.iter().map(|r| r.week).collect();
        assert_eq!(weeks, vec![1, 2]);
        assert_eq!(series[0].records[1].cumulative_revenue, 30.0);
        assert!(series[1].is_empty());
    }

    #[test]
    fn test_growth_recomputed_in_date_order() {
        let ordered = with_market_growth(stats());
        let growth: Vec<Option<f64>> = ordered.iter().map(|s| s.growth_rate).collect();
        // 2022w1=1, 2023w1=5, 2024w1=10, 2024w2=20, 2025w1=0
        assert_eq!(growth, vec![None, Some(4.0), Some(1.0), Some(1.0), Some(-1.0)]);
    }
}
