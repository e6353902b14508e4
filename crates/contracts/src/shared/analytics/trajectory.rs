//! Merging several weekly series into one table keyed by a shared x-axis.

use super::cumulative::accumulate;
use crate::domain::a001_movie::MovieSeries;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Absolute mode always produces this many points
pub const WEEKS_PER_YEAR: u32 = 53;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignMode {
    /// x = calendar week number (1..=53)
    #[default]
    Absolute,
    /// x = week since the series' own first record (1..=len)
    Relative,
}

/// Which figure the aligned table carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesView {
    #[default]
    Weekly,
    Cumulative,
}

/// One x-axis position with the value of every series that has data there.
/// Series without data are absent from `values`, not zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPoint {
    pub axis_key: u32,
    pub values: BTreeMap<i64, f64>,
}

impl AlignedPoint {
    fn new(axis_key: u32) -> Self {
        Self {
            axis_key,
            values: BTreeMap::new(),
        }
    }
}

/// Weekly revenue aligned on the chosen axis.
///
/// Empty input gives an empty table. Otherwise absolute mode yields exactly 53
/// points and relative mode yields as many as the longest series has records.
/// Absolute mode only sees each series' calendar run (see [`calendar_run`]).
pub fn align(series: &[MovieSeries], mode: AlignMode) -> Vec<AlignedPoint> {
    if series.is_empty() {
        return Vec::new();
    }

    match mode {
        AlignMode::Absolute => {
            let runs: Vec<MovieSeries> = series.iter().map(calendar_run).collect();
            (1..=WEEKS_PER_YEAR)
                .map(|week| {
                    let mut point = AlignedPoint::new(week);
                    for run in &runs {
                        if let Some(rec) = run.records.iter().find(|r| r.normalized_week() == week) {
                            point.values.insert(run.id, rec.weekly_revenue);
                        }
                    }
                    point
                })
                .collect()
        }
        AlignMode::Relative => (0..relative_len(series))
            .map(|idx| {
                let mut point = AlignedPoint::new(idx as u32 + 1);
                for s in series {
                    if let Some(rec) = s.records.get(idx) {
                        point.values.insert(s.id, rec.weekly_revenue);
                    }
                }
                point
            })
            .collect(),
    }
}

/// Running totals aligned on the chosen axis.
///
/// Each series only covers the span it actually ran: in absolute mode from the
/// first to the last week of its calendar run, in relative mode up to its
/// record count. Weeks without a record inside that span carry the previous
/// total.
pub fn align_cumulative(series: &[MovieSeries], mode: AlignMode) -> Vec<AlignedPoint> {
    if series.is_empty() {
        return Vec::new();
    }

    match mode {
        AlignMode::Absolute => {
            let accumulated: Vec<_> = series.iter().map(|s| accumulate(&calendar_run(s))).collect();
            (1..=WEEKS_PER_YEAR)
                .map(|week| {
                    let mut point = AlignedPoint::new(week);
                    for acc in &accumulated {
                        let (Some(first), Some(last)) = (acc.points.first(), acc.points.last()) else {
                            continue;
                        };
                        if week < first.week || week > last.week {
                            continue;
                        }
                        let total = acc
                            .points
                            .iter()
                            .take_while(|p| p.week <= week)
                            .last()
                            .map(|p| p.cumulative_revenue)
                            .unwrap_or(0.0);
                        point.values.insert(acc.id, total);
                    }
                    point
                })
                .collect()
        }
        AlignMode::Relative => {
            let accumulated: Vec<_> = series.iter().map(accumulate).collect();
            (0..relative_len(series))
                .map(|idx| {
                    let mut point = AlignedPoint::new(idx as u32 + 1);
                    for acc in &accumulated {
                        if let Some(p) = acc.points.get(idx) {
                            point.values.insert(acc.id, p.cumulative_revenue);
                        }
                    }
                    point
                })
                .collect()
        }
    }
}

/// The part of a series that fits on one calendar-week axis.
///
/// Records are taken in order until the year changes or a week number stops
/// increasing, so a run crossing into the next year ends at the rollover.
/// A repeated week keeps its first record.
pub fn calendar_run(series: &MovieSeries) -> MovieSeries {
    let mut records = Vec::with_capacity(series.records.len());
    let mut last_week = 0;
    let first_year = series.records.first().map(|r| r.year);

    for rec in &series.records {
        if Some(rec.year) != first_year {
            break;
        }
        let week = rec.normalized_week();
        if week == last_week {
            continue;
        }
        if week < last_week {
            break;
        }
        last_week = week;
        records.push(rec.clone());
    }

    MovieSeries::new(series.id, series.name.clone(), records)
}

pub fn align_view(series: &[MovieSeries], mode: AlignMode, view: SeriesView) -> Vec<AlignedPoint> {
    match view {
        SeriesView::Weekly => align(series, mode),
        SeriesView::Cumulative => align_cumulative(series, mode),
    }
}

/// Figures of one series in one relative week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekCell {
    pub weekly_revenue: f64,
    pub cumulative_revenue: f64,
    pub theater_count: u32,
    pub tickets: Option<f64>,
}

/// One "week N since release" row of the comparison table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeWeekRow {
    pub axis_key: u32,
    pub cells: BTreeMap<i64, WeekCell>,
}

/// Per-week detail (revenue, running total, theaters, tickets) on the
/// relative axis. Same length and sparsity as relative [`align`].
pub fn relative_weeks(series: &[MovieSeries]) -> Vec<RelativeWeekRow> {
    let accumulated: Vec<_> = series.iter().map(accumulate).collect();
    (0..relative_len(series))
        .map(|idx| {
            let cells = series
                .iter()
                .zip(&accumulated)
                .filter_map(|(s, acc)| {
                    let rec = s.records.get(idx)?;
                    let point = acc.points.get(idx)?;
                    Some((
                        s.id,
                        WeekCell {
                            weekly_revenue: point.weekly_revenue,
                            cumulative_revenue: point.cumulative_revenue,
                            theater_count: rec.theater_count,
                            tickets: rec.tickets_weekly,
                        },
                    ))
                })
                .collect();
            RelativeWeekRow {
                axis_key: idx as u32 + 1,
                cells,
            }
        })
        .collect()
}

fn relative_len(series: &[MovieSeries]) -> usize {
    series.iter().map(|s| s.records.len()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_movie::WeeklyRecord;

    fn movie(id: i64, first_week: u32, weekly: &[f64]) -> MovieSeries {
        let records = weekly
            .iter()
            .enumerate()
            .map(|(i, w)| WeeklyRecord::new(2024, first_week + i as u32, *w))
            .collect();
        MovieSeries::new(id, format!("movie-{}", id), records)
    }

    #[test]
    fn test_empty_input() {
        assert!(align(&[], AlignMode::Absolute).is_empty());
        assert!(align(&[], AlignMode::Relative).is_empty());
        assert!(align_cumulative(&[], AlignMode::Absolute).is_empty());
        assert!(align_cumulative(&[], AlignMode::Relative).is_empty());
    }

    #[test]
    fn test_absolute_always_53_points() {
        let cases = vec![
            vec![movie(1, 1, &[])],
            vec![movie(1, 5, &[1.0, 2.0])],
            vec![movie(1, 1, &[1.0; 53]), movie(2, 40, &[3.0; 10])],
        ];
        for series in cases {
            let points = align(&series, AlignMode::Absolute);
            assert_eq!(points.len(), 53);
            let keys: Vec<u32> = points.iter().map(|p| p.axis_key).collect();
            assert_eq!(keys, (1..=53).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_absolute_gaps_are_absent() {
        let points = align(&[movie(7, 10, &[100.0, 50.0])], AlignMode::Absolute);
        assert!(points[8].values.is_empty());
        assert_eq!(points[9].values.get(&7), Some(&100.0));
        assert_eq!(points[10].values.get(&7), Some(&50.0));
        assert!(points[11].values.is_empty());
    }

    #[test]
    fn test_relative_three_movies() {
        let series = vec![
            movie(1, 10, &[100.0, 80.0, 60.0]),
            movie(2, 30, &[50.0, 40.0]),
            movie(3, 1, &[]),
        ];
        let points = align(&series, AlignMode::Relative);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].values.len(), 2);
        assert_eq!(points[1].values.get(&2), Some(&40.0));
        assert_eq!(points[2].values.len(), 1);
        assert_eq!(points[2].values.get(&1), Some(&60.0));
        assert!(points.iter().all(|p| !p.values.contains_key(&3)));
    }

    #[test]
    fn test_relative_length_is_longest_series() {
        let series = vec![movie(1, 1, &[1.0; 4]), movie(2, 1, &[1.0; 9]), movie(3, 1, &[])];
        assert_eq!(align(&series, AlignMode::Relative).len(), 9);
        assert!(align(&[movie(1, 1, &[])], AlignMode::Relative).is_empty());
    }

    #[test]
    fn test_cumulative_relative_truncates_per_series() {
        let series = vec![movie(1, 10, &[100.0, 80.0, 60.0]), movie(2, 30, &[50.0, 40.0])];
        let points = align_cumulative(&series, AlignMode::Relative);
        assert_eq!(points.len(), 3);
        assert_eq!(points[1].values.get(&2), Some(&90.0));
        assert_eq!(points[2].values.get(&1), Some(&240.0));
        assert!(!points[2].values.contains_key(&2));
    }

    #[test]
    fn test_cumulative_absolute_stops_at_last_week_and_holds_gaps() {
        let mut s = movie(2024, 1, &[10.0, 20.0]);
        // Week 3 missing, week 4 present
        s.records.push(WeeklyRecord::new(2024, 4, 5.0));
        let points = align_cumulative(&[s], AlignMode::Absolute);
        assert_eq!(points.len(), 53);
        assert_eq!(points[1].values.get(&2024), Some(&30.0));
        assert_eq!(points[2].values.get(&2024), Some(&30.0));
        assert_eq!(points[3].values.get(&2024), Some(&35.0));
        assert!(points[4..].iter().all(|p| p.values.is_empty()));
    }

    #[test]
    fn test_cumulative_absolute_starts_at_first_week() {
        let points = align_cumulative(&[movie(1, 3, &[10.0])], AlignMode::Absolute);
        assert!(points[..2].iter().all(|p| p.values.is_empty()));
        assert_eq!(points[2].values.get(&1), Some(&10.0));
        assert!(points[3].values.is_empty());
    }

    #[test]
    fn test_absolute_run_ends_at_year_rollover() {
        let mut s = movie(9, 50, &[100.0, 80.0, 60.0]);
        s.records.push(WeeklyRecord::new(2025, 1, 40.0));
        s.records.push(WeeklyRecord::new(2025, 2, 20.0));
        let series = vec![s];

        let cumulative = align_cumulative(&series, AlignMode::Absolute);
        assert_eq!(cumulative.len(), 53);
        assert!(cumulative[..49].iter().all(|p| p.values.is_empty()));
        assert_eq!(cumulative[49].values.get(&9), Some(&100.0));
        assert_eq!(cumulative[50].values.get(&9), Some(&180.0));
        assert_eq!(cumulative[51].values.get(&9), Some(&240.0));
        assert!(cumulative[52].values.is_empty());

        let weekly = align(&series, AlignMode::Absolute);
        assert!(weekly[0].values.is_empty());
        assert!(weekly[1].values.is_empty());
        assert_eq!(weekly[49].values.get(&9), Some(&100.0));

        // Relative mode still follows the whole run
        let relative = align_cumulative(&series, AlignMode::Relative);
        assert_eq!(relative.len(), 5);
        assert_eq!(relative[4].values.get(&9), Some(&300.0));
    }

    #[test]
    fn test_duplicate_week_counts_once_in_both_views() {
        let s = MovieSeries::new(
            4,
            "dup",
            vec![
                WeeklyRecord::new(2024, 10, 100.0),
                WeeklyRecord::new(2024, 10, 999.0),
                WeeklyRecord::new(2024, 11, 50.0),
            ],
        );
        let series = vec![s];
        let weekly = align(&series, AlignMode::Absolute);
        let cumulative = align_cumulative(&series, AlignMode::Absolute);
        assert_eq!(weekly[9].values.get(&4), Some(&100.0));
        assert_eq!(cumulative[9].values.get(&4), Some(&100.0));
        assert_eq!(weekly[10].values.get(&4), Some(&50.0));
        assert_eq!(cumulative[10].values.get(&4), Some(&150.0));
    }

    #[test]
    fn test_calendar_run() {
        let mut s = movie(1, 51, &[1.0, 2.0]);
        s.records.push(WeeklyRecord::new(2025, 1, 3.0));
        let run = calendar_run(&s);
        assert_eq!(run.records.len(), 2);
        assert_eq!(run.id, 1);
        assert!(calendar_run(&movie(2, 1, &[])).records.is_empty());
    }

    #[test]
    fn test_align_view_dispatch() {
        let series = vec![movie(1, 10, &[100.0, 80.0])];
        assert_eq!(
            align_view(&series, AlignMode::Relative, SeriesView::Weekly),
            align(&series, AlignMode::Relative)
        );
        let cumulative = align_view(&series, AlignMode::Relative, SeriesView::Cumulative);
        assert_eq!(cumulative[1].values.get(&1), Some(&180.0));
    }

    #[test]
    fn test_relative_weeks_carry_theaters_and_tickets() {
        let mut a = movie(1, 10, &[100.0, 80.0, 60.0]);
        a.records[0].theater_count = 150;
        a.records[0].tickets_weekly = Some(4000.0);
        let b = movie(2, 30, &[50.0]);
        let rows = relative_weeks(&[a, b]);

        assert_eq!(rows.len(), 3);
        let first = &rows[0].cells[&1];
        assert_eq!(first.theater_count, 150);
        assert_eq!(first.tickets, Some(4000.0));
        assert_eq!(rows[0].cells[&2].tickets, None);
        assert_eq!(rows[2].cells[&1].cumulative_revenue, 240.0);
        assert!(!rows[1].cells.contains_key(&2));
        assert!(relative_weeks(&[]).is_empty());
    }

    #[test]
    fn test_alignment_is_idempotent() {
        let series = vec![movie(1, 10, &[1.0, 2.0]), movie(2, 11, &[3.0])];
        assert_eq!(
            align(&series, AlignMode::Relative),
            align(&series, AlignMode::Relative)
        );
        assert_eq!(
            align_cumulative(&series, AlignMode::Absolute),
            align_cumulative(&series, AlignMode::Absolute)
        );
    }
}
