//! Running totals for a single series.
//!
//! The running sum of `weekly_revenue` (and `tickets_weekly`) is the only source
//! of cumulative values in the dashboards. Upstream `cumulative_revenue` is
//! compared against it and every mismatch is reported, never patched over.

use crate::domain::a001_movie::MovieSeries;
use serde::{Deserialize, Serialize};

/// Upstream and recomputed totals closer than this are considered equal
const CUMULATIVE_TOLERANCE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    /// 1-based position within the series
    pub axis_key: u32,
    pub year: i32,
    pub week: u32,
    pub weekly_revenue: f64,
    pub cumulative_revenue: f64,
    pub cumulative_tickets: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    /// Negative weekly revenue, counted as zero in the running total
    NegativeWeekly,
    /// Upstream cumulative differs from the recomputed running total
    UpstreamMismatch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeDiscrepancy {
    pub axis_key: u32,
    pub kind: DiscrepancyKind,
    pub upstream: f64,
    pub recomputed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccumulatedSeries {
    pub id: i64,
    pub name: String,
    pub points: Vec<CumulativePoint>,
    pub discrepancies: Vec<CumulativeDiscrepancy>,
}

impl AccumulatedSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total_revenue(&self) -> f64 {
        self.points.last().map(|p| p.cumulative_revenue).unwrap_or(0.0)
    }
}

pub fn accumulate(series: &MovieSeries) -> AccumulatedSeries {
    let mut points = Vec::with_capacity(series.records.len());
    let mut discrepancies = Vec::new();
    let mut revenue = 0.0;
    let mut tickets: Option<f64> = None;

    for (idx, record) in series.records.iter().enumerate() {
        let axis_key = idx as u32 + 1;

        let weekly = if record.weekly_revenue.is_finite() && record.weekly_revenue >= 0.0 {
            record.weekly_revenue
        } else {
            discrepancies.push(CumulativeDiscrepancy {
                axis_key,
                kind: DiscrepancyKind::NegativeWeekly,
                upstream: record.weekly_revenue,
                recomputed: 0.0,
            });
            0.0
        };
        revenue += weekly;

        if let Some(t) = record.tickets_weekly.filter(|t| t.is_finite() && *t >= 0.0) {
            tickets = Some(tickets.unwrap_or(0.0) + t);
        }

        // Zero upstream means "not reported", not a mismatch
        if record.cumulative_revenue != 0.0
            && (record.cumulative_revenue - revenue).abs() > CUMULATIVE_TOLERANCE
        {
            discrepancies.push(CumulativeDiscrepancy {
                axis_key,
                kind: DiscrepancyKind::UpstreamMismatch,
                upstream: record.cumulative_revenue,
                recomputed: revenue,
            });
        }

        points.push(CumulativePoint {
            axis_key,
            year: record.year,
            week: record.normalized_week(),
            weekly_revenue: weekly,
            cumulative_revenue: revenue,
            cumulative_tickets: tickets,
        });
    }

    if !discrepancies.is_empty() {
        log::warn!(
            "Series {} ({}): {} cumulative discrepancies against upstream",
            series.id,
            series.name,
            discrepancies.len()
        );
    }

    AccumulatedSeries {
        id: series.id,
        name: series.name.clone(),
        points,
        discrepancies,
    }
}

/// Headline figures for the movie detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRunSummary {
    pub total_revenue: f64,
    pub total_tickets: Option<f64>,
    pub weeks_in_release: usize,
    /// Position (1-based) of the best week
    pub peak_week: Option<u32>,
    pub peak_revenue: f64,
    /// Last reported week still earned something
    pub has_recent_revenue: bool,
}

pub fn run_summary(accumulated: &AccumulatedSeries) -> MovieRunSummary {
    let peak = accumulated
        .points
        .iter()
        .fold(None::<&CumulativePoint>, |best, p| match best {
            Some(b) if b.weekly_revenue >= p.weekly_revenue => Some(b),
            _ => Some(p),
        });

    MovieRunSummary {
        total_revenue: accumulated.total_revenue(),
        total_tickets: accumulated.points.last().and_then(|p| p.cumulative_tickets),
        weeks_in_release: accumulated.points.len(),
        peak_week: peak.map(|p| p.axis_key),
        peak_revenue: peak.map(|p| p.weekly_revenue).unwrap_or(0.0),
        has_recent_revenue: accumulated
            .points
            .last()
            .map(|p| p.weekly_revenue > 0.0)
            .unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_movie::WeeklyRecord;

    fn series(weekly: &[f64]) -> MovieSeries {
        let records = weekly
            .iter()
            .enumerate()
            .map(|(i, w)| WeeklyRecord::new(2024, i as u32 + 10, *w))
            .collect();
        MovieSeries::new(1, "Test", records)
    }

    #[test]
    fn test_running_sum() {
        let acc = accumulate(&series(&[100.0, 80.0, 60.0]));
        let totals: Vec<f64> = acc.points.iter().map(|p| p.cumulative_revenue).collect();
        assert_eq!(totals, vec![100.0, 180.0, 240.0]);
        assert_eq!(acc.points[2].axis_key, 3);
        assert_eq!(acc.points[2].week, 12);
        assert!(acc.discrepancies.is_empty());
        assert_eq!(acc.total_revenue(), 240.0);
    }

    #[test]
    fn test_non_decreasing_for_any_input() {
        let inputs: [&[f64]; 4] = [
            &[5.0, -3.0, 2.0],
            &[0.0, 0.0],
            &[f64::NAN, 1.0, f64::NEG_INFINITY],
            &[1e9, 1.0, 1e-3],
        ];
        for weekly in inputs {
            let acc = accumulate(&series(weekly));
            assert!(acc
                .points
                .windows(2)
                .all(|w| w[1].cumulative_revenue >= w[0].cumulative_revenue));
        }
    }

    #[test]
    fn test_negative_weekly_is_reported() {
        let acc = accumulate(&series(&[5.0, -3.0]));
        assert_eq!(acc.points[1].cumulative_revenue, 5.0);
        assert_eq!(acc.discrepancies.len(), 1);
        assert_eq!(acc.discrepancies[0].kind, DiscrepancyKind::NegativeWeekly);
        assert_eq!(acc.discrepancies[0].axis_key, 2);
    }

    #[test]
    fn test_upstream_mismatch_is_surfaced_not_used() {
        let mut s = series(&[100.0, 50.0]);
        s.records[0].cumulative_revenue = 100.0;
        // Upstream went backwards
        s.records[1].cumulative_revenue = 90.0;
        let acc = accumulate(&s);
        assert_eq!(acc.points[1].cumulative_revenue, 150.0);
        assert_eq!(acc.discrepancies.len(), 1);
        assert_eq!(acc.discrepancies[0].kind, DiscrepancyKind::UpstreamMismatch);
        assert_eq!(acc.discrepancies[0].upstream, 90.0);
        assert_eq!(acc.discrepancies[0].recomputed, 150.0);
    }

    #[test]
    fn test_tickets_start_at_first_reported_week() {
        let mut s = series(&[1.0, 1.0, 1.0]);
        s.records[1].tickets_weekly = Some(10.0);
        s.records[2].tickets_weekly = Some(5.0);
        let acc = accumulate(&s);
        let tickets: Vec<Option<f64>> = acc.points.iter().map(|p| p.cumulative_tickets).collect();
        assert_eq!(tickets, vec![None, Some(10.0), Some(15.0)]);
    }

    #[test]
    fn test_empty_series() {
        let acc = accumulate(&series(&[]));
        assert!(acc.is_empty());
        let summary = run_summary(&acc);
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.peak_week, None);
        assert!(!summary.has_recent_revenue);
    }

    #[test]
    fn test_run_summary() {
        let summary = run_summary(&accumulate(&series(&[40.0, 90.0, 90.0, 0.0])));
        assert_eq!(summary.total_revenue, 220.0);
        assert_eq!(summary.weeks_in_release, 4);
        // First of equal peaks wins
        assert_eq!(summary.peak_week, Some(2));
        assert_eq!(summary.peak_revenue, 90.0);
        assert!(!summary.has_recent_revenue);
    }
}
