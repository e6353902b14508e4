//! Flat records for the external chart renderer.
//!
//! The renderer takes `[{ week: 1, "12": 100.0, "15": 80.0 }, ...]` plus a list
//! of series (data key, legend name, colour). Series keys are ids rendered as
//! strings so two movies with the same title never collide.

use super::trajectory::AlignedPoint;
use super::week_date::WeekDateResolver;
use crate::domain::a001_movie::MovieSeries;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

pub const SERIES_COLORS: [&str; 6] = [
    "#8b5cf6", "#10b981", "#f59e0b", "#ec4899", "#3b82f6", "#6366f1",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesLabel {
    pub id: i64,
    pub key: String,
    pub name: String,
    pub color: String,
}

pub fn series_key(id: i64) -> String {
    id.to_string()
}

pub fn series_labels(series: &[MovieSeries]) -> Vec<SeriesLabel> {
    series
        .iter()
        .enumerate()
        .map(|(idx, s)| SeriesLabel {
            id: s.id,
            key: series_key(s.id),
            name: s.name.clone(),
            color: SERIES_COLORS[idx % SERIES_COLORS.len()].to_string(),
        })
        .collect()
}

/// One JSON object per point; series without a value are left out of the object
pub fn chart_records(points: &[AlignedPoint], axis_field: &str) -> Vec<Map<String, Value>> {
    points
        .iter()
        .map(|point| {
            let mut record = Map::new();
            record.insert(axis_field.to_string(), Value::from(point.axis_key));
            for (id, value) in &point.values {
                if let Some(num) = Number::from_f64(*value) {
                    record.insert(series_key(*id), Value::Number(num));
                }
            }
            record
        })
        .collect()
}

/// Sunday labels ("M/D") for calendar-week points of `year`
pub fn week_axis_labels(year: i32, points: &[AlignedPoint]) -> Vec<String> {
    points
        .iter()
        .map(|p| {
            WeekDateResolver::resolve(year, i64::from(p.axis_key))
                .short_label()
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_movie::WeeklyRecord;
    use crate::shared::analytics::trajectory::{align, AlignMode};
    use serde_json::json;

    fn series() -> Vec<MovieSeries> {
        vec![
            MovieSeries::new(
                12,
                "Dune",
                vec![WeeklyRecord::new(2024, 9, 100.0), WeeklyRecord::new(2024, 10, 80.0)],
            ),
            MovieSeries::new(15, "Dune", vec![WeeklyRecord::new(2024, 20, 50.0)]),
        ]
    }

    #[test]
    fn test_chart_records_skip_absent_values() {
        let points = align(&series(), AlignMode::Relative);
        let records = chart_records(&points, "week");
        assert_eq!(
            Value::Array(records.into_iter().map(Value::Object).collect()),
            json!([
                {"week": 1, "12": 100.0, "15": 50.0},
                {"week": 2, "12": 80.0}
            ])
        );
    }

    #[test]
    fn test_series_labels_use_unique_keys() {
        let labels = series_labels(&series());
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].key, "12");
        assert_eq!(labels[1].key, "15");
        assert_eq!(labels[0].name, labels[1].name);
        assert_ne!(labels[0].color, labels[1].color);
    }

    #[test]
    fn test_week_axis_labels() {
        let points = align(&series(), AlignMode::Absolute);
        let labels = week_axis_labels(2024, &points);
        assert_eq!(labels.len(), 53);
        assert_eq!(labels[0], "1/7");
        assert_eq!(labels[1], "1/14");
    }
}
