use crate::domain::a001_movie::{MovieSeries, WeeklyRecord};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Request for `GET /movie-trajectory?movie_ids=1,2,3`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrajectoryRequest {
    pub movie_ids: Vec<i64>,
}

impl TrajectoryRequest {
    /// Comma separated ids as the service expects them
    pub fn movie_ids_param(&self) -> String {
        self.movie_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// One week of a movie's run, numbered from its first reported week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub week_num: u32,
    pub revenue: f64,
    #[serde(default)]
    pub cumulative: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub theater_count: u32,
    #[serde(default)]
    pub tickets: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieTrajectory {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub data: Vec<TrajectoryPoint>,
}

impl From<MovieTrajectory> for MovieSeries {
    fn from(t: MovieTrajectory) -> Self {
        let mut data = t.data;
        data.sort_by_key(|p| p.week_num);
        let records = data
            .into_iter()
            .map(|p| {
                let iso = p.date.iso_week();
                WeeklyRecord {
                    cumulative_revenue: p.cumulative,
                    theater_count: p.theater_count,
                    tickets_weekly: p.tickets,
                    ..WeeklyRecord::new(iso.year(), iso.week(), p.revenue)
                }
            })
            .collect();
        MovieSeries::new(t.id, t.name, records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_movie_ids_param() {
        let req = TrajectoryRequest {
            movie_ids: vec![3, 14, 15],
        };
        assert_eq!(req.movie_ids_param(), "3,14,15");
    }

    #[test]
    fn test_trajectory_into_series_orders_by_week_num() {
        let raw = json!({
            "id": 5,
            "name": "Wicked",
            "data": [
                {"week_num": 2, "revenue": 80.0, "cumulative": 180.0, "date": "2024-12-01"},
                {"week_num": 1, "revenue": 100.0, "cumulative": 100.0, "date": "2024-11-24",
                 "theater_count": 120, "tickets": 3500}
            ]
        });
        let trajectory: MovieTrajectory = serde_json::from_value(raw).unwrap();
        let series = MovieSeries::from(trajectory);
        assert_eq!(series.records.len(), 2);
        assert_eq!(series.records[0].weekly_revenue, 100.0);
        assert_eq!(series.records[0].week, 47);
        assert_eq!(series.records[1].week, 48);
        assert_eq!(series.records[1].cumulative_revenue, 180.0);
        assert_eq!(series.records[0].theater_count, 120);
        assert_eq!(series.records[0].tickets_weekly, Some(3500.0));
        assert_eq!(series.records[1].tickets_weekly, None);
    }
}
