use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Movie as returned by the reporting service search/list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub distributor: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub cumulative_revenue: f64,
    #[serde(default)]
    pub weekly_revenue: f64,
    #[serde(default)]
    pub theater_count: u32,
    /// Tickets of the reported week, when the source publishes them
    #[serde(default)]
    pub tickets: Option<f64>,
    #[serde(default)]
    pub is_active: bool,
}

/// Paged movie list (`GET /movies?search=...&limit=...`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieListResponse {
    #[serde(default)]
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub limit: usize,
    #[serde(default)]
    pub total_pages: usize,
}

/// Query parameters for the movie search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSearchRequest {
    pub search: String,
    pub limit: usize,
}

/// One week of box-office figures for a single movie.
///
/// Within one movie the records are ordered chronologically. `cumulative_revenue`
/// is whatever the upstream reported; the analytics layer recomputes running
/// totals from `weekly_revenue` and only uses this field for discrepancy reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyRecord {
    pub year: i32,
    pub week: u32,
    pub weekly_revenue: f64,
    #[serde(default)]
    pub cumulative_revenue: f64,
    #[serde(default)]
    pub theater_count: u32,
    #[serde(default)]
    pub tickets_weekly: Option<f64>,
    #[serde(default)]
    pub tickets_cumulative: Option<f64>,
}

impl WeeklyRecord {
    pub fn new(year: i32, week: u32, weekly_revenue: f64) -> Self {
        Self {
            year,
            week,
            weekly_revenue,
            cumulative_revenue: 0.0,
            theater_count: 0,
            tickets_weekly: None,
            tickets_cumulative: None,
        }
    }

    /// Week number with the upstream "week 0" quirk folded into week 1
    pub fn normalized_week(&self) -> u32 {
        self.week.max(1)
    }
}

/// Ordered weekly records of one movie (or of any other series, e.g. a market year)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSeries {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub records: Vec<WeeklyRecord>,
}

impl MovieSeries {
    pub fn new(id: i64, name: impl Into<String>, records: Vec<WeeklyRecord>) -> Self {
        Self {
            id,
            name: name.into(),
            records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Metadata block of the movie detail response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieMetadata {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub distributor: Option<String>,
}

impl MovieMetadata {
    /// Country as shown to users; the registry name of Taiwan is shortened
    pub fn display_country(&self) -> &str {
        match self.country.as_deref() {
            Some("中華民國") => "台灣",
            Some(c) if !c.is_empty() => c,
            _ => "N/A",
        }
    }
}

/// One row of `box_office_history` in the movie detail response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxOfficeHistoryRecord {
    pub report_date_start: NaiveDate,
    pub report_date_end: NaiveDate,
    pub weekly_revenue: f64,
    #[serde(default)]
    pub cumulative_revenue: f64,
    #[serde(default)]
    pub theater_count: u32,
    #[serde(default)]
    pub weekly_tickets: Option<f64>,
    #[serde(default)]
    pub cumulative_tickets: Option<f64>,
}

impl BoxOfficeHistoryRecord {
    /// ISO year/week are taken from the report end date (the Sunday)
    pub fn to_weekly_record(&self) -> WeeklyRecord {
        let iso = self.report_date_end.iso_week();
        WeeklyRecord {
            year: iso.year(),
            week: iso.week(),
            weekly_revenue: self.weekly_revenue,
            cumulative_revenue: self.cumulative_revenue,
            theater_count: self.theater_count,
            tickets_weekly: self.weekly_tickets,
            tickets_cumulative: self.cumulative_tickets,
        }
    }
}

/// Response of `GET /movies/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub metadata: MovieMetadata,
    #[serde(default)]
    pub box_office_history: Vec<BoxOfficeHistoryRecord>,
}

impl MovieDetail {
    pub fn to_series(&self) -> MovieSeries {
        MovieSeries::new(
            self.metadata.id,
            self.metadata.name.clone(),
            self.box_office_history
                .iter()
                .map(BoxOfficeHistoryRecord::to_weekly_record)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_movie_list_tolerates_missing_fields() {
        let raw = json!({
            "movies": [{"id": 7, "name": "Dune", "release_date": "2024-02-28"}],
            "total": 1
        });
        let parsed: MovieListResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.movies.len(), 1);
        assert_eq!(parsed.movies[0].release_date, NaiveDate::from_ymd_opt(2024, 2, 28));
        assert_eq!(parsed.movies[0].theater_count, 0);
        assert_eq!(parsed.movies[0].tickets, None);
    }

    #[test]
    fn test_history_record_uses_iso_week_of_end_date() {
        let rec = BoxOfficeHistoryRecord {
            report_date_start: NaiveDate::from_ymd_opt(2024, 12, 30).unwrap(),
            report_date_end: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            weekly_revenue: 10.0,
            cumulative_revenue: 10.0,
            theater_count: 3,
            weekly_tickets: Some(2.0),
            cumulative_tickets: None,
        };
        let weekly = rec.to_weekly_record();
        assert_eq!(weekly.year, 2025);
        assert_eq!(weekly.week, 1);
        assert_eq!(weekly.tickets_weekly, Some(2.0));
    }

    #[test]
    fn test_display_country() {
        let mut meta = MovieMetadata {
            id: 1,
            name: "x".into(),
            release_date: None,
            country: Some("中華民國".into()),
            distributor: None,
        };
        assert_eq!(meta.display_country(), "台灣");
        meta.country = Some("美國".into());
        assert_eq!(meta.display_country(), "美國");
        meta.country = None;
        assert_eq!(meta.display_country(), "N/A");
    }
}
