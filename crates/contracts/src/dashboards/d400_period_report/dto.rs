use crate::shared::analytics::error::AnalyticsError;
use crate::shared::analytics::growth::growth_rate;
use crate::shared::analytics::week_date::WeekDateResolver;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Granularity of a period report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    Week,
    Month,
    Year,
    AllTime,
}

impl PeriodType {
    pub fn all() -> [PeriodType; 4] {
        [
            PeriodType::Week,
            PeriodType::Month,
            PeriodType::Year,
            PeriodType::AllTime,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Week => "week",
            PeriodType::Month => "month",
            PeriodType::Year => "year",
            PeriodType::AllTime => "all_time",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|p| p.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PeriodType::Week => "週報",
            PeriodType::Month => "月報",
            PeriodType::Year => "年報",
            PeriodType::AllTime => "歷年累計",
        }
    }
}

/// Query of `GET /period-stats?type=month&year=2024&number=5`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodReportRequest {
    #[serde(rename = "type")]
    pub period_type: PeriodType,
    pub year: i32,
    /// Week (1..=53) or month (1..=12); unused for year and all-time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

impl PeriodReportRequest {
    pub fn week(year: i32, week: u32) -> Self {
        Self {
            period_type: PeriodType::Week,
            year,
            number: Some(week),
        }
    }

    pub fn month(year: i32, month: u32) -> Self {
        Self {
            period_type: PeriodType::Month,
            year,
            number: Some(month),
        }
    }

    pub fn year(year: i32) -> Self {
        Self {
            period_type: PeriodType::Year,
            year,
            number: None,
        }
    }

    pub fn all_time(year: i32) -> Self {
        Self {
            period_type: PeriodType::AllTime,
            year,
            number: None,
        }
    }

    pub fn validate(&self) -> Result<(), AnalyticsError> {
        match self.period_type {
            PeriodType::Week => {
                let week = self
                    .number
                    .ok_or(AnalyticsError::MissingPeriodNumber("week"))?;
                if !(1..=53).contains(&week) {
                    return Err(AnalyticsError::InvalidWeek(i64::from(week)));
                }
            }
            PeriodType::Month => {
                let month = self
                    .number
                    .ok_or(AnalyticsError::MissingPeriodNumber("month"))?;
                if !(1..=12).contains(&month) {
                    return Err(AnalyticsError::InvalidMonth(i64::from(month)));
                }
            }
            PeriodType::Year | PeriodType::AllTime => {}
        }
        Ok(())
    }

    /// Immediately preceding period of the same granularity
    pub fn previous(&self) -> Option<Self> {
        self.validate().ok()?;
        match (self.period_type, self.number) {
            (PeriodType::Week, Some(1)) => {
                let year = self.year - 1;
                Some(Self::week(year, WeekDateResolver::weeks_in_year(year)))
            }
            (PeriodType::Week, Some(w)) => Some(Self::week(self.year, w - 1)),
            (PeriodType::Month, Some(1)) => Some(Self::month(self.year - 1, 12)),
            (PeriodType::Month, Some(m)) => Some(Self::month(self.year, m - 1)),
            (PeriodType::Year, _) => Some(Self::year(self.year - 1)),
            _ => None,
        }
    }

    /// First and last day covered; `None` for all-time or invalid input
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.validate().ok()?;
        match (self.period_type, self.number) {
            (PeriodType::Week, Some(w)) => WeekDateResolver::try_resolve(self.year, i64::from(w))
                .ok()
                .map(|r| (r.monday, r.sunday)),
            (PeriodType::Month, Some(m)) => {
                let first = NaiveDate::from_ymd_opt(self.year, m, 1)?;
                let next = if m == 12 {
                    NaiveDate::from_ymd_opt(self.year + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(self.year, m + 1, 1)?
                };
                Some((first, next.pred_opt()?))
            }
            (PeriodType::Year, _) => Some((
                NaiveDate::from_ymd_opt(self.year, 1, 1)?,
                NaiveDate::from_ymd_opt(self.year, 12, 31)?,
            )),
            _ => None,
        }
    }

    pub fn label(&self) -> String {
        match (self.period_type, self.number) {
            (PeriodType::Week, Some(w)) => format!("{} 第{}週", self.year, w),
            (PeriodType::Month, Some(m)) => format!("{}年{}月", self.year, m),
            (PeriodType::Year, _) => format!("{}年", self.year),
            (PeriodType::AllTime, _) => PeriodType::AllTime.label().to_string(),
            (_, None) => format!("{} {}", self.year, self.period_type.label()),
        }
    }
}

/// Summary block of a period report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_revenue: f64,
    #[serde(default)]
    pub movie_count: u32,
    /// Relative change vs. the previous period; `None` when there is no base
    #[serde(default)]
    pub growth_rate: Option<f64>,
}

impl PeriodSummary {
    pub fn from_totals(
        start_date: NaiveDate,
        end_date: NaiveDate,
        total_revenue: f64,
        movie_count: u32,
        previous_total: Option<f64>,
    ) -> Self {
        Self {
            start_date,
            end_date,
            total_revenue,
            movie_count,
            growth_rate: previous_total.and_then(|prev| growth_rate(total_revenue, prev)),
        }
    }
}

/// One row of the ranking table. Rows without `id` are aggregates and not clickable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub rank: u32,
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub tickets: Option<f64>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

impl RankingEntry {
    pub fn is_clickable(&self) -> bool {
        self.id.is_some()
    }

    /// Rank as reported by the service (ties and gaps included); `position`
    /// is only used when the service sent no rank
    pub fn display_rank(&self, position: usize) -> usize {
        if self.rank > 0 {
            self.rank as usize
        } else {
            position
        }
    }
}

/// Response of `GET /period-stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodStatsResponse {
    pub summary: PeriodSummary,
    #[serde(default)]
    pub rankings: Vec<RankingEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_request_serializes_as_query_shape() {
        let value = serde_json::to_value(PeriodReportRequest::month(2024, 5)).unwrap();
        assert_eq!(value, json!({"type": "month", "year": 2024, "number": 5}));
        let value = serde_json::to_value(PeriodReportRequest::all_time(2024)).unwrap();
        assert_eq!(value, json!({"type": "all_time", "year": 2024}));
    }

    #[test]
    fn test_validate() {
        assert!(PeriodReportRequest::week(2024, 53).validate().is_ok());
        assert_eq!(
            PeriodReportRequest::week(2024, 54).validate(),
            Err(AnalyticsError::InvalidWeek(54))
        );
        assert_eq!(
            PeriodReportRequest::month(2024, 0).validate(),
            Err(AnalyticsError::InvalidMonth(0))
        );
        let missing = PeriodReportRequest {
            period_type: PeriodType::Month,
            year: 2024,
            number: None,
        };
        assert_eq!(
            missing.validate(),
            Err(AnalyticsError::MissingPeriodNumber("month"))
        );
        assert!(PeriodReportRequest::year(2024).validate().is_ok());
    }

    #[test]
    fn test_previous_period() {
        assert_eq!(
            PeriodReportRequest::week(2024, 10).previous(),
            Some(PeriodReportRequest::week(2024, 9))
        );
        assert_eq!(
            PeriodReportRequest::week(2021, 1).previous(),
            Some(PeriodReportRequest::week(2020, 53))
        );
        assert_eq!(
            PeriodReportRequest::month(2024, 1).previous(),
            Some(PeriodReportRequest::month(2023, 12))
        );
        assert_eq!(
            PeriodReportRequest::year(2024).previous(),
            Some(PeriodReportRequest::year(2023))
        );
        assert_eq!(PeriodReportRequest::all_time(2024).previous(), None);
        assert_eq!(PeriodReportRequest::week(2024, 60).previous(), None);
    }

    #[test]
    fn test_date_range() {
        assert_eq!(
            PeriodReportRequest::week(2024, 1).date_range(),
            Some((date(2024, 1, 1), date(2024, 1, 7)))
        );
        assert_eq!(
            PeriodReportRequest::month(2024, 2).date_range(),
            Some((date(2024, 2, 1), date(2024, 2, 29)))
        );
        assert_eq!(
            PeriodReportRequest::month(2023, 12).date_range(),
            Some((date(2023, 12, 1), date(2023, 12, 31)))
        );
        assert_eq!(
            PeriodReportRequest::year(2023).date_range(),
            Some((date(2023, 1, 1), date(2023, 12, 31)))
        );
        assert_eq!(PeriodReportRequest::all_time(2023).date_range(), None);
    }

    #[test]
    fn test_period_type_round_trip_names() {
        for p in PeriodType::all() {
            assert_eq!(PeriodType::from_code(p.as_str()), Some(p));
        }
        assert_eq!(PeriodType::from_code("quarter"), None);
    }

    #[test]
    fn test_summary_growth_zero_base() {
        let s = PeriodSummary::from_totals(date(2024, 1, 1), date(2024, 1, 7), 100.0, 3, Some(0.0));
        assert_eq!(s.growth_rate, None);
        let s = PeriodSummary::from_totals(date(2024, 1, 1), date(2024, 1, 7), 150.0, 3, Some(100.0));
        assert_eq!(s.growth_rate, Some(0.5));
    }

    #[test]
    fn test_display_rank_keeps_service_ties() {
        let raw = json!([
            {"rank": 1, "id": 1, "name": "A", "revenue": 500.0},
            {"rank": 1, "id": 2, "name": "B", "revenue": 500.0},
            {"rank": 3, "id": 3, "name": "C", "revenue": 100.0},
            {"rank": 0, "name": "其他", "revenue": 50.0}
        ]);
        let rows: Vec<RankingEntry> = serde_json::from_value(raw).unwrap();
        let shown: Vec<usize> = rows
            .iter()
            .enumerate()
            .map(|(i, r)| r.display_rank(i + 1))
            .collect();
        assert_eq!(shown, vec![1, 1, 3, 4]);
    }

    #[test]
    fn test_response_parses_aggregate_rows() {
        let raw = json!({
            "summary": {
                "start_date": "2024-05-01",
                "end_date": "2024-05-31",
                "total_revenue": 1000.0,
                "growth_rate": 0.25,
                "movie_count": 2
            },
            "rankings": [
                {"rank": 1, "id": 10, "name": "A", "revenue": 700.0, "tickets": 50, "release_date": "2024-04-30"},
                {"rank": 2, "name": "其他", "revenue": 300.0, "tickets": null, "release_date": null}
            ]
        });
        let parsed: PeriodStatsResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.summary.growth_rate, Some(0.25));
        assert!(parsed.rankings[0].is_clickable());
        assert!(!parsed.rankings[1].is_clickable());
        assert_eq!(parsed.rankings[0].tickets, Some(50.0));
    }
}
