//! Box-office week numbering.
//!
//! Week 1 is the calendar week (Monday..Sunday) containing January 4th, the
//! ISO-8601 rule. Weeks are labelled by their Sunday, which is the reporting
//! service's "report end date".

use super::error::AnalyticsError;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

pub const MAX_WEEK: i64 = 53;

/// Resolved Monday..Sunday span of a box-office week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRange {
    pub year: i32,
    pub week: u32,
    pub short_label: String,
    pub full_label: String,
    pub monday: NaiveDate,
    pub sunday: NaiveDate,
}

/// Result of resolving a (year, week) pair on the render path.
///
/// Bad input yields `Unresolved` with placeholder labels, never a guessed date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WeekResolution {
    Resolved(WeekRange),
    Unresolved {
        short_label: String,
        full_label: String,
    },
}

impl WeekResolution {
    pub fn short_label(&self) -> &str {
        match self {
            WeekResolution::Resolved(range) => &range.short_label,
            WeekResolution::Unresolved { short_label, .. } => short_label,
        }
    }

    pub fn full_label(&self) -> &str {
        match self {
            WeekResolution::Resolved(range) => &range.full_label,
            WeekResolution::Unresolved { full_label, .. } => full_label,
        }
    }

    pub fn range(&self) -> Option<&WeekRange> {
        match self {
            WeekResolution::Resolved(range) => Some(range),
            WeekResolution::Unresolved { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, WeekResolution::Resolved(_))
    }
}

pub struct WeekDateResolver;

impl WeekDateResolver {
    /// Resolve for display. Never fails: out-of-range input is marked unresolved.
    pub fn resolve(year: i32, week: i64) -> WeekResolution {
        match Self::try_resolve(year, week) {
            Ok(range) => WeekResolution::Resolved(range),
            Err(err) => {
                log::debug!("Unresolved week {}/{}: {}", year, week, err);
                WeekResolution::Unresolved {
                    short_label: format!("W{}", week),
                    full_label: format!("Week {}", week),
                }
            }
        }
    }

    /// Strict variant. Week 0 is treated as week 1 (upstream date truncation
    /// sometimes produces it); anything outside 0..=53 is rejected.
    pub fn try_resolve(year: i32, week: i64) -> Result<WeekRange, AnalyticsError> {
        if !(0..=MAX_WEEK).contains(&week) {
            return Err(AnalyticsError::InvalidWeek(week));
        }
        let week = week.max(1) as u32;

        let monday = week1_monday(year)
            .and_then(|m| m.checked_add_days(Days::new(u64::from(week - 1) * 7)))
            .ok_or(AnalyticsError::InvalidWeek(i64::from(week)))?;
        let sunday = monday
            .checked_add_days(Days::new(6))
            .ok_or(AnalyticsError::InvalidWeek(i64::from(week)))?;

        Ok(WeekRange {
            year,
            week,
            short_label: month_day(sunday),
            full_label: format!("{} ~ {}", month_day(monday), month_day(sunday)),
            monday,
            sunday,
        })
    }

    /// Number of ISO weeks in `year` (52 or 53)
    pub fn weeks_in_year(year: i32) -> u32 {
        NaiveDate::from_ymd_opt(year, 12, 28)
            .map(|d| d.iso_week().week())
            .unwrap_or(52)
    }

    /// ISO weeks of `year` whose Monday falls in `month`
    pub fn weeks_in_month(year: i32, month: u32) -> Result<Vec<u32>, AnalyticsError> {
        if !(1..=12).contains(&month) {
            return Err(AnalyticsError::InvalidMonth(i64::from(month)));
        }

        let weeks = (1..=MAX_WEEK)
            .filter_map(|w| Self::try_resolve(year, w).ok())
            .filter(|range| {
                let iso = range.monday.iso_week();
                iso.year() == year
                    && iso.week() == range.week
                    && range.monday.year() == year
                    && range.monday.month() == month
            })
            .map(|range| range.week)
            .collect();
        Ok(weeks)
    }
}

fn week1_monday(year: i32) -> Option<NaiveDate> {
    let jan4 = NaiveDate::from_ymd_opt(year, 1, 4)?;
    jan4.checked_sub_days(Days::new(u64::from(jan4.weekday().num_days_from_monday())))
}

fn month_day(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_one_contains_january_fourth() {
        let range = WeekDateResolver::try_resolve(2024, 1).unwrap();
        assert_eq!(range.monday, date(2024, 1, 1));
        assert_eq!(range.sunday, date(2024, 1, 7));
        assert_eq!(range.short_label, "1/7");
        assert_eq!(range.full_label, "1/1 ~ 1/7");

        // Jan 4th 2026 is a Sunday, so week 1 starts in December
        let range = WeekDateResolver::try_resolve(2026, 1).unwrap();
        assert_eq!(range.monday, date(2025, 12, 29));
        assert_eq!(range.full_label, "12/29 ~ 1/4");
    }

    #[test]
    fn test_week_zero_equals_week_one() {
        for year in [2016, 2020, 2024, 2026] {
            assert_eq!(
                WeekDateResolver::resolve(year, 0),
                WeekDateResolver::resolve(year, 1)
            );
        }
    }

    #[test]
    fn test_spans_and_steps() {
        for year in 2015..=2030 {
            let mut previous: Option<NaiveDate> = None;
            for week in 1..=53 {
                let range = WeekDateResolver::try_resolve(year, week).unwrap();
                assert_eq!((range.sunday - range.monday).num_days(), 6);
                assert_eq!(range.monday.weekday(), chrono::Weekday::Mon);
                if let Some(prev) = previous {
                    assert_eq!((range.monday - prev).num_days(), 7);
                }
                previous = Some(range.monday);
            }
        }
    }

    #[test]
    fn test_matches_chrono_iso_weeks() {
        for year in 2015..=2030 {
            for week in 1..=WeekDateResolver::weeks_in_year(year) {
                let range = WeekDateResolver::try_resolve(year, i64::from(week)).unwrap();
                let iso = range.monday.iso_week();
                assert_eq!((iso.year(), iso.week()), (year, week));
            }
        }
    }

    #[test]
    fn test_out_of_range_is_unresolved() {
        let res = WeekDateResolver::resolve(2024, 54);
        assert!(!res.is_resolved());
        assert_eq!(res.short_label(), "W54");
        assert_eq!(res.full_label(), "Week 54");
        assert!(res.range().is_none());

        assert_eq!(
            WeekDateResolver::try_resolve(2024, -1),
            Err(AnalyticsError::InvalidWeek(-1))
        );
    }

    #[test]
    fn test_unrepresentable_year_is_unresolved() {
        assert!(!WeekDateResolver::resolve(i32::MAX, 10).is_resolved());
    }

    #[test]
    fn test_weeks_in_year() {
        assert_eq!(WeekDateResolver::weeks_in_year(2020), 53);
        assert_eq!(WeekDateResolver::weeks_in_year(2024), 52);
        assert_eq!(WeekDateResolver::weeks_in_year(2026), 53);
    }

    #[test]
    fn test_weeks_in_month() {
        assert_eq!(
            WeekDateResolver::weeks_in_month(2024, 1).unwrap(),
            vec![1, 2, 3, 4, 5]
        );
        assert_eq!(
            WeekDateResolver::weeks_in_month(2026, 1).unwrap(),
            vec![2, 3, 4, 5]
        );
        assert_eq!(
            WeekDateResolver::weeks_in_month(2025, 12).unwrap(),
            vec![49, 50, 51, 52]
        );
        assert_eq!(
            WeekDateResolver::weeks_in_month(2025, 13),
            Err(AnalyticsError::InvalidMonth(13))
        );
    }
}
