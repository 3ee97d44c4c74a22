use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};

use crate::database::models::Shift;

/// Inclusive calendar range of one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The week before this one; `None` at the start of the calendar.
    pub fn previous(&self) -> Option<WeekRange> {
        let week = TimeDelta::try_weeks(1)?;
        Some(WeekRange {
            start: self.start.checked_sub_signed(week)?,
            end: self.end.checked_sub_signed(week)?,
        })
    }
}

/// The week containing `reference`, starting on `week_starts_on`.
///
/// `None` when the week would fall outside the representable calendar.
pub fn week_bounds(reference: NaiveDate, week_starts_on: Weekday) -> Option<WeekRange> {
    let offset = (reference.weekday().num_days_from_sunday() + 7
        - week_starts_on.num_days_from_sunday())
        % 7;
    let start = reference.checked_sub_signed(TimeDelta::try_days(offset as i64)?)?;

    Some(WeekRange {
        start,
        end: start.checked_add_signed(TimeDelta::try_days(6)?)?,
    })
}

/// `offset` weeks away from the week containing `reference` (-1 = last week).
pub fn week_bounds_with_offset(
    reference: NaiveDate,
    week_starts_on: Weekday,
    offset: i64,
) -> Option<WeekRange> {
    let shifted = reference.checked_add_signed(TimeDelta::try_weeks(offset)?)?;
    week_bounds(shifted, week_starts_on)
}

pub fn filter_shifts(shifts: &[Shift], range: WeekRange) -> Vec<Shift> {
    shifts
        .iter()
        .filter(|s| range.contains(s.date))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn sunday_start_week() {
        // Wednesday
        let range = week_bounds(date("2025-03-05"), Weekday::Sun).unwrap();
        assert_eq!(range.start, date("2025-03-02"));
        assert_eq!(range.end, date("2025-03-08"));
    }

    #[test]
    fn reference_on_start_day() {
        let range = week_bounds(date("2025-03-02"), Weekday::Sun).unwrap();
        assert_eq!(range.start, date("2025-03-02"));

        let range = week_bounds(date("2025-03-08"), Weekday::Sun).unwrap();
        assert_eq!(range.start, date("2025-03-02"));
        assert_eq!(range.end, date("2025-03-08"));
    }

    #[test]
    fn monday_start_week() {
        // Sunday belongs to the week that began the previous Monday
        let range = week_bounds(date("2025-03-09"), Weekday::Mon).unwrap();
        assert_eq!(range.start, date("2025-03-03"));
        assert_eq!(range.end, date("2025-03-09"));
    }

    #[test]
    fn offsets_move_whole_weeks() {
        let last = week_bounds_with_offset(date("2025-03-05"), Weekday::Sun, -1).unwrap();
        assert_eq!(last.start, date("2025-02-23"));
        assert_eq!(last.end, date("2025-03-01"));
        assert_eq!(
            Some(last),
            week_bounds(date("2025-03-05"), Weekday::Sun).and_then(|w| w.previous())
        );
    }

    #[test]
    fn range_is_inclusive() {
        let range = week_bounds(date("2025-03-05"), Weekday::Sun).unwrap();
        assert!(range.contains(date("2025-03-02")));
        assert!(range.contains(date("2025-03-08")));
        assert!(!range.contains(date("2025-03-09")));
        assert!(!range.contains(date("2025-03-01")));
    }

    #[test]
    fn out_of_range_dates_yield_none() {
        assert_eq!(week_bounds(NaiveDate::MAX, Weekday::Sun), None);
        assert_eq!(week_bounds_with_offset(NaiveDate::MIN, Weekday::Sun, -1), None);
        assert_eq!(
            week_bounds_with_offset(date("2025-03-05"), Weekday::Sun, -100_000_000_000),
            None
        );
        assert_eq!(
            week_bounds_with_offset(date("2025-03-05"), Weekday::Sun, i64::MIN),
            None
        );

        let first = WeekRange {
            start: NaiveDate::MIN,
            end: NaiveDate::MIN,
        };
        assert_eq!(first.previous(), None);
    }
}
