//! Calendar date ranges interpreted in a specific zone.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

use crate::domain::{
    zone::{self, parse_zone},
    ActivityError,
};

/// A closed interval of whole local days in `zone`.
///
/// `start` is local midnight of `start_date`, `end` is the last microsecond of
/// `end_date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CivilRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub zone: Tz,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

/// UTC bounds used to query the activity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl CivilRange {
    /// Resolve `YYYY-MM-DD` date strings in the named zone.
    pub fn resolve(start_date: &str, end_date: &str, zone_name: &str) -> Result<Self, ActivityError> {
        let start_date = parse_date(start_date)?;
        let end_date = parse_date(end_date)?;
        let zone = parse_zone(zone_name)?;

        Self::from_dates(start_date, end_date, zone)
    }

    pub fn from_dates(
        start_date: NaiveDate,
        end_date: NaiveDate,
        zone: Tz,
    ) -> Result<Self, ActivityError> {
        let day_after_end = end_date
            .succ_opt()
            .ok_or_else(|| ActivityError::InvalidDateFormat(end_date.to_string()))?;

        let start = zone::start_of_day(start_date, zone);
        let end = zone::start_of_day(day_after_end, zone) - Duration::microseconds(1);

        if start > end {
            return Err(ActivityError::InvalidRange);
        }

        Ok(Self {
            start_date,
            end_date,
            zone,
            start,
            end,
        })
    }

    pub fn start_utc(&self) -> NaiveDateTime {
        zone::to_utc_naive(&self.start)
    }

    pub fn end_utc(&self) -> NaiveDateTime {
        zone::to_utc_naive(&self.end)
    }

    /// Inclusive on both ends.
    pub fn contains(&self, instant: &DateTime<Tz>) -> bool {
        self.start <= *instant && *instant <= self.end
    }

    /// The UTC bounds widened by one day on each side.
    ///
    /// No zone is more than 14 hours from UTC, so a day of slack always covers
    /// the shift between local and UTC calendars.
    pub fn query_window(&self) -> UtcWindow {
        UtcWindow {
            start: self.start_utc() - Duration::days(1),
            end: self.end_utc() + Duration::days(1),
        }
    }
}

/// Parse a date that must look exactly like `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Result<NaiveDate, ActivityError> {
    let invalid = || ActivityError::InvalidDateFormat(value.to_string());

    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").unwrap()
    }

    #[test]
    fn resolves_whole_local_days_to_utc() {
        let range = CivilRange::resolve("2024-03-09", "2024-03-09", "America/Los_Angeles").unwrap();

        assert_eq!(range.start_utc(), naive("2024-03-09T08:00:00"));
        assert_eq!(range.end_utc(), naive("2024-03-10T07:59:59.999999"));
    }

    #[test]
    fn range_over_spring_forward_is_one_hour_short() {
        let range = CivilRange::resolve("2024-03-10", "2024-03-10", "America/Los_Angeles").unwrap();
        let length = range.end - range.start;

        assert_eq!(length, Duration::hours(23) - Duration::microseconds(1));
        assert_eq!(range.end_utc(), naive("2024-03-11T06:59:59.999999"));
    }

    #[test]
    fn start_never_after_end_for_valid_input() {
        let zones = ["UTC", "Asia/Tehran", "America/Los_Angeles", "Europe/London", "Pacific/Kiritimati"];
        let dates = ["2024-01-01", "2024-03-10", "2024-03-31", "2024-10-27", "2024-11-03", "2024-12-31"];

        for zone in zones {
            for (i, start) in dates.iter().enumerate() {
                for end in &dates[i..] {
                    let range = CivilRange::resolve(start, end, zone).unwrap();
                    assert!(range.start <= range.end, "{start}..{end} in {zone}");
                    assert!(range.contains(&range.start));
                    assert!(range.contains(&range.end));
                }
            }
        }
    }

    #[test]
    fn malformed_dates_echo_the_input() {
        for bad in ["2024/03/09", "24-03-09", "2024-3-9", "2024-02-30", "", "2024-03-09T00:00"] {
            match CivilRange::resolve(bad, "2024-03-10", "UTC") {
                Err(ActivityError::InvalidDateFormat(input)) => assert_eq!(input, bad),
                other => panic!("expected InvalidDateFormat for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn reversed_dates_are_an_invalid_range() {
        assert!(matches!(
            CivilRange::resolve("2024-03-10", "2024-03-09", "UTC"),
            Err(ActivityError::InvalidRange)
        ));
    }

    #[test]
    fn unknown_zone_is_rejected() {
        assert!(matches!(
            CivilRange::resolve("2024-03-09", "2024-03-10", "Nowhere/Special"),
            Err(ActivityError::InvalidTimezone(zone)) if zone == "Nowhere/Special"
        ));
    }

    #[test]
    fn query_window_adds_a_day_each_side() {
        let range = CivilRange::resolve("2024-06-01", "2024-06-02", "Asia/Tehran").unwrap();
        let window = range.query_window();

        assert_eq!(window.start, naive("2024-05-30T20:30:00"));
        assert_eq!(window.end, naive("2024-06-03T20:29:59.999999"));
    }
}
