//! Conversions between stored instants and civil time in a named zone.
//!
//! Stored instants are naive and always mean UTC. Every function takes the
//! zone explicitly; there is no process-wide "current" zone.

use chrono::{
    DateTime, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone,
};
use chrono_tz::Tz;
use thiserror::Error;

use crate::domain::ActivityError;

/// A stored instant whose civil representation in `zone` falls outside the
/// representable calendar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{instant} is not representable in {zone}")]
pub struct ConversionError {
    pub instant: NaiveDateTime,
    pub zone: &'static str,
}

/// Parse an IANA zone name.
pub fn parse_zone(name: &str) -> Result<Tz, ActivityError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ActivityError::InvalidTimezone(name.to_string()))
}

/// Pick the zone for a request: explicit parameter, then the user's stored
/// preference, then the configured fallback. Blank values count as absent.
pub fn effective_zone_name<'a>(
    requested: Option<&'a str>,
    preferred: Option<&'a str>,
    fallback: &'a str,
) -> &'a str {
    requested
        .filter(|tz| !tz.trim().is_empty())
        .or(preferred.filter(|tz| !tz.trim().is_empty()))
        .unwrap_or(fallback)
}

/// Express a stored (UTC) instant as wall-clock time in `zone`.
pub fn to_zone(instant: NaiveDateTime, zone: Tz) -> Result<DateTime<Tz>, ConversionError> {
    let offset = zone.offset_from_utc_datetime(&instant).fix();
    instant
        .checked_add_signed(Duration::seconds(offset.local_minus_utc().into()))
        .ok_or(ConversionError {
            instant,
            zone: zone.name(),
        })?;

    Ok(zone.from_utc_datetime(&instant))
}

/// Back to the storage representation.
pub fn to_utc_naive(zoned: &DateTime<Tz>) -> NaiveDateTime {
    zoned.naive_utc()
}

/// Same as [`to_zone`], with the zone erased to a fixed offset for rendering.
pub fn to_fixed_offset(
    instant: NaiveDateTime,
    zone: Tz,
) -> Result<DateTime<FixedOffset>, ConversionError> {
    to_zone(instant, zone).map(|zoned| zoned.fixed_offset())
}

/// First instant of `date` in `zone`.
///
/// An ambiguous midnight resolves to the earlier instant; a midnight skipped by
/// a DST transition resolves to the first instant after the gap.
pub fn start_of_day(date: NaiveDate, zone: Tz) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);

    match zone.from_local_datetime(&midnight) {
        LocalResult::Single(start) => start,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before = zone
                .offset_from_utc_datetime(&(midnight - Duration::days(1)))
                .fix();
            zone.from_utc_datetime(&(midnight - Duration::seconds(before.local_minus_utc().into())))
        }
    }
}

/// Parse a client supplied timestamp into naive UTC.
///
/// RFC 3339 values are converted to UTC; values without an offset are taken
/// to already be UTC.
pub fn parse_client_instant(value: &str) -> Result<NaiveDateTime, ActivityError> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Ok(with_offset.naive_utc());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| ActivityError::InvalidInstant(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn naive(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").unwrap()
    }

    #[test]
    fn parse_zone_rejects_unknown_names() {
        assert_eq!(parse_zone("Asia/Tehran").unwrap(), chrono_tz::Asia::Tehran);
        match parse_zone("Mars/Olympus_Mons") {
            Err(ActivityError::InvalidTimezone(name)) => assert_eq!(name, "Mars/Olympus_Mons"),
            other => panic!("expected InvalidTimezone, got {:?}", other),
        }
    }

    #[test]
    fn naive_instants_are_read_as_utc() {
        let zoned = to_zone(naive("2024-03-09T23:30:00"), chrono_tz::America::Los_Angeles).unwrap();
        assert_eq!(zoned.naive_local(), naive("2024-03-09T15:30:00"));

        let zoned = to_zone(naive("2024-01-01T00:00:00"), chrono_tz::Asia::Tehran).unwrap();
        assert_eq!(zoned.naive_local(), naive("2024-01-01T03:30:00"));
    }

    #[test]
    fn round_trip_reproduces_the_stored_instant() {
        let zones = [
            chrono_tz::UTC,
            chrono_tz::Asia::Tehran,
            chrono_tz::America::Los_Angeles,
            chrono_tz::Europe::Berlin,
            chrono_tz::Pacific::Kiritimati,
            chrono_tz::Pacific::Pago_Pago,
        ];
        let instants = [
            naive("2024-03-10T10:00:00"),
            naive("2024-03-31T01:30:00.123456"),
            naive("2024-11-03T08:59:59.999999"),
            naive("1999-12-31T23:59:59"),
        ];

        for zone in zones {
            for instant in instants {
                let zoned = to_zone(instant, zone).unwrap();
                assert_eq!(to_utc_naive(&zoned), instant, "zone {}", zone.name());
            }
        }
    }

    #[test]
    fn unrepresentable_instant_is_an_error() {
        let err = to_zone(NaiveDateTime::MAX, chrono_tz::Asia::Tokyo).unwrap_err();
        assert_eq!(err.zone, "Asia/Tokyo");
    }

    #[test]
    fn start_of_day_skips_a_dst_gap_at_midnight() {
        // Brazil moved clocks from 00:00 to 01:00 on this day.
        let date = NaiveDate::from_ymd_opt(2018, 11, 4).unwrap();
        let start = start_of_day(date, chrono_tz::America::Sao_Paulo);

        assert_eq!(start.naive_utc(), naive("2018-11-04T03:00:00"));
        assert_eq!(start.hour(), 1);
    }

    #[test]
    fn start_of_day_in_a_fixed_offset_zone() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let start = start_of_day(date, chrono_tz::Asia::Tehran);
        assert_eq!(start.naive_utc(), naive("2024-05-31T20:30:00"));
    }

    #[test]
    fn effective_zone_prefers_request_then_user_then_fallback() {
        assert_eq!(effective_zone_name(Some("Asia/Tokyo"), Some("UTC"), "Asia/Tehran"), "Asia/Tokyo");
        assert_eq!(effective_zone_name(Some("  "), Some("Europe/Paris"), "UTC"), "Europe/Paris");
        assert_eq!(effective_zone_name(None, None, "UTC"), "UTC");
    }

    #[test]
    fn client_instants_normalize_to_utc() {
        assert_eq!(
            parse_client_instant("2024-05-01T10:00:00+02:00").unwrap(),
            naive("2024-05-01T08:00:00")
        );
        assert_eq!(
            parse_client_instant("2024-05-01T10:00:00").unwrap(),
            naive("2024-05-01T10:00:00")
        );
        assert!(matches!(
            parse_client_instant("yesterday"),
            Err(ActivityError::InvalidInstant(_))
        ));
    }
}
