//! Portion of an activity that counts towards a civil range.

use chrono::Duration;

use crate::domain::{
    civil_range::CivilRange,
    models::Activity,
    zone::{self, ConversionError},
    ActivityError,
};

/// An activity paired with the hours it contributes to a range. `hours` is
/// always positive.
#[derive(Debug, Clone, PartialEq)]
pub struct ClippedActivity {
    pub activity: Activity,
    pub hours: f64,
}

/// Hours of `activity` that fall inside `range`, never negative.
///
/// An activity whose zoned clock-out falls on the first day of the range is
/// counted whole, even if it started before the range. This keeps sessions
/// that cross midnight (sleep, late work) in one piece on the day they end.
/// The check is made against `range.start_date` only, also for multi-day
/// ranges. Open activities contribute nothing.
pub fn clip(activity: &Activity, range: &CivilRange) -> Result<f64, ConversionError> {
    let Some(clock_out) = activity.clock_out else {
        return Ok(0.0);
    };

    let start = zone::to_zone(activity.clock_in, range.zone)?;
    let end = zone::to_zone(clock_out, range.zone)?;

    let counted = if end.date_naive() == range.start_date {
        end - start
    } else {
        end.min(range.end) - start.max(range.start)
    };

    Ok(as_hours(counted).max(0.0))
}

/// Clip every candidate, keeping only those with a positive contribution.
pub fn clip_all(candidates: Vec<Activity>, range: &CivilRange) -> Vec<ClippedActivity> {
    candidates
        .into_iter()
        .filter_map(|activity| match clip(&activity, range) {
            Ok(hours) if hours > 0.0 => Some(ClippedActivity { activity, hours }),
            Ok(_) => None,
            Err(e) => {
                let skipped = ActivityError::MalformedCandidate {
                    id: activity.id,
                    reason: e.to_string(),
                };
                tracing::warn!(activity_id = %activity.id, "not clipping: {}", skipped);
                None
            }
        })
        .collect()
}

fn as_hours(duration: Duration) -> f64 {
    match duration.num_microseconds() {
        Some(micros) => micros as f64 / 3_600_000_000.0,
        None => duration.num_seconds() as f64 / 3_600.0,
    }
}
