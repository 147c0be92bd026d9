//! Decides which stored activities belong to a civil range.

use serde::Deserialize;

use crate::domain::{
    civil_range::CivilRange,
    models::Activity,
    zone::{self, ConversionError},
    ActivityError,
};

/// How an activity is matched against a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Membership {
    /// The zoned clock-in lies inside the range. Used by the list and count
    /// endpoints; activities that start before the range are never matched.
    #[default]
    StartInstant,
    /// The activity's span touches the range. Open activities are treated as
    /// instantaneous at their clock-in.
    Overlap,
}

/// Filters candidates fetched with [`CivilRange::query_window`].
///
/// A candidate that cannot be expressed in the range's zone is logged and
/// skipped, so one bad row never fails the whole request.
pub struct OverlapFilter<'a> {
    range: &'a CivilRange,
    membership: Membership,
}

impl<'a> OverlapFilter<'a> {
    pub fn new(range: &'a CivilRange, membership: Membership) -> Self {
        Self { range, membership }
    }

    pub fn filter(&self, candidates: Vec<Activity>) -> Vec<Activity> {
        candidates
            .into_iter()
            .filter(|activity| self.admits_or_skip(activity))
            .collect()
    }

    pub fn count(&self, candidates: &[Activity]) -> usize {
        candidates
            .iter()
            .filter(|activity| self.admits_or_skip(activity))
            .count()
    }

    fn admits_or_skip(&self, activity: &Activity) -> bool {
        match self.admits(activity) {
            Ok(admitted) => admitted,
            Err(e) => {
                let skipped = ActivityError::MalformedCandidate {
                    id: activity.id,
                    reason: e.to_string(),
                };
                tracing::warn!(activity_id = %activity.id, "skipping candidate: {}", skipped);
                false
            }
        }
    }

    fn admits(&self, activity: &Activity) -> Result<bool, ConversionError> {
        let start = zone::to_zone(activity.clock_in, self.range.zone)?;

        match self.membership {
            Membership::StartInstant => Ok(self.range.contains(&start)),
            Membership::Overlap => {
                let end = match activity.clock_out {
                    Some(clock_out) => zone::to_zone(clock_out, self.range.zone)?,
                    None => start,
                };
                Ok(start <= self.range.end && end >= self.range.start)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ActivityId, ActivityStatus};
    use chrono::NaiveDateTime;

    fn naive(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn done(id: i32, clock_in: &str, clock_out: &str) -> Activity {
        Activity::new(id, 1, naive(clock_in), ActivityStatus::Done).with_clock_out(naive(clock_out))
    }

    fn ids(activities: &[Activity]) -> Vec<ActivityId> {
        activities.iter().map(|a| a.id).collect()
    }

    #[test]
    fn start_instant_membership_uses_the_zoned_clock_in() {
        // Range is 2024-03-09 in Los Angeles: 08:00Z .. 07:59:59.999999Z next day.
        let range = CivilRange::resolve("2024-03-09", "2024-03-09", "America/Los_Angeles").unwrap();
        let candidates = vec![
            done(1, "2024-03-09T23:30:00", "2024-03-10T00:15:00"),
            done(2, "2024-03-09T07:59:59", "2024-03-09T12:00:00"),
            done(3, "2024-03-09T08:00:00", "2024-03-09T09:00:00"),
            done(4, "2024-03-10T08:00:00", "2024-03-10T09:00:00"),
        ];

        let filtered = OverlapFilter::new(&range, Membership::StartInstant).filter(candidates);
        assert_eq!(ids(&filtered), vec![ActivityId::new(1), ActivityId::new(3)]);
    }

    #[test]
    fn start_instant_membership_ignores_activities_started_before_the_range() {
        let range = CivilRange::resolve("2024-01-02", "2024-01-02", "UTC").unwrap();
        let overnight = done(1, "2024-01-01T22:00:00", "2024-01-02T06:00:00");

        let filter = OverlapFilter::new(&range, Membership::StartInstant);
        assert_eq!(filter.count(&[overnight.clone()]), 0);

        let filter = OverlapFilter::new(&range, Membership::Overlap);
        assert_eq!(filter.count(&[overnight]), 1);
    }

    #[test]
    fn overlap_membership_excludes_disjoint_spans() {
        let range = CivilRange::resolve("2024-01-02", "2024-01-03", "UTC").unwrap();
        let candidates = vec![
            done(1, "2024-01-01T10:00:00", "2024-01-01T23:59:59"),
            done(2, "2024-01-01T10:00:00", "2024-01-05T10:00:00"),
            done(3, "2024-01-03T23:00:00", "2024-01-04T01:00:00"),
            done(4, "2024-01-04T00:00:00", "2024-01-04T01:00:00"),
            Activity::new(5, 1, naive("2024-01-02T09:00:00"), ActivityStatus::Doing),
        ];

        let filtered = OverlapFilter::new(&range, Membership::Overlap).filter(candidates);
        assert_eq!(
            ids(&filtered),
            vec![ActivityId::new(2), ActivityId::new(3), ActivityId::new(5)]
        );
    }

    #[test]
    fn count_agrees_with_filter() {
        let range = CivilRange::resolve("2024-03-09", "2024-03-10", "Asia/Tehran").unwrap();
        let candidates = vec![
            done(1, "2024-03-08T20:29:59", "2024-03-08T21:00:00"),
            done(2, "2024-03-08T20:30:00", "2024-03-08T21:00:00"),
            done(3, "2024-03-10T20:29:59", "2024-03-10T22:00:00"),
            done(4, "2024-03-10T20:30:00", "2024-03-10T22:00:00"),
            Activity::new(5, 1, NaiveDateTime::MAX, ActivityStatus::Planned),
        ];

        for membership in [Membership::StartInstant, Membership::Overlap] {
            let filter = OverlapFilter::new(&range, membership);
            assert_eq!(filter.count(&candidates), filter.filter(candidates.clone()).len());
        }
    }

    #[test]
    fn malformed_candidate_is_skipped_without_failing() {
        let range = CivilRange::resolve("2024-03-09", "2024-03-09", "Asia/Tokyo").unwrap();
        let candidates = vec![
            Activity::new(1, 1, NaiveDateTime::MAX, ActivityStatus::Done),
            done(2, "2024-03-09T01:00:00", "2024-03-09T02:00:00"),
        ];

        let filtered = OverlapFilter::new(&range, Membership::StartInstant).filter(candidates);
        assert_eq!(ids(&filtered), vec![ActivityId::new(2)]);
    }
}
