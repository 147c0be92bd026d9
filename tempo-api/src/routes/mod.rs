pub(crate) mod activities;
pub(crate) mod error;
pub(crate) mod reports;

pub(crate) use error::ApiError;

use chrono_tz::Tz;

use crate::{
    app_state::AppState,
    auth::AuthUser,
    domain::{civil_range::CivilRange, zone},
};

/// Zone name for a request: the `timezone` parameter, then the user's
/// preference, then the configured default.
fn zone_name<'a>(requested: Option<&'a str>, user: &'a AuthUser, state: &'a AppState) -> &'a str {
    zone::effective_zone_name(requested, user.preferred_timezone(), &state.default_timezone)
}

fn request_zone(requested: Option<&str>, user: &AuthUser, state: &AppState) -> Result<Tz, ApiError> {
    Ok(zone::parse_zone(zone_name(requested, user, state))?)
}

fn request_range(
    start_date: &str,
    end_date: &str,
    requested: Option<&str>,
    user: &AuthUser,
    state: &AppState,
) -> Result<CivilRange, ApiError> {
    Ok(CivilRange::resolve(
        start_date,
        end_date,
        zone_name(requested, user, state),
    )?)
}
