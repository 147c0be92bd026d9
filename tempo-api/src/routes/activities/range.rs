use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    adapters::inbound::http::{ActivityDetailsResponse, CountResponse},
    app_state::AppState,
    auth::AuthUser,
    routes::{request_range, ApiError},
};

const DEFAULT_RANGE_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    start_date: String,
    end_date: String,
    skip: Option<u32>,
    limit: Option<u32>,
    timezone: Option<String>,
}

#[instrument(name = "list_activities_in_range", skip(app_state))]
pub async fn list_in_range(
    user: AuthUser,
    State(app_state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Vec<ActivityDetailsResponse>>, ApiError> {
    let range = request_range(
        &query.start_date,
        &query.end_date,
        query.timezone.as_deref(),
        &user,
        &app_state,
    )?;

    let details = app_state
        .activities
        .list_in_range(
            &user.id,
            &range,
            query.skip.unwrap_or(0),
            query.limit.unwrap_or(DEFAULT_RANGE_LIMIT),
        )
        .await?;

    let response = details
        .into_iter()
        .filter_map(|details| {
            let id = details.activity.id;
            ActivityDetailsResponse::in_zone(details, range.zone)
                .map_err(|e| tracing::warn!(activity_id = %id, "not rendering activity: {}", e))
                .ok()
        })
        .collect();

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct CountQuery {
    start_date: Option<String>,
    end_date: Option<String>,
    timezone: Option<String>,
}

/// Counts activities in the range, or all of them unless both dates are given.
#[instrument(name = "count_activities", skip(app_state))]
pub async fn count_in_range(
    user: AuthUser,
    State(app_state): State<AppState>,
    Query(query): Query<CountQuery>,
) -> Result<Json<CountResponse>, ApiError> {
    let range = match (query.start_date.as_deref(), query.end_date.as_deref()) {
        (Some(start), Some(end)) => Some(request_range(
            start,
            end,
            query.timezone.as_deref(),
            &user,
            &app_state,
        )?),
        _ => None,
    };

    let count = app_state
        .activities
        .count_in_range(&user.id, range.as_ref())
        .await?;

    Ok(Json(CountResponse { count }))
}
