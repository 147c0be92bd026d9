use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    adapters::inbound::http::TimeSpentReportResponse,
    app_state::AppState,
    auth::AuthUser,
    routes::{request_range, ApiError},
};

pub fn router() -> Router<AppState> {
    Router::new().route("/time-spent", get(time_spent))
}

#[derive(Debug, Deserialize)]
pub struct TimeSpentQuery {
    start_date: String,
    end_date: String,
    timezone: Option<String>,
}

#[instrument(name = "time_spent_report", skip(app_state))]
pub async fn time_spent(
    user: AuthUser,
    State(app_state): State<AppState>,
    Query(query): Query<TimeSpentQuery>,
) -> Result<Json<TimeSpentReportResponse>, ApiError> {
    let range = request_range(
        &query.start_date,
        &query.end_date,
        query.timezone.as_deref(),
        &user,
        &app_state,
    )?;

    let report = app_state.reports.time_spent(&user.id, &range).await?;

    Ok(Json(report.into()))
}
