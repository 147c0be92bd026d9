use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    adapters::inbound::http::{ActivityResponse, MessageResponse},
    app_state::AppState,
    auth::AuthUser,
    domain::{
        models::{ActivityChanges, ActivityId, ActivityStatus, NewActivity, Recurrence, TaskId},
        zone::parse_client_instant,
    },
    routes::{request_zone, ApiError},
};

use super::render_all;

const DEFAULT_LIST_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    skip: Option<u32>,
    limit: Option<u32>,
}

#[instrument(name = "list_activities", skip(app_state))]
pub async fn list_activities(
    user: AuthUser,
    State(app_state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ActivityResponse>>, ApiError> {
    let tz = request_zone(None, &user, &app_state)?;
    let activities = app_state
        .activities
        .list(
            &user.id,
            query.skip.unwrap_or(0),
            query.limit.unwrap_or(DEFAULT_LIST_LIMIT),
        )
        .await?;

    Ok(Json(render_all(activities, tz)))
}

#[instrument(name = "list_activities_for_task", skip(app_state))]
pub async fn list_for_task(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(task_id): Path<i32>,
) -> Result<Json<Vec<ActivityResponse>>, ApiError> {
    let tz = request_zone(None, &user, &app_state)?;
    let activities = app_state
        .activities
        .list_for_task(&user.id, &TaskId::new(task_id))
        .await?;

    Ok(Json(render_all(activities, tz)))
}

#[instrument(name = "get_activity", skip(app_state))]
pub async fn get_activity(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ActivityResponse>, ApiError> {
    let tz = request_zone(None, &user, &app_state)?;
    let activity = app_state.activities.get(&user.id, &ActivityId::new(id)).await?;

    let response =
        ActivityResponse::in_zone(activity, tz).map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct CreateActivityBody {
    clock_in: String,
    clock_out: Option<String>,
    task_id: i32,
    status: ActivityStatus,
    description: Option<String>,
    is_recurring: Option<bool>,
    days_interval: Option<i64>,
    recurrence_count: Option<i64>,
}

#[instrument(name = "create_activity", skip(app_state))]
pub async fn create_activity(
    user: AuthUser,
    State(app_state): State<AppState>,
    Json(body): Json<CreateActivityBody>,
) -> Result<(StatusCode, Json<Vec<ActivityResponse>>), ApiError> {
    let tz = request_zone(None, &user, &app_state)?;

    let recurrence = Recurrence::from_parts(
        body.is_recurring.unwrap_or(false),
        body.days_interval,
        body.recurrence_count,
    )?;
    let activity = NewActivity {
        task_id: TaskId::new(body.task_id),
        clock_in: parse_client_instant(&body.clock_in)?,
        clock_out: body
            .clock_out
            .as_deref()
            .map(parse_client_instant)
            .transpose()?,
        status: body.status,
        description: body.description,
    };

    let created = app_state
        .activities
        .create(&user.id, activity, recurrence)
        .await?;

    Ok((StatusCode::CREATED, Json(render_all(created, tz))))
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateActivityBody {
    clock_in: Option<String>,
    clock_out: Option<String>,
    task_id: Option<i32>,
    status: Option<ActivityStatus>,
    description: Option<String>,
}

impl UpdateActivityBody {
    fn into_changes(self) -> Result<ActivityChanges, ApiError> {
        Ok(ActivityChanges {
            task_id: self.task_id.map(TaskId::new),
            clock_in: self.clock_in.as_deref().map(parse_client_instant).transpose()?,
            clock_out: self.clock_out.as_deref().map(parse_client_instant).transpose()?,
            status: self.status,
            description: self.description,
        })
    }
}

/// Serves both PUT and PATCH; absent fields are left unchanged.
#[instrument(name = "update_activity", skip(app_state))]
pub async fn update_activity(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateActivityBody>,
) -> Result<Json<ActivityResponse>, ApiError> {
    let tz = request_zone(None, &user, &app_state)?;
    let changes = body.into_changes()?;

    let updated = app_state
        .activities
        .update(&user.id, &ActivityId::new(id), &changes)
        .await?;

    let response =
        ActivityResponse::in_zone(updated, tz).map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(response))
}

#[instrument(name = "delete_activity", skip(app_state))]
pub async fn delete_activity(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    app_state
        .activities
        .delete(&user.id, &ActivityId::new(id))
        .await?;

    Ok(Json(MessageResponse::new("Activity deleted successfully")))
}
