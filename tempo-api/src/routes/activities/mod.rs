mod crud;
mod range;

use axum::{routing::get, Router};
use chrono_tz::Tz;

use crate::{
    adapters::inbound::http::ActivityResponse, app_state::AppState, domain::models::Activity,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(crud::list_activities).post(crud::create_activity))
        .route("/date-range", get(range::list_in_range))
        .route("/count", get(range::count_in_range))
        .route("/task/:task_id", get(crud::list_for_task))
        .route(
            "/:id",
            get(crud::get_activity)
                .put(crud::update_activity)
                .patch(crud::update_activity)
                .delete(crud::delete_activity),
        )
}

/// Render activities in `tz`, leaving out any that cannot be expressed there.
fn render_all(activities: Vec<Activity>, tz: Tz) -> Vec<ActivityResponse> {
    activities
        .into_iter()
        .filter_map(|activity| {
            let id = activity.id;
            ActivityResponse::in_zone(activity, tz)
                .map_err(|e| tracing::warn!(activity_id = %id, "not rendering activity: {}", e))
                .ok()
        })
        .collect()
}
