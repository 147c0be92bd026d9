//! Composition root. The only place that names concrete adapters.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    adapters::outbound::postgres::{
        PostgresActivityAdapter, PostgresTaskCatalog, PostgresUserDirectory,
    },
    app_state::AppState,
    config::ApplicationSettings,
    domain::{
        services::{ActivityServiceImpl, ReportServiceImpl},
        zone::parse_zone,
        ActivityError,
    },
    repositories::{ActivityRepoImpl, TaskRepoImpl, UserRepositoryImpl},
};

/// Wire PostgreSQL-backed services into an [`AppState`].
///
/// Fails if the configured default zone is not a known IANA name.
pub fn build_app_state(
    pool: PgPool,
    settings: &ApplicationSettings,
) -> Result<AppState, ActivityError> {
    parse_zone(&settings.default_timezone)?;

    let activities = Arc::new(PostgresActivityAdapter::new(Arc::new(ActivityRepoImpl::new(
        pool.clone(),
    ))));
    let tasks = Arc::new(PostgresTaskCatalog::new(Arc::new(TaskRepoImpl::new(
        pool.clone(),
    ))));
    let users = Arc::new(PostgresUserDirectory::new(Arc::new(UserRepositoryImpl::new(
        pool,
    ))));

    let activity_service = ActivityServiceImpl::new(activities.clone(), tasks.clone());
    let report_service =
        ReportServiceImpl::new(activities, tasks).with_membership(settings.report_membership);

    Ok(AppState::new(
        Arc::new(activity_service),
        Arc::new(report_service),
        users,
        settings.default_timezone.as_str(),
    ))
}
