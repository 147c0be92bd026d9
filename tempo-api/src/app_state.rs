use std::sync::Arc;

use crate::domain::ports::{
    inbound::{ActivityService, ReportService},
    outbound::UserDirectory,
};

/// Shared handles for the HTTP layer. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub activities: Arc<dyn ActivityService>,
    pub reports: Arc<dyn ReportService>,
    pub users: Arc<dyn UserDirectory>,
    /// Zone used when neither the request nor the user names one.
    pub default_timezone: Arc<str>,
}

impl AppState {
    pub fn new(
        activities: Arc<dyn ActivityService>,
        reports: Arc<dyn ReportService>,
        users: Arc<dyn UserDirectory>,
        default_timezone: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            activities,
            reports,
            users,
            default_timezone: default_timezone.into(),
        }
    }
}
