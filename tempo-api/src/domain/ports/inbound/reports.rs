use async_trait::async_trait;

use crate::domain::{
    civil_range::CivilRange,
    models::{TimeSpentReport, UserId},
    ActivityError,
};

/// Inbound port for time-spent reporting.
#[async_trait]
pub trait ReportService: Send + Sync + 'static {
    /// Hours spent per project and per task inside `range`, counting only
    /// completed activities.
    async fn time_spent(
        &self,
        owner: &UserId,
        range: &CivilRange,
    ) -> Result<TimeSpentReport, ActivityError>;
}
