use async_trait::async_trait;

use crate::domain::{models::User, ActivityError};

/// Outbound port resolving API keys to users.
///
/// Key issuance and user management live outside this service.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// The owner of an unexpired key, if any.
    async fn find_by_api_key(&self, api_key: &str) -> Result<Option<User>, ActivityError>;
}
