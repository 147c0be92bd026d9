use std::fmt;

use super::UserId;

/// The authenticated caller, as far as this service needs to know it.
#[derive(Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    /// Preferred IANA zone for interpreting dates, if the user set one.
    pub timezone: Option<String>,
}

impl User {
    /// The zone to use when a request does not name one.
    pub fn preferred_timezone(&self) -> Option<&str> {
        self.timezone.as_deref().filter(|tz| !tz.trim().is_empty())
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("timezone", &self.timezone)
            .finish()
    }
}
