use std::ops::Deref;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::{
    app_state::AppState,
    domain::models::{User, UserId},
    routes::ApiError,
};

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Extracts the [`User`] owning the request's `X-API-Key`. Rejects with 401
/// when the header is missing or the key is unknown or expired.
///
/// Safe to log, `User`'s `Debug` impl leaves out display data.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
    user: User,
}

impl Deref for AuthUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let api_key = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ApiError::unauthorized("API key required"))?;

        let app_state = AppState::from_ref(state);
        let user = app_state
            .users
            .find_by_api_key(api_key)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Invalid or expired API key"))?;

        Ok(AuthUser { id: user.id, user })
    }
}
