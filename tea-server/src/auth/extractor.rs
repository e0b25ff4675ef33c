//! Request extractors for the authenticated user

use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

use crate::auth::{CurrentUser, cookie};
use crate::core::ServerState;
use crate::utils::AppError;

/// Extract the user attached by [`require_auth`](super::require_auth),
/// validating the token directly when the middleware did not run.
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let token = cookie::token_from_headers(&parts.headers).ok_or_else(AppError::unauthorized)?;
        let claims = state.jwt_service.validate_token(token).map_err(|e| match e {
            crate::auth::JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        })?;
        let user = CurrentUser::try_from(claims)
            .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e)))?;

        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

/// The current user on public routes, if a valid session was presented
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<CurrentUser>().cloned()))
    }
}

impl MaybeUser {
    pub fn user_id(&self) -> Option<i64> {
        self.0.as_ref().map(|u| u.id)
    }
}
