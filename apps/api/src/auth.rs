//! Authenticated-caller identity. Token verification happens upstream; this
//! service only trusts the forwarded `x-user-id` header.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;

const USER_ID_HEADER: &str = "x-user-id";

/// Extracts the authenticated user's id from request headers.
/// Missing or malformed ids reject with 401.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;
        let id = Uuid::parse_str(raw).map_err(|_| AppError::Unauthorized)?;
        Ok(AuthUser { id })
    }
}
