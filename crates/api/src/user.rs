//! Caller identity extraction.
//!
//! User authentication itself is an external collaborator: by the time
//! a request reaches this service, the auth proxy has already resolved
//! the user and forwards their id in the `X-User-Id` header. Handlers
//! that scope data per user take [`CurrentUser`] as an extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pulse_core::types::DbId;

use crate::error::AppError;

/// The authenticated caller, as asserted by the upstream auth layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub DbId);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .ok_or_else(|| AppError::Unauthorized("missing X-User-Id header".to_string()))?;

        let user_id: DbId = header
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .ok_or_else(|| AppError::Unauthorized("invalid X-User-Id header".to_string()))?;

        Ok(CurrentUser(user_id))
    }
}
