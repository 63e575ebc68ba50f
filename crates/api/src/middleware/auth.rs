//! # Authentication Module
//!
//! Admin endpoints take an [`AdminAccess`] extractor. It reads the
//! `Authorization: Bearer <token>` header and asks the configured
//! [`AdminKey`](eventhall_core::auth::AdminKey) for a grant, so a handler
//! that compiles with `AdminAccess` in its arguments cannot run
//! unauthenticated.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use eventhall_core::auth::AdminGrant;

use crate::{middleware::error_handling::AppError, ApiState};

pub struct AdminAccess(pub AdminGrant);

/// Returns the token of a `Bearer` authorization header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if scheme.eq_ignore_ascii_case("bearer") {
        Some(token.trim())
    } else {
        None
    }
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AdminAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).unwrap_or_default();

        match state.admin_key.authorize(token) {
            Ok(grant) => Ok(AdminAccess(grant)),
            Err(err) => {
                tracing::warn!("Rejected admin request to {}: {}", parts.uri.path(), err);
                Err(AppError(err))
            }
        }
    }
}
