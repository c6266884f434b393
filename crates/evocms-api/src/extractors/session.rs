//! Extractors for what the session middleware left in the request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use evocms_core::error::AppError;
use evocms_service::RequestContext;

use crate::error::ApiError;
use crate::middleware::SessionHandle;

/// The visitor's session.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub SessionHandle);

impl<S: Send + Sync> FromRequestParts<S> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionHandle>()
            .cloned()
            .map(Self)
            .ok_or_else(|| ApiError(AppError::internal("Session middleware is not installed")))
    }
}

/// Who is asking, as seen by the session middleware.
#[derive(Debug, Clone)]
pub struct Visitor(pub RequestContext);

impl std::ops::Deref for Visitor {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Visitor {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(Self)
            .ok_or_else(|| ApiError(AppError::internal("Session middleware is not installed")))
    }
}
