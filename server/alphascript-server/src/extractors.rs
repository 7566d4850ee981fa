use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use error_common::codes;
use record_store::UserId;

use crate::error::ApiError;
use crate::server::AlphaScriptServer;

/// The user behind the request's bearer token
///
/// Usage:
/// ```rust,ignore
/// pub async fn handler(CurrentUser(user): CurrentUser, ...) -> ApiResult<...> {
///     server.store.list_patients(user).await?;
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

#[async_trait]
impl FromRequestParts<AlphaScriptServer> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        server: &AlphaScriptServer,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| {
                ApiError::authentication(
                    codes::authentication::MISSING_TOKEN,
                    "Missing bearer token in Authorization header",
                )
            })?;

        let user = server.store.authenticate(token).await?;
        Ok(CurrentUser(user))
    }
}

fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
