//! Session resolution for inbound requests.
//!
//! Sessions are created elsewhere (the auth frontend); this service only
//! translates an ambient token into a user identity. The token travels as
//! `Authorization: Bearer <token>` or the `eventia_session` cookie.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};

use crate::models::user::AuthUser;
use crate::repo;
use crate::state::AppState;
use crate::utils::error::AppError;

pub const SESSION_COOKIE: &str = "eventia_session";

/// Extractor for the authenticated caller. Rejects with `Unauthorized`
/// before the handler body runs, so protected handlers perform no side
/// effects for anonymous requests.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthUser);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or(AppError::Unauthorized)?;

        let user = repo::sessions::find_user_by_token(&state.pool, &token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(Self(user))
    }
}

fn session_token(headers: &HeaderMap) -> Option<String> {
    bearer_token(headers).or_else(|| cookie_token(headers))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}
