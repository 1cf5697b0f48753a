use crate::authz::{AuthzError, Authorizer, RESOURCE_INITIAL_USER, RESOURCE_LOGIN, RESOURCE_USERS};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{async_trait, Json};
use serde::Serialize;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, warn};

//--------------------------------------------------------------------------------------------------
// Trait for Axum states to comply with to provide the authorizer
//--------------------------------------------------------------------------------------------------

pub trait AuthorizerProvider {
    fn authorizer(&self) -> &dyn Authorizer;
}

impl<T: AuthorizerProvider> AuthorizerProvider for Arc<T> {
    fn authorizer(&self) -> &dyn Authorizer {
        self.deref().authorizer()
    }
}

//--------------------------------------------------------------------------------------------------
// Resources a handler can be guarded by
//--------------------------------------------------------------------------------------------------

pub trait Resource {
    fn resource_id() -> &'static str;
}

pub struct Login;

impl Resource for Login {
    fn resource_id() -> &'static str {
        RESOURCE_LOGIN
    }
}

pub struct InitialUser;

impl Resource for InitialUser {
    fn resource_id() -> &'static str {
        RESOURCE_INITIAL_USER
    }
}

pub struct Users;

impl Resource for Users {
    fn resource_id() -> &'static str {
        RESOURCE_USERS
    }
}

//--------------------------------------------------------------------------------------------------
// Extract Error
//--------------------------------------------------------------------------------------------------

#[derive(Debug)]
pub enum ExtractError {
    TokenInvalid,
    Unauthorized,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    code: &'static str,
    message: String,
}

impl IntoResponse for ExtractError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ExtractError::TokenInvalid => {
                (StatusCode::UNAUTHORIZED, "unauthorized", "Unauthorized")
            }
            ExtractError::Unauthorized => (StatusCode::FORBIDDEN, "forbidden", "Forbidden"),
        };

        (
            status,
            Json(ErrorResponse {
                code,
                message: message.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<AuthzError> for ExtractError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::TokenInvalid => ExtractError::TokenInvalid,
            AuthzError::Unauthorized => ExtractError::Unauthorized,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Token extraction
//--------------------------------------------------------------------------------------------------

const AUTHORIZATION_BEARER_SCHEME: &str = "Bearer";

// A missing or malformed header gives an empty token, which the authorizer rejects for anything
// but login. The scheme name is case-insensitive.
fn bearer_token(parts: &Parts) -> &str {
    let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) else {
        debug!("Request made with no Authorization header");
        return "";
    };

    let Ok(auth_header_str) = auth_header.to_str() else {
        warn!("Request made with Authorization header with more than visible ASCII characters");
        return "";
    };

    match auth_header_str.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case(AUTHORIZATION_BEARER_SCHEME) => token,
        _ => "",
    }
}

//--------------------------------------------------------------------------------------------------
// Axum extractor to enforce authorization
//--------------------------------------------------------------------------------------------------

/// Runs the authorizer for resource `R`, using the request method as the action.
pub struct RequireAuthorization<R>(PhantomData<R>)
where
    R: Resource;

#[async_trait]
impl<S, R> FromRequestParts<S> for RequireAuthorization<R>
where
    S: AuthorizerProvider + Send + Sync,
    R: Resource + Send + Sync,
{
    type Rejection = ExtractError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let resource = R::resource_id();
        let action = parts.method.as_str();

        state
            .authorizer()
            .authorize(bearer_token(parts), resource, action)?;

        debug!("Request authorized for {} {}", action, resource);

        Ok(RequireAuthorization(PhantomData))
    }
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
