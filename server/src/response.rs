use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

//--------------------------------------------------------------------------------------------------
// Error handling
//--------------------------------------------------------------------------------------------------

// Any errors returned by a handler should confirm to this
pub trait ApiError: Sized {
    fn response_data(&self) -> (StatusCode, &'static str, String);
}

pub struct StandaloneError<E>(E)
where
    E: ApiError;

impl<T> From<T> for StandaloneError<T>
where
    T: ApiError,
{
    fn from(err: T) -> Self {
        StandaloneError(err)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    code: &'static str,
    message: String,
}

//--------------------------------------------------------------------------------------------------
// Signed token handling
//--------------------------------------------------------------------------------------------------

const CONTENT_TYPE_JWT: &str = "application/jwt";

pub struct JwtResponse<E: ApiError>(Result<String, E>);

impl<E: ApiError> From<Result<String, E>> for JwtResponse<E> {
    fn from(r: Result<String, E>) -> Self {
        JwtResponse(r)
    }
}

//--------------------------------------------------------------------------------------------------
// HTTP 201 handling
//--------------------------------------------------------------------------------------------------

pub struct CreatedResponse<E: ApiError>(Result<(), E>);

impl<E: ApiError> From<Result<(), E>> for CreatedResponse<E> {
    fn from(r: Result<(), E>) -> Self {
        CreatedResponse(r)
    }
}

impl<E: ApiError> From<E> for CreatedResponse<E> {
    fn from(err: E) -> Self {
        CreatedResponse(Err(err))
    }
}

//--------------------------------------------------------------------------------------------------
// IntoResponse handling
//--------------------------------------------------------------------------------------------------

impl<E: ApiError> IntoResponse for JwtResponse<E> {
    fn into_response(self) -> Response {
        match self.0 {
            Ok(token) => ([(header::CONTENT_TYPE, CONTENT_TYPE_JWT)], token).into_response(),
            Err(err) => StandaloneError(err).into_response(),
        }
    }
}

impl<E: ApiError> IntoResponse for CreatedResponse<E> {
    fn into_response(self) -> Response {
        match self.0 {
            Ok(()) => StatusCode::CREATED.into_response(),
            Err(err) => StandaloneError(err).into_response(),
        }
    }
}

impl<E: ApiError> IntoResponse for StandaloneError<E> {
    fn into_response(self) -> Response {
        let (status_code, code, message) = self.0.response_data();
        let body = ErrorResponse { code, message };
        (status_code, Json(body)).into_response()
    }
}

//--------------------------------------------------------------------------------------------------
