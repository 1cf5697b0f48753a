use crate::response::{ApiError, CreatedResponse};
use crate::state::StateRef;
use crate::types::{Password, PasswordDigest};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::{error, warn};
use useradm::store::UserModel;
use useradm::UserAdmError;

//--------------------------------------------------------------------------------------------------
// Requests
//--------------------------------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: Password,
}

//--------------------------------------------------------------------------------------------------
// Errors
//--------------------------------------------------------------------------------------------------

pub enum UserError {
    InvalidRequest,
    DuplicateEmail,
    UserNotInitial,
    DatabaseError,
    CryptoError,
}

impl ApiError for UserError {
    fn response_data(&self) -> (StatusCode, &'static str, String) {
        match self {
            UserError::InvalidRequest => (
                StatusCode::BAD_REQUEST,
                "invalid_request",
                "Email and password must not be empty".to_string(),
            ),
            UserError::DuplicateEmail => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "duplicate_email",
                "User with the same email already exists".to_string(),
            ),
            UserError::UserNotInitial => (
                StatusCode::CONFLICT,
                "user_not_initial",
                "The initial user has already been created".to_string(),
            ),
            UserError::DatabaseError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                "Database error".to_string(),
            ),
            UserError::CryptoError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "crypto_error",
                "Crypto error".to_string(),
            ),
        }
    }
}

impl From<UserAdmError> for UserError {
    fn from(err: UserAdmError) -> Self {
        match err {
            UserAdmError::DuplicateEmail => {
                warn!("User with the same email already exists");
                UserError::DuplicateEmail
            }
            UserAdmError::UserNotInitial => {
                warn!("Initial user already exists");
                UserError::UserNotInitial
            }
            err => {
                error!("Failed to create user: {}", err);
                UserError::DatabaseError
            }
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Helpers
//--------------------------------------------------------------------------------------------------

fn new_user(request: CreateUserRequest) -> Result<UserModel, UserError> {
    if request.email.is_empty() || request.password.is_empty() {
        warn!("Create user request with empty email or password");
        return Err(UserError::InvalidRequest);
    }

    let digest = match PasswordDigest::from_password(&request.password) {
        Ok(digest) => digest,
        Err(err) => {
            error!("Failed to hash password for {:?}: {}", request.email, err);
            return Err(UserError::CryptoError);
        }
    };

    Ok(UserModel {
        id: uuid::Uuid::new_v4().to_string(),
        email: request.email,
        password: digest.into(),
    })
}

//--------------------------------------------------------------------------------------------------
// Handlers
//--------------------------------------------------------------------------------------------------

pub async fn create_user(
    State(state): State<StateRef>,
    Json(request): Json<CreateUserRequest>,
) -> CreatedResponse<UserError> {
    let user = match new_user(request) {
        Ok(user) => user,
        Err(err) => return err.into(),
    };

    state
        .useradm()
        .create_user(&user)
        .await
        .map_err(UserError::from)
        .into()
}

pub async fn create_user_initial(
    State(state): State<StateRef>,
    Json(request): Json<CreateUserRequest>,
) -> CreatedResponse<UserError> {
    let user = match new_user(request) {
        Ok(user) => user,
        Err(err) => return err.into(),
    };

    state
        .useradm()
        .create_user_initial(&user)
        .await
        .map_err(UserError::from)
        .into()
}

//--------------------------------------------------------------------------------------------------
