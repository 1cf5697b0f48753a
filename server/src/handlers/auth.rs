use crate::handler_proxy::SigningAccess;
use crate::response::{ApiError, JwtResponse};
use crate::state::StateRef;
use crate::token::user_token;
use crate::types::{Password, PasswordDigest};
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::headers::authorization::Basic;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use tracing::{error, info, warn};
use useradm::{Credentials, UserAdmError};

//--------------------------------------------------------------------------------------------------
// Errors
//--------------------------------------------------------------------------------------------------

pub enum LoginError {
    InvalidCredentials,
    TokenGenerationError,
    DatabaseError,
    CryptoError,
}

impl ApiError for LoginError {
    fn response_data(&self) -> (StatusCode, &'static str, String) {
        match self {
            LoginError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Invalid credentials".to_string(),
            ),
            LoginError::TokenGenerationError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "token_generation_error",
                "Error generating token".to_string(),
            ),
            LoginError::DatabaseError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                "Error accessing database".to_string(),
            ),
            LoginError::CryptoError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "crypto_error",
                "Error with cryptographic operations".to_string(),
            ),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Handler
//--------------------------------------------------------------------------------------------------

pub async fn login(
    signing_access: SigningAccess,
    State(state): State<StateRef>,
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
) -> JwtResponse<LoginError> {
    let credentials = match auth_header {
        Some(TypedHeader(Authorization(basic))) => Credentials {
            email: basic.username().to_string(),
            password: basic.password().to_string(),
        },
        None => Credentials::default(),
    };

    // While there are no users, anyone gets a token that can only create the first one
    match state.useradm().login(&credentials).await {
        Ok(issued) => return Ok(issued.signed).into(),
        Err(UserAdmError::Unauthorized) => (),
        Err(UserAdmError::Signing(err)) => {
            error!("Error generating initial token: {}", err);
            return Err(LoginError::TokenGenerationError).into();
        }
        Err(err) => {
            error!("Error during initial login: {}", err);
            return Err(LoginError::DatabaseError).into();
        }
    }

    if credentials.email.is_empty() {
        warn!("Login without credentials on a non-empty store");
        return Err(LoginError::InvalidCredentials).into();
    }

    // Get the user - if it doesn't exist return generic invalid credentials
    let user = match state.db().get_user_by_email(&credentials.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!("User {:?} not found", credentials.email);
            return Err(LoginError::InvalidCredentials).into();
        }
        Err(err) => {
            error!("Error accessing database to get user: {}", err);
            return Err(LoginError::DatabaseError).into();
        }
    };

    let digest = PasswordDigest::from(user.password.clone());
    let password_passes = match digest.validate(&Password::from(credentials.password.as_str())) {
        Ok(password_passes) => password_passes,
        Err(err) => {
            error!("Error validating password: {}", err);
            return Err(LoginError::CryptoError).into();
        }
    };

    if !password_passes {
        warn!("Invalid password for user {:?}", credentials.email);
        return Err(LoginError::InvalidCredentials).into();
    }

    // WE HAVE VALIDATED THE USER

    let token = user_token(&user, state.useradm().config());
    let signed = match state.sign(signing_access, &token) {
        Ok(signed) => signed,
        Err(err) => {
            error!("Error generating token: {}", err);
            return Err(LoginError::TokenGenerationError).into();
        }
    };

    info!("User {:?} logged in - token issued", credentials.email);

    Ok(signed).into()
}

//--------------------------------------------------------------------------------------------------
