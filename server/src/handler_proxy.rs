use crate::handlers::auth::LoginError;
use crate::handlers::users::{CreateUserRequest, UserError};
use crate::handlers::{auth, users};
use crate::response::{CreatedResponse, JwtResponse};
use crate::state::StateRef;
use axum::extract::State;
use axum::Json;
use axum_extra::headers::authorization::Basic;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use useradm::extract::{InitialUser, Login, RequireAuthorization, Users};

//--------------------------------------------------------------------------------------------------
// Types to represent permissions for the handlers
//--------------------------------------------------------------------------------------------------

#[allow(dead_code)]
pub struct SigningAccess(bool);

//--------------------------------------------------------------------------------------------------
// Re-export handlers, but grant handler access where applicable
//--------------------------------------------------------------------------------------------------

// login needs to be able to issue JWTs for credentialed users, so needs signing access
pub async fn login(
    _: RequireAuthorization<Login>,
    state: State<StateRef>,
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
) -> JwtResponse<LoginError> {
    auth::login(SigningAccess(true), state, auth_header).await
}

//--------------------------------------------------------------------------------------------------

pub async fn create_user_initial(
    state: State<StateRef>,
    _: RequireAuthorization<InitialUser>,
    request: Json<CreateUserRequest>,
) -> CreatedResponse<UserError> {
    users::create_user_initial(state, request).await
}

pub async fn create_user(
    state: State<StateRef>,
    _: RequireAuthorization<Users>,
    request: Json<CreateUserRequest>,
) -> CreatedResponse<UserError> {
    users::create_user(state, request).await
}

//--------------------------------------------------------------------------------------------------
