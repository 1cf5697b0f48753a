use crate::jwt::JwtHandler;
use crate::scope::Scope;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

//--------------------------------------------------------------------------------------------------
// Resources and actions
//--------------------------------------------------------------------------------------------------

pub const RESOURCE_LOGIN: &str = "auth:login";
pub const RESOURCE_INITIAL_USER: &str = "users:initial";
pub const RESOURCE_USERS: &str = "users";

pub const ACTION_POST: &str = "POST";

//--------------------------------------------------------------------------------------------------
// Authorizer
//--------------------------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthzError {
    #[error("authz: token invalid")]
    TokenInvalid,
    #[error("authz: unauthorized")]
    Unauthorized,
}

pub trait Authorizer: Send + Sync {
    fn authorize(&self, token: &str, resource: &str, action: &str) -> Result<(), AuthzError>;
}

/// The scope table. Login never reaches it, it is let through before any token is looked at.
fn scope_allows(scope: Scope, resource: &str, action: &str) -> bool {
    match scope {
        Scope::InitialUserCreate => action == ACTION_POST && resource == RESOURCE_INITIAL_USER,
        Scope::All => true,
        Scope::Unknown => false,
    }
}

/// Decides purely on the token's scope. Mostly there so the initial user can be created with a
/// token that is good for nothing else.
pub struct SimpleAuthz {
    jwt_handler: Arc<dyn JwtHandler>,
}

impl SimpleAuthz {
    pub fn new(jwt_handler: Arc<dyn JwtHandler>) -> Self {
        Self { jwt_handler }
    }
}

impl Authorizer for SimpleAuthz {
    fn authorize(&self, token: &str, resource: &str, action: &str) -> Result<(), AuthzError> {
        // Logging in must never need a token
        if resource == RESOURCE_LOGIN {
            return Ok(());
        }

        let Ok(token) = self.jwt_handler.from_jwt(token) else {
            warn!("Denied {} {}: token invalid", action, resource);
            return Err(AuthzError::TokenInvalid);
        };

        let claims = token.claims;
        if scope_allows(claims.scope(), resource, action) {
            debug!("Allowed {} {} for {:?}", action, resource, claims.subject);
            Ok(())
        } else {
            warn!(
                "Denied {} {} for {:?} with scope {:?}",
                action, resource, claims.subject, claims.scope
            );
            Err(AuthzError::Unauthorized)
        }
    }
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
