use crate::claims::{Claims, Token};
use crate::jwt::{JwtHandler, SigningError};
use crate::scope::SCOPE_INITIAL_USER_CREATE;
use crate::store::{DataStore, StoreError, UserModel};
use crate::unixtime::UnixTimestamp;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

//--------------------------------------------------------------------------------------------------
// Config and errors
//--------------------------------------------------------------------------------------------------

pub const SUBJECT_INITIAL: &str = "initial";

#[derive(Clone, Debug, Default)]
pub struct UserAdmConfig {
    /// Stamped into every token this service issues
    pub issuer: String,
    /// Token lifetime in seconds
    pub expiration_time: i64,
}

const CONTEXT_LOGIN_QUERY: &str = "failed to query database";
const CONTEXT_IS_EMPTY: &str = "failed to check if db is empty";
const CONTEXT_CREATE: &str = "failed to create user in the db";

#[derive(Debug, Error)]
pub enum UserAdmError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("user with the same email already exists")]
    DuplicateEmail,
    #[error("user database not empty")]
    UserNotInitial,
    #[error("useradm: {context}: {source}")]
    Datastore {
        context: &'static str,
        source: StoreError,
    },
    #[error(transparent)]
    Signing(#[from] SigningError),
}

fn create_error(err: StoreError) -> UserAdmError {
    match err {
        StoreError::DuplicateEmail => UserAdmError::DuplicateEmail,
        StoreError::UserNotInitial => UserAdmError::UserNotInitial,
        source => UserAdmError::Datastore {
            context: CONTEXT_CREATE,
            source,
        },
    }
}

//--------------------------------------------------------------------------------------------------
// Login and provisioning
//--------------------------------------------------------------------------------------------------

#[derive(Clone, Debug, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// A freshly issued token together with its signed form.
#[derive(Clone, Debug)]
pub struct IssuedToken {
    pub token: Token,
    pub signed: String,
}

pub struct UserAdm {
    jwt_handler: Arc<dyn JwtHandler>,
    db: Arc<dyn DataStore>,
    config: UserAdmConfig,
}

impl UserAdm {
    pub fn new(
        jwt_handler: Arc<dyn JwtHandler>,
        db: Arc<dyn DataStore>,
        config: UserAdmConfig,
    ) -> Self {
        Self {
            jwt_handler,
            db,
            config,
        }
    }

    pub fn config(&self) -> &UserAdmConfig {
        &self.config
    }

    /// Issues the initial-user token while the store is empty. Any other login is refused here;
    /// credential checks happen before this is reached, or not at all.
    pub async fn login(&self, credentials: &Credentials) -> Result<IssuedToken, UserAdmError> {
        let empty = self
            .db
            .is_empty()
            .await
            .map_err(|source| UserAdmError::Datastore {
                context: CONTEXT_LOGIN_QUERY,
                source,
            })?;

        if !empty {
            debug!("Store not empty, no initial token for {:?}", credentials.email);
            return Err(UserAdmError::Unauthorized);
        }

        let now = UnixTimestamp::now();
        let token = Token::new(Claims {
            id: uuid::Uuid::new_v4().to_string(),
            subject: SUBJECT_INITIAL.to_string(),
            issuer: self.config.issuer.clone(),
            issued_at: now,
            expires_at: now.add_seconds(self.config.expiration_time),
            scope: SCOPE_INITIAL_USER_CREATE.to_string(),
            ..Default::default()
        });

        let signed = self.jwt_handler.to_jwt(&token).inspect_err(|err| {
            error!("Failed to sign initial token: {}", err);
        })?;

        info!("Issued initial user token {:?}", token.claims.id);

        Ok(IssuedToken { token, signed })
    }

    pub async fn create_user(&self, user: &UserModel) -> Result<(), UserAdmError> {
        self.db.create_user(user).await.map_err(create_error)?;

        info!("Created user {:?}", user.email);

        Ok(())
    }

    /// Only succeeds while the store is empty.
    pub async fn create_user_initial(&self, user: &UserModel) -> Result<(), UserAdmError> {
        let empty = self
            .db
            .is_empty()
            .await
            .map_err(|source| UserAdmError::Datastore {
                context: CONTEXT_IS_EMPTY,
                source,
            })?;

        if !empty {
            warn!("Refusing initial user {:?}: store not empty", user.email);
            return Err(UserAdmError::UserNotInitial);
        }

        // Two callers can both get here; the store's atomic insert decides who wins
        self.db
            .create_user_initial(user)
            .await
            .map_err(create_error)
            .inspect_err(|err| warn!("Initial user {:?} not created: {}", user.email, err))?;

        info!("Created initial user {:?}", user.email);

        Ok(())
    }

    /// Signing for callers that build their own claims.
    pub fn sign_token(
        &self,
    ) -> impl Fn(&Token) -> Result<String, SigningError> + Send + Sync + 'static {
        let jwt_handler = Arc::clone(&self.jwt_handler);
        move |token| jwt_handler.to_jwt(token)
    }
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
