use crate::handler_proxy::SigningAccess;
use std::sync::Arc;
use useradm::authz::{Authorizer, SimpleAuthz};
use useradm::extract::AuthorizerProvider;
use useradm::jwt::{JwtHandler, SigningError};
use useradm::store::DataStore;
use useradm::{Token, UserAdm, UserAdmConfig};

//--------------------------------------------------------------------------------------------------
// State given to the handlers
//--------------------------------------------------------------------------------------------------

pub type StateRef = Arc<State>;

pub struct State {
    useradm: UserAdm,
    authz: SimpleAuthz,
    db: Arc<dyn DataStore>,
}

impl State {
    pub fn new(
        jwt_handler: Arc<dyn JwtHandler>,
        db: Arc<dyn DataStore>,
        config: UserAdmConfig,
    ) -> Self {
        Self {
            useradm: UserAdm::new(Arc::clone(&jwt_handler), Arc::clone(&db), config),
            authz: SimpleAuthz::new(jwt_handler),
            db,
        }
    }

    pub fn useradm(&self) -> &UserAdm {
        &self.useradm
    }

    pub fn db(&self) -> &dyn DataStore {
        self.db.as_ref()
    }

    pub fn sign(
        &self,
        _signing_access: SigningAccess,
        token: &Token,
    ) -> Result<String, SigningError> {
        let sign = self.useradm.sign_token();
        sign(token)
    }
}

impl AuthorizerProvider for State {
    fn authorizer(&self) -> &dyn Authorizer {
        &self.authz
    }
}

//--------------------------------------------------------------------------------------------------
