//--------------------------------------------------------------------------------------------------

mod admin;
pub mod authz;
mod claims;
#[cfg(feature = "axum-extract")]
pub mod extract;
pub mod jwt;
mod scope;
pub mod store;
pub mod unixtime;

pub use admin::{Credentials, IssuedToken, UserAdm, UserAdmConfig, UserAdmError, SUBJECT_INITIAL};
pub use claims::{Claims, Token};
pub use scope::{Scope, SCOPE_ALL, SCOPE_INITIAL_USER_CREATE};

//--------------------------------------------------------------------------------------------------
