use crate::scope::Scope;
use crate::unixtime::UnixTimestamp;
use serde::{Deserialize, Serialize};

//--------------------------------------------------------------------------------------------------
// JWT Claims object
//--------------------------------------------------------------------------------------------------

// Empty strings and epoch timestamps are left out of the payload, and absent claims decode back
// to them, so a value round-trips exactly.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Claims {
    #[serde(rename = "aud", default, skip_serializing_if = "String::is_empty")]
    pub audience: String,
    #[serde(rename = "exp", default, skip_serializing_if = "UnixTimestamp::is_epoch")]
    pub expires_at: UnixTimestamp,
    #[serde(rename = "jti", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "iat", default, skip_serializing_if = "UnixTimestamp::is_epoch")]
    pub issued_at: UnixTimestamp,
    #[serde(rename = "iss", default, skip_serializing_if = "String::is_empty")]
    pub issuer: String,
    #[serde(rename = "nbf", default, skip_serializing_if = "UnixTimestamp::is_epoch")]
    pub not_before: UnixTimestamp,
    #[serde(rename = "sub", default, skip_serializing_if = "String::is_empty")]
    pub subject: String,
    #[serde(rename = "scp", default, skip_serializing_if = "String::is_empty")]
    pub scope: String,
}

impl Claims {
    pub fn scope(&self) -> Scope {
        Scope::parse(&self.scope)
    }
}

//--------------------------------------------------------------------------------------------------
// Token
//--------------------------------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Token {
    pub claims: Claims,
}

impl Token {
    pub fn new(claims: Claims) -> Self {
        Token { claims }
    }
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
