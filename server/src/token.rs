use useradm::store::UserModel;
use useradm::unixtime::UnixTimestamp;
use useradm::{Claims, Token, UserAdmConfig, SCOPE_ALL};

//--------------------------------------------------------------------------------------------------
// Tokens for users who logged in with credentials
//--------------------------------------------------------------------------------------------------

// Make sure we only assemble it here, so we can be sure it's valid
pub fn user_token(user: &UserModel, config: &UserAdmConfig) -> Token {
    let now = UnixTimestamp::now();
    Token::new(Claims {
        id: uuid::Uuid::new_v4().to_string(),
        subject: user.id.clone(),
        issuer: config.issuer.clone(),
        issued_at: now,
        expires_at: now.add_seconds(config.expiration_time),
        scope: SCOPE_ALL.to_string(),
        ..Default::default()
    })
}

//--------------------------------------------------------------------------------------------------
