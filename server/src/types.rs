use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{password_hash, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use serde::Deserialize;

//--------------------------------------------------------------------------------------------------
// New types
//--------------------------------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct Password(String);

impl From<&str> for Password {
    fn from(p: &str) -> Self {
        Password(p.to_string())
    }
}

impl Password {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An argon2 PHC string, which is what the user store keeps in place of the password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl From<PasswordDigest> for String {
    fn from(digest: PasswordDigest) -> Self {
        digest.0
    }
}

impl From<String> for PasswordDigest {
    fn from(s: String) -> Self {
        PasswordDigest(s)
    }
}

impl PasswordDigest {
    pub fn validate(&self, password: &Password) -> password_hash::Result<bool> {
        let hash = PasswordHash::new(&self.0)?;

        match Argon2::default().verify_password(password.0.as_bytes(), &hash) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn from_password(password: &Password) -> password_hash::Result<Self> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default().hash_password(password.0.as_bytes(), &salt)?;

        Ok(PasswordDigest(hash.to_string()))
    }
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
