use crate::claims::{Claims, Token};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use tracing::{debug, warn};

//--------------------------------------------------------------------------------------------------
// Errors
//--------------------------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SigningError {
    #[error("jwt: no private key to sign with")]
    MissingKey,
    #[error("jwt: failed to sign token: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("jwt: no public key to verify with")]
    MissingKey,
    #[error("jwt: token invalid")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("jwt: failed to parse private key: {0}")]
    PrivateKey(#[source] jsonwebtoken::errors::Error),
    #[error("jwt: failed to parse public key: {0}")]
    PublicKey(#[source] jsonwebtoken::errors::Error),
}

//--------------------------------------------------------------------------------------------------
// Trait for anything that can turn tokens into signed strings and back
//--------------------------------------------------------------------------------------------------

pub trait JwtHandler: Send + Sync {
    /// Sign the token's claims exactly as given. Nothing is filled in on the caller's behalf.
    fn to_jwt(&self, token: &Token) -> Result<String, SigningError>;

    /// Check structure, algorithm and signature, and return the claims.
    fn from_jwt(&self, token: &str) -> Result<Token, TokenError>;
}

//--------------------------------------------------------------------------------------------------
// RS256 implementation
//--------------------------------------------------------------------------------------------------

const ALGORITHM: Algorithm = Algorithm::RS256;

pub struct JwtHandlerRs256 {
    private_key: Option<EncodingKey>,
    public_key: Option<DecodingKey>,
    validation: Validation,
}

impl JwtHandlerRs256 {
    pub fn new(private_key: Option<EncodingKey>, public_key: Option<DecodingKey>) -> Self {
        // Only RS256 is accepted, whatever the header claims. Expiry and not-before are checked
        // when present, but no claim is mandatory.
        let mut validation = Validation::new(ALGORITHM);
        validation.algorithms = vec![ALGORITHM];
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            private_key,
            public_key,
            validation,
        }
    }

    pub fn from_pem(
        private_pem: Option<&[u8]>,
        public_pem: Option<&[u8]>,
    ) -> Result<Self, KeyError> {
        let private_key = private_pem
            .map(EncodingKey::from_rsa_pem)
            .transpose()
            .map_err(KeyError::PrivateKey)?;
        let public_key = public_pem
            .map(DecodingKey::from_rsa_pem)
            .transpose()
            .map_err(KeyError::PublicKey)?;

        Ok(Self::new(private_key, public_key))
    }
}

impl JwtHandler for JwtHandlerRs256 {
    fn to_jwt(&self, token: &Token) -> Result<String, SigningError> {
        let Some(private_key) = &self.private_key else {
            warn!("Asked to sign a token without a private key");
            return Err(SigningError::MissingKey);
        };

        let signed = encode(&Header::new(ALGORITHM), &token.claims, private_key)?;

        debug!("Signed token {:?} for {:?}", token.claims.id, token.claims.subject);

        Ok(signed)
    }

    fn from_jwt(&self, token: &str) -> Result<Token, TokenError> {
        let Some(public_key) = &self.public_key else {
            warn!("Asked to verify a token without a public key");
            return Err(TokenError::MissingKey);
        };

        let claims = match decode::<Claims>(token, public_key, &self.validation) {
            Ok(data) => data.claims,
            Err(err) => {
                warn!("Token failed validation: {:?}", err);
                return Err(TokenError::Invalid(err));
            }
        };

        Ok(Token::new(claims))
    }
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
