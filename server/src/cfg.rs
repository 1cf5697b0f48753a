use serde::Deserialize;

//--------------------------------------------------------------------------------------------------
// Config to be read from file
//--------------------------------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct Config {
    #[serde(default)]
    pub debug: bool,
    pub http_port: Option<u16>,
    pub postgres_connection_string: String,
    pub private_key_path: String,
    pub public_key_path: String,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Seconds
    #[serde(default = "default_expiration_time")]
    pub expiration_time: i64,
}

fn default_issuer() -> String {
    "Mender".to_string()
}

fn default_expiration_time() -> i64 {
    // One week
    7 * 24 * 60 * 60
}

//--------------------------------------------------------------------------------------------------
