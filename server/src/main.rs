use crate::cfg::Config;
use crate::db::{run_migrations, PgDataStore};
use crate::router::router;
use crate::state::State;
use anyhow::Result;
use diesel_async::pooled_connection::bb8::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use std::fs;
use std::sync::Arc;
use tracing::{info, Level};
use useradm::jwt::JwtHandlerRs256;
use useradm::store::DataStore;
use useradm::UserAdmConfig;

//--------------------------------------------------------------------------------------------------

mod cfg;
mod db;
mod db_models;
mod handler_proxy;
mod handlers;
mod queries;
mod response;
mod router;
mod schema;
mod state;
mod token;
mod types;

#[cfg(test)]
mod tests;

//--------------------------------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // Load config
    let cfg: Config = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::File::with_name("config.local").required(false))
        .add_source(config::Environment::with_prefix("USERADM").separator("__"))
        .build()?
        .try_deserialize()?;

    // Initialize tracing
    let mut fmt_sub = tracing_subscriber::fmt();
    if cfg.debug {
        fmt_sub = fmt_sub.with_max_level(Level::DEBUG);
    } else {
        fmt_sub = fmt_sub.with_max_level(Level::INFO);
    }
    fmt_sub.init();

    // Read key files
    let private_key = fs::read(&cfg.private_key_path)?;
    let public_key = fs::read(&cfg.public_key_path)?;
    let jwt_handler =
        JwtHandlerRs256::from_pem(Some(private_key.as_slice()), Some(public_key.as_slice()))?;

    // Run the migrations
    run_migrations(cfg.postgres_connection_string.clone()).await?;

    // Open the database pool
    let db_cfg =
        AsyncDieselConnectionManager::<AsyncPgConnection>::new(cfg.postgres_connection_string);
    let pool = Pool::builder().build(db_cfg).await?;
    let store = Arc::new(PgDataStore::new(pool));

    if store.is_empty().await? {
        info!("No users yet - the first login will issue an initial user token");
    }

    // Create state
    let user_adm_config = UserAdmConfig {
        issuer: cfg.issuer,
        expiration_time: cfg.expiration_time,
    };
    let state = State::new(Arc::new(jwt_handler), store, user_adm_config);

    // Run the API
    let app = router(state.into());
    let bind_addr = format!("0.0.0.0:{}", cfg.http_port.unwrap_or(8080));
    info!("Listening on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//--------------------------------------------------------------------------------------------------
