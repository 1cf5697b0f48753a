use crate::db_models::NewUser;
use crate::queries::{create_initial_user, create_user, get_user_by_email, get_user_count};
use async_trait::async_trait;
use bb8::Pool;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::{Connection, PgConnection};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{debug, info, warn};
use useradm::store::{DataStore, StoreError, UserModel};

//--------------------------------------------------------------------------------------------------
// DB Pool Type
//--------------------------------------------------------------------------------------------------

pub type DbConnectionPool = Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;

//--------------------------------------------------------------------------------------------------
// Migrations
//--------------------------------------------------------------------------------------------------

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub async fn run_migrations(connection_string: String) -> anyhow::Result<()> {
    // Get a connection and run migrations - we cannot use diesel_async because it doesn't have
    // run_pending_migrations
    let db_conn = &mut PgConnection::establish(&connection_string)?;
    let migrations_done = db_conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| anyhow::anyhow!("Failed to run migrations: {}", err))?;
    if migrations_done.is_empty() {
        info!("No migrations to run");
    } else {
        info!("Ran migrations: {:?}", migrations_done);
    }

    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Postgres backed user store
//--------------------------------------------------------------------------------------------------

pub struct PgDataStore {
    pool: DbConnectionPool,
}

impl PgDataStore {
    pub fn new(pool: DbConnectionPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<DieselError>(),
        Some(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _))
    )
}

#[async_trait]
impl DataStore for PgDataStore {
    async fn is_empty(&self) -> Result<bool, StoreError> {
        let user_count = get_user_count(&self.pool).await?;

        debug!("User store holds {} users", user_count);

        Ok(user_count == 0)
    }

    // The only unique column besides the generated id is email
    async fn create_user(&self, user: &UserModel) -> Result<(), StoreError> {
        match create_user(&NewUser::from(user), &self.pool).await {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(StoreError::DuplicateEmail),
            Err(err) => Err(err.into()),
        }
    }

    async fn create_user_initial(&self, user: &UserModel) -> Result<(), StoreError> {
        match create_initial_user(&NewUser::from(user), &self.pool).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => {
                warn!("Users table not empty, initial user {:?} not created", user.email);
                Err(StoreError::UserNotInitial)
            }
            Err(err) if is_unique_violation(&err) => Err(StoreError::DuplicateEmail),
            Err(err) => Err(err.into()),
        }
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserModel>, StoreError> {
        let user = get_user_by_email(email, &self.pool).await?;

        Ok(user.map(UserModel::from))
    }
}

//--------------------------------------------------------------------------------------------------
