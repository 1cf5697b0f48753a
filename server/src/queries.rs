use crate::db::DbConnectionPool;
use crate::db_models::{NewUser, User};
use diesel::dsl::insert_into;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::*;

//--------------------------------------------------------------------------------------------------
// Get user count
//--------------------------------------------------------------------------------------------------

pub async fn get_user_count(db_connection_pool: &DbConnectionPool) -> Result<i64, anyhow::Error> {
    use crate::schema::users::dsl::users;

    let mut db_connection = db_connection_pool.get().await?;
    let user_count = users.count().get_result(&mut db_connection).await?;

    Ok(user_count)
}

//--------------------------------------------------------------------------------------------------
// Get user by email
//--------------------------------------------------------------------------------------------------

pub async fn get_user_by_email(
    user_email: &str,
    db_connection_pool: &DbConnectionPool,
) -> Result<Option<User>, anyhow::Error> {
    use crate::schema::users::dsl::*;

    let mut db_connection = db_connection_pool.get().await?;
    let user = users
        .filter(email.eq(user_email))
        .select(User::as_select())
        .first::<User>(&mut db_connection)
        .await
        .optional()?;

    Ok(user)
}

//--------------------------------------------------------------------------------------------------
// Create user
//--------------------------------------------------------------------------------------------------

pub async fn create_user(
    new_user: &NewUser<'_>,
    db_connection_pool: &DbConnectionPool,
) -> Result<User, anyhow::Error> {
    use crate::schema::users::dsl::users;

    let mut db_connection = db_connection_pool.get().await?;
    let user = insert_into(users)
        .values(new_user)
        .returning(User::as_returning())
        .get_result(&mut db_connection)
        .await?;

    Ok(user)
}

//--------------------------------------------------------------------------------------------------
// Create initial user
//--------------------------------------------------------------------------------------------------

/// Inserts the user only if the table is empty. Returns `None` if another user got there first.
pub async fn create_initial_user(
    new_user: &NewUser<'_>,
    db_connection_pool: &DbConnectionPool,
) -> Result<Option<User>, anyhow::Error> {
    use crate::schema::users::dsl::users;

    let mut db_connection = db_connection_pool.get().await?;
    let user = db_connection
        .transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                // Writers queue up here until the winner commits, readers are not blocked
                diesel::sql_query("LOCK TABLE users IN EXCLUSIVE MODE")
                    .execute(conn)
                    .await?;

                let user_count: i64 = users.count().get_result(conn).await?;
                if user_count > 0 {
                    return Ok(None);
                }

                let user = insert_into(users)
                    .values(new_user)
                    .returning(User::as_returning())
                    .get_result(conn)
                    .await?;

                Ok(Some(user))
            }
            .scope_boxed()
        })
        .await?;

    Ok(user)
}

//--------------------------------------------------------------------------------------------------
