use diesel::prelude::*;
use time::OffsetDateTime;
use useradm::store::UserModel;

//--------------------------------------------------------------------------------------------------
// Database Models
//--------------------------------------------------------------------------------------------------

#[derive(Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: String,
    pub email: String,
    pub password: String,
    pub created_at: OffsetDateTime,
}

impl From<User> for UserModel {
    fn from(user: User) -> Self {
        UserModel {
            id: user.id,
            email: user.email,
            password: user.password,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a UserModel> for NewUser<'a> {
    fn from(user: &'a UserModel) -> Self {
        NewUser {
            id: &user.id,
            email: &user.email,
            password: &user.password,
        }
    }
}

//--------------------------------------------------------------------------------------------------
