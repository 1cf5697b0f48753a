use async_trait::async_trait;
use std::sync::Mutex;
use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// User record
//--------------------------------------------------------------------------------------------------

/// A user as handed to the store. The password is stored as given; hashing it is the caller's
/// business.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserModel {
    pub id: String,
    pub email: String,
    pub password: String,
}

//--------------------------------------------------------------------------------------------------
// Store contract
//--------------------------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user with the same email already exists")]
    DuplicateEmail,
    /// Another user got into the store first.
    #[error("user database not empty")]
    UserNotInitial,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait DataStore: Send + Sync {
    async fn is_empty(&self) -> Result<bool, StoreError>;

    /// Must fail with `StoreError::DuplicateEmail` if the email is already taken.
    async fn create_user(&self, user: &UserModel) -> Result<(), StoreError>;

    /// Creates the user only if the store is empty, as one atomic step. Must fail with
    /// `StoreError::UserNotInitial` if any user exists.
    async fn create_user_initial(&self, user: &UserModel) -> Result<(), StoreError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserModel>, StoreError>;
}

//--------------------------------------------------------------------------------------------------
// In-memory store
//--------------------------------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<UserModel>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_users<T>(&self, f: impl FnOnce(&mut Vec<UserModel>) -> T) -> Result<T, StoreError> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        Ok(f(&mut users))
    }
}

fn push_user(users: &mut Vec<UserModel>, user: &UserModel) -> Result<(), StoreError> {
    if users.iter().any(|u| u.email == user.email) {
        return Err(StoreError::DuplicateEmail);
    }
    users.push(user.clone());
    Ok(())
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn is_empty(&self) -> Result<bool, StoreError> {
        self.with_users(|users| users.is_empty())
    }

    async fn create_user(&self, user: &UserModel) -> Result<(), StoreError> {
        self.with_users(|users| push_user(users, user))?
    }

    async fn create_user_initial(&self, user: &UserModel) -> Result<(), StoreError> {
        self.with_users(|users| {
            if !users.is_empty() {
                return Err(StoreError::UserNotInitial);
            }
            push_user(users, user)
        })?
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserModel>, StoreError> {
        self.with_users(|users| users.iter().find(|u| u.email == email).cloned())
    }
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> UserModel {
        UserModel {
            id: email.to_string(),
            email: email.to_string(),
            password: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn becomes_non_empty_after_create() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await.unwrap());

        store.create_user(&user("foo@bar.com")).await.unwrap();
        assert!(!store.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let store = MemoryStore::new();
        store.create_user(&user("foo@bar.com")).await.unwrap();

        let err = store.create_user(&user("foo@bar.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[tokio::test]
    async fn initial_create_only_into_empty_store() {
        let store = MemoryStore::new();
        store.create_user_initial(&user("foo@bar.com")).await.unwrap();

        let err = store.create_user_initial(&user("bar@foo.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::UserNotInitial));
        assert_eq!(store.get_user_by_email("bar@foo.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn finds_user_by_email() {
        let store = MemoryStore::new();
        store.create_user(&user("foo@bar.com")).await.unwrap();

        assert_eq!(
            store.get_user_by_email("foo@bar.com").await.unwrap(),
            Some(user("foo@bar.com"))
        );
        assert_eq!(store.get_user_by_email("bar@foo.com").await.unwrap(), None);
    }
}

//--------------------------------------------------------------------------------------------------
