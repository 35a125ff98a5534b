//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        library::repository::PgLibraryRepository,
        users::{
            errors::UsersServiceError,
            models::{NewUser, User, UserUuid, UserWithLibrary},
            repository::PgUsersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
    library: PgLibraryRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
            library: PgLibraryRepository::new(),
        }
    }
}

/// A validated name and email, both trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Profile {
    pub(crate) name: String,
    pub(crate) email: String,
}

/// Check a display name and email address before they are stored.
///
/// The name must not be blank. The email needs a non-empty local part, a
/// domain containing a dot, and no whitespace.
pub(crate) fn validate_profile(name: &str, email: &str) -> Result<Profile, UsersServiceError> {
    let name = name.trim();
    let email = email.trim();

    if name.is_empty() {
        return Err(UsersServiceError::InvalidData);
    }

    let well_formed = !email.chars().any(char::is_whitespace)
        && email.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        });

    if !well_formed {
        return Err(UsersServiceError::InvalidData);
    }

    Ok(Profile {
        name: name.to_string(),
        email: email.to_string(),
    })
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let user = self
            .repository
            .find_user(&mut tx, user)
            .await?
            .ok_or(UsersServiceError::NotFound)?;

        tx.commit().await?;

        Ok(user)
    }

    async fn user_exists(&self, user: UserUuid) -> Result<bool, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let exists = self.repository.user_exists(&mut tx, user).await?;

        tx.commit().await?;

        Ok(exists)
    }

    #[tracing::instrument(
        name = "users.service.create_user",
        skip(self, user),
        fields(user_uuid = %user.uuid, role = %user.role),
        err
    )]
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError> {
        let profile = validate_profile(&user.name, &user.email)?;

        let user = NewUser {
            name: profile.name,
            email: profile.email,
            ..user
        };

        let mut tx = self.db.begin_transaction().await?;

        if self.repository.email_exists(&mut tx, &user.email).await? {
            return Err(UsersServiceError::EmailTaken);
        }

        let created = self.repository.create_user(&mut tx, &user).await?;

        tx.commit().await?;

        info!(user_uuid = %created.uuid, "created user");

        Ok(created)
    }

    async fn get_user_with_library(
        &self,
        user: UserUuid,
    ) -> Result<UserWithLibrary, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let user = self
            .repository
            .find_user(&mut tx, user)
            .await?
            .ok_or(UsersServiceError::NotFound)?;

        let library = self.library.list_entries_for_user(&mut tx, user.uuid).await?;

        tx.commit().await?;

        Ok(UserWithLibrary { user, library })
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError>;

    /// Whether a user with the given UUID exists.
    async fn user_exists(&self, user: UserUuid) -> Result<bool, UsersServiceError>;

    /// Creates a user from an already-hashed password.
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError>;

    /// Retrieve a user together with every game they own.
    async fn get_user_with_library(
        &self,
        user: UserUuid,
    ) -> Result<UserWithLibrary, UsersServiceError>;
}
