//! Auth service.

use std::fmt;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    auth::{
        AuthServiceError, Claims, IssuedToken, TokenIssuer,
        password::{DEFAULT_COST, hash_password, verify_password},
    },
    database::Db,
    domain::users::{
        models::{NewUser, User, UserRole, UserUuid},
        repository::PgUsersRepository,
        service::validate_profile,
    },
};

/// Sign-up details.
#[derive(Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Sign-in details.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An authenticated user and their access token.
#[derive(Debug, Clone)]
pub struct AuthResponse {
    pub user: User,
    pub token: IssuedToken,
}

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    users: PgUsersRepository,
    issuer: TokenIssuer,
    password_cost: u32,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, issuer: TokenIssuer) -> Self {
        Self {
            db,
            users: PgUsersRepository::new(),
            issuer,
            password_cost: DEFAULT_COST,
        }
    }

    /// Override the bcrypt work factor used for new passwords.
    #[must_use]
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    #[tracing::instrument(
        name = "auth.service.register",
        skip(self, registration),
        fields(role = %registration.role, user_uuid = tracing::field::Empty),
        err
    )]
    async fn register(&self, registration: Registration) -> Result<AuthResponse, AuthServiceError> {
        let profile = validate_profile(&registration.name, &registration.email)?;

        if registration.password.is_empty() {
            return Err(AuthServiceError::InvalidPassword);
        }

        // Hashed before a pooled connection is taken.
        let password_hash = hash_password(&registration.password, self.password_cost)?;

        let mut tx = self.db.begin_transaction().await?;

        if self.users.email_exists(&mut tx, &profile.email).await? {
            return Err(AuthServiceError::EmailTaken);
        }

        let user = self
            .users
            .create_user(
                &mut tx,
                &NewUser {
                    uuid: UserUuid::new(),
                    name: profile.name,
                    email: profile.email,
                    role: registration.role,
                    password_hash,
                },
            )
            .await?;

        let token = self.issuer.issue(&user, Timestamp::now())?;

        tx.commit().await?;

        tracing::Span::current().record("user_uuid", tracing::field::display(user.uuid));

        info!(user_uuid = %user.uuid, "registered user");

        Ok(AuthResponse { user, token })
    }

    #[tracing::instrument(name = "auth.service.login", skip(self, credentials), err)]
    async fn login(&self, credentials: Credentials) -> Result<AuthResponse, AuthServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let stored = self
            .users
            .find_credentials_by_email(&mut tx, credentials.email.trim())
            .await?;

        tx.commit().await?;

        let Some(stored) = stored else {
            return Err(AuthServiceError::InvalidCredentials);
        };

        if !verify_password(&credentials.password, &stored.password_hash)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token = self.issuer.issue(&stored.user, Timestamp::now())?;

        info!(user_uuid = %stored.user.uuid, "user logged in");

        Ok(AuthResponse {
            user: stored.user,
            token,
        })
    }

    fn verify_token(&self, token: &str) -> Result<Claims, AuthServiceError> {
        Ok(self.issuer.verify(token)?)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a user account and sign them in.
    async fn register(&self, registration: Registration) -> Result<AuthResponse, AuthServiceError>;

    /// Sign in with an email and password.
    ///
    /// Unknown emails and wrong passwords are indistinguishable.
    async fn login(&self, credentials: Credentials) -> Result<AuthResponse, AuthServiceError>;

    /// Decode and validate an access token.
    fn verify_token(&self, token: &str) -> Result<Claims, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::users::UsersService, test::TestContext};

    use super::*;

    fn registration(email: &str) -> Registration {
        Registration {
            name: "Ada".to_string(),
            email: email.to_string(),
            password: "correct horse battery staple".to_string(),
            role: UserRole::User,
        }
    }

    #[tokio::test]
    async fn register_creates_user_and_issues_token() -> TestResult {
        let ctx = TestContext::new().await;

        let response = ctx.auth.register(registration("ada@example.com")).await?;
        let claims = ctx.auth.verify_token(&response.token.token)?;

        assert_eq!(claims.sub, response.user.uuid.to_string());
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.role, "user");

        let stored = ctx.users.get_user(response.user.uuid).await?;

        assert_eq!(stored, response.user);

        Ok(())
    }

    #[tokio::test]
    async fn register_taken_email_returns_email_taken() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.auth.register(registration("ada@example.com")).await?;

        let result = ctx.auth.register(registration("Ada@Example.com")).await;

        assert!(
            matches!(result, Err(AuthServiceError::EmailTaken)),
            "expected EmailTaken, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn register_empty_password_returns_invalid_password() {
        let ctx = TestContext::new().await;

        let result = ctx
            .auth
            .register(Registration {
                password: String::new(),
                ..registration("ada@example.com")
            })
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidPassword)),
            "expected InvalidPassword, got {result:?}"
        );
    }

    #[tokio::test]
    async fn register_hashes_before_taking_a_connection() -> TestResult {
        let ctx = TestContext::new().await;
        let db = ctx.single_connection_db().await?;

        db.pool().close().await;

        let auth = PgAuthService {
            db,
            ..ctx.auth.clone()
        }
        .with_password_cost(100);

        let result = auth.register(registration("ada@example.com")).await;

        assert!(
            matches!(result, Err(AuthServiceError::PasswordHash(_))),
            "expected PasswordHash, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_with_registered_credentials_succeeds() -> TestResult {
        let ctx = TestContext::new().await;
        let registered = ctx.auth.register(registration("ada@example.com")).await?;

        let response = ctx
            .auth
            .login(Credentials {
                email: "ADA@example.com".to_string(),
                password: "correct horse battery staple".to_string(),
            })
            .await?;

        assert_eq!(response.user.uuid, registered.user.uuid);
        assert!(ctx.auth.verify_token(&response.token.token).is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn login_wrong_password_or_unknown_email_returns_invalid_credentials() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.auth.register(registration("ada@example.com")).await?;

        for (email, password) in [
            ("ada@example.com", "wrong password"),
            ("nobody@example.com", "correct horse battery staple"),
        ] {
            let result = ctx
                .auth
                .login(Credentials {
                    email: email.to_string(),
                    password: password.to_string(),
                })
                .await;

            assert!(
                matches!(result, Err(AuthServiceError::InvalidCredentials)),
                "expected InvalidCredentials for {email}, got {result:?}"
            );
        }

        Ok(())
    }

    #[test]
    fn registration_debug_hides_password() {
        let debug = format!("{:?}", registration("ada@example.com"));

        assert!(!debug.contains("battery"), "password leaked: {debug}");
    }
}
