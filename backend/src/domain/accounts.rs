//! Account service: registration, login, and lazy profile creation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::auth::{Credentials, Registration};
use super::error::Error;
use super::password::PasswordHasher;
use super::ports::{Accounts, ProfileRepository, RepositoryError, Session, UserRepository};
use super::profile::Profile;
use super::token::TokenIssuer;
use super::user::{User, UserId};

/// Account service implementing the [`Accounts`] driving port.
pub struct AccountService<U, P> {
    users: Arc<U>,
    profiles: Arc<P>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<TokenIssuer>,
}

impl<U, P> AccountService<U, P> {
    /// Create a new service over the given stores and token issuer.
    pub fn new(
        users: Arc<U>,
        profiles: Arc<P>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            users,
            profiles,
            hasher,
            tokens,
        }
    }
}

impl<U, P> AccountService<U, P>
where
    U: UserRepository,
    P: ProfileRepository,
{
    /// Create the user's profile if it does not exist yet.
    ///
    /// Idempotent: both registration and login call this, so the lazy
    /// creation lives in exactly one place. A concurrent duplicate insert
    /// is treated as success.
    async fn ensure_profile(&self, user_id: &UserId) -> Result<(), Error> {
        if self.profiles.find_by_user(user_id).await?.is_some() {
            return Ok(());
        }
        match self.profiles.insert(&Profile::empty(user_id.clone())).await {
            Ok(()) | Err(RepositoryError::Duplicate { .. }) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn open_session(&self, user: User) -> Result<Session, Error> {
        let token = self.tokens.issue(&user.id, user.is_host)?;
        Ok(Session { token, user })
    }
}

#[async_trait]
impl<U, P> Accounts for AccountService<U, P>
where
    U: UserRepository,
    P: ProfileRepository,
{
    async fn register(&self, registration: Registration) -> Result<Session, Error> {
        let password_hash = self.hasher.hash(registration.credentials().password())?;
        let user = User::new(
            registration.name(),
            registration.credentials().email().clone(),
            password_hash,
            registration.is_host(),
        );

        match self.users.insert(&user).await {
            Ok(()) => {}
            Err(RepositoryError::Duplicate { .. }) => {
                return Err(Error::conflict("Email already registered"));
            }
            Err(err) => return Err(err.into()),
        }

        // Profile creation is best-effort; a failure here must not strand
        // the freshly created account. The user gets a profile at next
        // login instead.
        if let Err(err) = self.ensure_profile(&user.id).await {
            warn!(user_id = %user.id, error = %err, "profile creation failed after registration");
        }

        self.open_session(user)
    }

    async fn login(&self, credentials: Credentials) -> Result<Session, Error> {
        // A single generic message for unknown email and wrong password,
        // so responses do not enumerate accounts.
        let invalid = || Error::unauthorized("Invalid credentials");

        let Some(user) = self.users.find_by_email(credentials.email()).await? else {
            return Err(invalid());
        };
        if !self
            .hasher
            .verify(credentials.password(), &user.password_hash)?
        {
            return Err(invalid());
        }

        self.ensure_profile(&user.id).await?;
        self.open_session(user)
    }
}

#[cfg(test)]
mod tests {
    use zeroize::Zeroizing;

    use super::*;
    use crate::domain::password::Argon2Hasher;
    use crate::domain::ports::{MockProfileRepository, MockUserRepository};
    use crate::domain::user::EmailAddress;
    use crate::domain::ErrorCode;

    fn issuer() -> Arc<TokenIssuer> {
        Arc::new(TokenIssuer::with_default_ttl(Zeroizing::new(
            b"test-secret".to_vec(),
        )))
    }

    fn service(
        users: MockUserRepository,
        profiles: MockProfileRepository,
    ) -> AccountService<MockUserRepository, MockProfileRepository> {
        AccountService::new(
            Arc::new(users),
            Arc::new(profiles),
            Arc::new(Argon2Hasher),
            issuer(),
        )
    }

    fn registration() -> Registration {
        Registration::try_from_parts("Ann", "ann@x.com", "pw", false).expect("valid registration")
    }

    fn stored_user(password: &str) -> User {
        let hash = Argon2Hasher.hash(password).expect("hashes");
        User::new(
            "Ann",
            EmailAddress::new("ann@x.com").expect("valid email"),
            hash,
            false,
        )
    }

    #[tokio::test]
    async fn register_returns_session_with_decodable_token() {
        let mut users = MockUserRepository::new();
        users.expect_insert().times(1).return_once(|_| Ok(()));
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_user()
            .times(1)
            .return_once(|_| Ok(None));
        profiles.expect_insert().times(1).return_once(|_| Ok(()));

        let service = service(users, profiles);
        let session = service
            .register(registration())
            .await
            .expect("registration succeeds");

        let claims = issuer().verify(&session.token).expect("token verifies");
        assert_eq!(
            claims.user_id().expect("valid subject"),
            session.user.id,
            "token subject matches the registered user"
        );
        assert!(!session.user.password_hash.contains("pw"));
    }

    #[tokio::test]
    async fn register_duplicate_email_is_a_conflict() {
        let mut users = MockUserRepository::new();
        users
            .expect_insert()
            .times(1)
            .return_once(|_| Err(RepositoryError::duplicate("email")));
        let service = service(users, MockProfileRepository::new());

        let err = service
            .register(registration())
            .await
            .expect_err("duplicate email must fail");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn register_survives_profile_store_failure() {
        let mut users = MockUserRepository::new();
        users.expect_insert().times(1).return_once(|_| Ok(()));
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_user()
            .times(1)
            .return_once(|_| Err(RepositoryError::query("boom")));

        let service = service(users, profiles);
        let session = service
            .register(registration())
            .await
            .expect("registration still succeeds");
        assert_eq!(session.user.name, "Ann");
    }

    #[tokio::test]
    async fn login_round_trips_registered_credentials() {
        let user = stored_user("pw");
        let expected_id = user.id.clone();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(move |_| Ok(Some(user)));
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_user()
            .times(1)
            .return_once(|_| Ok(Some(Profile::empty(UserId::random()))));

        let service = service(users, profiles);
        let credentials = Credentials::try_from_parts("ann@x.com", "pw").expect("valid");
        let session = service.login(credentials).await.expect("login succeeds");

        let claims = issuer().verify(&session.token).expect("token verifies");
        assert_eq!(claims.user_id().expect("valid subject"), expected_id);
    }

    #[tokio::test]
    async fn login_unknown_email_is_generic_unauthorized() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(None));
        let service = service(users, MockProfileRepository::new());

        let credentials = Credentials::try_from_parts("ghost@x.com", "pw").expect("valid");
        let err = service.login(credentials).await.expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "Invalid credentials");
    }

    #[tokio::test]
    async fn login_wrong_password_matches_unknown_email_response() {
        let user = stored_user("pw");
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(move |_| Ok(Some(user)));
        let service = service(users, MockProfileRepository::new());

        let credentials = Credentials::try_from_parts("ann@x.com", "wrong").expect("valid");
        let err = service.login(credentials).await.expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "Invalid credentials");
    }

    #[tokio::test]
    async fn login_creates_missing_profile() {
        let user = stored_user("pw");
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(move |_| Ok(Some(user)));
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_user()
            .times(1)
            .return_once(|_| Ok(None));
        profiles.expect_insert().times(1).return_once(|_| Ok(()));

        let service = service(users, profiles);
        let credentials = Credentials::try_from_parts("ann@x.com", "pw").expect("valid");
        service.login(credentials).await.expect("login succeeds");
    }
}
