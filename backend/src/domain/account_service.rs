//! Account registration, login, and profile maintenance.
//!
//! Implements the [`AccountService`] driving port on top of a
//! [`UserRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{AccountService, UserRepository};
use crate::domain::{
    Error, LoginCredentials, NewAccount, ProfileChanges, RegistrationForm,
    RegistrationValidationError, User, UserId,
};

const BAD_CREDENTIALS: &str = "invalid username or password";

/// Account service backed by a user repository.
pub struct AccountManager<U> {
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> AccountManager<U> {
    /// Create a service over `users`.
    #[must_use]
    pub const fn new(users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

fn registration_error(error: &RegistrationValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": error.code(),
    }))
}

fn field_error(field: &str, code: &str, message: &str) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

impl<U> AccountManager<U>
where
    U: UserRepository,
{
    async fn ensure_unique(&self, username: &str, email: &str) -> Result<(), Error> {
        if self.users.find_by_username(username).await?.is_some() {
            return Err(field_error(
                "username",
                "duplicate_username",
                "username is already in use",
            ));
        }
        if self.users.find_by_email(email).await?.is_some() {
            return Err(field_error("email", "duplicate_email", "email is already in use"));
        }
        Ok(())
    }

    async fn store(&self, account: NewAccount) -> Result<User, Error> {
        let user = account.into_user(UserId::random(), self.clock.utc());
        let rows = self.users.insert(&user).await?;
        if rows == 0 {
            return Err(Error::conflict("account could not be created"));
        }
        info!(user_id = %user.id, username = %user.username, role = ?user.role, "account created");
        Ok(user)
    }

    /// Create an account that skipped the client sign-up form, such as a
    /// seeded tax accountant. Uniqueness rules still apply.
    pub async fn provision(&self, account: NewAccount) -> Result<User, Error> {
        self.ensure_unique(&account.username, &account.email).await?;
        self.store(account).await
    }

    fn check_profile_changes(changes: &ProfileChanges) -> Result<(), Error> {
        if changes.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(field_error("name", "empty_name", "name must not be empty"));
        }
        if let Some(email) = changes.email.as_deref() {
            if email.trim().is_empty() {
                return Err(field_error("email", "empty_email", "email must not be empty"));
            }
            if !email.contains('@') {
                return Err(field_error("email", "malformed_email", "email must contain '@'"));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<U> AccountService for AccountManager<U>
where
    U: UserRepository,
{
    async fn register(&self, form: RegistrationForm) -> Result<User, Error> {
        let account = form.validate().map_err(|err| registration_error(&err))?;
        self.ensure_unique(&account.username, &account.email).await?;
        self.store(account).await
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let user = self
            .users
            .find_by_username_or_email(credentials.identifier())
            .await?;
        match user {
            Some(user) if user.password_hash.matches(credentials.password()) => {
                info!(user_id = %user.id, "login succeeded");
                Ok(user)
            }
            _ => {
                warn!("login rejected");
                Err(Error::unauthorized(BAD_CREDENTIALS))
            }
        }
    }

    async fn update_profile(&self, id: &UserId, changes: ProfileChanges) -> Result<User, Error> {
        Self::check_profile_changes(&changes)?;
        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))?;

        if let Some(email) = changes.email.as_deref().filter(|email| *email != user.email) {
            let holder = self.users.find_by_email(email).await?;
            if holder.is_some_and(|other| other.id != user.id) {
                return Err(field_error("email", "duplicate_email", "email is already in use"));
            }
        }

        changes.apply_to(&mut user);
        user.updated_at = self.clock.utc();
        let rows = self.users.update_profile(&user).await?;
        if rows == 0 {
            return Err(Error::conflict(format!("profile update failed for user {id}")));
        }
        info!(user_id = %id, "profile updated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockUserRepository, UserPersistenceError};
    use crate::domain::{ErrorCode, UserRole};
    use crate::test_support::{MutableClock, client_fixture, fixed_now};
    use rstest::{fixture, rstest};
    use zeroize::Zeroizing;

    fn service(repo: MockUserRepository) -> AccountManager<MockUserRepository> {
        AccountManager::new(Arc::new(repo), Arc::new(MutableClock::new(fixed_now())))
    }

    #[fixture]
    fn form() -> RegistrationForm {
        RegistrationForm {
            username: "kim".into(),
            email: "kim@example.com".into(),
            password: Zeroizing::new("pass1".into()),
            name: "Kim Minji".into(),
            resident_number: "900101-1234567".into(),
            phone_number: "010-1234-5678".into(),
            taxpayer_kind: "INDIVIDUAL".into(),
            business_number: Some("123-45-67890".into()),
            ..RegistrationForm::default()
        }
    }

    #[rstest]
    #[tokio::test]
    async fn register_stores_a_client(form: RegistrationForm) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|user: &User| user.role == UserRole::Client && user.created_at == fixed_now())
            .times(1)
            .returning(|_| Ok(1));

        let user = service(repo).register(form).await.expect("registered");
        assert_eq!(user.username, "kim");
        assert!(user.password_hash.matches("pass1"));
    }

    #[rstest]
    #[tokio::test]
    async fn register_rejects_duplicate_username(form: RegistrationForm) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Ok(Some(client_fixture("Kim"))));
        repo.expect_insert().never();

        let err = service(repo).register(form).await.expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details().and_then(|d| d.get("code")).and_then(|c| c.as_str()),
            Some("duplicate_username")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn register_rejects_duplicate_email(form: RegistrationForm) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(client_fixture("Kim"))));
        repo.expect_insert().never();

        let err = service(repo).register(form).await.expect_err("duplicate");
        assert_eq!(
            err.details().and_then(|d| d.get("field")).and_then(|c| c.as_str()),
            Some("email")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn register_validates_before_touching_storage(form: RegistrationForm) {
        let mut form = form;
        form.taxpayer_kind = "CORPORATE".into();
        let repo = MockUserRepository::new();

        let err = service(repo).register(form).await.expect_err("invalid");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details().and_then(|d| d.get("code")).and_then(|c| c.as_str()),
            Some("corporate_number_required")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn register_reports_conflict_when_nothing_is_inserted(form: RegistrationForm) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert().returning(|_| Ok(0));

        let err = service(repo).register(form).await.expect_err("conflict");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[case::unknown_user(None, "pw12")]
    #[case::wrong_password(Some("Kim"), "wrong")]
    #[tokio::test]
    async fn login_failures_are_indistinguishable(
        #[case] stored: Option<&'static str>,
        #[case] password: &str,
    ) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username_or_email()
            .returning(move |_| Ok(stored.map(client_fixture)));

        let creds = LoginCredentials::try_from_parts("kim", password).expect("shape");
        let err = service(repo).login(&creds).await.expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), BAD_CREDENTIALS);
    }

    #[tokio::test]
    async fn login_accepts_matching_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username_or_email()
            .withf(|identifier: &str| identifier == "kim@example.com")
            .returning(|_| Ok(Some(client_fixture("Kim"))));

        let creds = LoginCredentials::try_from_parts("kim@example.com", "pw12").expect("shape");
        let user = service(repo).login(&creds).await.expect("accepted");
        assert_eq!(user.name, "Kim");
    }

    #[tokio::test]
    async fn update_profile_applies_changes() {
        let stored = client_fixture("Kim");
        let id = stored.id.clone();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_update_profile()
            .withf(|user: &User| user.name == "Kim Minji" && user.email == "minji@example.com")
            .returning(|_| Ok(1));

        let changes = ProfileChanges {
            name: Some("Kim Minji".into()),
            email: Some("minji@example.com".into()),
            address: Some("Seoul".into()),
            ..ProfileChanges::default()
        };
        let user = service(repo)
            .update_profile(&id, changes)
            .await
            .expect("updated");
        assert_eq!(user.contact.address.as_deref(), Some("Seoul"));
        assert_eq!(user.updated_at, fixed_now());
    }

    #[tokio::test]
    async fn update_profile_rejects_taken_email() {
        let stored = client_fixture("Kim");
        let id = stored.id.clone();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(client_fixture("Lee"))));
        repo.expect_update_profile().never();

        let changes = ProfileChanges {
            email: Some("lee@example.com".into()),
            ..ProfileChanges::default()
        };
        let err = service(repo)
            .update_profile(&id, changes)
            .await
            .expect_err("taken");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[case(ProfileChanges { name: Some("  ".into()), ..ProfileChanges::default() })]
    #[case(ProfileChanges { email: Some(String::new()), ..ProfileChanges::default() })]
    #[tokio::test]
    async fn update_profile_rejects_blank_fields(#[case] changes: ProfileChanges) {
        let repo = MockUserRepository::new();
        let err = service(repo)
            .update_profile(&UserId::random(), changes)
            .await
            .expect_err("blank");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn update_profile_of_unknown_user_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        let err = service(repo)
            .update_profile(&UserId::random(), ProfileChanges::default())
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn provision_creates_staff_accounts() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|user: &User| user.role == UserRole::TaxAccountant)
            .returning(|_| Ok(1));

        let account = NewAccount::tax_accountant("lee", "lee@example.com", "pw12", "Lee");
        let user = service(repo).provision(account).await.expect("provisioned");
        assert!(user.is_tax_accountant());
    }

    #[tokio::test]
    async fn repository_failures_become_internal_errors() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username_or_email()
            .returning(|_| Err(UserPersistenceError::connection("refused")));
        let creds = LoginCredentials::try_from_parts("kim", "pw12").expect("shape");
        let err = service(repo).login(&creds).await.expect_err("failure");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
