//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Only compiled for tests or with the `test-support` feature.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use zeroize::Zeroizing;

use crate::domain::ports::{AccountService, CodeGenerator};
use crate::domain::{
    AccountManager, BusinessVerificationService, Error, MandateService, NewAccount,
    NotificationService, PaymentService, PhoneVerificationService, RegistrationForm, User, UserId,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{
    InMemoryNotificationRepository, InMemoryUserRepository, InMemoryVerificationCodeStore,
};
use crate::outbound::registry::SimulatedBusinessRegistry;

/// Password every fixture account is created with.
pub const FIXTURE_PASSWORD: &str = "pw12";

/// Deterministic "now" used across tests: 2025-03-01T09:00:00Z.
///
/// # Panics
/// Never in practice; the timestamp is unambiguous in UTC.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0) {
        chrono::LocalResult::Single(now) => now,
        _ => panic!("fixed test timestamp must be unambiguous"),
    }
}

/// Clock whose time only moves when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        *self.lock_clock() += delta;
    }

    /// Move the clock forward by whole seconds.
    pub fn advance_seconds(&self, seconds: i64) {
        self.advance(TimeDelta::seconds(seconds));
    }

    /// Move the clock forward by whole days.
    pub fn advance_days(&self, days: i64) {
        self.advance(TimeDelta::days(days));
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Generator that always yields the same value.
#[derive(Debug, Clone, Copy)]
pub struct FixedCodeGenerator(pub u32);

impl CodeGenerator for FixedCodeGenerator {
    fn next_value(&self) -> u32 {
        self.0
    }
}

/// Generator cycling through a fixed list of values.
#[derive(Debug)]
pub struct SequenceCodeGenerator {
    values: Vec<u32>,
    cursor: AtomicUsize,
}

impl SequenceCodeGenerator {
    /// Cycle through `values` in order.
    ///
    /// # Panics
    /// Panics when `values` is empty.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        assert!(!values.is_empty(), "sequence must not be empty");
        Self {
            values,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl CodeGenerator for SequenceCodeGenerator {
    fn next_value(&self) -> u32 {
        self.cursor
            .fetch_add(1, Ordering::Relaxed)
            .checked_rem(self.values.len())
            .and_then(|index| self.values.get(index))
            .copied()
            .unwrap_or_default()
    }
}

fn account(name: &str, staff: bool) -> User {
    let handle = name.to_lowercase();
    let email = format!("{handle}@example.com");
    let mut account = NewAccount::tax_accountant(&handle, &email, FIXTURE_PASSWORD, name);
    if !staff {
        account.role = crate::domain::UserRole::Client;
    }
    account.into_user(UserId::random(), fixed_now())
}

/// Client account named `name`, username `name` lowercased.
#[must_use]
pub fn client_fixture(name: &str) -> User {
    account(name, false)
}

/// Tax accountant account named `name`.
#[must_use]
pub fn accountant_fixture(name: &str) -> User {
    account(name, true)
}

/// Valid individual-taxpayer sign-up form for `username`.
#[must_use]
pub fn registration_form(username: &str) -> RegistrationForm {
    RegistrationForm {
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        password: Zeroizing::new(FIXTURE_PASSWORD.to_owned()),
        name: username.to_owned(),
        resident_number: "900101-1234567".to_owned(),
        phone_number: "010-1234-5678".to_owned(),
        taxpayer_kind: "INDIVIDUAL".to_owned(),
        business_number: Some("123-45-67890".to_owned()),
        ..RegistrationForm::default()
    }
}

/// Mandate service as wired by [`Harness`].
pub type HarnessMandates = MandateService<InMemoryUserRepository, InMemoryNotificationRepository>;
/// Phone verification service as wired by [`Harness`].
pub type HarnessPhoneVerification =
    PhoneVerificationService<InMemoryVerificationCodeStore, SequenceCodeGenerator>;

/// Every service wired over in-memory adapters and a shared [`MutableClock`].
pub struct Harness {
    /// Shared test clock.
    pub clock: Arc<MutableClock>,
    /// User store behind every service.
    pub users: Arc<InMemoryUserRepository>,
    /// Notification store.
    pub notification_repo: Arc<InMemoryNotificationRepository>,
    /// Verification code store.
    pub code_store: Arc<InMemoryVerificationCodeStore>,
    /// Account service.
    pub accounts: Arc<AccountManager<InMemoryUserRepository>>,
    /// Notification feed.
    pub notifications: Arc<NotificationService<InMemoryNotificationRepository>>,
    /// Mandate workflow.
    pub mandates: Arc<HarnessMandates>,
    /// Payment tracker.
    pub payments: Arc<PaymentService<InMemoryUserRepository>>,
    /// Phone verification service.
    pub phone_verification: Arc<HarnessPhoneVerification>,
    /// Business verification service.
    pub business_verification: Arc<BusinessVerificationService<SimulatedBusinessRegistry>>,
}

impl Harness {
    /// Harness issuing the given code values in order.
    ///
    /// # Panics
    /// Panics when `values` is empty.
    #[must_use]
    pub fn with_codes(values: Vec<u32>) -> Self {
        let clock = Arc::new(MutableClock::new(fixed_now()));
        let shared_clock: Arc<dyn Clock> = clock.clone();
        let users = Arc::new(InMemoryUserRepository::new());
        let notification_repo = Arc::new(InMemoryNotificationRepository::new());
        let code_store = Arc::new(InMemoryVerificationCodeStore::new());

        let notifications = Arc::new(NotificationService::new(
            notification_repo.clone(),
            shared_clock.clone(),
        ));
        Self {
            accounts: Arc::new(AccountManager::new(users.clone(), shared_clock.clone())),
            mandates: Arc::new(MandateService::new(
                users.clone(),
                notifications.clone(),
                shared_clock.clone(),
            )),
            payments: Arc::new(PaymentService::new(users.clone(), shared_clock.clone())),
            phone_verification: Arc::new(PhoneVerificationService::new(
                code_store.clone(),
                Arc::new(SequenceCodeGenerator::new(values)),
                shared_clock,
            )),
            business_verification: Arc::new(BusinessVerificationService::new(Arc::new(
                SimulatedBusinessRegistry,
            ))),
            notifications,
            clock,
            users,
            notification_repo,
            code_store,
        }
    }

    /// Harness issuing `123456`, then `654321`, then repeating.
    #[must_use]
    pub fn new() -> Self {
        Self::with_codes(vec![123_456, 654_321])
    }

    /// HTTP state over this harness' services.
    #[must_use]
    pub fn http_state(&self, expose_codes: bool) -> HttpState {
        HttpState::new(HttpStatePorts {
            accounts: self.accounts.clone(),
            mandates: self.mandates.clone(),
            notifications: self.notifications.clone(),
            payments: self.payments.clone(),
            phone_verification: self.phone_verification.clone(),
            business_verification: self.business_verification.clone(),
        })
        .with_code_exposure(expose_codes)
    }

    /// Register a client through the public sign-up path.
    pub async fn register_client(&self, username: &str) -> Result<User, Error> {
        self.accounts.register(registration_form(username)).await
    }

    /// Provision a tax accountant.
    pub async fn provision_accountant(&self, username: &str) -> Result<User, Error> {
        let email = format!("{username}@example.com");
        self.accounts
            .provision(NewAccount::tax_accountant(
                username,
                &email,
                FIXTURE_PASSWORD,
                username,
            ))
            .await
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
