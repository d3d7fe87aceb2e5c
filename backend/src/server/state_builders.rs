//! Builders wiring in-memory adapters into domain services and HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use taxdesk::domain::{
    AccountManager, BusinessVerificationService, ErrorCode, MandateService, NotificationService,
    PaymentService, PhoneVerificationService, SweeperHandle, VerificationSweeper,
};
use taxdesk::inbound::http::state::{HttpState, HttpStatePorts};
use taxdesk::outbound::code_generator::ThreadRngCodeGenerator;
use taxdesk::outbound::memory::{
    InMemoryNotificationRepository, InMemoryUserRepository, InMemoryVerificationCodeStore,
};
use taxdesk::outbound::registry::SimulatedBusinessRegistry;

use super::ServerConfig;

/// Services and background work built for one server instance.
pub(crate) struct Wiring {
    pub(crate) http_state: HttpState,
    pub(crate) sweeper: SweeperHandle,
}

/// Build every adapter and service, seed the optional accountant, and start
/// the verification code sweeper.
pub(crate) async fn build_wiring(config: &ServerConfig) -> Wiring {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let users = Arc::new(InMemoryUserRepository::new());
    let notification_repo = Arc::new(InMemoryNotificationRepository::new());
    let code_store = Arc::new(InMemoryVerificationCodeStore::new());

    let accounts = Arc::new(AccountManager::new(users.clone(), clock.clone()));
    let notifications = Arc::new(NotificationService::new(notification_repo, clock.clone()));
    let mandates = Arc::new(MandateService::new(
        users.clone(),
        notifications.clone(),
        clock.clone(),
    ));
    let payments = Arc::new(PaymentService::new(users, clock.clone()));
    let phone_verification = Arc::new(PhoneVerificationService::new(
        code_store.clone(),
        Arc::new(ThreadRngCodeGenerator),
        clock.clone(),
    ));
    let business_verification = Arc::new(BusinessVerificationService::new(Arc::new(
        SimulatedBusinessRegistry,
    )));

    if let Some(seed) = &config.seed_accountant {
        match accounts.provision(seed.to_account()).await {
            Ok(user) => {
                info!(user_id = %user.id, username = %user.username, "tax accountant seeded");
            }
            Err(err) if err.code() == ErrorCode::InvalidRequest => {
                warn!(
                    username = %seed.username,
                    error = %err.message(),
                    "tax accountant seed skipped"
                );
            }
            Err(err) => warn!(error = %err.message(), "tax accountant seed failed"),
        }
    }

    let sweeper = VerificationSweeper::new(code_store, clock, config.sweep_period).spawn();

    let http_state = HttpState::new(HttpStatePorts {
        accounts,
        mandates,
        notifications,
        payments,
        phone_verification,
        business_verification,
    })
    .with_code_exposure(config.expose_verification_code);

    Wiring {
        http_state,
        sweeper,
    }
}
