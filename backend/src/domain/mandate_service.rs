//! Mandate workflow service.
//!
//! Every transition follows the same sequence: load the users involved,
//! check the actor's role where required, persist the new status, then emit
//! notifications. A zero-row update stops the sequence before anyone is
//! notified. A notification failure after a successful update is returned to
//! the caller; the status change stays in place.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{MandateWorkflow, NotificationRepository, UserRepository};
use crate::domain::{
    Error, MandateStatus, MandateTransition, NotificationDraft, NotificationService, User, UserId,
};

/// Mandate workflow over the user repository and the notification sink.
pub struct MandateService<U, N> {
    users: Arc<U>,
    notifications: Arc<NotificationService<N>>,
    clock: Arc<dyn Clock>,
}

impl<U, N> MandateService<U, N> {
    /// Create a workflow service.
    #[must_use]
    pub fn new(
        users: Arc<U>,
        notifications: Arc<NotificationService<N>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            notifications,
            clock,
        }
    }
}

impl<U, N> MandateService<U, N>
where
    U: UserRepository,
    N: NotificationRepository,
{
    async fn load(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }

    async fn load_pair(
        &self,
        accountant_id: &UserId,
        client_id: &UserId,
    ) -> Result<(User, User), Error> {
        let actor = self.load(accountant_id).await?;
        let client = self.load(client_id).await?;
        Ok((actor, client))
    }

    fn authorise(actor: &User, transition: MandateTransition) -> Result<(), Error> {
        if transition.requires_tax_accountant() && !actor.is_tax_accountant() {
            return Err(Error::forbidden(format!(
                "only tax accountants may {} a mandate",
                transition.label()
            )));
        }
        Ok(())
    }

    async fn persist(
        &self,
        client: &User,
        transition: MandateTransition,
    ) -> Result<MandateStatus, Error> {
        let target = transition.target();
        let rows = self
            .users
            .update_mandate_status(&client.id, target, self.clock.utc())
            .await?;
        if rows == 0 {
            return Err(Error::conflict(format!(
                "mandate {} failed for user {}",
                transition.label(),
                client.id
            )));
        }
        info!(
            client_id = %client.id,
            transition = transition.label(),
            from = ?client.mandate_status,
            to = ?target,
            "mandate status changed"
        );
        Ok(target)
    }

    async fn notify(
        &self,
        recipient: &UserId,
        sender: &UserId,
        client: &User,
        transition: MandateTransition,
    ) -> Result<(), Error> {
        let Some(notice) = transition.notice(&client.name) else {
            return Ok(());
        };
        self.notifications
            .create(NotificationDraft {
                recipient_id: recipient.clone(),
                sender_id: Some(sender.clone()),
                kind: notice.kind,
                text: notice.text,
            })
            .await?;
        Ok(())
    }

    async fn accountant_transition(
        &self,
        accountant_id: &UserId,
        client_id: &UserId,
        transition: MandateTransition,
    ) -> Result<MandateStatus, Error> {
        let (actor, client) = self.load_pair(accountant_id, client_id).await?;
        Self::authorise(&actor, transition)?;
        let status = self.persist(&client, transition).await?;
        self.notify(&client.id, &actor.id, &client, transition)
            .await?;
        Ok(status)
    }
}

#[async_trait]
impl<U, N> MandateWorkflow for MandateService<U, N>
where
    U: UserRepository,
    N: NotificationRepository,
{
    async fn request(&self, client_id: &UserId) -> Result<MandateStatus, Error> {
        let transition = MandateTransition::Request;
        let client = self.load(client_id).await?;
        let status = self.persist(&client, transition).await?;

        let accountants = self.users.list_tax_accountants().await?;
        for accountant in &accountants {
            self.notify(&accountant.id, &client.id, &client, transition)
                .await?;
        }
        info!(client_id = %client.id, notified = accountants.len(), "mandate request broadcast");
        Ok(status)
    }

    async fn send(&self, accountant: &UserId, client: &UserId) -> Result<MandateStatus, Error> {
        self.accountant_transition(accountant, client, MandateTransition::Send)
            .await
    }

    async fn release(
        &self,
        accountant: &UserId,
        client: &UserId,
    ) -> Result<MandateStatus, Error> {
        self.accountant_transition(accountant, client, MandateTransition::Release)
            .await
    }

    async fn complete(&self, client_id: &UserId) -> Result<MandateStatus, Error> {
        let client = self.load(client_id).await?;
        self.persist(&client, MandateTransition::Complete).await
    }

    async fn list(&self) -> Result<Vec<User>, Error> {
        self.users
            .list_mandate_requests()
            .await
            .map_err(Error::from)
    }
}
