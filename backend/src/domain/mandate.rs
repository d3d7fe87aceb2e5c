//! Mandate (power-of-attorney) lifecycle between a client and the tax
//! accountants.
//!
//! ```text
//! NONE --request--> REQUESTED --send--> SENT --complete--> COMPLETED
//!   ^                                                          |
//!   +------------------------- release ------------------------+
//! ```
//!
//! `release` resets from any state and `complete` is accepted from any state.

use super::{MandateStatus, NotificationKind};

/// A mandate state change and who may trigger it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MandateTransition {
    /// Client asks for consent.
    Request,
    /// Accountant has filed the request in the external tax portal.
    Send,
    /// Accountant asks the client to drop an existing relationship.
    Release,
    /// Client has accepted in the external tax portal.
    Complete,
}

/// Notification emitted after a successful transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MandateNotice {
    /// Direction of the notice.
    pub kind: NotificationKind,
    /// Message body.
    pub text: String,
}

impl MandateTransition {
    /// Status the client record moves to.
    #[must_use]
    pub fn target(self) -> MandateStatus {
        match self {
            Self::Request => MandateStatus::Requested,
            Self::Send => MandateStatus::Sent,
            Self::Release => MandateStatus::None,
            Self::Complete => MandateStatus::Completed,
        }
    }

    /// Whether the acting user must hold the tax accountant role.
    #[must_use]
    pub const fn requires_tax_accountant(self) -> bool {
        matches!(self, Self::Send | Self::Release)
    }

    /// Short verb for logs and error messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Send => "send",
            Self::Release => "release",
            Self::Complete => "complete",
        }
    }

    /// Notice text for this transition. `Complete` notifies nobody.
    ///
    /// # Examples
    /// ```
    /// use taxdesk::domain::MandateTransition;
    ///
    /// let notice = MandateTransition::Request.notice("Kim").unwrap();
    /// assert_eq!(notice.text, "Kim requested mandate consent.");
    /// ```
    #[must_use]
    pub fn notice(self, client_name: &str) -> Option<MandateNotice> {
        let (kind, text) = match self {
            Self::Request => (
                NotificationKind::ClientToTax,
                format!("{client_name} requested mandate consent."),
            ),
            Self::Send => (
                NotificationKind::TaxToClient,
                "Your tax accountant has sent a mandate request. \
                 Please accept it in the national tax portal."
                    .to_owned(),
            ),
            Self::Release => (
                NotificationKind::TaxToClient,
                "Your tax accountant has asked you to release your existing mandate. \
                 Release it in the national tax portal, then request mandate consent again."
                    .to_owned(),
            ),
            Self::Complete => return None,
        };
        Some(MandateNotice { kind, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(MandateTransition::Request, MandateStatus::Requested, false)]
    #[case(MandateTransition::Send, MandateStatus::Sent, true)]
    #[case(MandateTransition::Release, MandateStatus::None, true)]
    #[case(MandateTransition::Complete, MandateStatus::Completed, false)]
    fn transition_table(
        #[case] transition: MandateTransition,
        #[case] target: MandateStatus,
        #[case] accountant_only: bool,
    ) {
        assert_eq!(transition.target(), target);
        assert_eq!(transition.requires_tax_accountant(), accountant_only);
    }

    #[rstest]
    #[case(MandateTransition::Request, Some(NotificationKind::ClientToTax))]
    #[case(MandateTransition::Send, Some(NotificationKind::TaxToClient))]
    #[case(MandateTransition::Release, Some(NotificationKind::TaxToClient))]
    #[case(MandateTransition::Complete, None)]
    fn notice_direction(
        #[case] transition: MandateTransition,
        #[case] expected: Option<NotificationKind>,
    ) {
        assert_eq!(transition.notice("Kim").map(|n| n.kind), expected);
    }
}
