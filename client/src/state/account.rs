//! Profile, uploaded documents and notifications of the signed-in user.

#[cfg(test)]
#[path = "account_test.rs"]
mod account_test;

use crate::net::types::{Document, Notification, Profile};
use crate::state::collection::Collection;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccountState {
    pub profile: Option<Profile>,
    pub documents: Collection<Document>,
    pub notifications: Collection<Notification>,
}

impl AccountState {
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.notifications.items().iter().filter(|n| !n.read).count()
    }

    pub fn mark_read(&mut self, id: &str) -> bool {
        self.notifications.update(id, |n| n.read = true)
    }

    /// KYC status reported on the profile, if any.
    #[must_use]
    pub fn kyc_status(&self) -> Option<&str> {
        self.profile.as_ref().and_then(|p| p.kyc_status.as_deref())
    }

    /// Drop everything tied to the previous user.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
