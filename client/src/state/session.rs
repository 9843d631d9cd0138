//! Session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! A single [`SessionState`] is provided as context at the app root. It is
//! created from `userdetails` on start-up, replaced on sign-in and reset on
//! sign-out or idle expiry. Route guards and the side menu read it; nothing
//! else owns session data.
//!
//! PERSISTENCE
//! ===========
//! `userdetails` holds the last sign-in payload verbatim and `lastActive` the
//! epoch millis of the last tracked interaction. A stored session whose
//! `lastActive` is older than the idle window is discarded on restore.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::config::{ACTIVITY_PERSIST_INTERVAL_MS, AUTHENTICATED_ENTRY_PATH, UNAUTHENTICATED_ENTRY_PATH, keys};
use crate::error::ApiError;
use crate::net::api::HttpApi;
use crate::net::types::{SignInData, UserDetails};
use crate::state::role::Role;
use crate::util::storage::{KeyValueStore, load_json, save_json};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthStatus {
    /// Persisted state has not been read yet; guards must not redirect.
    #[default]
    Restoring,
    SignedOut,
    SignedIn,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub status: AuthStatus,
    pub token: Option<String>,
    pub user: Option<UserDetails>,
    pub last_active_at: Option<i64>,
    last_persisted_at: Option<i64>,
}

impl SessionState {
    #[must_use]
    pub fn signed_out() -> Self {
        Self { status: AuthStatus::SignedOut, ..Self::default() }
    }

    /// Rebuild the session from storage, dropping it if it sat idle for
    /// `idle_ms` or longer.
    pub fn restore(store: &impl KeyValueStore, now_ms: i64, idle_ms: i64) -> Self {
        let Some(data) = load_json::<SignInData>(store, keys::USER_DETAILS) else {
            return Self::signed_out();
        };
        let last_active = store
            .get(keys::LAST_ACTIVE)
            .and_then(|raw| raw.trim().parse::<i64>().ok());
        if let Some(last) = last_active {
            if now_ms.saturating_sub(last) >= idle_ms {
                log::info!("stored session idle since {last}; signing out");
                clear_persisted(store);
                return Self::signed_out();
            }
        }
        let mut session = Self::signed_out();
        session.establish(data, last_active.unwrap_or(now_ms));
        session.last_persisted_at = last_active;
        session
    }

    /// Enter the signed-in state from a sign-in payload. Persistence is the
    /// caller's job (see [`crate::state::auth::sign_in`]).
    pub fn establish(&mut self, data: SignInData, now_ms: i64) {
        self.status = AuthStatus::SignedIn;
        self.token = Some(data.token);
        self.user = Some(data.data);
        self.last_active_at = Some(now_ms);
    }

    /// End the session and forget everything persisted about it.
    pub fn sign_out(&mut self, store: &impl KeyValueStore) {
        clear_persisted(store);
        *self = Self::signed_out();
    }

    /// Note a user interaction. `lastActive` is written at most once per
    /// [`ACTIVITY_PERSIST_INTERVAL_MS`]; returns whether it was written.
    pub fn record_activity(&mut self, store: &impl KeyValueStore, now_ms: i64) -> bool {
        if !self.is_signed_in() {
            return false;
        }
        self.last_active_at = Some(now_ms);
        let due = self
            .last_persisted_at
            .is_none_or(|at| now_ms.saturating_sub(at) >= ACTIVITY_PERSIST_INTERVAL_MS);
        if !due {
            return false;
        }
        if let Err(e) = store.set(keys::LAST_ACTIVE, &now_ms.to_string()) {
            log::warn!("failed to persist activity time: {e}");
            return false;
        }
        self.last_persisted_at = Some(now_ms);
        true
    }

    /// End the session if `err` says the backend no longer accepts our token.
    pub fn expire_if_unauthorized(&mut self, store: &impl KeyValueStore, err: &ApiError) -> bool {
        if !self.is_signed_in() || !err.is_unauthorized() {
            return false;
        }
        log::info!("backend rejected session token; signing out");
        self.sign_out(store);
        true
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.status == AuthStatus::SignedIn
    }

    #[must_use]
    pub fn is_restoring(&self) -> bool {
        self.status == AuthStatus::Restoring
    }

    /// Role the account signed up as.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().and_then(UserDetails::signed_up_as)
    }

    /// Where a signed-in user belongs when no specific page was requested.
    #[must_use]
    pub fn home_path(&self) -> &'static str {
        self.role()
            .and_then(Role::landing_path)
            .unwrap_or(AUTHENTICATED_ENTRY_PATH)
    }

    /// API client carrying this session's token.
    #[must_use]
    pub fn api(&self) -> HttpApi {
        match self.token.as_deref() {
            Some(token) => HttpApi::with_token(token),
            None => HttpApi::new(),
        }
    }
}

/// Landing route after sign-in for a backend-reported role.
#[must_use]
pub fn landing_path_for(role: Option<Role>) -> &'static str {
    role.and_then(Role::landing_path)
        .unwrap_or(UNAUTHENTICATED_ENTRY_PATH)
}

/// Write the sign-in payload and activity time.
///
/// # Errors
///
/// Returns the storage error; callers treat it as non-fatal.
pub fn persist_sign_in(
    store: &impl KeyValueStore,
    data: &SignInData,
    now_ms: i64,
) -> Result<(), crate::error::StorageError> {
    save_json(store, keys::USER_DETAILS, data)?;
    store.set(keys::LAST_ACTIVE, &now_ms.to_string())
}

/// Remove everything persisted about the session.
pub fn clear_persisted(store: &impl KeyValueStore) {
    store.remove(keys::USER_DETAILS);
    store.remove(keys::LAST_ACTIVE);
}

/// Role recorded in the persisted sign-in payload (`data.signedUpAs`, falling
/// back to `data.role`). A missing or malformed payload yields `None`.
pub fn persisted_signed_up_as(store: &impl KeyValueStore) -> Option<Role> {
    let raw = store.get(keys::USER_DETAILS)?;
    let payload: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("ignoring malformed {}: {e}", keys::USER_DETAILS);
            return None;
        }
    };
    let user = payload.get("data")?;
    ["signedUpAs", "role"]
        .iter()
        .filter_map(|field| user.get(field).and_then(serde_json::Value::as_str))
        .find_map(Role::parse)
}
