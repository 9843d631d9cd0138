//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetching into the shared state
//! slices, submitting forms) and delegates rendering details to `components`.
//! Pages never check roles themselves; `components::app_shell::Guarded` has
//! already decided the page may render.

pub mod access_denied;
pub mod account;
pub mod crm;
pub mod dashboard;
pub mod jobs;
pub mod kyc;
pub mod notifications;
pub mod password;
pub mod sign_in;
pub mod sign_up;

#[cfg(feature = "hydrate")]
use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use crate::error::ApiError;
#[cfg(feature = "hydrate")]
use crate::state::session::SessionState;
#[cfg(feature = "hydrate")]
use crate::util::storage::LocalStore;

/// End the session when the backend rejected our token.
#[cfg(feature = "hydrate")]
pub(crate) fn expire_on_auth_error<T>(session: RwSignal<SessionState>, result: &Result<T, ApiError>) {
    if let Err(e) = result {
        session.update(|s| {
            if s.expire_if_unauthorized(&LocalStore, e) {
                log::info!("session expired by backend: {e}");
            }
        });
    }
}
