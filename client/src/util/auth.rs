//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded routes, the header's sign-out button and the idle watch must all
//! leave the app the same way, so the redirect and sign-out steps live here.

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::config::UNAUTHENTICATED_ENTRY_PATH;
use crate::routes::Guard;
use crate::state::account::AccountState;
use crate::state::session::SessionState;
use crate::util::storage::LocalStore;

fn replace() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Follow the guard whenever it asks for a redirect.
pub fn install_guard_redirect<F>(decision: Memo<Guard>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Guard::Redirect(target) = decision.get() {
            log::debug!("guard redirect to {target}");
            navigate(&target, replace());
        }
    });
}

/// End the session, drop per-user data and go to the sign-in page.
pub fn sign_out<F>(session: RwSignal<SessionState>, account: RwSignal<AccountState>, navigate: F)
where
    F: Fn(&str, NavigateOptions),
{
    session.update(|s| s.sign_out(&LocalStore));
    account.update(AccountState::reset);
    navigate(UNAUTHENTICATED_ENTRY_PATH, replace());
}
