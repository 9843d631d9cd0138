//! Pages shown when a route cannot be displayed.

use leptos::prelude::*;

use crate::state::session::SessionState;

/// Signed in, but the role may not open this route.
#[component]
pub fn AccessDeniedPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let home = move || session.with(SessionState::home_path);

    view! {
        <section class="page status-page">
            <h1>"Access denied"</h1>
            <p>"Your account does not have permission to view this page."</p>
            <a class="btn btn--primary" href=home>"Go to your dashboard"</a>
        </section>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <section class="page status-page">
            <h1>"Page not found"</h1>
            <a class="btn" href="/">"Back to start"</a>
        </section>
    }
}
