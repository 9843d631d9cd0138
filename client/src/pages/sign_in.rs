//! Sign-in page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Validates locally, calls [`crate::state::auth::sign_in`] and, after a short
//! settle delay, installs the session and navigates to the requested page
//! (`redirectUrl`) or the role's landing route.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::components::field::TextField;
use crate::config::REDIRECT_URL_KEY;
use crate::net::types::SignInRequest;
use crate::routes::safe_redirect;
use crate::state::notice::NoticeState;
use crate::state::session::SessionState;
use crate::util::validation::{FieldErrors, sign_in_errors};

#[component]
pub fn SignInPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();
    let query = use_query_map();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let form = SignInRequest { email: email.get_untracked().trim().to_owned(), password: password.get_untracked() };
        let field_errors = sign_in_errors(&form);
        let valid = field_errors.is_empty();
        errors.set(field_errors);
        if !valid {
            return;
        }
        let redirect = safe_redirect(query.with_untracked(|q| q.get(REDIRECT_URL_KEY)).as_deref());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            use crate::components::notice_banner::notify;
            use crate::config::SIGN_IN_SETTLE_MS;
            use crate::net::api::HttpApi;
            use crate::state::notice::NoticeKind;
            use crate::util::storage::LocalStore;
            use crate::util::time::now_ms;

            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let now = now_ms();
                match crate::state::auth::sign_in(&HttpApi::new(), &LocalStore, &form, now).await {
                    Ok(signed_in) => {
                        notify(notices, NoticeKind::Success, "Signed in");
                        gloo_timers::future::sleep(std::time::Duration::from_millis(SIGN_IN_SETTLE_MS)).await;
                        let target = redirect.unwrap_or_else(|| signed_in.landing.to_owned());
                        session.update(|s| s.establish(signed_in.session, now));
                        navigate(&target, leptos_router::NavigateOptions::default());
                    }
                    Err(failure) => {
                        notify(notices, NoticeKind::Error, failure.message);
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (form, redirect, &navigate, session, notices);
        }
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Sign in"</h1>
                <TextField label="Email" name="email" input_type="email" value=email errors=errors/>
                <TextField label="Password" name="password" input_type="password" value=password errors=errors/>
                <button class="auth-card__submit" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
                <div class="auth-card__links">
                    <a href="/forgot-password">"Forgot password?"</a>
                    <a href="/sign-up">"Create an account"</a>
                </div>
            </form>
        </div>
    }
}
