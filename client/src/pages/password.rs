//! Forgot-password and reset-password pages.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::components::field::TextField;
use crate::net::types::{ForgotPasswordRequest, ResetPasswordRequest};
use crate::state::notice::NoticeState;
use crate::util::validation::{FieldErrors, reset_password_errors, validate_email};

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();
    let email = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let busy = RwSignal::new(false);
    let sent = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let req = ForgotPasswordRequest { email: email.get_untracked().trim().to_owned() };
        let mut field_errors = FieldErrors::new();
        if let Some(e) = validate_email(&req.email) {
            field_errors.insert("email", e);
        }
        let valid = field_errors.is_empty();
        errors.set(field_errors);
        if !valid {
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::components::notice_banner::notify;
            use crate::state::notice::NoticeKind;

            match crate::state::auth::forgot_password(&crate::net::api::HttpApi::new(), &req).await {
                Ok(message) => {
                    sent.set(true);
                    notify(notices, NoticeKind::Success, message.unwrap_or_else(|| "Check your inbox for a reset link".to_owned()));
                }
                Err(failure) => notify(notices, NoticeKind::Error, failure.message),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (req, notices, sent);
        }
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Forgot password"</h1>
                <Show
                    when=move || !sent.get()
                    fallback=|| view! { <p class="auth-card__hint">"If the address is registered, a reset link is on its way."</p> }
                >
                    <TextField label="Email" name="email" input_type="email" value=email errors=errors/>
                    <button class="auth-card__submit" type="submit" disabled=move || busy.get()>
                        "Send reset link"
                    </button>
                </Show>
                <div class="auth-card__links">
                    <a href="/sign-in">"Back to sign in"</a>
                </div>
            </form>
        </div>
    }
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();
    let query = use_query_map();

    let token = RwSignal::new(query.with_untracked(|q| q.get("token")).unwrap_or_default());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let req = ResetPasswordRequest { token: token.get_untracked().trim().to_owned(), password: password.get_untracked() };
        let field_errors = reset_password_errors(&req, &confirm.get_untracked());
        let valid = field_errors.is_empty();
        errors.set(field_errors);
        if !valid {
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            use crate::components::notice_banner::notify;
            use crate::config::UNAUTHENTICATED_ENTRY_PATH;
            use crate::state::notice::NoticeKind;

            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::state::auth::reset_password(&crate::net::api::HttpApi::new(), &req).await {
                    Ok(message) => {
                        notify(notices, NoticeKind::Success, message.unwrap_or_else(|| "Password updated. Please sign in.".to_owned()));
                        navigate(UNAUTHENTICATED_ENTRY_PATH, leptos_router::NavigateOptions::default());
                    }
                    Err(failure) => notify(notices, NoticeKind::Error, failure.message),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (req, &navigate, notices);
        }
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Choose a new password"</h1>
                <Show when=move || errors.with(|e| e.contains_key("token"))>
                    <p class="field__error">"This reset link is invalid. Request a new one."</p>
                </Show>
                <TextField label="New password" name="password" input_type="password" value=password errors=errors/>
                <TextField
                    label="Confirm password"
                    name="confirmPassword"
                    input_type="password"
                    value=confirm
                    errors=errors
                />
                <button class="auth-card__submit" type="submit" disabled=move || busy.get()>
                    "Update password"
                </button>
            </form>
        </div>
    }
}
