//! Account registration and OTP verification pages.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::components::field::{SelectField, TextField};
use crate::net::types::{SignUpRequest, VerifyOtpRequest};
use crate::state::notice::NoticeState;
use crate::state::role::Role;
use crate::util::validation::{FieldErrors, sign_up_errors, validate_email, validate_otp};

fn account_types() -> Vec<(String, String)> {
    [Role::Doctor, Role::Business]
        .iter()
        .map(|r| (r.as_str().to_owned(), r.to_string()))
        .collect()
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let signed_up_as = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let form = SignUpRequest {
            name: name.get_untracked().trim().to_owned(),
            email: email.get_untracked().trim().to_owned(),
            phone: phone.get_untracked().trim().to_owned(),
            password: password.get_untracked(),
            signed_up_as: signed_up_as.get_untracked(),
        };
        let field_errors = sign_up_errors(&form, &confirm.get_untracked());
        let valid = field_errors.is_empty();
        errors.set(field_errors);
        if !valid {
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            use leptos_router::location::Url;

            use crate::components::notice_banner::notify;
            use crate::net::api::HttpApi;
            use crate::state::notice::NoticeKind;

            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::state::auth::sign_up(&HttpApi::new(), &form).await {
                    Ok(message) => {
                        notify(notices, NoticeKind::Success, message.unwrap_or_else(|| "Verification code sent".to_owned()));
                        let target = format!("/verify-otp?email={}", Url::escape(&form.email));
                        navigate(&target, leptos_router::NavigateOptions::default());
                    }
                    Err(failure) => notify(notices, NoticeKind::Error, failure.message),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (form, &navigate, notices);
        }
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Create an account"</h1>
                <TextField label="Full name" name="name" value=name errors=errors/>
                <TextField label="Email" name="email" input_type="email" value=email errors=errors/>
                <TextField label="Phone" name="phone" input_type="tel" value=phone errors=errors/>
                <SelectField
                    label="I am a"
                    name="signedUpAs"
                    value=signed_up_as
                    errors=errors
                    options=Signal::derive(account_types)
                />
                <TextField label="Password" name="password" input_type="password" value=password errors=errors/>
                <TextField
                    label="Confirm password"
                    name="confirmPassword"
                    input_type="password"
                    value=confirm
                    errors=errors
                />
                <button class="auth-card__submit" type="submit" disabled=move || busy.get()>
                    "Sign up"
                </button>
                <div class="auth-card__links">
                    <a href="/sign-in">"Already registered? Sign in"</a>
                </div>
            </form>
        </div>
    }
}

#[component]
pub fn VerifyOtpPage() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();
    let query = use_query_map();

    let email = RwSignal::new(query.with_untracked(|q| q.get("email")).unwrap_or_default());
    let otp = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let req = VerifyOtpRequest { email: email.get_untracked().trim().to_owned(), otp: otp.get_untracked().trim().to_owned() };
        let mut field_errors = FieldErrors::new();
        if let Some(e) = validate_email(&req.email) {
            field_errors.insert("email", e);
        }
        if let Some(e) = validate_otp(&req.otp) {
            field_errors.insert("otp", e);
        }
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
            use crate::net::api::HttpApi;
            use crate::state::notice::NoticeKind;

            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::state::auth::verify_otp(&HttpApi::new(), &req).await {
                    Ok(message) => {
                        notify(notices, NoticeKind::Success, message.unwrap_or_else(|| "Account verified. Please sign in.".to_owned()));
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
                <h1>"Verify your email"</h1>
                <p class="auth-card__hint">"Enter the 6-digit code we sent you."</p>
                <TextField label="Email" name="email" input_type="email" value=email errors=errors/>
                <TextField label="Code" name="otp" value=otp errors=errors placeholder="123456"/>
                <button class="auth-card__submit" type="submit" disabled=move || busy.get()>
                    "Verify"
                </button>
            </form>
        </div>
    }
}
