//! Account settings: profile, uploaded documents and sign-out.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::field::TextField;
use crate::net::types::ProfileUpdate;
use crate::state::account::AccountState;
use crate::state::collection::LoadState;
use crate::state::notice::NoticeState;
use crate::state::session::SessionState;
use crate::util::auth::sign_out;
use crate::util::validation::{FieldErrors, validate_phone, validate_required};

/// Fetch the profile and document list for the settings page.
fn load_account(session: RwSignal<SessionState>, account: RwSignal<AccountState>, name: RwSignal<String>, phone: RwSignal<String>) {
    let need_documents = account.with_untracked(|a| a.documents.load == LoadState::Idle);
    if need_documents {
        account.update(|a| a.documents.begin());
    }
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let api = session.with_untracked(SessionState::api);
        let profile = api.fetch_profile().await;
        super::expire_on_auth_error(session, &profile);
        match profile {
            Ok(profile) => {
                name.set(profile.name.clone());
                phone.set(profile.phone.clone().unwrap_or_default());
                account.update(|a| a.profile = Some(profile));
            }
            Err(e) => log::warn!("profile fetch failed: {e}"),
        }
        if need_documents {
            let documents = api.list_documents().await;
            account.update(|a| a.documents.settle(documents));
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (session, name, phone, need_documents);
}

#[component]
pub fn AccountSettingsPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let account = expect_context::<RwSignal<AccountState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let doc_kind = RwSignal::new(String::new());
    let doc_url = RwSignal::new(String::new());
    let doc_errors = RwSignal::new(FieldErrors::new());
    load_account(session, account, name, phone);

    let on_save_profile = move |ev: SubmitEvent| {
        ev.prevent_default();
        let phone_value = phone.get_untracked().trim().to_owned();
        let mut field_errors = FieldErrors::new();
        if let Some(e) = validate_required("Name", &name.get_untracked()) {
            field_errors.insert("name", e);
        }
        if !phone_value.is_empty() {
            if let Some(e) = validate_phone(&phone_value) {
                field_errors.insert("phone", e);
            }
        }
        let valid = field_errors.is_empty();
        errors.set(field_errors);
        if !valid {
            return;
        }
        let update = ProfileUpdate {
            name: name.get_untracked().trim().to_owned(),
            phone: (!phone_value.is_empty()).then_some(phone_value),
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::components::notice_banner::notify;
            use crate::state::notice::NoticeKind;

            let result = session.with_untracked(SessionState::api).update_profile(&update).await;
            super::expire_on_auth_error(session, &result);
            match result {
                Ok(profile) => {
                    account.update(|a| a.profile = Some(profile));
                    notify(notices, NoticeKind::Success, "Profile updated");
                }
                Err(e) => notify(notices, NoticeKind::Error, e.user_message()),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (update, notices);
    };

    let on_add_document = move |ev: SubmitEvent| {
        ev.prevent_default();
        let kind = doc_kind.get_untracked().trim().to_owned();
        let url = doc_url.get_untracked().trim().to_owned();
        let mut field_errors = FieldErrors::new();
        if let Some(e) = validate_required("Document type", &kind) {
            field_errors.insert("kind", e);
        }
        if let Some(e) = validate_required("Document link", &url) {
            field_errors.insert("url", e);
        }
        let valid = field_errors.is_empty();
        doc_errors.set(field_errors);
        if !valid {
            return;
        }

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::components::notice_banner::notify;
            use crate::state::notice::NoticeKind;

            let result = session.with_untracked(SessionState::api).add_document(&kind, &url).await;
            super::expire_on_auth_error(session, &result);
            match result {
                Ok(document) => {
                    account.update(|a| a.documents.upsert(document));
                    doc_kind.set(String::new());
                    doc_url.set(String::new());
                    notify(notices, NoticeKind::Success, "Document added");
                }
                Err(e) => notify(notices, NoticeKind::Error, e.user_message()),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (kind, url);
    };

    let on_sign_out = move |_| sign_out(session, account, navigate.clone());
    let email = move || account.with(|a| a.profile.as_ref().map(|p| p.email.clone()).unwrap_or_default());
    let kyc_status = move || account.with(|a| a.kyc_status().unwrap_or("not submitted").to_owned());

    view! {
        <section class="page account-page">
            <form class="form-card" on:submit=on_save_profile>
                <h2>"Profile"</h2>
                <p class="form-card__meta">{email}</p>
                <TextField label="Name" name="name" value=name errors=errors/>
                <TextField label="Phone" name="phone" input_type="tel" value=phone errors=errors/>
                <button class="btn btn--primary" type="submit">"Save profile"</button>
            </form>

            <div class="form-card">
                <h2>"Verification"</h2>
                <p>"KYC status: " <strong>{kyc_status}</strong></p>
                <a class="btn" href="/app/account/kyc-form">"Open KYC form"</a>
            </div>

            <form class="form-card" on:submit=on_add_document>
                <h2>"Documents"</h2>
                <ul class="document-list">
                    {move || {
                        account.with(|a| {
                            a.documents
                                .items()
                                .iter()
                                .map(|d| {
                                    let status = d.status.clone().unwrap_or_else(|| "pending".to_owned());
                                    view! {
                                        <li>
                                            <span class="document-list__kind">{d.kind.clone()}</span>
                                            <span class="document-list__status">{status}</span>
                                        </li>
                                    }
                                })
                                .collect_view()
                        })
                    }}
                </ul>
                <TextField label="Document type" name="kind" value=doc_kind errors=doc_errors placeholder="license"/>
                <TextField label="Document link" name="url" input_type="url" value=doc_url errors=doc_errors/>
                <button class="btn" type="submit">"Add document"</button>
            </form>

            <button class="btn btn--danger" on:click=on_sign_out>"Sign out"</button>
        </section>
    }
}
