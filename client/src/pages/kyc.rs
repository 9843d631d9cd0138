//! KYC wizard: four steps, persisted across reloads.
//!
//! SYSTEM CONTEXT
//! ==============
//! All wizard data lives in one [`KycProgress`] signal. Every keystroke is
//! written to the step draft; every successful "Next" commits the whole
//! record. Opening the page resumes from whatever storage still holds.
//! Submission sends the record to the backend and then forgets it locally.

use leptos::prelude::*;
use leptos::tachys::view::any_view::{AnyView, IntoAny};
use leptos_router::hooks::use_navigate;

use crate::components::field::SelectField;
use crate::pages::crm::load_catalog;
use crate::state::account::AccountState;
use crate::state::catalog::CatalogState;
use crate::state::kyc::{self, KycProgress, KycStep, StepStatus};
use crate::state::notice::NoticeState;
use crate::state::session::SessionState;
use crate::util::storage::LocalStore;
use crate::util::time::now_ms;
use crate::util::validation::FieldErrors;

/// Text input bound straight to one wizard field.
#[component]
fn KycInput(
    progress: RwSignal<KycProgress>,
    errors: RwSignal<FieldErrors>,
    step: KycStep,
    label: &'static str,
    name: &'static str,
    #[prop(default = "text")] input_type: &'static str,
) -> impl IntoView {
    let error = move || errors.with(|e| e.get(name).cloned());
    let write = move |value: String| {
        progress.update(|p| p.set_field(step, name, &value));
        progress.with_untracked(|p| kyc::save_draft(&LocalStore, step, &p.fields(step), now_ms()));
    };

    view! {
        <label class="field" class:field--invalid=move || error().is_some()>
            <span class="field__label">{label}</span>
            <input
                class="field__input"
                name=name
                type=input_type
                prop:value=move || progress.with(|p| p.field(step, name))
                on:input=move |ev| write(event_target_value(&ev))
            />
            {move || error().map(|msg| view! { <span class="field__error">{msg}</span> })}
        </label>
    }
}

fn step_body(
    step: KycStep,
    progress: RwSignal<KycProgress>,
    errors: RwSignal<FieldErrors>,
    category: RwSignal<String>,
    category_options: Signal<Vec<(String, String)>>,
    catalog: RwSignal<CatalogState>,
) -> AnyView {
    match step {
        KycStep::PersonalDetails => view! {
            <KycInput progress=progress errors=errors step=step label="Full name" name="fullName"/>
            <KycInput progress=progress errors=errors step=step label="Date of birth" name="dateOfBirth" input_type="date"/>
            <KycInput progress=progress errors=errors step=step label="Phone" name="phone" input_type="tel"/>
            <KycInput progress=progress errors=errors step=step label="Address" name="address"/>
        }
        .into_any(),
        KycStep::Category => view! {
            <SelectField label="Category" name="categoryId" value=category errors=errors options=category_options/>
        }
        .into_any(),
        KycStep::Documents => view! {
            <KycInput progress=progress errors=errors step=step label="ID document link" name="idDocument" input_type="url"/>
            <KycInput progress=progress errors=errors step=step label="License number" name="licenseNumber"/>
        }
        .into_any(),
        KycStep::Review => {
            let summary = move || {
                progress.with(|p| {
                    let category_id = p.field(KycStep::Category, "categoryId");
                    let category_name = catalog.with(|c| c.category_name(&category_id).map(str::to_owned));
                    vec![
                        ("Full name", p.field(KycStep::PersonalDetails, "fullName")),
                        ("Date of birth", p.field(KycStep::PersonalDetails, "dateOfBirth")),
                        ("Phone", p.field(KycStep::PersonalDetails, "phone")),
                        ("Address", p.field(KycStep::PersonalDetails, "address")),
                        ("Category", category_name.unwrap_or(category_id)),
                        ("License number", p.field(KycStep::Documents, "licenseNumber")),
                    ]
                })
                .into_iter()
                .map(|(label, value)| view! { <dt>{label}</dt><dd>{value}</dd> })
                .collect_view()
            };
            let confirmed = move || progress.with(|p| p.field(KycStep::Review, "confirmed") == "true");
            let toggle = move |checked: bool| {
                let checked = if checked { "true" } else { "false" };
                progress.update(|p| p.set_field(KycStep::Review, "confirmed", checked));
                progress.with_untracked(|p| {
                    kyc::save_draft(&LocalStore, KycStep::Review, &p.fields(KycStep::Review), now_ms());
                });
            };
            view! {
                <dl class="kyc-summary">{summary}</dl>
                <label class="field field--checkbox" class:field--invalid=move || errors.with(|e| e.contains_key("confirmed"))>
                    <input type="checkbox" prop:checked=confirmed on:change=move |ev| toggle(event_target_checked(&ev))/>
                    <span>"I confirm these details are correct"</span>
                </label>
                {move || errors.with(|e| e.get("confirmed").cloned()).map(|msg| view! { <span class="field__error">{msg}</span> })}
            }
            .into_any()
        }
    }
}

#[component]
pub fn KycFormPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let catalog = expect_context::<RwSignal<CatalogState>>();
    let account = expect_context::<RwSignal<AccountState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();
    load_catalog(session, catalog);

    let progress = RwSignal::new(kyc::resume(&LocalStore, now_ms()));
    let errors = RwSignal::new(FieldErrors::new());
    let busy = RwSignal::new(false);

    // The select writes a plain string signal; mirror it into the record.
    let category = RwSignal::new(progress.with_untracked(|p| p.field(KycStep::Category, "categoryId")));
    Effect::new(move || {
        let id = category.get();
        let changed = progress.with_untracked(|p| p.field(KycStep::Category, "categoryId") != id);
        if changed {
            progress.update(|p| p.set_field(KycStep::Category, "categoryId", &id));
            kyc::remember_category(&LocalStore, &id);
            progress.with_untracked(|p| {
                kyc::save_draft(&LocalStore, KycStep::Category, &p.fields(KycStep::Category), now_ms());
            });
        }
    });

    let category_options = Signal::derive(move || {
        catalog.with(|c| {
            c.active_categories()
                .into_iter()
                .map(|cat| (cat.id.clone(), cat.name.clone()))
                .collect::<Vec<_>>()
        })
    });

    let submit = move || {
        let submission = progress.with_untracked(KycProgress::submission);
        busy.set(true);
        #[cfg(feature = "hydrate")]
        {
            use crate::components::notice_banner::notify;
            use crate::state::notice::NoticeKind;

            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = session.with_untracked(SessionState::api).submit_kyc(&submission).await;
                super::expire_on_auth_error(session, &result);
                match result {
                    Ok(message) => {
                        kyc::clear(&LocalStore);
                        account.update(|a| {
                            if let Some(profile) = a.profile.as_mut() {
                                profile.kyc_status = Some("pending".to_owned());
                            }
                        });
                        notify(notices, NoticeKind::Success, message.unwrap_or_else(|| "KYC submitted".to_owned()));
                        navigate("/app/account/settings", leptos_router::NavigateOptions::default());
                    }
                    Err(e) => notify(notices, NoticeKind::Error, e.user_message()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (submission, &navigate, account, notices);
        }
    };

    let on_next = move |_| {
        if busy.get_untracked() {
            return;
        }
        let finishing = progress.with_untracked(|p| p.step() == KycStep::Review);
        let Some(outcome) = progress.try_update(KycProgress::advance) else {
            return;
        };
        match outcome {
            Ok(_) => {
                errors.set(FieldErrors::new());
                progress.with_untracked(|p| kyc::save(&LocalStore, p, now_ms()));
                if finishing {
                    submit();
                }
            }
            Err(field_errors) => errors.set(field_errors),
        }
    };

    let on_back = move |_| {
        errors.set(FieldErrors::new());
        progress.update(|p| {
            p.back();
        });
        progress.with_untracked(|p| kyc::save(&LocalStore, p, now_ms()));
    };

    let jump = move |step: KycStep| {
        if progress.try_update(|p| p.go_to(step)).unwrap_or(false) {
            errors.set(FieldErrors::new());
        }
    };

    // Re-render the step body only when the step changes, not on every keystroke.
    let current_step = Memo::new(move |_| progress.with(KycProgress::step));

    let steps = move || {
        let current = current_step.get();
        KycStep::ALL
            .into_iter()
            .map(|step| {
                let done = progress.with(|p| p.status_of(step) == StepStatus::Complete);
                view! {
                    <li
                        class="kyc-steps__item"
                        class:kyc-steps__item--current=step == current
                        class:kyc-steps__item--done=done
                        on:click=move |_| jump(step)
                    >
                        {step.title()}
                    </li>
                }
            })
            .collect_view()
    };

    let body = move || step_body(current_step.get(), progress, errors, category, category_options, catalog);

    view! {
        <section class="page kyc-page">
            <ol class="kyc-steps">{steps}</ol>
            <div class="form-card">
                <h2>{move || current_step.get().title()}</h2>
                {body}
                <div class="form-card__actions">
                    <button
                        class="btn"
                        type="button"
                        disabled=move || current_step.get() == KycStep::PersonalDetails
                        on:click=on_back
                    >
                        "Back"
                    </button>
                    <button class="btn btn--primary" type="button" disabled=move || busy.get() on:click=on_next>
                        {move || if current_step.get() == KycStep::Review { "Submit" } else { "Next" }}
                    </button>
                </div>
            </div>
        </section>
    }
}
