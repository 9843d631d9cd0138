//! CRM pages: category and service catalog management.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both pages edit the shared [`CatalogState`]. Saves upsert the backend's
//! copy of the record; deletes remove it locally once the backend agrees.

#[cfg(test)]
#[path = "crm_test.rs"]
mod crm_test;

use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::components::field::{SelectField, TextField};
use crate::net::types::{Category, Service};
use crate::state::catalog::CatalogState;
use crate::state::collection::LoadState;
use crate::state::notice::NoticeState;
use crate::state::session::SessionState;
use crate::util::validation::{FieldErrors, validate_required};

/// Fetch categories and services unless already loaded.
pub fn load_catalog(session: RwSignal<SessionState>, catalog: RwSignal<CatalogState>) {
    let (need_categories, need_services) = catalog.with_untracked(|c| {
        (c.categories.load == LoadState::Idle, c.services.load == LoadState::Idle)
    });
    if need_categories {
        catalog.update(|c| c.categories.begin());
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = session.with_untracked(SessionState::api).list_categories().await;
            super::expire_on_auth_error(session, &result);
            catalog.update(|c| c.categories.settle(result));
        });
    }
    if need_services {
        catalog.update(|c| c.services.begin());
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = session.with_untracked(SessionState::api).list_services().await;
            super::expire_on_auth_error(session, &result);
            catalog.update(|c| c.services.settle(result));
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = session;
}

fn parse_price(raw: &str) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(Some(price)),
        _ => Err("Enter a non-negative amount".to_owned()),
    }
}

#[component]
pub fn CategoriesPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let catalog = expect_context::<RwSignal<CatalogState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    load_catalog(session, catalog);

    let editing_id = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());

    let reset_form = move || {
        editing_id.set(String::new());
        name.set(String::new());
        description.set(String::new());
        errors.set(FieldErrors::new());
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let mut field_errors = FieldErrors::new();
        if let Some(e) = validate_required("Name", &name.get_untracked()) {
            field_errors.insert("name", e);
        }
        let valid = field_errors.is_empty();
        errors.set(field_errors);
        if !valid {
            return;
        }
        let id = editing_id.get_untracked();
        let active = catalog.with_untracked(|c| c.categories.get(&id).is_none_or(|existing| existing.active));
        let text = description.get_untracked().trim().to_owned();
        let category = Category {
            id,
            name: name.get_untracked().trim().to_owned(),
            description: (!text.is_empty()).then_some(text),
            active,
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::components::notice_banner::notify;
            use crate::state::notice::NoticeKind;

            let result = session.with_untracked(SessionState::api).save_category(&category).await;
            super::expire_on_auth_error(session, &result);
            match result {
                Ok(saved) => {
                    catalog.update(|c| c.categories.upsert(saved));
                    notify(notices, NoticeKind::Success, "Category saved");
                    reset_form();
                }
                Err(e) => notify(notices, NoticeKind::Error, e.user_message()),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (category, notices);
    };

    let edit = move |category: Category| {
        editing_id.set(category.id);
        name.set(category.name);
        description.set(category.description.unwrap_or_default());
        errors.set(FieldErrors::new());
    };

    let delete = move |id: String| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::components::notice_banner::notify;
            use crate::state::notice::NoticeKind;

            let result = session.with_untracked(SessionState::api).delete_category(&id).await;
            super::expire_on_auth_error(session, &result);
            match result {
                Ok(_) => {
                    catalog.update(|c| c.remove_category(&id));
                    notify(notices, NoticeKind::Success, "Category deleted");
                }
                Err(e) => notify(notices, NoticeKind::Error, e.user_message()),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    };

    view! {
        <section class="page crm-page">
            <form class="form-card form-card--inline" on:submit=on_submit>
                <TextField label="Name" name="name" value=name errors=errors/>
                <TextField label="Description" name="description" value=description errors=errors/>
                <button class="btn btn--primary" type="submit">
                    {move || if editing_id.with(String::is_empty) { "Add category" } else { "Save changes" }}
                </button>
                <Show when=move || !editing_id.with(String::is_empty)>
                    <button class="btn" type="button" on:click=move |_| reset_form()>"Cancel"</button>
                </Show>
            </form>
            {move || catalog.with(|c| c.categories.error().map(|m| view! { <p class="page-status page-status--error">{m.to_owned()}</p> }))}
            <table class="data-table">
                <thead>
                    <tr><th>"Name"</th><th>"Description"</th><th>"Services"</th><th></th></tr>
                </thead>
                <tbody>
                    {move || {
                        catalog.with(|c| {
                            c.categories
                                .items()
                                .iter()
                                .map(|category| {
                                    let services = c.services_for(&category.id).len();
                                    let for_edit = category.clone();
                                    let id = category.id.clone();
                                    view! {
                                        <tr class:data-table__row--inactive=!category.active>
                                            <td>{category.name.clone()}</td>
                                            <td>{category.description.clone().unwrap_or_default()}</td>
                                            <td>{services}</td>
                                            <td class="data-table__actions">
                                                <button class="btn" on:click=move |_| edit(for_edit.clone())>"Edit"</button>
                                                <button class="btn btn--danger" on:click=move |_| delete(id.clone())>"Delete"</button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        })
                    }}
                </tbody>
            </table>
        </section>
    }
}

#[component]
pub fn ServicesPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let catalog = expect_context::<RwSignal<CatalogState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    load_catalog(session, catalog);

    let editing_id = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let category_id = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());

    let category_options = Signal::derive(move || {
        catalog.with(|c| {
            c.active_categories()
                .into_iter()
                .map(|cat| (cat.id.clone(), cat.name.clone()))
                .collect::<Vec<_>>()
        })
    });

    let reset_form = move || {
        editing_id.set(String::new());
        name.set(String::new());
        category_id.set(String::new());
        price.set(String::new());
        errors.set(FieldErrors::new());
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let mut field_errors = FieldErrors::new();
        if let Some(e) = validate_required("Name", &name.get_untracked()) {
            field_errors.insert("name", e);
        }
        if let Some(e) = validate_required("Category", &category_id.get_untracked()) {
            field_errors.insert("categoryId", e);
        }
        let parsed_price = parse_price(&price.get_untracked());
        if let Err(e) = &parsed_price {
            field_errors.insert("price", e.clone());
        }
        let valid = field_errors.is_empty();
        errors.set(field_errors);
        let (true, Ok(price_value)) = (valid, parsed_price) else {
            return;
        };
        let id = editing_id.get_untracked();
        let active = catalog.with_untracked(|c| c.services.get(&id).is_none_or(|existing| existing.active));
        let service = Service {
            id,
            category_id: category_id.get_untracked(),
            name: name.get_untracked().trim().to_owned(),
            price: price_value,
            active,
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::components::notice_banner::notify;
            use crate::state::notice::NoticeKind;

            let result = session.with_untracked(SessionState::api).save_service(&service).await;
            super::expire_on_auth_error(session, &result);
            match result {
                Ok(saved) => {
                    catalog.update(|c| c.services.upsert(saved));
                    notify(notices, NoticeKind::Success, "Service saved");
                    reset_form();
                }
                Err(e) => notify(notices, NoticeKind::Error, e.user_message()),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (service, notices);
    };

    let edit = move |service: Service| {
        editing_id.set(service.id);
        name.set(service.name);
        category_id.set(service.category_id);
        price.set(service.price.map(|p| p.to_string()).unwrap_or_default());
        errors.set(FieldErrors::new());
    };

    let delete = move |id: String| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::components::notice_banner::notify;
            use crate::state::notice::NoticeKind;

            let result = session.with_untracked(SessionState::api).delete_service(&id).await;
            super::expire_on_auth_error(session, &result);
            match result {
                Ok(_) => {
                    catalog.update(|c| {
                        c.services.remove(&id);
                    });
                    notify(notices, NoticeKind::Success, "Service deleted");
                }
                Err(e) => notify(notices, NoticeKind::Error, e.user_message()),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    };

    view! {
        <section class="page crm-page">
            <form class="form-card form-card--inline" on:submit=on_submit>
                <TextField label="Name" name="name" value=name errors=errors/>
                <SelectField label="Category" name="categoryId" value=category_id errors=errors options=category_options/>
                <TextField label="Price" name="price" value=price errors=errors placeholder="0.00"/>
                <button class="btn btn--primary" type="submit">
                    {move || if editing_id.with(String::is_empty) { "Add service" } else { "Save changes" }}
                </button>
                <Show when=move || !editing_id.with(String::is_empty)>
                    <button class="btn" type="button" on:click=move |_| reset_form()>"Cancel"</button>
                </Show>
            </form>
            {move || catalog.with(|c| c.services.error().map(|m| view! { <p class="page-status page-status--error">{m.to_owned()}</p> }))}
            <table class="data-table">
                <thead>
                    <tr><th>"Name"</th><th>"Category"</th><th>"Price"</th><th></th></tr>
                </thead>
                <tbody>
                    {move || {
                        catalog.with(|c| {
                            c.services
                                .items()
                                .iter()
                                .map(|service| {
                                    let category = c.category_name(&service.category_id).unwrap_or("-").to_owned();
                                    let price = service.price.map(|p| format!("{p:.2}")).unwrap_or_default();
                                    let for_edit = service.clone();
                                    let id = service.id.clone();
                                    view! {
                                        <tr class:data-table__row--inactive=!service.active>
                                            <td>{service.name.clone()}</td>
                                            <td>{category}</td>
                                            <td>{price}</td>
                                            <td class="data-table__actions">
                                                <button class="btn" on:click=move |_| edit(for_edit.clone())>"Edit"</button>
                                                <button class="btn btn--danger" on:click=move |_| delete(id.clone())>"Delete"</button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        })
                    }}
                </tbody>
            </table>
        </section>
    }
}
