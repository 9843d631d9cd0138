//! Labelled form inputs with per-field error text.

use leptos::prelude::*;

use crate::util::validation::FieldErrors;

#[component]
pub fn TextField(
    label: &'static str,
    name: &'static str,
    value: RwSignal<String>,
    errors: RwSignal<FieldErrors>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    let error = move || errors.with(|e| e.get(name).cloned());

    view! {
        <label class="field" class:field--invalid=move || error().is_some()>
            <span class="field__label">{label}</span>
            <input
                class="field__input"
                name=name
                type=input_type
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            {move || error().map(|msg| view! { <span class="field__error">{msg}</span> })}
        </label>
    }
}

/// A `<select>` over `(value, label)` options.
#[component]
pub fn SelectField(
    label: &'static str,
    name: &'static str,
    value: RwSignal<String>,
    errors: RwSignal<FieldErrors>,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
) -> impl IntoView {
    let error = move || errors.with(|e| e.get(name).cloned());

    view! {
        <label class="field" class:field--invalid=move || error().is_some()>
            <span class="field__label">{label}</span>
            <select
                class="field__input"
                name=name
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                <option value="">"Select…"</option>
                {move || {
                    options
                        .get()
                        .into_iter()
                        .map(|(v, text)| {
                            let selected = value.with(|current| *current == v);
                            view! { <option value=v selected=selected>{text}</option> }
                        })
                        .collect_view()
                }}
            </select>
            {move || error().map(|msg| view! { <span class="field__error">{msg}</span> })}
        </label>
    }
}
