//! Guarded route wrapper and the framed application layout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every routed page is mounted as `<Guarded route="key">`. The wrapper
//! looks the key up in the route table, re-evaluates the guard whenever the
//! session or location changes and either renders the page inside its layout,
//! renders the access-denied view, or waits while a redirect happens.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::hooks::{use_location, use_navigate, use_query_map};

use crate::components::notice_banner::NoticeBanner;
use crate::config::REDIRECT_URL_KEY;
use crate::components::side_nav::SideNav;
use crate::pages::access_denied::AccessDeniedPage;
use crate::pages::notifications::load_notifications;
use crate::routes::{Guard, Layout, RouteSpec, find_route, guard};
use crate::state::account::AccountState;
use crate::state::session::SessionState;
use crate::util::auth::{install_guard_redirect, sign_out};

#[component]
pub fn Guarded(route: &'static str, children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let location = use_location();
    let query = use_query_map();
    let spec = find_route(route);
    if spec.is_none() {
        log::error!("no route spec registered for {route}");
    }

    let decision = Memo::new(move |_| {
        let Some(spec) = spec else {
            return Guard::Forbidden;
        };
        let path = location.pathname.get();
        let search = location.search.get();
        let requested = if search.is_empty() {
            path
        } else {
            format!("{path}?{}", search.trim_start_matches('?'))
        };
        let redirect = query.with(|q| q.get(REDIRECT_URL_KEY));
        session.with(|s| guard(spec, s, &requested, redirect.as_deref()))
    });
    install_guard_redirect(decision, use_navigate());

    move || match (decision.get(), spec) {
        (Guard::Allow, Some(spec)) => {
            let children = children.clone();
            match spec.layout {
                Layout::Framed => view! { <AppFrame spec=spec>{children()}</AppFrame> }.into_any(),
                Layout::Blank => view! {
                    <main class="blank-layout">
                        <NoticeBanner/>
                        {children()}
                    </main>
                }
                .into_any(),
            }
        }
        (Guard::Forbidden, _) | (Guard::Allow, None) => view! { <AccessDeniedPage/> }.into_any(),
        (Guard::Pending | Guard::Redirect(_), _) => ().into_any(),
    }
}

/// Side menu, header and content area.
#[component]
fn AppFrame(spec: &'static RouteSpec, children: Children) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let account = expect_context::<RwSignal<AccountState>>();
    let navigate = use_navigate();
    load_notifications(session, account);

    let user_name = move || {
        session.with(|s| {
            s.user
                .as_ref()
                .map(|u| u.display_name().to_owned())
                .unwrap_or_default()
        })
    };
    let unread = move || account.with(AccountState::unread_count);
    let on_sign_out = move |_| sign_out(session, account, navigate.clone());

    view! {
        <div class="app-frame">
            <SideNav/>
            <div class="app-frame__body">
                <header class="app-header">
                    <h1 class="app-header__title">{spec.header.unwrap_or_default()}</h1>
                    <div class="app-header__actions">
                        <a class="app-header__notifications" href="/app/notifications">
                            "Notifications"
                            <Show when=move || { unread() > 0 }>
                                <span class="app-header__badge">{unread}</span>
                            </Show>
                        </a>
                        <span class="app-header__user">{user_name}</span>
                        <button class="app-header__sign-out" on:click=on_sign_out>
                            "Sign out"
                        </button>
                    </div>
                </header>
                <NoticeBanner/>
                <main class="app-main" class:app-main--gutterless=spec.gutterless>
                    {children()}
                </main>
            </div>
        </div>
    }
}
