//! Side menu rendered from the role-filtered navigation tree.
//!
//! SYSTEM CONTEXT
//! ==============
//! The menu is recomputed whenever the session changes. The role comes from
//! the persisted sign-in payload, so the menu matches what a reload would show.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::hooks::use_location;

use crate::nav::menu_for;
use crate::nav::tree::{NavKind, NavigationNode};
use crate::state::session::SessionState;
use crate::util::storage::LocalStore;

#[component]
pub fn SideNav() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let location = use_location();

    let menu = move || {
        session.track();
        menu_for(&LocalStore)
    };

    view! {
        <nav class="side-nav">
            <div class="side-nav__brand">"JobDesk"</div>
            <ul class="side-nav__list">
                {move || {
                    let current = location.pathname.get();
                    menu().into_iter().map(|node| render_node(node, &current)).collect_view()
                }}
            </ul>
        </nav>
    }
}

fn render_node(node: NavigationNode, current: &str) -> AnyView {
    let icon_class = format!("side-nav__icon side-nav__icon--{}", node.icon);
    match node.kind {
        NavKind::Leaf => {
            let active = node.path == current;
            view! {
                <li class="side-nav__item" class:side-nav__item--active=active>
                    <a href=node.path>
                        <span class=icon_class></span>
                        <span class="side-nav__title">{node.title}</span>
                    </a>
                </li>
            }
            .into_any()
        }
        NavKind::Group | NavKind::SectionTitle => {
            let heading_class = if node.kind == NavKind::Group {
                "side-nav__group"
            } else {
                "side-nav__section"
            };
            let children = node
                .children
                .into_iter()
                .map(|child| render_node(child, current))
                .collect_view();
            view! {
                <li class=heading_class>
                    <div class="side-nav__heading">
                        <span class=icon_class></span>
                        <span class="side-nav__title">{node.title}</span>
                    </div>
                    <ul class="side-nav__list side-nav__list--nested">{children}</ul>
                </li>
            }
            .into_any()
        }
    }
}
