//! Notification inbox for the signed-in user.

use leptos::prelude::*;

use crate::state::account::AccountState;
use crate::state::collection::LoadState;
use crate::state::session::SessionState;

/// Fetch notifications once; the header badge reads the same slice.
pub fn load_notifications(session: RwSignal<SessionState>, account: RwSignal<AccountState>) {
    if account.with_untracked(|a| a.notifications.load != LoadState::Idle) {
        return;
    }
    account.update(|a| a.notifications.begin());
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = session.with_untracked(SessionState::api).list_notifications().await;
        super::expire_on_auth_error(session, &result);
        account.update(|a| a.notifications.settle(result));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = session;
}

#[component]
pub fn NotificationsPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let account = expect_context::<RwSignal<AccountState>>();
    load_notifications(session, account);

    // Optimistic: the badge drops at once and a failed call only logs.
    let mark_read = move |id: String| {
        if !account.try_update(|a| a.mark_read(&id)).unwrap_or(false) {
            return;
        }
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = session.with_untracked(SessionState::api).mark_notification_read(&id).await;
            super::expire_on_auth_error(session, &result);
            if let Err(e) = result {
                log::warn!("mark notification {id} read failed: {e}");
            }
        });
    };

    view! {
        <section class="page notifications-page">
            {move || account.with(|a| a.notifications.error().map(|m| view! { <p class="page-status page-status--error">{m.to_owned()}</p> }))}
            <Show when=move || account.with(|a| a.notifications.load == LoadState::Ready && a.notifications.is_empty())>
                <p class="page-status">"You're all caught up."</p>
            </Show>
            <ul class="notification-list">
                {move || {
                    account.with(|a| {
                        a.notifications
                            .items()
                            .iter()
                            .map(|n| {
                                let id = n.id.clone();
                                let unread = !n.read;
                                view! {
                                    <li class="notification" class:notification--unread=unread>
                                        <div class="notification__title">{n.title.clone()}</div>
                                        <div class="notification__body">{n.body.clone().unwrap_or_default()}</div>
                                        <div class="notification__meta">{n.created_at.clone().unwrap_or_default()}</div>
                                        {unread.then(|| view! {
                                            <button class="btn" on:click=move |_| mark_read(id.clone())>"Mark read"</button>
                                        })}
                                    </li>
                                }
                            })
                            .collect_view()
                    })
                }}
            </ul>
        </section>
    }
}
