//! Inline notice banner and the helper pages use to raise notices.

use leptos::prelude::*;

use crate::state::notice::{NoticeKind, NoticeState};

/// Show `message` and dismiss it after the configured delay unless a newer
/// notice has replaced it by then.
pub fn notify(notices: RwSignal<NoticeState>, kind: NoticeKind, message: impl Into<String>) {
    let message = message.into();
    let Some(id) = notices.try_update(|n| n.show(kind, message)) else {
        return;
    };
    #[cfg(feature = "hydrate")]
    {
        let delay = u32::try_from(crate::config::NOTICE_DISMISS_MS).unwrap_or(u32::MAX);
        gloo_timers::callback::Timeout::new(delay, move || {
            notices.update(|n| {
                n.dismiss(id);
            });
        })
        .forget();
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
    }
}

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    move || {
        notices.get().current.map(|notice| {
            let id = notice.id;
            let class = format!("notice {}", notice.kind.css_modifier());
            view! {
                <div class=class role="status">
                    <span class="notice__message">{notice.message}</span>
                    <button
                        class="notice__close"
                        title="Dismiss"
                        on:click=move |_| {
                            notices.update(|n| {
                                n.dismiss(id);
                            });
                        }
                    >
                        "×"
                    </button>
                </div>
            }
        })
    }
}
