//! Browser driver for the idle sign-out timer.
//!
//! SYSTEM CONTEXT
//! ==============
//! Installed once at the app root. While the session is signed in, pointer
//! moves, key presses, scrolls and clicks re-arm a single countdown and
//! record activity. When the countdown elapses the session is signed out and
//! `on_expire` runs (the app navigates to the sign-in page).
//!
//! TRADE-OFFS
//! ==========
//! The countdown is a `gloo_timers` timeout that is dropped and recreated on
//! every event. Dropping cancels it, so at most one expiry is ever pending.
//! A timeout that wakes before the deadline schedules itself again. The
//! countdown starts from the session's last recorded activity, so reloading
//! the page does not reset it.
//! Server renders install nothing.

use leptos::prelude::*;

use crate::state::session::SessionState;

/// Watch user activity and sign out after the idle window.
pub fn install_idle_watch(session: RwSignal<SessionState>, on_expire: impl Fn() + Clone + 'static) {
    #[cfg(feature = "hydrate")]
    {
        browser::install(session, on_expire);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session, on_expire);
    }
}

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo_timers::callback::Timeout;
    use leptos::ev;
    use leptos::prelude::*;

    use crate::config::idle_timeout_ms;
    use crate::state::idle::{IdleTimer, Tick};
    use crate::state::session::SessionState;
    use crate::util::storage::LocalStore;
    use crate::util::time::now_ms;

    struct Watch {
        timer: IdleTimer,
        pending: Option<Timeout>,
    }

    type Shared = Rc<RefCell<Watch>>;

    fn schedule(watch: &Shared, session: RwSignal<SessionState>, on_expire: impl Fn() + Clone + 'static) {
        let Some(remaining) = watch.borrow().timer.remaining_ms(now_ms()) else {
            return;
        };
        let delay = u32::try_from(remaining.max(0)).unwrap_or(u32::MAX);
        let fired = Rc::clone(watch);
        let timeout = Timeout::new(delay, move || {
            let tick = fired.borrow_mut().timer.on_timeout(now_ms());
            match tick {
                Tick::Expired => {
                    log::info!("idle window elapsed; signing out");
                    session.update(|s| s.sign_out(&LocalStore));
                    on_expire();
                }
                Tick::Wait(_) => schedule(&fired, session, on_expire.clone()),
                Tick::Stopped => {}
            }
        });
        // Replacing the old handle cancels it.
        watch.borrow_mut().pending = Some(timeout);
    }

    pub(super) fn install(session: RwSignal<SessionState>, on_expire: impl Fn() + Clone + 'static) {
        let watch: Shared = Rc::new(RefCell::new(Watch { timer: IdleTimer::new(idle_timeout_ms()), pending: None }));

        let status_watch = Rc::clone(&watch);
        let status_expire = on_expire.clone();
        Effect::new(move || {
            let signed_in = session.with(SessionState::is_signed_in);
            let armed = status_watch.borrow().timer.is_armed();
            if signed_in && !armed {
                let last_active = session.with_untracked(|s| s.last_active_at);
                status_watch.borrow_mut().timer.arm_from(last_active, now_ms());
                schedule(&status_watch, session, status_expire.clone());
            } else if !signed_in && armed {
                let mut w = status_watch.borrow_mut();
                w.timer.disarm();
                w.pending = None;
            }
        });

        let on_activity = move || {
            let now = now_ms();
            if !watch.borrow_mut().timer.touch(now) {
                return;
            }
            schedule(&watch, session, on_expire.clone());
            session.update_untracked(|s| {
                s.record_activity(&LocalStore, now);
            });
        };

        let activity = Rc::new(on_activity);
        let a = Rc::clone(&activity);
        let _ = window_event_listener(ev::mousemove, move |_| a());
        let a = Rc::clone(&activity);
        let _ = window_event_listener(ev::keydown, move |_| a());
        let a = Rc::clone(&activity);
        let _ = window_event_listener(ev::scroll, move |_| a());
        let a = Rc::clone(&activity);
        let _ = window_event_listener(ev::click, move |_| a());
    }
}
