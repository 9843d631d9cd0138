//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    NavigateOptions, StaticSegment,
    components::{Route, Router, Routes},
    hooks::use_navigate,
};

use crate::components::app_shell::Guarded;
use crate::config::{UNAUTHENTICATED_ENTRY_PATH, idle_timeout_ms};
use crate::pages::access_denied::{AccessDeniedPage, NotFoundPage};
use crate::pages::account::AccountSettingsPage;
use crate::pages::crm::{CategoriesPage, ServicesPage};
use crate::pages::dashboard::{ProjectDashboardPage, SalesDashboardPage};
use crate::pages::jobs::{JobBoardPage, PostJobPage, PostedJobsPage};
use crate::pages::kyc::KycFormPage;
use crate::pages::notifications::NotificationsPage;
use crate::pages::password::{ForgotPasswordPage, ResetPasswordPage};
use crate::pages::sign_in::SignInPage;
use crate::pages::sign_up::{SignUpPage, VerifyOtpPage};
use crate::state::account::AccountState;
use crate::state::catalog::CatalogState;
use crate::state::jobs::JobsState;
use crate::state::notice::NoticeState;
use crate::state::session::SessionState;
use crate::util::idle_watch::install_idle_watch;
use crate::util::storage::LocalStore;
use crate::util::time::now_ms;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides all shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Starts in `Restoring`; guards wait until the browser has read storage.
    let session = RwSignal::new(SessionState::default());
    let notices = RwSignal::new(NoticeState::default());
    let catalog = RwSignal::new(CatalogState::default());
    let jobs = RwSignal::new(JobsState::default());
    let account = RwSignal::new(AccountState::default());

    provide_context(session);
    provide_context(notices);
    provide_context(catalog);
    provide_context(jobs);
    provide_context(account);

    // Effects only run in the browser, so the server render stays `Restoring`.
    Effect::new(move || {
        let restored = SessionState::restore(&LocalStore, now_ms(), idle_timeout_ms());
        log::debug!("session restored: signed_in={}", restored.is_signed_in());
        session.set(restored);
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/jobdesk.css"/>
        <Title text="Jobdesk"/>

        <Router>
            <SessionWatch/>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=StaticSegment("") view=RootRedirect/>
                <Route
                    path=StaticSegment("sign-in")
                    view=|| view! { <Guarded route="auth.signIn"><SignInPage/></Guarded> }
                />
                <Route
                    path=StaticSegment("sign-up")
                    view=|| view! { <Guarded route="auth.signUp"><SignUpPage/></Guarded> }
                />
                <Route
                    path=StaticSegment("verify-otp")
                    view=|| view! { <Guarded route="auth.verifyOtp"><VerifyOtpPage/></Guarded> }
                />
                <Route
                    path=StaticSegment("forgot-password")
                    view=|| view! { <Guarded route="auth.forgotPassword"><ForgotPasswordPage/></Guarded> }
                />
                <Route
                    path=StaticSegment("reset-password")
                    view=|| view! { <Guarded route="auth.resetPassword"><ResetPasswordPage/></Guarded> }
                />
                <Route
                    path=StaticSegment("access-denied")
                    view=|| view! { <Guarded route="accessDenied"><AccessDeniedPage/></Guarded> }
                />
                <Route
                    path=(StaticSegment("app"), StaticSegment("project"), StaticSegment("dashboard"))
                    view=|| view! { <Guarded route="apps.project.dashboard"><ProjectDashboardPage/></Guarded> }
                />
                <Route
                    path=(StaticSegment("app"), StaticSegment("project"), StaticSegment("jobs"))
                    view=|| view! { <Guarded route="apps.project.jobBoard"><JobBoardPage/></Guarded> }
                />
                <Route
                    path=(StaticSegment("app"), StaticSegment("sales"), StaticSegment("dashboard"))
                    view=|| view! { <Guarded route="apps.sales.dashboard"><SalesDashboardPage/></Guarded> }
                />
                <Route
                    path=(StaticSegment("app"), StaticSegment("sales"), StaticSegment("jobs"))
                    view=|| view! { <Guarded route="apps.sales.jobList"><PostedJobsPage/></Guarded> }
                />
                <Route
                    path=(StaticSegment("app"), StaticSegment("sales"), StaticSegment("post-job"))
                    view=|| view! { <Guarded route="apps.sales.postJob"><PostJobPage/></Guarded> }
                />
                <Route
                    path=(StaticSegment("app"), StaticSegment("crm"), StaticSegment("categories"))
                    view=|| view! { <Guarded route="apps.crm.categories"><CategoriesPage/></Guarded> }
                />
                <Route
                    path=(StaticSegment("app"), StaticSegment("crm"), StaticSegment("services"))
                    view=|| view! { <Guarded route="apps.crm.services"><ServicesPage/></Guarded> }
                />
                <Route
                    path=(StaticSegment("app"), StaticSegment("notifications"))
                    view=|| view! { <Guarded route="apps.notifications"><NotificationsPage/></Guarded> }
                />
                <Route
                    path=(StaticSegment("app"), StaticSegment("account"), StaticSegment("settings"))
                    view=|| view! { <Guarded route="apps.account.settings"><AccountSettingsPage/></Guarded> }
                />
                <Route
                    path=(StaticSegment("app"), StaticSegment("account"), StaticSegment("kyc-form"))
                    view=|| view! { <Guarded route="apps.account.kycForm"><KycFormPage/></Guarded> }
                />
            </Routes>
        </Router>
    }
}

/// Idle sign-out for the whole app; lives inside the router to navigate.
#[component]
fn SessionWatch() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let account = expect_context::<RwSignal<AccountState>>();
    let navigate = use_navigate();

    install_idle_watch(session, move || {
        log::info!("signed out after idle timeout");
        account.update(AccountState::reset);
        navigate(UNAUTHENTICATED_ENTRY_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
    });
}

/// `/` has no page of its own: send the user home or to sign-in.
#[component]
fn RootRedirect() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        let target = session.with(|s| {
            if s.is_restoring() {
                None
            } else if s.is_signed_in() {
                Some(s.home_path())
            } else {
                Some(UNAUTHENTICATED_ENTRY_PATH)
            }
        });
        if let Some(target) = target {
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
