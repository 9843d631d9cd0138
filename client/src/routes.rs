//! Route table and access guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! `app` mounts one leptos route per [`RouteSpec`] and wraps each page in
//! the `Guarded` component, which asks [`guard`] what to do on every session
//! change. Keeping the decision pure lets it be tested without a router.
//!
//! DESIGN
//! ======
//! Authority lists come from [`crate::nav::config`], the same lists the side
//! menu entries carry. An empty list means any signed-in user may open the
//! route.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use leptos_router::location::Url;

use crate::config::{REDIRECT_URL_KEY, UNAUTHENTICATED_ENTRY_PATH};
use crate::nav::config::{ANY_SIGNED_IN, CRM_ROLES, KYC_ROLES, PROJECT_ROLES, SALES_ROLES};
use crate::state::role::Role;
use crate::state::session::SessionState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Bare page, no side menu (auth screens).
    Blank,
    /// Side menu and header around the page.
    Framed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Anyone.
    Public,
    /// Signed-out users only; signed-in users are sent home.
    AuthOnly,
    /// Signed-in users within the route's authority.
    Protected,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteSpec {
    pub key: &'static str,
    pub path: &'static str,
    pub authority: &'static [Role],
    pub layout: Layout,
    /// Page content runs edge to edge without padding.
    pub gutterless: bool,
    pub header: Option<&'static str>,
    pub access: Access,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Guard {
    /// Session not restored yet; render nothing and wait.
    Pending,
    Allow,
    Redirect(String),
    Forbidden,
}

const fn auth_page(key: &'static str, path: &'static str) -> RouteSpec {
    RouteSpec {
        key,
        path,
        authority: &[],
        layout: Layout::Blank,
        gutterless: true,
        header: None,
        access: Access::AuthOnly,
    }
}

const fn app_page(
    key: &'static str,
    path: &'static str,
    authority: &'static [Role],
    header: &'static str,
) -> RouteSpec {
    RouteSpec {
        key,
        path,
        authority,
        layout: Layout::Framed,
        gutterless: false,
        header: Some(header),
        access: Access::Protected,
    }
}

pub static ROUTES: &[RouteSpec] = &[
    auth_page("auth.signIn", "/sign-in"),
    auth_page("auth.signUp", "/sign-up"),
    auth_page("auth.verifyOtp", "/verify-otp"),
    auth_page("auth.forgotPassword", "/forgot-password"),
    auth_page("auth.resetPassword", "/reset-password"),
    RouteSpec {
        key: "accessDenied",
        path: "/access-denied",
        authority: &[],
        layout: Layout::Blank,
        gutterless: true,
        header: None,
        access: Access::Public,
    },
    app_page("apps.project.dashboard", "/app/project/dashboard", PROJECT_ROLES, "Dashboard"),
    app_page("apps.project.jobBoard", "/app/project/jobs", PROJECT_ROLES, "Job board"),
    app_page("apps.sales.dashboard", "/app/sales/dashboard", SALES_ROLES, "Dashboard"),
    app_page("apps.sales.jobList", "/app/sales/jobs", SALES_ROLES, "Posted jobs"),
    app_page("apps.sales.postJob", "/app/sales/post-job", SALES_ROLES, "Post a job"),
    app_page("apps.crm.categories", "/app/crm/categories", CRM_ROLES, "Categories"),
    app_page("apps.crm.services", "/app/crm/services", CRM_ROLES, "Services"),
    app_page("apps.notifications", "/app/notifications", ANY_SIGNED_IN, "Notifications"),
    app_page("apps.account.settings", "/app/account/settings", ANY_SIGNED_IN, "Account settings"),
    app_page("apps.account.kycForm", "/app/account/kyc-form", KYC_ROLES, "KYC verification"),
];

#[must_use]
pub fn find_route(key: &str) -> Option<&'static RouteSpec> {
    ROUTES.iter().find(|r| r.key == key)
}

/// Decide what to do with a request for `route`. `requested` is the full
/// location (path and query) carried through sign-in; `redirect` is the
/// already decoded `redirectUrl` query parameter, if any.
#[must_use]
pub fn guard(route: &RouteSpec, session: &SessionState, requested: &str, redirect: Option<&str>) -> Guard {
    if session.is_restoring() {
        return Guard::Pending;
    }
    match route.access {
        Access::Public => Guard::Allow,
        Access::AuthOnly if session.is_signed_in() => {
            let target = safe_redirect(redirect);
            Guard::Redirect(target.unwrap_or_else(|| session.home_path().to_owned()))
        }
        Access::AuthOnly => Guard::Allow,
        Access::Protected if !session.is_signed_in() => Guard::Redirect(sign_in_redirect(requested)),
        Access::Protected => {
            let permitted = route.authority.is_empty()
                || session.role().is_some_and(|role| route.authority.contains(&role));
            if permitted { Guard::Allow } else { Guard::Forbidden }
        }
    }
}

/// Sign-in location that returns to `requested` afterwards.
#[must_use]
pub fn sign_in_redirect(requested: &str) -> String {
    format!("{UNAUTHENTICATED_ENTRY_PATH}?{REDIRECT_URL_KEY}={}", Url::escape(requested))
}

/// Accept a post-sign-in target only if it stays on this origin.
///
/// Browsers strip tabs and newlines while parsing a URL, so `"/\t/host"`
/// would become the protocol-relative `//host`. Any whitespace or control
/// character rejects the target outright.
#[must_use]
pub fn safe_redirect(target: Option<&str>) -> Option<String> {
    let target = target?.trim();
    if target.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return None;
    }
    let local = target.starts_with('/') && !target.starts_with("//") && !target.contains('\\');
    (local && !target.starts_with(UNAUTHENTICATED_ENTRY_PATH)).then(|| target.to_owned())
}
