use super::*;
use leptos_router::location::Url;
use crate::net::types::{SignInData, UserDetails};
use crate::state::session::SessionState;

fn signed_in_as(role: Option<&str>) -> SessionState {
    let mut session = SessionState::signed_out();
    let data = SignInData {
        token: "t".to_owned(),
        data: UserDetails { role: role.map(str::to_owned), ..UserDetails::default() },
    };
    session.establish(data, 0);
    session
}

fn route(key: &str) -> &'static RouteSpec {
    find_route(key).unwrap()
}

// =============================================================
// Table
// =============================================================

#[test]
fn route_keys_and_paths_are_unique() {
    for (i, a) in ROUTES.iter().enumerate() {
        for b in &ROUTES[i + 1..] {
            assert_ne!(a.key, b.key);
            assert_ne!(a.path, b.path);
        }
    }
}

#[test]
fn every_menu_leaf_has_a_route() {
    for node in crate::nav::config::navigation_tree().iter().flat_map(|n| n.walk()) {
        if node.kind == crate::nav::tree::NavKind::Leaf {
            let spec = find_route(&node.key).unwrap_or_else(|| panic!("no route for {}", node.key));
            assert_eq!(spec.path, node.path);
        }
    }
}

// =============================================================
// Guard
// =============================================================

#[test]
fn restoring_session_is_pending_everywhere() {
    let session = SessionState::default();
    for spec in ROUTES {
        assert_eq!(guard(spec, &session, spec.path, None), Guard::Pending);
    }
}

#[test]
fn signed_out_protected_route_redirects_with_return_path() {
    let session = SessionState::signed_out();
    let Guard::Redirect(target) = guard(route("apps.crm.categories"), &session, "/app/crm/categories?q=a b", None)
    else {
        panic!("expected a redirect");
    };
    let encoded = target.strip_prefix("/sign-in?redirectUrl=").unwrap();
    assert!(!encoded.contains(['?', '&', ' ']));
    assert_eq!(Url::unescape(encoded), "/app/crm/categories?q=a b");
}

#[test]
fn signed_in_user_is_sent_home_from_auth_pages() {
    let session = signed_in_as(Some("doctor"));
    assert_eq!(
        guard(route("auth.signIn"), &session, "/sign-in", None),
        Guard::Redirect("/app/project/dashboard".to_owned())
    );
    assert_eq!(guard(route("auth.signUp"), &SessionState::signed_out(), "/sign-up", None), Guard::Allow);
}

#[test]
fn authority_is_enforced_for_signed_in_users() {
    let doctor = signed_in_as(Some("doctor"));
    assert_eq!(guard(route("apps.sales.dashboard"), &doctor, "/app/sales/dashboard", None), Guard::Forbidden);
    assert_eq!(guard(route("apps.project.jobBoard"), &doctor, "/app/project/jobs", None), Guard::Allow);

    let super_admin = signed_in_as(Some("super admin"));
    assert_eq!(guard(route("apps.account.kycForm"), &super_admin, "/app/account/kyc-form", None), Guard::Forbidden);
    assert_eq!(guard(route("apps.crm.services"), &super_admin, "/app/crm/services", None), Guard::Allow);
}

#[test]
fn empty_authority_admits_any_signed_in_user() {
    let no_role = signed_in_as(None);
    assert_eq!(guard(route("apps.account.settings"), &no_role, "/app/account/settings", None), Guard::Allow);
    assert_eq!(guard(route("apps.crm.services"), &no_role, "/app/crm/services", None), Guard::Forbidden);
}

#[test]
fn public_route_is_always_allowed() {
    assert_eq!(guard(route("accessDenied"), &SessionState::signed_out(), "/access-denied", None), Guard::Allow);
    assert_eq!(guard(route("accessDenied"), &signed_in_as(Some("user")), "/access-denied", None), Guard::Allow);
}

// =============================================================
// Redirect targets
// =============================================================

#[test]
fn signed_in_user_on_sign_in_follows_redirect_param() {
    let session = signed_in_as(Some("business"));
    assert_eq!(
        guard(route("auth.signIn"), &session, "/sign-in", Some("/app/crm/services?tab=2")),
        Guard::Redirect("/app/crm/services?tab=2".to_owned())
    );
    assert_eq!(
        guard(route("auth.signIn"), &session, "/sign-in", Some("//evil.example")),
        Guard::Redirect("/app/sales/dashboard".to_owned())
    );
}

#[test]
fn sign_in_redirect_escapes_the_return_path() {
    let original = "/app/sales/jobs?q=night&sort=new";
    let target = sign_in_redirect(original);
    let encoded = target.strip_prefix("/sign-in?redirectUrl=").unwrap();
    assert!(!encoded.contains(['?', '&']));
    assert_eq!(Url::unescape(encoded), original);
}

#[test]
fn safe_redirect_accepts_local_paths_only() {
    assert_eq!(safe_redirect(Some("/app/crm/services")), Some("/app/crm/services".to_owned()));
    assert_eq!(safe_redirect(Some("//evil.example.com")), None);
    assert_eq!(safe_redirect(Some("https://evil.example.com")), None);
    assert_eq!(safe_redirect(Some("/\\evil.example.com")), None);
    assert_eq!(safe_redirect(Some("/sign-in?redirectUrl=/x")), None);
    assert_eq!(safe_redirect(None), None);
}

#[test]
fn safe_redirect_rejects_whitespace_and_control_characters() {
    // Decoded form of `%2F%09%2Fevil.example`; URL parsing drops the tab.
    assert_eq!(safe_redirect(Some("/\t/evil.example")), None);
    assert_eq!(safe_redirect(Some("/\n/evil.example")), None);
    assert_eq!(safe_redirect(Some("/app/\u{0}x")), None);
    assert_eq!(safe_redirect(Some("/app/jobs?q=night shift")), None);
    assert_eq!(safe_redirect(Some("  /app/jobs  ")), Some("/app/jobs".to_owned()));
}
