use super::*;
use crate::nav::config::navigation_tree;

fn keys(nodes: &[NavigationNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.key.as_str()).collect()
}

fn find<'a>(nodes: &'a [NavigationNode], key: &str) -> Option<&'a NavigationNode> {
    nodes.iter().flat_map(NavigationNode::walk).find(|n| n.key == key)
}

// =============================================================
// Super admin
// =============================================================

#[test]
fn super_admin_sees_promoted_crm_and_account_without_kyc() {
    let menu = filter_navigation(navigation_tree(), Some(Role::SuperAdmin));
    assert_eq!(
        keys(&menu),
        vec!["apps.crm.categories", "apps.crm.services", "apps.notifications", ACCOUNT_KEY]
    );
    let account = find(&menu, ACCOUNT_KEY).unwrap();
    assert_eq!(account.kind, NavKind::Group);
    assert_eq!(keys(&account.children), vec!["apps.account.settings"]);
}

#[test]
fn promoted_first_child_inherits_group_icon() {
    let menu = filter_navigation(navigation_tree(), Some(Role::SuperAdmin));
    assert_eq!(menu[0].icon, "crm");
    assert_eq!(menu[1].icon, "service");
}

// =============================================================
// Doctor / business
// =============================================================

#[test]
fn doctor_never_sees_sales_branch() {
    let menu = filter_navigation(navigation_tree(), Some(Role::Doctor));
    assert!(!menu.iter().any(|n| n.contains_key(SALES_KEY)));
    assert!(menu.iter().flat_map(NavigationNode::walk).all(|n| !n.key.starts_with("apps.sales")));
}

#[test]
fn doctor_menu_promotes_project_and_keeps_full_account() {
    let menu = filter_navigation(navigation_tree(), Some(Role::Doctor));
    assert_eq!(
        keys(&menu),
        vec!["apps.project.dashboard", "apps.project.jobBoard", "apps.notifications", ACCOUNT_KEY]
    );
    assert_eq!(menu[0].icon, "project");
    assert!(find(&menu, KYC_FORM_KEY).is_some());
}

#[test]
fn business_menu_drops_project_and_crm() {
    let menu = filter_navigation(navigation_tree(), Some(Role::Business));
    assert_eq!(
        keys(&menu),
        vec![
            "apps.sales.dashboard",
            "apps.sales.jobList",
            "apps.sales.postJob",
            "apps.notifications",
            ACCOUNT_KEY
        ]
    );
    assert!(find(&menu, "apps.crm.categories").is_none());
}

// =============================================================
// Other roles
// =============================================================

#[test]
fn other_roles_get_crm_promoted_and_keep_kyc_form() {
    for role in [Some(Role::Admin), Some(Role::User), None] {
        let menu = filter_navigation(navigation_tree(), role);
        let top = keys(&menu);
        assert!(top.contains(&"apps.crm.categories"), "{role:?}");
        assert!(top.contains(&"apps.crm.services"), "{role:?}");
        assert!(!top.contains(&CRM_KEY), "{role:?}");
        assert!(find(&menu, KYC_FORM_KEY).is_some(), "{role:?}");
    }
}

#[test]
fn other_roles_keep_source_order() {
    let menu = filter_navigation(navigation_tree(), Some(Role::User));
    assert_eq!(
        keys(&menu),
        vec![
            "apps.project.dashboard",
            "apps.project.jobBoard",
            "apps.sales.dashboard",
            "apps.sales.jobList",
            "apps.sales.postJob",
            "apps.crm.categories",
            "apps.crm.services",
            "apps.notifications",
            ACCOUNT_KEY
        ]
    );
}

#[test]
fn filtering_is_stable_and_leaves_source_untouched() {
    let before = navigation_tree().to_vec();
    let first = filter_navigation(navigation_tree(), Some(Role::Admin));
    let second = filter_navigation(navigation_tree(), Some(Role::Admin));
    assert_eq!(first, second);
    assert_eq!(navigation_tree(), before.as_slice());
    assert_eq!(find(navigation_tree(), "apps.crm.categories").unwrap().icon, "category");
}

// =============================================================
// Section titles
// =============================================================

#[test]
fn section_titles_filter_their_children() {
    let tree = vec![NavigationNode::section(
        "apps",
        "Apps",
        &[],
        vec![
            NavigationNode::group(
                SALES_KEY,
                "Sales",
                "sales",
                &[],
                vec![NavigationNode::leaf("apps.sales.dashboard", "/app/sales/dashboard", "Dashboard", "", &[])],
            ),
            NavigationNode::group(
                "apps.reports",
                "Reports",
                "",
                &[],
                vec![NavigationNode::leaf("apps.reports.weekly", "/app/reports", "Weekly", "chart", &[])],
            ),
        ],
    )];
    let menu = filter_navigation(&tree, Some(Role::Doctor));
    assert_eq!(keys(&menu), vec!["apps"]);
    assert_eq!(keys(&menu[0].children), vec!["apps.reports.weekly"]);
    // No group icon to inherit, so the child keeps its own.
    assert_eq!(menu[0].children[0].icon, "chart");
}

#[test]
fn empty_group_promotes_nothing() {
    let tree = vec![NavigationNode::group("apps.empty", "Empty", "x", &[], Vec::new())];
    assert!(filter_navigation(&tree, None).is_empty());
}

// =============================================================
// Agreement with the route table
// =============================================================

#[test]
fn routes_guard_with_the_menu_entry_authority() {
    for leaf in navigation_tree().iter().flat_map(NavigationNode::walk).filter(|n| n.kind == NavKind::Leaf) {
        let route =
            crate::routes::find_route(&leaf.key).unwrap_or_else(|| panic!("menu entry {} has no route", leaf.key));
        assert_eq!(route.path, leaf.path, "{}", leaf.key);
        assert_eq!(route.authority, leaf.authority.as_slice(), "{}", leaf.key);
    }
}

#[test]
fn every_visible_entry_is_open_to_the_role() {
    for role in Role::ALL {
        let menu = filter_navigation(navigation_tree(), Some(role));
        for node in menu.iter().flat_map(NavigationNode::walk).filter(|n| n.kind == NavKind::Leaf) {
            assert!(
                node.authority.is_empty() || node.authority.contains(&role),
                "{role} sees {} outside its authority",
                node.key
            );
        }
    }
}
