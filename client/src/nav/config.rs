//! Static side-menu configuration.
//!
//! The tree is built once and never mutated; [`super::filter`] derives a
//! per-role copy from it. The role lists below are the single source of
//! page authority: [`crate::routes`] guards each path with the same list its
//! menu entry carries.

use std::sync::LazyLock;

use super::tree::NavigationNode;
use crate::state::role::Role;

pub const PROJECT_KEY: &str = "apps.project";
pub const SALES_KEY: &str = "apps.sales";
pub const CRM_KEY: &str = "apps.crm";
pub const ACCOUNT_KEY: &str = "apps.account";
pub const KYC_FORM_KEY: &str = "apps.account.kycForm";

pub const PROJECT_ROLES: &[Role] = &[Role::Doctor, Role::Admin, Role::User];
pub const SALES_ROLES: &[Role] = &[Role::Business, Role::Admin, Role::User];
pub const CRM_ROLES: &[Role] = &[Role::SuperAdmin, Role::Admin, Role::User];
pub const KYC_ROLES: &[Role] = &[Role::Doctor, Role::Business, Role::Admin, Role::User];
/// Any signed-in user, including one whose role did not parse.
pub const ANY_SIGNED_IN: &[Role] = &[];

static NAVIGATION_TREE: LazyLock<Vec<NavigationNode>> = LazyLock::new(|| {
    vec![
        NavigationNode::group(
            PROJECT_KEY,
            "Project",
            "project",
            PROJECT_ROLES,
            vec![
                NavigationNode::leaf(
                    "apps.project.dashboard",
                    "/app/project/dashboard",
                    "Dashboard",
                    "dashboard",
                    PROJECT_ROLES,
                ),
                NavigationNode::leaf("apps.project.jobBoard", "/app/project/jobs", "Job Board", "jobs", PROJECT_ROLES),
            ],
        ),
        NavigationNode::group(
            SALES_KEY,
            "Sales",
            "sales",
            SALES_ROLES,
            vec![
                NavigationNode::leaf(
                    "apps.sales.dashboard",
                    "/app/sales/dashboard",
                    "Dashboard",
                    "dashboard",
                    SALES_ROLES,
                ),
                NavigationNode::leaf("apps.sales.jobList", "/app/sales/jobs", "Posted Jobs", "jobs", SALES_ROLES),
                NavigationNode::leaf("apps.sales.postJob", "/app/sales/post-job", "Post a Job", "add", SALES_ROLES),
            ],
        ),
        NavigationNode::group(
            CRM_KEY,
            "CRM",
            "crm",
            CRM_ROLES,
            vec![
                NavigationNode::leaf("apps.crm.categories", "/app/crm/categories", "Categories", "category", CRM_ROLES),
                NavigationNode::leaf("apps.crm.services", "/app/crm/services", "Services", "service", CRM_ROLES),
            ],
        ),
        NavigationNode::leaf("apps.notifications", "/app/notifications", "Notifications", "bell", ANY_SIGNED_IN),
        NavigationNode::group(
            ACCOUNT_KEY,
            "Account",
            "account",
            ANY_SIGNED_IN,
            vec![
                NavigationNode::leaf(
                    "apps.account.settings",
                    "/app/account/settings",
                    "Settings",
                    "settings",
                    ANY_SIGNED_IN,
                ),
                NavigationNode::leaf(KYC_FORM_KEY, "/app/account/kyc-form", "KYC Form", "kyc", KYC_ROLES),
            ],
        ),
    ]
});

/// The full, unfiltered side-menu tree.
pub fn navigation_tree() -> &'static [NavigationNode] {
    &NAVIGATION_TREE
}
