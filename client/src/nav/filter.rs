//! Role-based navigation filtering.
//!
//! DESIGN
//! ======
//! The side menu is a flat list for most roles: collapsible groups are
//! dissolved into their children, except the Account group which always
//! stays grouped. Which groups survive depends on the role:
//!
//! - super admin: CRM (promoted) and Account without the KYC form.
//! - doctor: everything but Sales and CRM.
//! - business: everything but Project and CRM.
//! - any other role, or none: everything.
//!
//! A promoted group's icon moves onto its first child so the flattened menu
//! keeps the group's visual anchor. Output order follows the source tree.

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;

use super::config::{ACCOUNT_KEY, CRM_KEY, KYC_FORM_KEY, PROJECT_KEY, SALES_KEY};
use super::tree::{NavKind, NavigationNode};
use crate::state::role::Role;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GroupTreatment {
    Drop,
    Keep,
    KeepWithoutKyc,
    Promote,
}

fn group_treatment(key: &str, role: Option<Role>) -> GroupTreatment {
    match role {
        Some(Role::SuperAdmin) => match key {
            CRM_KEY => GroupTreatment::Promote,
            ACCOUNT_KEY => GroupTreatment::KeepWithoutKyc,
            _ => GroupTreatment::Drop,
        },
        Some(Role::Doctor) => match key {
            SALES_KEY | CRM_KEY => GroupTreatment::Drop,
            ACCOUNT_KEY => GroupTreatment::Keep,
            _ => GroupTreatment::Promote,
        },
        Some(Role::Business) => match key {
            PROJECT_KEY | CRM_KEY => GroupTreatment::Drop,
            ACCOUNT_KEY => GroupTreatment::Keep,
            _ => GroupTreatment::Promote,
        },
        Some(Role::Admin | Role::User) | None => match key {
            ACCOUNT_KEY => GroupTreatment::Keep,
            _ => GroupTreatment::Promote,
        },
    }
}

fn promote(group: &NavigationNode, out: &mut Vec<NavigationNode>) {
    let start = out.len();
    out.extend(group.children.iter().cloned());
    if let Some(first) = out.get_mut(start) {
        if !group.icon.is_empty() {
            first.icon.clone_from(&group.icon);
        }
    }
}

fn place(node: &NavigationNode, role: Option<Role>, out: &mut Vec<NavigationNode>) {
    match node.kind {
        NavKind::Leaf => out.push(node.clone()),
        NavKind::SectionTitle => out.push(node.with_children(filter_navigation(&node.children, role))),
        NavKind::Group => match group_treatment(&node.key, role) {
            GroupTreatment::Drop => {}
            GroupTreatment::Keep => out.push(node.clone()),
            GroupTreatment::KeepWithoutKyc => {
                let children = node
                    .children
                    .iter()
                    .filter(|c| c.key != KYC_FORM_KEY)
                    .cloned()
                    .collect();
                out.push(node.with_children(children));
            }
            GroupTreatment::Promote => promote(node, out),
        },
    }
}

/// Derive the side menu for `role` from `tree`. The source is not modified.
pub fn filter_navigation(tree: &[NavigationNode], role: Option<Role>) -> Vec<NavigationNode> {
    let mut out = Vec::with_capacity(tree.len());
    for node in tree {
        place(node, role, &mut out);
    }
    out
}
