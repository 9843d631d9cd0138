//! Navigation tree types.

use crate::state::role::Role;

/// How a node renders in the side menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKind {
    /// Non-clickable heading over its children.
    SectionTitle,
    /// Collapsible group of children.
    Group,
    /// Clickable entry pointing at `path`.
    Leaf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationNode {
    pub key: String,
    /// Route path; empty for non-leaf nodes.
    pub path: String,
    pub title: String,
    /// Symbolic icon key.
    pub icon: String,
    pub kind: NavKind,
    /// Roles the entry is meant for. Empty means every signed-in role. Leaf
    /// lists are shared with the route table, which enforces them.
    pub authority: Vec<Role>,
    pub children: Vec<NavigationNode>,
}

impl NavigationNode {
    pub fn leaf(key: &str, path: &str, title: &str, icon: &str, authority: &[Role]) -> Self {
        Self {
            key: key.to_owned(),
            path: path.to_owned(),
            title: title.to_owned(),
            icon: icon.to_owned(),
            kind: NavKind::Leaf,
            authority: authority.to_vec(),
            children: Vec::new(),
        }
    }

    pub fn group(key: &str, title: &str, icon: &str, authority: &[Role], children: Vec<NavigationNode>) -> Self {
        Self {
            key: key.to_owned(),
            path: String::new(),
            title: title.to_owned(),
            icon: icon.to_owned(),
            kind: NavKind::Group,
            authority: authority.to_vec(),
            children,
        }
    }

    pub fn section(key: &str, title: &str, authority: &[Role], children: Vec<NavigationNode>) -> Self {
        Self {
            key: key.to_owned(),
            path: String::new(),
            title: title.to_owned(),
            icon: String::new(),
            kind: NavKind::SectionTitle,
            authority: authority.to_vec(),
            children,
        }
    }

    /// Copy of this node with `children` replaced.
    #[must_use]
    pub fn with_children(&self, children: Vec<NavigationNode>) -> Self {
        Self {
            key: self.key.clone(),
            path: self.path.clone(),
            title: self.title.clone(),
            icon: self.icon.clone(),
            kind: self.kind,
            authority: self.authority.clone(),
            children,
        }
    }

    /// Whether `key` names this node or one of its descendants.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.key == key || self.children.iter().any(|c| c.contains_key(key))
    }

    /// Depth-first iterator over this node and its descendants.
    pub fn walk(&self) -> impl Iterator<Item = &NavigationNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}
