//! Side-menu navigation: static tree plus per-role filtering.

pub mod config;
pub mod filter;
pub mod tree;

use crate::state::session::persisted_signed_up_as;
use crate::util::storage::KeyValueStore;

/// Side menu for whoever is signed in according to `store`.
pub fn menu_for(store: &impl KeyValueStore) -> Vec<tree::NavigationNode> {
    filter::filter_navigation(config::navigation_tree(), persisted_signed_up_as(store))
}
