//! Category and service catalog managed from the CRM pages.
//!
//! The KYC category step and the job form read categories from here too.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use crate::net::types::{Category, Service};
use crate::state::collection::Collection;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogState {
    pub categories: Collection<Category>,
    pub services: Collection<Service>,
}

impl CatalogState {
    /// Services belonging to `category_id`, in list order.
    #[must_use]
    pub fn services_for(&self, category_id: &str) -> Vec<&Service> {
        self.services
            .items()
            .iter()
            .filter(|s| s.category_id == category_id)
            .collect()
    }

    /// Categories offered to users (inactive ones are hidden).
    #[must_use]
    pub fn active_categories(&self) -> Vec<&Category> {
        self.categories.items().iter().filter(|c| c.active).collect()
    }

    /// Drop a category together with its services.
    pub fn remove_category(&mut self, category_id: &str) {
        self.categories.remove(category_id);
        let orphaned: Vec<String> = self
            .services_for(category_id)
            .into_iter()
            .map(|s| s.id.clone())
            .collect();
        for id in orphaned {
            self.services.remove(&id);
        }
    }

    #[must_use]
    pub fn category_name(&self, category_id: &str) -> Option<&str> {
        self.categories.get(category_id).map(|c| c.name.as_str())
    }
}
