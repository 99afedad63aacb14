//! # Catalog State
//!
//! Cached categories and products for the POS grid, with a request
//! generation guard against stale responses.
//!
//! ## The Stale Response Problem
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User types "ser" then quickly "serum":                                 │
//! │                                                                         │
//! │  t0: fetch("ser")    issued, generation = 1                             │
//! │  t1: fetch("serum")  issued, generation = 2                             │
//! │  t2: "serum" response arrives (gen 2 == current 2) ──► applied          │
//! │  t3: "ser" response arrives   (gen 1 <  current 2) ──► DISCARDED        │
//! │                                                                         │
//! │  Without the guard, the slower "ser" response would overwrite the       │
//! │  newer "serum" results.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Mutex;

use zarlette_core::{Category, Product};

/// Inner catalog view state.
#[derive(Debug, Default)]
struct Catalog {
    categories: Vec<Category>,
    active_category: Option<String>,
    search: String,
    products: Vec<Product>,
    no_services_found: bool,
    generation: u64,
}

/// Managed catalog state.
#[derive(Debug, Default)]
pub struct CatalogState {
    inner: Mutex<Catalog>,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the category list. The first category becomes active when
    /// none is selected yet.
    pub fn set_categories(&self, categories: Vec<Category>) {
        let mut inner = self.inner.lock().expect("Catalog mutex poisoned");
        if inner.active_category.is_none() {
            inner.active_category = categories.first().map(|c| c.id.clone());
        }
        inner.categories = categories;
    }

    /// Cached categories.
    pub fn categories(&self) -> Vec<Category> {
        self.inner
            .lock()
            .expect("Catalog mutex poisoned")
            .categories
            .clone()
    }

    /// Selects the active category tab.
    pub fn select_category(&self, id: impl Into<String>) {
        self.inner
            .lock()
            .expect("Catalog mutex poisoned")
            .active_category = Some(id.into());
    }

    /// The active category id, or the ALL sentinel when none is selected.
    pub fn active_category(&self) -> String {
        self.inner
            .lock()
            .expect("Catalog mutex poisoned")
            .active_category
            .clone()
            .unwrap_or_else(|| zarlette_core::ALL_CATEGORIES.to_string())
    }

    /// Sets the search term.
    pub fn set_search(&self, term: impl Into<String>) {
        self.inner.lock().expect("Catalog mutex poisoned").search = term.into();
    }

    /// The current search term.
    pub fn search(&self) -> String {
        self.inner
            .lock()
            .expect("Catalog mutex poisoned")
            .search
            .clone()
    }

    /// Starts a product fetch: bumps the generation and returns the token
    /// the response must present to be applied.
    pub fn begin_fetch(&self) -> u64 {
        let mut inner = self.inner.lock().expect("Catalog mutex poisoned");
        inner.generation += 1;
        inner.generation
    }

    /// Applies fetched products if `token` is still current.
    ///
    /// ## Returns
    /// `true` when applied; `false` when the response was stale and
    /// discarded.
    pub fn apply_products(&self, token: u64, products: Vec<Product>) -> bool {
        let mut inner = self.inner.lock().expect("Catalog mutex poisoned");
        if token != inner.generation {
            tracing::debug!(token, current = inner.generation, "Discarding stale product response");
            return false;
        }
        inner.no_services_found = products.is_empty();
        inner.products = products;
        true
    }

    /// Cached products for the active tab/search.
    pub fn products(&self) -> Vec<Product> {
        self.inner
            .lock()
            .expect("Catalog mutex poisoned")
            .products
            .clone()
    }

    /// Looks up a cached product by id.
    pub fn find_product(&self, id: i64) -> Option<Product> {
        self.inner
            .lock()
            .expect("Catalog mutex poisoned")
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// True when the last applied fetch returned no products.
    pub fn no_services_found(&self) -> bool {
        self.inner
            .lock()
            .expect("Catalog mutex poisoned")
            .no_services_found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zarlette_core::Money;

    fn category(id: &str) -> Category {
        Category {
            id: id.to_string(),
            name: id.to_string(),
        }
    }

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            price: Money::from_major(100),
            category: "SKINCARE".to_string(),
            description: None,
            image: None,
        }
    }

    #[test]
    fn test_first_category_becomes_active() {
        let state = CatalogState::new();
        state.set_categories(vec![category("SKINCARE"), category("HAIR_CARE")]);
        assert_eq!(state.active_category(), "SKINCARE");

        // A later reload keeps the user's selection.
        state.select_category("HAIR_CARE");
        state.set_categories(vec![category("SKINCARE"), category("HAIR_CARE")]);
        assert_eq!(state.active_category(), "HAIR_CARE");
    }

    #[test]
    fn test_no_categories_falls_back_to_all() {
        let state = CatalogState::new();
        state.set_categories(vec![]);
        assert_eq!(state.active_category(), "ALL");
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let state = CatalogState::new();

        let older = state.begin_fetch();
        let newer = state.begin_fetch();

        assert!(state.apply_products(newer, vec![product(2, "Hair Serum")]));
        assert!(!state.apply_products(older, vec![product(1, "Facial Cleanser")]));

        let products = state.products();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Hair Serum");
    }

    #[test]
    fn test_empty_result_sets_no_services_flag() {
        let state = CatalogState::new();
        let token = state.begin_fetch();
        state.apply_products(token, vec![]);
        assert!(state.no_services_found());

        let token = state.begin_fetch();
        state.apply_products(token, vec![product(1, "Facial Cleanser")]);
        assert!(!state.no_services_found());
    }

    #[test]
    fn test_find_product() {
        let state = CatalogState::new();
        let token = state.begin_fetch();
        state.apply_products(token, vec![product(7, "Hair Serum")]);

        assert_eq!(state.find_product(7).unwrap().name, "Hair Serum");
        assert!(state.find_product(8).is_none());
    }
}
