//! Test support: an in-memory [`SalonApi`] fake with scripted responses and
//! recorded calls, plus ready-made contexts.
//!
//! The fake lets command tests assert "no network call was made" by counting
//! calls, and "exactly this went out" by replaying the last recorded body.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use zarlette_api::{ClientError, ClientResult, ReceiptFormat, SaleFilter, SalonApi};
use zarlette_core::{
    Category, DailySummary, InventoryItem, Money, Product, ProductDraft, Sale, SaleDraft,
    SaleItem, SaleResponse, SaleStatus, SalesStats, StatsPeriod,
};

use crate::state::AppConfig;
use crate::AppContext;

/// Catalog fixture used by most command tests.
pub fn test_product(id: i64) -> Product {
    match id {
        1 => Product {
            id: 1,
            name: "Facial Cleanser".to_string(),
            price: Money::from_mils(499_990),
            category: "SKINCARE".to_string(),
            description: Some("Gentle daily cleanser".to_string()),
            image: None,
        },
        _ => Product {
            id: 2,
            name: "Hair Serum".to_string(),
            price: Money::from_mils(450_000),
            category: "HAIR_CARE".to_string(),
            description: None,
            image: None,
        },
    }
}

fn seed_categories() -> Vec<Category> {
    vec![
        Category {
            id: "SKINCARE".to_string(),
            name: "Skincare".to_string(),
        },
        Category {
            id: "HAIR_CARE".to_string(),
            name: "Hair Care".to_string(),
        },
    ]
}

fn sale_from_draft(id: i64, invoice: String, draft: &SaleDraft) -> Sale {
    Sale {
        id,
        invoice_number: invoice,
        created_at: Utc::now(),
        status: draft.status.unwrap_or(SaleStatus::Completed),
        sale_items: draft
            .cart_items
            .iter()
            .map(|line| SaleItem {
                product_name: line.name.clone(),
                unit_price: line.price,
                discount: line.discount,
                total: line.total,
                product_id: Some(line.product_id),
            })
            .collect(),
        sub_total: draft.sub_total,
        total_discount: draft.total_discount,
        grand_total: draft.grand_total,
        payment_method: draft.payment_method,
        notes: draft.notes.clone(),
    }
}

fn server_error() -> ClientError {
    ClientError::Server {
        status: 500,
        message: None,
    }
}

/// In-memory gateway. Every recorded field is behind its own lock so tests
/// can interleave calls freely.
#[derive(Default)]
pub struct FakeApi {
    categories: Mutex<Vec<Category>>,
    products: Mutex<Vec<Product>>,
    inventory: Mutex<Vec<InventoryItem>>,
    stats: Mutex<SalesStats>,
    held: Mutex<Vec<Sale>>,

    sale_seq: AtomicI64,
    create_sale_calls: AtomicUsize,
    hold_sale_calls: AtomicUsize,
    category_mutations: AtomicUsize,
    product_mutations: AtomicUsize,

    fail_next_create_sale: AtomicBool,
    conflict_on_category_delete: AtomicBool,

    last_idempotency_key: Mutex<Option<Uuid>>,
    last_sale_draft: Mutex<Option<SaleDraft>>,
    last_hold_draft: Mutex<Option<SaleDraft>>,
    last_product_draft: Mutex<Option<ProductDraft>>,
    last_product_query: Mutex<Option<(String, String)>>,
    last_inventory_query: Mutex<Option<(String, String, SaleStatus)>>,
    last_stats_query: Mutex<Option<(StatsPeriod, Option<String>, Option<String>)>>,
    deleted_held: Mutex<Vec<i64>>,
}

impl FakeApi {
    pub fn seeded() -> Self {
        let api = FakeApi::default();
        *api.categories.lock().unwrap() = seed_categories();
        *api.products.lock().unwrap() = vec![test_product(1), test_product(2)];
        api
    }

    // ----- Scripting ---------------------------------------------------------

    pub fn set_products(&self, products: Vec<Product>) {
        *self.products.lock().unwrap() = products;
    }

    pub fn set_inventory(&self, rows: Vec<InventoryItem>) {
        *self.inventory.lock().unwrap() = rows;
    }

    pub fn set_stats(&self, stats: SalesStats) {
        *self.stats.lock().unwrap() = stats;
    }

    pub fn fail_next_create_sale(&self) {
        self.fail_next_create_sale.store(true, Ordering::SeqCst);
    }

    pub fn conflict_on_category_delete(&self) {
        self.conflict_on_category_delete.store(true, Ordering::SeqCst);
    }

    // ----- Recorded calls ----------------------------------------------------

    pub fn create_sale_calls(&self) -> usize {
        self.create_sale_calls.load(Ordering::SeqCst)
    }

    pub fn hold_sale_calls(&self) -> usize {
        self.hold_sale_calls.load(Ordering::SeqCst)
    }

    pub fn category_mutations(&self) -> usize {
        self.category_mutations.load(Ordering::SeqCst)
    }

    pub fn product_mutations(&self) -> usize {
        self.product_mutations.load(Ordering::SeqCst)
    }

    pub fn last_idempotency_key(&self) -> Option<Uuid> {
        *self.last_idempotency_key.lock().unwrap()
    }

    pub fn last_sale_draft(&self) -> Option<SaleDraft> {
        self.last_sale_draft.lock().unwrap().clone()
    }

    pub fn last_hold_draft(&self) -> Option<SaleDraft> {
        self.last_hold_draft.lock().unwrap().clone()
    }

    pub fn last_product_draft(&self) -> Option<ProductDraft> {
        self.last_product_draft.lock().unwrap().clone()
    }

    pub fn last_product_query(&self) -> Option<(String, String)> {
        self.last_product_query.lock().unwrap().clone()
    }

    pub fn last_inventory_query(&self) -> Option<(String, String, SaleStatus)> {
        self.last_inventory_query.lock().unwrap().clone()
    }

    pub fn last_stats_query(&self) -> Option<(StatsPeriod, Option<String>, Option<String>)> {
        self.last_stats_query.lock().unwrap().clone()
    }

    pub fn deleted_held_sales(&self) -> Vec<i64> {
        self.deleted_held.lock().unwrap().clone()
    }

    fn next_sale_id(&self) -> i64 {
        self.sale_seq.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl SalonApi for FakeApi {
    async fn create_sale(
        &self,
        draft: &SaleDraft,
        idempotency_key: Uuid,
    ) -> ClientResult<SaleResponse> {
        let calls = self.create_sale_calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_idempotency_key.lock().unwrap() = Some(idempotency_key);
        *self.last_sale_draft.lock().unwrap() = Some(draft.clone());

        if self.fail_next_create_sale.swap(false, Ordering::SeqCst) {
            return Err(server_error());
        }

        let sale = sale_from_draft(self.next_sale_id(), format!("INV-TEST-{calls}"), draft);
        Ok(SaleResponse {
            message: Some("Sale recorded".to_string()),
            sale,
        })
    }

    async fn list_sales(&self, _filter: &SaleFilter) -> ClientResult<Vec<Sale>> {
        Ok(vec![])
    }

    async fn get_sale(&self, id: i64) -> ClientResult<Sale> {
        Err(ClientError::NotFound {
            message: Some(format!("Sale {id} not found")),
        })
    }

    async fn update_sale_status(
        &self,
        id: i64,
        status: SaleStatus,
        notes: &str,
    ) -> ClientResult<SaleResponse> {
        Ok(SaleResponse {
            message: None,
            sale: Sale {
                id,
                invoice_number: format!("INV-TEST-{id}"),
                created_at: Utc::now(),
                status,
                sale_items: vec![],
                sub_total: Money::zero(),
                total_discount: Money::zero(),
                grand_total: Money::zero(),
                payment_method: zarlette_core::PaymentMethod::Cash,
                notes: Some(notes.to_string()),
            },
        })
    }

    async fn get_receipt(&self, id: i64, _format: ReceiptFormat) -> ClientResult<String> {
        Ok(format!("<html>receipt {id}</html>"))
    }

    async fn hold_sale(&self, draft: &SaleDraft) -> ClientResult<SaleResponse> {
        self.hold_sale_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_hold_draft.lock().unwrap() = Some(draft.clone());

        let id = self.next_sale_id();
        let sale = sale_from_draft(id, format!("HOLD-TEST-{id}"), draft);
        self.held.lock().unwrap().push(sale.clone());
        Ok(SaleResponse {
            message: None,
            sale,
        })
    }

    async fn list_held_sales(&self) -> ClientResult<Vec<Sale>> {
        Ok(self.held.lock().unwrap().clone())
    }

    async fn get_held_sale(&self, id: i64) -> ClientResult<Sale> {
        self.held
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(ClientError::NotFound {
                message: Some(format!("Held sale {id} not found")),
            })
    }

    async fn delete_held_sale(&self, id: i64) -> ClientResult<()> {
        self.deleted_held.lock().unwrap().push(id);
        self.held.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }

    async fn get_sales_stats(
        &self,
        period: StatsPeriod,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> ClientResult<SalesStats> {
        *self.last_stats_query.lock().unwrap() = Some((
            period,
            start_date.map(str::to_string),
            end_date.map(str::to_string),
        ));
        Ok(self.stats.lock().unwrap().clone())
    }

    async fn get_daily_summary(&self, date: Option<&str>) -> ClientResult<DailySummary> {
        Ok(DailySummary {
            date: date.unwrap_or("2026-08-24").to_string(),
            ..DailySummary::default()
        })
    }

    async fn inventory_report(
        &self,
        date_from: &str,
        date_to: &str,
        status: SaleStatus,
    ) -> ClientResult<Vec<InventoryItem>> {
        *self.last_inventory_query.lock().unwrap() =
            Some((date_from.to_string(), date_to.to_string(), status));
        Ok(self.inventory.lock().unwrap().clone())
    }

    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn create_category(&self, name: &str) -> ClientResult<Category> {
        self.category_mutations.fetch_add(1, Ordering::SeqCst);
        let category = Category {
            id: name.to_uppercase().replace(' ', "_"),
            name: name.to_string(),
        };
        self.categories.lock().unwrap().push(category.clone());
        Ok(category)
    }

    async fn update_category(&self, id: &str, name: &str) -> ClientResult<Category> {
        self.category_mutations.fetch_add(1, Ordering::SeqCst);
        Ok(Category {
            id: id.to_string(),
            name: name.to_string(),
        })
    }

    async fn delete_category(&self, id: &str) -> ClientResult<()> {
        if self.conflict_on_category_delete.swap(false, Ordering::SeqCst) {
            return Err(ClientError::Conflict {
                message: Some("category is referenced".to_string()),
            });
        }
        self.category_mutations.fetch_add(1, Ordering::SeqCst);
        self.categories.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }

    async fn list_products(&self, category: &str, search: &str) -> ClientResult<Vec<Product>> {
        *self.last_product_query.lock().unwrap() =
            Some((category.to_string(), search.to_string()));

        let needle = search.to_lowercase();
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| category == zarlette_core::ALL_CATEGORIES || p.category == category)
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: i64) -> ClientResult<Product> {
        self.products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(ClientError::NotFound {
                message: Some(format!("Product {id} not found")),
            })
    }

    async fn create_product(&self, draft: &ProductDraft) -> ClientResult<Product> {
        self.product_mutations.fetch_add(1, Ordering::SeqCst);
        *self.last_product_draft.lock().unwrap() = Some(draft.clone());

        let mut products = self.products.lock().unwrap();
        let id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let product = Product {
            id,
            name: draft.name.clone(),
            price: draft.price,
            category: draft.category.clone(),
            description: draft.description.clone(),
            image: draft.image.clone(),
        };
        products.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: i64, draft: &ProductDraft) -> ClientResult<Product> {
        self.product_mutations.fetch_add(1, Ordering::SeqCst);
        *self.last_product_draft.lock().unwrap() = Some(draft.clone());
        Ok(Product {
            id,
            name: draft.name.clone(),
            price: draft.price,
            category: draft.category.clone(),
            description: draft.description.clone(),
            image: draft.image.clone(),
        })
    }

    async fn delete_product(&self, id: i64) -> ClientResult<()> {
        self.product_mutations.fetch_add(1, Ordering::SeqCst);
        self.products.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}

/// Context with the seeded fake and nobody logged in.
pub fn test_context_logged_out() -> AppContext {
    AppContext::new(AppConfig::default(), Arc::new(FakeApi::seeded()))
}

/// Context with the seeded fake, logged in as the configured admin, and the
/// catalog cache pre-populated with the fixture products.
pub fn seeded_context() -> (AppContext, Arc<FakeApi>) {
    let api = Arc::new(FakeApi::seeded());
    let ctx = AppContext::new(AppConfig::default(), api.clone());

    ctx.session
        .login("admin", "12345")
        .expect("fixture credentials must match the default config");

    let token = ctx.catalog.begin_fetch();
    ctx.catalog
        .apply_products(token, vec![test_product(1), test_product(2)]);

    (ctx, api)
}
